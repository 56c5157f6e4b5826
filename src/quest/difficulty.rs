//! Difficulty classification from player context.
//!
//! One point for a challenging condition, one for a challenging mood:
//! 0 → Reconnaissance, 1 → Standard, 2 → Challenging. Legendary is reserved
//! for manual assignment and never returned here.
use super::select::contains_any;
use super::types::{Difficulty, PlayerContext};

pub const CHALLENGING_CONDITIONS: &[&str] = &["foggy", "rainy", "stormy", "snowy"];
pub const CHALLENGING_MOODS: &[&str] = &["mysterious", "contemplative", "intense"];

/// Challenge score in `0..=2`.
pub fn challenge_score(context: &PlayerContext) -> u8 {
    u8::from(contains_any(context.conditions(), CHALLENGING_CONDITIONS))
        + u8::from(contains_any(context.mood(), CHALLENGING_MOODS))
}

pub fn classify(context: &PlayerContext) -> Difficulty {
    match challenge_score(context) {
        0 => Difficulty::Reconnaissance,
        1 => Difficulty::Standard,
        _ => Difficulty::Challenging,
    }
}
