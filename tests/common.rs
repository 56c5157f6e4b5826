//! Test utilities & fixtures.
//! Each helper returns the `TempDir` alongside what it built; keep it alive for
//! the duration of the test or the directory disappears.
#![allow(dead_code)] // each test binary uses a different subset

use questbot::quest::{Handler, PlayerContext, QuestStore};
use tempfile::TempDir;

/// Empty quest store in a fresh temp directory.
pub fn temp_store() -> (TempDir, QuestStore) {
    let tmp = TempDir::new().expect("tempdir");
    let store = QuestStore::open(tmp.path().join("quest_logs")).expect("open store");
    (tmp, store)
}

/// Seeded handler so generated content is reproducible.
pub fn seeded_handler(seed: u64) -> Handler {
    Handler::seeded(seed)
}

pub fn context(time: &str, location: &str, conditions: &str, mood: &str) -> PlayerContext {
    PlayerContext::new(time, location, conditions, mood)
}

/// A small spread of contexts covering every keyword table plus unmatched input.
pub fn sample_contexts() -> Vec<PlayerContext> {
    let times = ["morning", "afternoon", "Evening", "late night", "whenever", ""];
    let locations = ["urban downtown", "forest trail", "suburban neighborhood", "park", "beach", ""];
    let conditions = ["sunny", "rainy", "foggy", "snowy", "stormy", "cloudy", ""];
    let moods = ["adventurous", "contemplative", "mysterious", "intense", "curious", ""];

    let mut out = Vec::new();
    for (i, time) in times.iter().enumerate() {
        for (j, location) in locations.iter().enumerate() {
            let condition = conditions[(i + j) % conditions.len()];
            let mood = moods[(i * 2 + j) % moods.len()];
            out.push(PlayerContext::new(*time, *location, condition, mood));
        }
    }
    out
}
