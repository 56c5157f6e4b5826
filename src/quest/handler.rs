//! The Handler: turns a [`PlayerContext`] into a complete [`Quest`].
//!
//! Structure is deterministic (objective count follows the difficulty tier, the
//! transmission always has the same six blocks) while content is drawn from the
//! fixed tables in [`super::content`]. Randomness and identifier allocation are
//! injected so tests can seed generation and services can avoid id collisions
//! across restarts.

use chrono::Utc;
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::content::{self, render_title, TITLE_TEMPLATES};
use super::difficulty::classify;
use super::ids::{IdAllocator, SessionCounter};
use super::select::{pick, resolve, resolve_or, sample};
use super::types::{Artifact, Difficulty, Objective, PlayerContext, Quest};

/// Quest generator.
pub struct Handler<R = StdRng, A = SessionCounter> {
    rng: R,
    ids: A,
}

impl Handler {
    /// Entropy-seeded generator with a process-local id counter.
    pub fn new() -> Self {
        Handler::with_parts(StdRng::from_entropy(), SessionCounter::new())
    }

    /// Reproducible generator: the same seed and contexts yield the same quests.
    pub fn seeded(seed: u64) -> Self {
        Handler::with_parts(StdRng::seed_from_u64(seed), SessionCounter::new())
    }
}

impl Default for Handler {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng, A: IdAllocator> Handler<R, A> {
    pub fn with_parts(rng: R, ids: A) -> Self {
        Self { rng, ids }
    }

    /// Generate a quest whose tier comes from [`classify`].
    pub fn generate_quest(&mut self, context: &PlayerContext) -> Quest {
        let difficulty = classify(context);
        self.generate_quest_with_difficulty(context, difficulty)
    }

    /// Generate a quest at an explicitly assigned tier. This is the only way to
    /// obtain a Legendary quest.
    pub fn generate_quest_with_difficulty(
        &mut self,
        context: &PlayerContext,
        difficulty: Difficulty,
    ) -> Quest {
        let quest_id = self.ids.allocate(Utc::now().date_naive());

        let title = self.title(context);
        let transmission = self.transmission(context, difficulty);
        let objectives = self.objectives(context, difficulty);
        let side_intelligence = self.side_intelligence(context);
        let artifacts = self.artifacts(context);

        debug!(
            "Handler issued {} '{}' ({}, {} objectives, {} artifacts)",
            quest_id,
            title,
            difficulty,
            objectives.len(),
            artifacts.len()
        );

        Quest::new(
            quest_id,
            title,
            transmission,
            objectives,
            side_intelligence,
            artifacts,
            difficulty,
            context.clone(),
        )
    }

    fn title(&mut self, context: &PlayerContext) -> String {
        let time_pool = resolve_or(context.time(), content::TIME_THEMES, content::DEFAULT_TIME_KEY);
        let location_pool = resolve_or(
            context.location(),
            content::LOCATION_THEMES,
            content::DEFAULT_LOCATION_KEY,
        );
        let time_word = pick(&mut self.rng, *time_pool).copied().unwrap_or_default();
        let location_word = pick(&mut self.rng, *location_pool)
            .copied()
            .unwrap_or_default();
        let template = self.rng.gen_range(0..TITLE_TEMPLATES);
        render_title(template, time_word, location_word)
    }

    fn transmission(&mut self, context: &PlayerContext, difficulty: Difficulty) -> String {
        let greeting = pick(&mut self.rng, content::GREETINGS)
            .copied()
            .unwrap_or_default();
        let signature = pick(&mut self.rng, content::SIGNATURE_PHRASES)
            .copied()
            .unwrap_or_default();

        let context_line = context_sentence(context);
        let briefing = mission_briefing(context, difficulty);

        [
            greeting,
            context_line.as_str(),
            briefing.as_str(),
            content::CLOSING_INSTRUCTION,
            signature,
            content::SIGN_OFF,
        ]
        .join("\n\n")
    }

    fn objectives(&mut self, context: &PlayerContext, difficulty: Difficulty) -> Vec<Objective> {
        let mut pool = content::BASE_OBJECTIVES.to_vec();
        if let Some(extra) = resolve(context.location(), content::LOCATION_OBJECTIVES) {
            pool.extend_from_slice(*extra);
        }
        sample(&mut self.rng, &pool, difficulty.objective_count())
            .into_iter()
            .map(Objective::new)
            .collect()
    }

    fn side_intelligence(&mut self, context: &PlayerContext) -> Vec<String> {
        let mut pool = content::BASE_INTELLIGENCE.to_vec();
        if let Some(hint) = resolve(context.conditions(), content::CONDITION_INTELLIGENCE) {
            pool.push(*hint);
        }
        if let Some(hint) = resolve(context.time(), content::TIME_INTELLIGENCE) {
            pool.push(*hint);
        }
        sample(&mut self.rng, &pool, content::SIDE_INTELLIGENCE_DRAW)
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    fn artifacts(&mut self, context: &PlayerContext) -> Vec<Artifact> {
        let mut pool = content::BASE_ARTIFACTS.to_vec();
        if let Some(extra) = resolve(context.location(), content::LOCATION_ARTIFACTS) {
            pool.extend_from_slice(*extra);
        }
        sample(&mut self.rng, &pool, content::ARTIFACT_DRAW)
            .into_iter()
            .map(|(name, description)| Artifact::new(name, description))
            .collect()
    }
}

/// "The coordinates indicate <location>, <time clause>. <conditions clause>"
///
/// The raw location is interpolated verbatim.
pub fn context_sentence(context: &PlayerContext) -> String {
    let time = resolve_or(context.time(), content::TIME_CLAUSES, content::DEFAULT_TIME_KEY);
    let conditions = resolve_or(
        context.conditions(),
        content::CONDITION_CLAUSES,
        content::DEFAULT_CONDITIONS_KEY,
    );
    format!(
        "The coordinates indicate {}, {}. {}",
        context.location(),
        time,
        conditions
    )
}

/// Mood clause followed by the tier's instruction.
pub fn mission_briefing(context: &PlayerContext, difficulty: Difficulty) -> String {
    let mood = resolve_or(context.mood(), content::MOOD_CLAUSES, content::DEFAULT_MOOD_KEY);
    format!("{} {}", mood, content::difficulty_clause(difficulty))
}
