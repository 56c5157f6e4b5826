//! Quest data model: the aggregate [`Quest`] and the entities it owns.
//!
//! Status fields are private. They change only through [`Objective::complete`],
//! [`Objective::fail`], [`Artifact::discover`], [`Quest::add_memory_moment`] and
//! [`Quest::complete`].

use chrono::{Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Current local time truncated to whole seconds, the precision records are written with.
pub(crate) fn now() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

/// Serde helpers for ISO-8601 local timestamps with second precision.
///
/// Parsing also accepts a fractional part so older records written with
/// microseconds still load.
pub(crate) mod timestamp {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
    const PARSE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

    pub fn serialize<S: Serializer>(ts: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&ts.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        NaiveDateTime::parse_from_str(&raw, PARSE_FORMAT).map_err(serde::de::Error::custom)
    }

    pub mod option {
        use super::{FORMAT, PARSE_FORMAT};
        use chrono::NaiveDateTime;
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            ts: &Option<NaiveDateTime>,
            s: S,
        ) -> Result<S::Ok, S::Error> {
            match ts {
                Some(ts) => s.serialize_str(&ts.format(FORMAT).to_string()),
                None => s.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            d: D,
        ) -> Result<Option<NaiveDateTime>, D::Error> {
            match Option::<String>::deserialize(d)? {
                Some(raw) if !raw.is_empty() => NaiveDateTime::parse_from_str(&raw, PARSE_FORMAT)
                    .map(Some)
                    .map_err(serde::de::Error::custom),
                _ => Ok(None),
            }
        }
    }
}

/// Optional free text that is written as `""` when absent.
mod empty_as_none {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<String>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(value.as_deref().unwrap_or(""))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(Option::<String>::deserialize(d)?.filter(|s| !s.is_empty()))
    }
}

/// Quest difficulty tiers, ordered from lightest to heaviest.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Reconnaissance,
    #[default]
    Standard,
    Challenging,
    /// Never produced by the classifier; only reachable through manual assignment.
    Legendary,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Reconnaissance,
        Difficulty::Standard,
        Difficulty::Challenging,
        Difficulty::Legendary,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Reconnaissance => "reconnaissance",
            Difficulty::Standard => "standard",
            Difficulty::Challenging => "challenging",
            Difficulty::Legendary => "legendary",
        }
    }

    /// Number of objectives drawn for a quest of this tier.
    pub fn objective_count(&self) -> usize {
        match self {
            Difficulty::Reconnaissance => 3,
            Difficulty::Standard => 4,
            Difficulty::Challenging => 5,
            Difficulty::Legendary => 6,
        }
    }

    pub fn parse(raw: &str) -> Option<Difficulty> {
        let lower = raw.trim().to_lowercase();
        Difficulty::ALL.into_iter().find(|d| d.as_str() == lower)
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The four free-text inputs a quest is generated from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerContext {
    time: String,
    location: String,
    conditions: String,
    mood: String,
}

impl PlayerContext {
    pub fn new(
        time: impl Into<String>,
        location: impl Into<String>,
        conditions: impl Into<String>,
        mood: impl Into<String>,
    ) -> Self {
        Self {
            time: time.into(),
            location: location.into(),
            conditions: conditions.into(),
            mood: mood.into(),
        }
    }

    pub fn time(&self) -> &str {
        &self.time
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn conditions(&self) -> &str {
        &self.conditions
    }

    pub fn mood(&self) -> &str {
        &self.mood
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectiveStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Failed,
}

impl ObjectiveStatus {
    /// ✓ completed, ✗ failed, ○ anything else.
    pub fn glyph(&self) -> char {
        match self {
            ObjectiveStatus::Completed => '✓',
            ObjectiveStatus::Failed => '✗',
            ObjectiveStatus::Pending | ObjectiveStatus::InProgress => '○',
        }
    }
}

/// A trackable sub-task within a quest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Objective {
    description: String,
    #[serde(default)]
    status: ObjectiveStatus,
    #[serde(default)]
    notes: String,
    #[serde(default, alias = "completedAt", with = "timestamp::option")]
    completed_at: Option<NaiveDateTime>,
}

impl Objective {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            status: ObjectiveStatus::Pending,
            notes: String::new(),
            completed_at: None,
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn status(&self) -> ObjectiveStatus {
        self.status
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn completed_at(&self) -> Option<NaiveDateTime> {
        self.completed_at
    }

    pub fn is_complete(&self) -> bool {
        self.status == ObjectiveStatus::Completed
    }

    /// Mark completed now. Existing notes survive unless non-empty notes are given.
    ///
    /// There is no guard against re-transition: completing a failed objective
    /// simply overwrites its status.
    pub fn complete(&mut self, notes: Option<&str>) {
        self.status = ObjectiveStatus::Completed;
        self.completed_at = Some(now());
        self.overwrite_notes(notes);
    }

    /// Mark failed. `completed_at` is cleared so it stays set only while completed.
    pub fn fail(&mut self, notes: Option<&str>) {
        self.status = ObjectiveStatus::Failed;
        self.completed_at = None;
        self.overwrite_notes(notes);
    }

    fn overwrite_notes(&mut self, notes: Option<&str>) {
        if let Some(notes) = notes.filter(|n| !n.is_empty()) {
            self.notes = notes.to_string();
        }
    }
}

/// A discoverable item or detail within a quest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    name: String,
    description: String,
    #[serde(default)]
    discovered: bool,
    #[serde(default, alias = "discoveryNotes")]
    discovery_notes: String,
    #[serde(default, alias = "discoveredAt", with = "timestamp::option")]
    discovered_at: Option<NaiveDateTime>,
}

impl Artifact {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            discovered: false,
            discovery_notes: String::new(),
            discovered_at: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_discovered(&self) -> bool {
        self.discovered
    }

    pub fn discovery_notes(&self) -> &str {
        &self.discovery_notes
    }

    pub fn discovered_at(&self) -> Option<NaiveDateTime> {
        self.discovered_at
    }

    /// ★ discovered, ☆ not yet.
    pub fn glyph(&self) -> char {
        if self.discovered {
            '★'
        } else {
            '☆'
        }
    }

    /// Mark discovered now. Unlike objectives, the notes are always replaced,
    /// even by an empty string.
    pub fn discover(&mut self, notes: Option<&str>) {
        self.discovered = true;
        self.discovered_at = Some(now());
        self.discovery_notes = notes.unwrap_or_default().to_string();
    }
}

/// A free-form, timestamped note appended by the player. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryMoment {
    title: String,
    description: String,
    #[serde(with = "timestamp")]
    timestamp: NaiveDateTime,
    #[serde(default, alias = "locationHint", with = "empty_as_none")]
    location_hint: Option<String>,
}

impl MemoryMoment {
    pub(crate) fn new(title: &str, description: &str, location_hint: Option<&str>) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            timestamp: now(),
            location_hint: location_hint
                .filter(|hint| !hint.is_empty())
                .map(str::to_string),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    pub fn location_hint(&self) -> Option<&str> {
        self.location_hint.as_deref()
    }
}

/// The aggregate unit of generated content and tracked progress.
#[derive(Debug, Clone, PartialEq)]
pub struct Quest {
    pub(crate) quest_id: String,
    pub(crate) title: String,
    pub(crate) transmission: String,
    pub(crate) objectives: Vec<Objective>,
    pub(crate) side_intelligence: Vec<String>,
    pub(crate) artifacts: Vec<Artifact>,
    pub(crate) memory_moments: Vec<MemoryMoment>,
    pub(crate) difficulty: Difficulty,
    pub(crate) created_at: NaiveDateTime,
    pub(crate) completed_at: Option<NaiveDateTime>,
    pub(crate) context: Option<PlayerContext>,
}

impl Quest {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        quest_id: String,
        title: String,
        transmission: String,
        objectives: Vec<Objective>,
        side_intelligence: Vec<String>,
        artifacts: Vec<Artifact>,
        difficulty: Difficulty,
        context: PlayerContext,
    ) -> Self {
        Self {
            quest_id,
            title,
            transmission,
            objectives,
            side_intelligence,
            artifacts,
            memory_moments: Vec::new(),
            difficulty,
            created_at: now(),
            completed_at: None,
            context: Some(context),
        }
    }

    pub fn quest_id(&self) -> &str {
        &self.quest_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn transmission(&self) -> &str {
        &self.transmission
    }

    pub fn objectives(&self) -> &[Objective] {
        &self.objectives
    }

    pub fn side_intelligence(&self) -> &[String] {
        &self.side_intelligence
    }

    pub fn artifacts(&self) -> &[Artifact] {
        &self.artifacts
    }

    pub fn memory_moments(&self) -> &[MemoryMoment] {
        &self.memory_moments
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }

    pub fn completed_at(&self) -> Option<NaiveDateTime> {
        self.completed_at
    }

    pub fn context(&self) -> Option<&PlayerContext> {
        self.context.as_ref()
    }

    /// Objective at `index`, for status changes. Callers own bounds checking.
    pub fn objective_mut(&mut self, index: usize) -> Option<&mut Objective> {
        self.objectives.get_mut(index)
    }

    /// Artifact at `index`, for discovery. Callers own bounds checking.
    pub fn artifact_mut(&mut self, index: usize) -> Option<&mut Artifact> {
        self.artifacts.get_mut(index)
    }

    pub fn completed_objectives(&self) -> usize {
        self.objectives.iter().filter(|o| o.is_complete()).count()
    }

    pub fn discovered_artifacts(&self) -> usize {
        self.artifacts.iter().filter(|a| a.is_discovered()).count()
    }

    /// True when every objective is completed. Independent of [`Quest::complete`].
    pub fn is_completed(&self) -> bool {
        self.objectives.iter().all(Objective::is_complete)
    }

    pub fn add_memory_moment(
        &mut self,
        title: &str,
        description: &str,
        location_hint: Option<&str>,
    ) -> &MemoryMoment {
        self.memory_moments
            .push(MemoryMoment::new(title, description, location_hint));
        &self.memory_moments[self.memory_moments.len() - 1]
    }

    /// Stamp the quest as completed now, whatever state its objectives are in.
    /// A quest that already carries a completion stamp keeps it.
    pub fn complete(&mut self) {
        self.completed_at.get_or_insert_with(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quest_with(objectives: &[&str]) -> Quest {
        Quest::new(
            "QUEST-20240101-001".into(),
            "The Dawn Grove".into(),
            "Agent,".into(),
            objectives.iter().map(|d| Objective::new(*d)).collect(),
            vec!["hint".into()],
            vec![Artifact::new("Ghost Sign", "Faded signage")],
            Difficulty::Reconnaissance,
            PlayerContext::new("morning", "forest", "sunny", "curious"),
        )
    }

    #[test]
    fn complete_without_notes_keeps_previous_notes() {
        let mut obj = Objective::new("Find the oldest tree");
        obj.fail(Some("too dark"));
        obj.complete(None);
        assert_eq!(obj.notes(), "too dark");
        obj.complete(Some(""));
        assert_eq!(obj.notes(), "too dark");
        obj.complete(Some("found it"));
        assert_eq!(obj.notes(), "found it");
        assert_eq!(obj.status(), ObjectiveStatus::Completed);
        assert!(obj.completed_at().is_some());
    }

    #[test]
    fn fail_after_complete_clears_timestamp() {
        let mut obj = Objective::new("Listen");
        obj.complete(None);
        obj.fail(None);
        assert_eq!(obj.status(), ObjectiveStatus::Failed);
        assert!(obj.completed_at().is_none());
    }

    #[test]
    fn discover_always_overwrites_notes() {
        let mut art = Artifact::new("Human Trace", "A mark left by someone");
        art.discover(Some("chalk arrow"));
        assert_eq!(art.discovery_notes(), "chalk arrow");
        art.discover(Some(""));
        assert_eq!(art.discovery_notes(), "");
        assert!(art.is_discovered());
        assert!(art.discovered_at().is_some());
    }

    #[test]
    fn completion_predicate_and_forced_completion_are_independent() {
        let mut quest = quest_with(&["a", "b"]);
        assert!(!quest.is_completed());
        quest.complete();
        let stamped = quest.completed_at();
        assert!(stamped.is_some());
        assert!(!quest.is_completed());
        quest.completed_at = Some(stamped.unwrap() - chrono::Duration::hours(1));
        let earlier = quest.completed_at();
        quest.complete();
        assert_eq!(quest.completed_at(), earlier, "second complete keeps the stamp");

        let mut quest = quest_with(&["a", "b"]);
        for i in 0..2 {
            quest.objective_mut(i).unwrap().complete(None);
        }
        assert!(quest.is_completed());
        assert!(quest.completed_at().is_none());
    }

    #[test]
    fn memory_moments_keep_insertion_order() {
        let mut quest = quest_with(&["a"]);
        quest.add_memory_moment("first", "the gate", None);
        let second = quest.add_memory_moment("second", "the bridge", Some("north bank"));
        assert_eq!(second.location_hint(), Some("north bank"));
        let titles: Vec<_> = quest.memory_moments().iter().map(|m| m.title()).collect();
        assert_eq!(titles, vec!["first", "second"]);
    }

    #[test]
    fn difficulty_parse_is_case_insensitive() {
        assert_eq!(Difficulty::parse("LEGENDARY"), Some(Difficulty::Legendary));
        assert_eq!(Difficulty::parse("epic"), None);
    }

    #[test]
    fn glyphs() {
        assert_eq!(ObjectiveStatus::Completed.glyph(), '✓');
        assert_eq!(ObjectiveStatus::Failed.glyph(), '✗');
        assert_eq!(ObjectiveStatus::InProgress.glyph(), '○');
        let mut art = Artifact::new("x", "y");
        assert_eq!(art.glyph(), '☆');
        art.discover(None);
        assert_eq!(art.glyph(), '★');
    }
}
