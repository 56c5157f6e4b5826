use thiserror::Error;

/// Errors that can arise while generating, persisting, or reloading quests.
///
/// Absence ("no active quest", "quest id not found") is never an error; those
/// paths return `Option` instead.
#[derive(Debug, Error)]
pub enum QuestError {
    /// Wrapper around IO errors (directory creation, record reads and writes).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapper around JSON serialization and deserialization errors.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Returned when a quest id cannot safely name a file in the quest directory.
    #[error("invalid quest id: {0}")]
    InvalidQuestId(String),

    /// Returned when a persisted record cannot be rebuilt into a live quest.
    #[error("invalid record {quest_id}: {reason}")]
    InvalidRecord { quest_id: String, reason: String },
}
