//! Quest generation, lifecycle tracking, and persistence.
//!
//! [`Handler`] turns a [`PlayerContext`] into a [`Quest`]; a [`QuestSession`]
//! tracks one active quest at a time and persists every change through a
//! [`QuestStore`].

pub mod content;
pub mod difficulty;
pub mod errors;
pub mod handler;
pub mod ids;
pub mod narrative;
pub mod record;
pub mod select;
pub mod session;
pub mod store;
pub mod types;

pub use difficulty::classify;
pub use errors::QuestError;
pub use handler::Handler;
pub use ids::{IdAllocator, SessionCounter, StoreCounter};
pub use narrative::{render_narrative, render_progress};
pub use record::{QuestRecord, QuestSummary};
pub use session::QuestSession;
pub use store::QuestStore;
pub use types::{
    Artifact, Difficulty, MemoryMoment, Objective, ObjectiveStatus, PlayerContext, Quest,
};
