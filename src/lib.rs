//! # Quest-Bot - procedurally generated exploration quests
//!
//! Quest-Bot turns four short descriptions of the player's surroundings (time of
//! day, location, weather, mood) into an exploration quest issued by "The
//! Handler": a themed title, a narrative transmission, objectives to complete,
//! artifacts to discover and side intelligence. Progress is tracked per quest and
//! persisted as JSON, with a narrative export written on completion.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use questbot::quest::{Handler, PlayerContext, QuestSession, QuestStore};
//!
//! fn main() -> anyhow::Result<()> {
//!     let store = QuestStore::open("quest_logs")?;
//!     let mut session = QuestSession::new(&store);
//!     let mut handler = Handler::new();
//!
//!     let quest = handler.generate_quest(&PlayerContext::new(
//!         "evening", "forest trail", "foggy", "mysterious",
//!     ));
//!     session.start_quest(quest)?;
//!
//!     if let Some(objective) = session.active_mut().and_then(|q| q.objective_mut(0)) {
//!         objective.complete(Some("Found the oldest oak"));
//!     }
//!     session.update_quest()?;
//!     println!("{}", session.generate_progress_report());
//!     session.complete_quest()?;
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`quest`] - generation, data model, lifecycle session and persistence
//! - [`console`] - interactive menu used by `questbot play`
//! - [`config`] - TOML configuration
//! - [`validation`] - quest id and free-text checks
//! - [`logutil`] - single-line escaping for logged player text

pub mod config;
pub mod console;
pub mod logutil;
pub mod quest;
pub mod validation;
