//! The active-quest slot for one interactive caller.
//!
//! A session borrows a [`QuestStore`] and tracks at most one quest. Every
//! state change to the active quest is followed by a full re-persist. With
//! no active quest, the mutating operations are silent no-ops.

use log::{info, warn};

use super::errors::QuestError;
use super::narrative::{render_progress, NO_ACTIVE_QUEST};
use super::record::QuestRecord;
use super::store::QuestStore;
use super::types::{MemoryMoment, Quest};
use crate::logutil::escape_log;

pub struct QuestSession<'s> {
    store: &'s QuestStore,
    active: Option<Quest>,
}

impl<'s> QuestSession<'s> {
    pub fn new(store: &'s QuestStore) -> Self {
        Self {
            store,
            active: None,
        }
    }

    pub fn store(&self) -> &QuestStore {
        self.store
    }

    pub fn active(&self) -> Option<&Quest> {
        self.active.as_ref()
    }

    /// Mutable access for objective and artifact updates. Call
    /// [`QuestSession::update_quest`] afterwards to persist them.
    pub fn active_mut(&mut self) -> Option<&mut Quest> {
        self.active.as_mut()
    }

    pub fn has_active(&self) -> bool {
        self.active.is_some()
    }

    /// Track `quest` and persist it immediately. Any previously active quest
    /// stops being tracked; its last saved state stays on disk.
    pub fn start_quest(&mut self, quest: Quest) -> Result<(), QuestError> {
        if let Some(previous) = &self.active {
            warn!(
                "starting {} replaces active quest {}",
                quest.quest_id(),
                previous.quest_id()
            );
        }
        info!(
            "quest started: {} '{}' ({})",
            quest.quest_id(),
            escape_log(quest.title()),
            quest.difficulty()
        );
        let quest = self.active.insert(quest);
        self.store.save(quest)
    }

    /// Re-persist the active quest's full state.
    pub fn update_quest(&mut self) -> Result<(), QuestError> {
        match &self.active {
            Some(quest) => self.store.save(quest),
            None => Ok(()),
        }
    }

    /// Append a memory moment to the active quest and persist it.
    /// `Ok(None)` when no quest is active.
    pub fn add_memory_moment(
        &mut self,
        title: &str,
        description: &str,
        location_hint: Option<&str>,
    ) -> Result<Option<MemoryMoment>, QuestError> {
        let Some(quest) = self.active.as_mut() else {
            return Ok(None);
        };
        let moment = quest
            .add_memory_moment(title, description, location_hint)
            .clone();
        info!(
            "memory moment on {}: {}",
            quest.quest_id(),
            escape_log(title)
        );
        self.store.save(quest)?;
        Ok(Some(moment))
    }

    /// Force-complete the active quest, persist it, write the narrative
    /// export and clear the slot. Returns the completed quest.
    pub fn complete_quest(&mut self) -> Result<Option<Quest>, QuestError> {
        let Some(quest) = self.active.as_mut() else {
            return Ok(None);
        };
        quest.complete();
        self.store.save(quest)?;
        let path = self.store.write_narrative(quest)?;
        info!(
            "quest completed: {} ({}/{} objectives), narrative at {}",
            quest.quest_id(),
            quest.completed_objectives(),
            quest.objectives().len(),
            path.display()
        );
        Ok(self.active.take())
    }

    /// Persist the last state and stop tracking. The record gets no extra mark.
    pub fn abandon_quest(&mut self) -> Result<Option<Quest>, QuestError> {
        self.update_quest()?;
        let abandoned = self.active.take();
        if let Some(quest) = &abandoned {
            info!("quest abandoned: {}", quest.quest_id());
        }
        Ok(abandoned)
    }

    /// Load an unfinished stored quest into the active slot.
    ///
    /// Returns `false` when no record exists or the quest was already completed.
    pub fn resume(&mut self, quest_id: &str) -> Result<bool, QuestError> {
        let Some(record) = self.store.load(quest_id)? else {
            return Ok(false);
        };
        if record.is_completed() {
            info!("not resuming {}: already completed", record.quest_id);
            return Ok(false);
        }
        let quest = record.into_quest()?;
        info!("quest resumed: {}", quest.quest_id());
        self.active = Some(quest);
        Ok(true)
    }

    pub fn load_quest(&self, quest_id: &str) -> Result<Option<QuestRecord>, QuestError> {
        self.store.load(quest_id)
    }

    pub fn list_quests(&self) -> Result<Vec<String>, QuestError> {
        self.store.list()
    }

    pub fn generate_progress_report(&self) -> String {
        match &self.active {
            Some(quest) => render_progress(quest),
            None => NO_ACTIVE_QUEST.to_string(),
        }
    }
}
