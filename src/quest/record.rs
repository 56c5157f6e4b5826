//! On-disk quest record schema.
//!
//! One JSON object per quest. Field names are snake_case and the player's
//! context is written under `player_input`. camelCase aliases are accepted on
//! load, unknown fields are ignored, and optional fields default so older
//! records still load.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::errors::QuestError;
use super::types::{
    timestamp, Artifact, Difficulty, MemoryMoment, Objective, PlayerContext, Quest,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestRecord {
    #[serde(alias = "questId")]
    pub quest_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub transmission: String,
    #[serde(default)]
    pub objectives: Vec<Objective>,
    #[serde(default, alias = "sideIntelligence")]
    pub side_intelligence: Vec<String>,
    #[serde(default)]
    pub artifacts: Vec<Artifact>,
    #[serde(default, alias = "memoryMoments")]
    pub memory_moments: Vec<MemoryMoment>,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(alias = "createdAt", with = "timestamp")]
    pub created_at: NaiveDateTime,
    #[serde(default, alias = "completedAt", with = "timestamp::option")]
    pub completed_at: Option<NaiveDateTime>,
    #[serde(
        default,
        rename = "player_input",
        alias = "player_context",
        alias = "playerContext"
    )]
    pub player_context: Option<PlayerContext>,
}

impl QuestRecord {
    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }

    pub fn summary(&self) -> QuestSummary {
        QuestSummary {
            quest_id: self.quest_id.clone(),
            title: self.title.clone(),
            difficulty: self.difficulty,
            completed: self.is_completed(),
        }
    }

    /// Rebuild a live quest, e.g. to resume tracking it.
    pub fn into_quest(self) -> Result<Quest, QuestError> {
        if self.quest_id.trim().is_empty() {
            return Err(QuestError::InvalidRecord {
                quest_id: self.quest_id,
                reason: "missing quest id".to_string(),
            });
        }
        Ok(Quest {
            quest_id: self.quest_id,
            title: self.title,
            transmission: self.transmission,
            objectives: self.objectives,
            side_intelligence: self.side_intelligence,
            artifacts: self.artifacts,
            memory_moments: self.memory_moments,
            difficulty: self.difficulty,
            created_at: self.created_at,
            completed_at: self.completed_at,
            context: self.player_context,
        })
    }
}

impl From<&Quest> for QuestRecord {
    fn from(quest: &Quest) -> Self {
        Self {
            quest_id: quest.quest_id.clone(),
            title: quest.title.clone(),
            transmission: quest.transmission.clone(),
            objectives: quest.objectives.clone(),
            side_intelligence: quest.side_intelligence.clone(),
            artifacts: quest.artifacts.clone(),
            memory_moments: quest.memory_moments.clone(),
            difficulty: quest.difficulty,
            created_at: quest.created_at,
            completed_at: quest.completed_at,
            player_context: quest.context.clone(),
        }
    }
}

/// Archive listing line for a stored quest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestSummary {
    pub quest_id: String,
    pub title: String,
    pub difficulty: Difficulty,
    pub completed: bool,
}

impl QuestSummary {
    pub fn status_label(&self) -> &'static str {
        if self.completed {
            "COMPLETED"
        } else {
            "INCOMPLETE"
        }
    }
}
