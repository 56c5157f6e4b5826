//! File-backed quest archive.
//!
//! Layout inside the quest directory:
//! - `<quest_id>.json`: the [`QuestRecord`], pretty-printed
//! - `<quest_id>_NARRATIVE.txt`: human-readable export of a completed quest
//!
//! Writes hold an exclusive `fs2` lock on `.questbot.lock` and land through a
//! temp-file rename, so a reader never sees a half-written record.

use fs2::FileExt;
use log::{debug, warn};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use super::errors::QuestError;
use super::ids::QUEST_ID_PREFIX;
use super::narrative::render_narrative;
use super::record::{QuestRecord, QuestSummary};
use super::types::Quest;
use crate::validation::secure_record_path;

const RECORD_SUFFIX: &str = ".json";
const NARRATIVE_SUFFIX: &str = "_NARRATIVE.txt";
const LOCK_FILE: &str = ".questbot.lock";

pub struct QuestStore {
    dir: PathBuf,
}

impl QuestStore {
    /// Open (creating if needed) the quest directory.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, QuestError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        debug!("quest store at {}", dir.display());
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn record_path(&self, quest_id: &str) -> Result<PathBuf, QuestError> {
        secure_record_path(&self.dir, quest_id, RECORD_SUFFIX)
            .map_err(|e| QuestError::InvalidQuestId(format!("{}: {}", quest_id, e)))
    }

    pub fn narrative_path(&self, quest_id: &str) -> Result<PathBuf, QuestError> {
        secure_record_path(&self.dir, quest_id, NARRATIVE_SUFFIX)
            .map_err(|e| QuestError::InvalidQuestId(format!("{}: {}", quest_id, e)))
    }

    /// Write the full record, replacing any previous version.
    pub fn save(&self, quest: &Quest) -> Result<(), QuestError> {
        let path = self.record_path(quest.quest_id())?;
        let json = serde_json::to_string_pretty(&QuestRecord::from(quest))?;
        replace_file(&self.dir, &path, &json)?;
        debug!("saved {}", path.display());
        Ok(())
    }

    /// Load a stored record. `Ok(None)` when no record exists for the id.
    pub fn load(&self, quest_id: &str) -> Result<Option<QuestRecord>, QuestError> {
        let path = self.record_path(quest_id)?;
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let trimmed = raw.trim_start_matches('\0').trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(trimmed)?))
    }

    /// Ids of every stored quest record, sorted.
    pub fn list(&self) -> Result<Vec<String>, QuestError> {
        let mut ids = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            if let Some(stem) = name.strip_suffix(RECORD_SUFFIX) {
                if stem.starts_with(QUEST_ID_PREFIX) {
                    ids.push(stem.to_string());
                }
            }
        }
        ids.sort();
        Ok(ids)
    }

    /// Summaries of every readable record. Unreadable files are skipped with a warning.
    pub fn summaries(&self) -> Result<Vec<QuestSummary>, QuestError> {
        let mut out = Vec::new();
        for id in self.list()? {
            match self.load(&id) {
                Ok(Some(record)) => out.push(record.summary()),
                Ok(None) => {}
                Err(e) => warn!("skipping unreadable quest record {}: {}", id, e),
            }
        }
        Ok(out)
    }

    /// Export the narrative text for `quest`, returning the file path.
    pub fn write_narrative(&self, quest: &Quest) -> Result<PathBuf, QuestError> {
        let path = self.narrative_path(quest.quest_id())?;
        replace_file(&self.dir, &path, &render_narrative(quest))?;
        debug!("wrote narrative {}", path.display());
        Ok(path)
    }
}

/// Swap `path` for a file holding `content`.
///
/// The bytes are staged in a temp file inside the quest directory and renamed
/// over the target while the store lock is held. A failed rename drops the
/// staged file.
fn replace_file(dir: &Path, path: &Path, content: &str) -> io::Result<()> {
    let lock = OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(dir.join(LOCK_FILE))?;
    lock.lock_exclusive()?;

    let mut staged = NamedTempFile::new_in(dir)?;
    staged.write_all(content.as_bytes())?;
    staged.as_file().sync_all()?;
    staged.persist(path).map_err(|e| e.error)?;

    if let Ok(handle) = File::open(dir) {
        let _ = handle.sync_all();
    }
    FileExt::unlock(&lock)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quest::handler::Handler;
    use crate::quest::types::PlayerContext;
    use tempfile::TempDir;

    fn quest() -> Quest {
        Handler::seeded(2).generate_quest(&PlayerContext::new(
            "morning", "park", "sunny", "curious",
        ))
    }

    #[test]
    fn save_then_load() {
        let tmp = TempDir::new().unwrap();
        let store = QuestStore::open(tmp.path().join("quest_logs")).unwrap();
        let quest = quest();
        store.save(&quest).unwrap();

        let record = store.load(quest.quest_id()).unwrap().unwrap();
        assert_eq!(record.into_quest().unwrap(), quest);
        assert!(store.load("QUEST-19990101-001").unwrap().is_none());
    }

    #[test]
    fn save_leaves_no_temp_files() {
        let tmp = TempDir::new().unwrap();
        let store = QuestStore::open(tmp.path()).unwrap();
        let quest = quest();
        store.save(&quest).unwrap();
        store.save(&quest).unwrap();

        let mut names: Vec<_> = fs::read_dir(tmp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        names.sort();
        assert_eq!(
            names,
            vec![LOCK_FILE.to_string(), format!("{}.json", quest.quest_id())]
        );
    }

    #[test]
    fn list_ignores_foreign_files() {
        let tmp = TempDir::new().unwrap();
        let store = QuestStore::open(tmp.path()).unwrap();
        let quest = quest();
        store.save(&quest).unwrap();
        store.write_narrative(&quest).unwrap();
        fs::write(tmp.path().join("notes.json"), "{}").unwrap();
        fs::write(tmp.path().join(".QUEST-1.json.tmp-1-0"), "").unwrap();

        assert_eq!(store.list().unwrap(), vec![quest.quest_id().to_string()]);
    }

    #[test]
    fn failed_replace_keeps_previous_file() {
        let tmp = TempDir::new().unwrap();
        let store = QuestStore::open(tmp.path()).unwrap();
        let quest = quest();
        let blocked = store.narrative_path(quest.quest_id()).unwrap();
        fs::create_dir(&blocked).unwrap();

        assert!(matches!(store.write_narrative(&quest), Err(QuestError::Io(_))));
        assert!(blocked.is_dir());
        let leftovers = fs::read_dir(tmp.path())
            .unwrap()
            .filter(|e| {
                let name = e.as_ref().unwrap().file_name().into_string().unwrap();
                name.starts_with(".tmp")
            })
            .count();
        assert_eq!(leftovers, 0);
    }

    #[test]
    fn rejects_unsafe_ids() {
        let tmp = TempDir::new().unwrap();
        let store = QuestStore::open(tmp.path()).unwrap();
        assert!(matches!(
            store.load("../escape"),
            Err(QuestError::InvalidQuestId(_))
        ));
    }

    #[test]
    fn corrupt_record_is_an_error_and_skipped_in_summaries() {
        let tmp = TempDir::new().unwrap();
        let store = QuestStore::open(tmp.path()).unwrap();
        fs::write(tmp.path().join("QUEST-20240101-009.json"), "{not json").unwrap();
        let quest = quest();
        store.save(&quest).unwrap();

        assert!(matches!(
            store.load("QUEST-20240101-009"),
            Err(QuestError::Json(_))
        ));
        let summaries = store.summaries().unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].quest_id, quest.quest_id());
    }
}
