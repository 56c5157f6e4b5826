//! Session + store behaviour across the quest lifecycle.

mod common;

use std::collections::HashSet;
use std::fs;

use common::{context, seeded_handler, temp_store};
use rand::rngs::StdRng;
use rand::SeedableRng;
use questbot::quest::narrative::NO_ACTIVE_QUEST;
use questbot::quest::{
    Difficulty, Handler, IdAllocator, QuestRecord, QuestSession, QuestStore, StoreCounter,
};

#[test]
fn saved_quest_loads_back_with_same_shape() {
    let (_tmp, store) = temp_store();
    let mut session = QuestSession::new(&store);
    let quest = seeded_handler(10).generate_quest(&context("morning", "park", "rainy", "curious"));
    let (id, title, difficulty) = (
        quest.quest_id().to_string(),
        quest.title().to_string(),
        quest.difficulty(),
    );
    let (objectives, artifacts) = (quest.objectives().len(), quest.artifacts().len());
    session.start_quest(quest).unwrap();

    let record = session.load_quest(&id).unwrap().expect("record persisted on start");
    assert_eq!(record.quest_id, id);
    assert_eq!(record.title, title);
    assert_eq!(record.difficulty, difficulty);
    assert_eq!(record.objectives.len(), objectives);
    assert_eq!(record.artifacts.len(), artifacts);
    assert!(session.load_quest("QUEST-20000101-001").unwrap().is_none());
}

#[test]
fn list_returns_exactly_the_persisted_ids() {
    let (_tmp, store) = temp_store();
    let mut session = QuestSession::new(&store);
    let mut handler = seeded_handler(11);

    let q1 = handler.generate_quest(&context("evening", "urban", "foggy", "intense"));
    let q2 = handler.generate_quest(&context("night", "forest", "clear", "calm"));
    let expected: HashSet<String> = [q1.quest_id().to_string(), q2.quest_id().to_string()].into();

    session.start_quest(q1).unwrap();
    session.complete_quest().unwrap();
    session.start_quest(q2).unwrap();

    let listed: HashSet<String> = session.list_quests().unwrap().into_iter().collect();
    assert_eq!(listed, expected);
}

#[test]
fn progress_report_counts() {
    let (_tmp, store) = temp_store();
    let mut session = QuestSession::new(&store);
    assert_eq!(session.generate_progress_report(), NO_ACTIVE_QUEST);

    // one challenging signal: Standard, 4 objectives
    let quest = seeded_handler(12).generate_quest(&context("morning", "urban", "rainy", "calm"));
    assert_eq!(quest.difficulty(), Difficulty::Standard);
    session.start_quest(quest).unwrap();

    let active = session.active_mut().unwrap();
    active.objective_mut(0).unwrap().complete(None);
    active.objective_mut(3).unwrap().complete(Some("mural behind the laundromat"));
    active.artifact_mut(2).unwrap().discover(None);
    session.update_quest().unwrap();

    let report = session.generate_progress_report();
    assert!(report.contains("OBJECTIVES: 2/4 completed"));
    assert!(report.contains("ARTIFACTS: 1/3 discovered"));

    let quest = session.active().unwrap();
    for (i, obj) in quest.objectives().iter().enumerate() {
        let glyph = if i == 0 || i == 3 { '✓' } else { '○' };
        assert!(report.contains(&format!("  {} {}. {}", glyph, i + 1, obj.description())));
    }
    for (i, art) in quest.artifacts().iter().enumerate() {
        let glyph = if i == 2 { '★' } else { '☆' };
        assert!(report.contains(&format!("  {} {}", glyph, art.name())));
    }
}

#[test]
fn forced_completion_writes_narrative_export() {
    let (_tmp, store) = temp_store();
    let mut session = QuestSession::new(&store);
    let quest = seeded_handler(13).generate_quest(&context("afternoon", "suburban", "sunny", "energetic"));
    let id = quest.quest_id().to_string();
    session.start_quest(quest).unwrap();

    session.active_mut().unwrap().objective_mut(1).unwrap().fail(Some("gate locked"));
    session
        .add_memory_moment("Sprinklers", "Rainbows over the lawns", Some("Maple Ave"))
        .unwrap()
        .expect("active quest accepts moments");

    let done = session.complete_quest().unwrap().expect("active quest completes");
    assert!(!done.is_completed(), "completion is forced, not derived");
    assert!(done.completed_at().is_some());
    assert!(session.active().is_none());

    let narrative = fs::read_to_string(store.narrative_path(&id).unwrap()).unwrap();
    assert!(narrative.starts_with(&"=".repeat(70)));
    assert!(narrative.contains(&format!("Mission ID: {}", id)));
    assert!(narrative.contains("Difficulty: RECONNAISSANCE"));
    assert!(!narrative.contains("IN PROGRESS"));
    assert!(narrative.contains("   Notes: gate locked"));
    assert!(narrative.contains("MEMORY MOMENTS:"));
    assert!(narrative.contains("  Location: Maple Ave"));
    assert!(narrative.contains("The Handler's work is never done. Until next time, Operative."));

    let record = store.load(&id).unwrap().unwrap();
    assert!(record.is_completed());
    assert_eq!(record.memory_moments.len(), 1);
}

#[test]
fn no_active_quest_operations_are_silent() {
    let (_tmp, store) = temp_store();
    let mut session = QuestSession::new(&store);
    session.update_quest().unwrap();
    assert!(session.add_memory_moment("a", "b", None).unwrap().is_none());
    assert!(session.complete_quest().unwrap().is_none());
    assert!(store.list().unwrap().is_empty());
}

#[test]
fn store_counter_avoids_restart_collisions() {
    let (_tmp, store) = temp_store();

    // First "process"
    {
        let mut session = QuestSession::new(&store);
        let mut handler = seeded_handler(1);
        for _ in 0..2 {
            let quest = handler.generate_quest(&context("night", "park", "clear", "calm"));
            session.start_quest(quest).unwrap();
        }
    }

    // Second "process" with a fresh allocator seeded from the store index
    let ids: Box<dyn IdAllocator> = Box::new(StoreCounter::new(store.list().unwrap()));
    let mut handler = Handler::with_parts(StdRng::seed_from_u64(1), ids);
    let quest = handler.generate_quest(&context("night", "park", "clear", "calm"));
    assert!(quest.quest_id().ends_with("-003"));
    assert!(!store.list().unwrap().contains(&quest.quest_id().to_string()));
}

#[test]
fn legacy_camel_case_record_is_listed_and_resumable() {
    let (tmp, store) = temp_store();
    let legacy = r#"{
        "questId": "QUEST-20231101-003",
        "title": "The Dusk Edge",
        "transmission": "Seeker,\n\n— The Handler",
        "objectives": [
            {"description": "Find a door that shouldn't exist", "status": "pending", "notes": "", "completedAt": null}
        ],
        "sideIntelligence": ["Look up"],
        "artifacts": [],
        "memoryMoments": [],
        "difficulty": "standard",
        "createdAt": "2023-11-01T18:04:05.123456",
        "completedAt": null,
        "playerContext": {"time": "evening", "location": "urban", "conditions": "cloudy", "mood": "curious"},
        "schemaVersion": 1
    }"#;
    fs::write(tmp.path().join("quest_logs").join("QUEST-20231101-003.json"), legacy).unwrap();

    let summaries = store.summaries().unwrap();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].title, "The Dusk Edge");
    assert_eq!(summaries[0].status_label(), "INCOMPLETE");

    let mut session = QuestSession::new(&store);
    assert!(session.resume("QUEST-20231101-003").unwrap());
    session.active_mut().unwrap().objective_mut(0).unwrap().complete(None);
    session.complete_quest().unwrap();

    // Rewritten in the current snake_case layout
    let raw = fs::read_to_string(store.record_path("QUEST-20231101-003").unwrap()).unwrap();
    assert!(raw.contains("\"quest_id\""));
    assert!(raw.contains("\"created_at\": \"2023-11-01T18:04:05\""));
    let record: QuestRecord = serde_json::from_str(&raw).unwrap();
    assert!(record.is_completed());
}

#[test]
fn reopened_store_sees_previous_records() {
    let (tmp, store) = temp_store();
    let quest = seeded_handler(3).generate_quest(&context("morning", "urban", "sunny", "curious"));
    store.save(&quest).unwrap();
    drop(store);

    let reopened = QuestStore::open(tmp.path().join("quest_logs")).unwrap();
    assert_eq!(reopened.list().unwrap(), vec![quest.quest_id().to_string()]);
}
