//! Scripted end-to-end sessions through the interactive console.

mod common;

use std::io::Cursor;

use common::{seeded_handler, temp_store};
use questbot::console::{Console, FAREWELL};
use questbot::quest::{ObjectiveStatus, QuestSession, QuestStore};

fn play(store: &QuestStore, script: &str) -> String {
    let mut console = Console::new(
        QuestSession::new(store),
        seeded_handler(31),
        Cursor::new(script.to_string().into_bytes()),
        Vec::new(),
    );
    console.run().expect("console run");
    String::from_utf8(console.output().clone()).expect("utf8 output")
}

fn today_id(counter: u32) -> String {
    format!(
        "QUEST-{}-{:03}",
        chrono::Utc::now().date_naive().format("%Y%m%d"),
        counter
    )
}

#[test]
fn full_quest_from_request_to_archive() {
    let (_tmp, store) = temp_store();
    let script = [
        "1", "night", "forest trail", "foggy", "mysterious", // request
        "2", "1", "found the oldest oak", // complete first open objective
        "3", "1", "", // fail the next one, no notes
        "4", "2", "mossy stone", // discover second artifact
        "5", "Owl", "An owl watched from the ridge", "north ridge", // memory moment
        "6", // progress
        "7", "no", // decline forced completion
        "7", "yes", // force it
        "2", // archive
        "0",
    ]
    .join("\n")
        + "\n";
    let out = play(&store, &script);

    assert!(out.contains("INCOMING TRANSMISSION FROM THE HANDLER"));
    assert!(out.contains("Difficulty: CHALLENGING"));
    assert!(out.contains("✓ Objective completed:"));
    assert!(out.contains("✗ Objective failed:"));
    assert!(out.contains("★ Artifact discovered:"));
    assert!(out.contains("✓ Memory moment recorded."));
    assert!(out.contains("OBJECTIVES: 1/5 completed"));
    assert!(out.contains("ARTIFACTS: 1/3 discovered"));
    assert!(out.contains("MEMORY MOMENTS: 1 recorded"));
    assert!(out.contains("WARNING: Not all objectives are completed."));
    assert!(out.contains("Quest remains active."));
    assert!(out.contains("QUEST COMPLETED"));
    assert!(out.contains("QUEST ARCHIVES"));
    assert!(out.contains("  Status: COMPLETED"));
    assert!(out.contains(FAREWELL));

    let id = today_id(1);
    let record = store.load(&id).unwrap().expect("quest persisted");
    assert!(record.is_completed());
    assert_eq!(record.objectives[0].status(), ObjectiveStatus::Completed);
    assert_eq!(record.objectives[0].notes(), "found the oldest oak");
    assert_eq!(record.objectives[1].status(), ObjectiveStatus::Failed);
    assert_eq!(record.objectives[1].notes(), "");
    assert!(!record.artifacts[0].is_discovered());
    assert_eq!(record.artifacts[1].discovery_notes(), "mossy stone");
    assert_eq!(record.memory_moments[0].location_hint(), Some("north ridge"));
    assert!(store.narrative_path(&id).unwrap().exists());
}

#[test]
fn abandon_then_resume_from_archive() {
    let (_tmp, store) = temp_store();
    let id = today_id(1);
    let script = format!("1\n\n\n\n\n8\nyes\n3\n{}\n6\n8\nno\n0\n", id);
    let out = play(&store, &script);

    assert!(out.contains("Quest abandoned. The Handler understands."));
    assert!(out.contains("Quest resumed:"));
    assert!(out.contains("OBJECTIVES: 0/3 completed"));
    assert!(out.contains("Quest remains active."));
    assert!(!store.load(&id).unwrap().unwrap().is_completed());
}

#[test]
fn resume_rejects_unknown_and_unsafe_ids() {
    let (_tmp, store) = temp_store();
    let out = play(&store, "3\nQUEST-19990101-001\n3\n../../etc/passwd\n3\n\n0\n");

    assert!(out.contains("No unfinished quest with that ID."));
    assert!(out.contains("Error: invalid quest id"));
    assert!(out.contains("Cancelled."));
}

#[test]
fn end_of_input_mid_request_creates_nothing() {
    let (_tmp, store) = temp_store();
    let out = play(&store, "1\nmorning\n");

    assert!(out.ends_with(&format!("{}\n", FAREWELL)));
    assert!(store.list().unwrap().is_empty());
}
