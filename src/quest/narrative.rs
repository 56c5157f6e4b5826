//! Text renderings of a quest: the long-form narrative export written at
//! completion, and the short progress report shown during play.

use std::fmt::{self, Write};

use super::types::Quest;

/// Progress report text when no quest is being tracked.
pub const NO_ACTIVE_QUEST: &str = "No active quest.";

pub const FOOTER: &str = "The Handler's work is never done. Until next time, Operative.";

const DISPLAY_TIME: &str = "%Y-%m-%d %H:%M:%S";
const RULE_WIDTH: usize = 70;

fn heavy_rule() -> String {
    "=".repeat(RULE_WIDTH)
}

fn light_rule() -> String {
    "-".repeat(RULE_WIDTH)
}

fn section(w: &mut impl Write, heading: &str) -> fmt::Result {
    writeln!(w, "{}:", heading)?;
    writeln!(w, "{}", light_rule())
}

/// Full narrative document for `quest`.
pub fn render_narrative(quest: &Quest) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = write_narrative(&mut out, quest);
    out
}

pub fn write_narrative(w: &mut impl Write, quest: &Quest) -> fmt::Result {
    writeln!(w, "{}", heavy_rule())?;
    writeln!(w, "QUEST LOG: {}", quest.title())?;
    writeln!(w, "Mission ID: {}", quest.quest_id())?;
    writeln!(w, "Difficulty: {}", quest.difficulty().as_str().to_uppercase())?;
    match quest.completed_at() {
        Some(ts) => writeln!(w, "Completed: {}", ts.format(DISPLAY_TIME))?,
        None => writeln!(w, "Completed: IN PROGRESS")?,
    }
    writeln!(w, "{}\n", heavy_rule())?;

    section(w, "ORIGINAL TRANSMISSION")?;
    writeln!(w, "{}\n", quest.transmission())?;

    section(w, "OBJECTIVES")?;
    for (i, obj) in quest.objectives().iter().enumerate() {
        writeln!(w, "{} {}. {}", obj.status().glyph(), i + 1, obj.description())?;
        if !obj.notes().is_empty() {
            writeln!(w, "   Notes: {}", obj.notes())?;
        }
    }
    writeln!(w)?;

    section(w, "ARTIFACTS")?;
    for art in quest.artifacts() {
        writeln!(w, "{} {}: {}", art.glyph(), art.name(), art.description())?;
        if art.is_discovered() && !art.discovery_notes().is_empty() {
            writeln!(w, "   Discovery: {}", art.discovery_notes())?;
        }
    }
    writeln!(w)?;

    if !quest.memory_moments().is_empty() {
        section(w, "MEMORY MOMENTS")?;
        for moment in quest.memory_moments() {
            writeln!(w, "• {}", moment.title())?;
            writeln!(w, "  {}", moment.description())?;
            if let Some(hint) = moment.location_hint() {
                writeln!(w, "  Location: {}", hint)?;
            }
            writeln!(w, "  Time: {}\n", moment.timestamp().format(DISPLAY_TIME))?;
        }
    }

    section(w, "SIDE INTELLIGENCE")?;
    for intel in quest.side_intelligence() {
        writeln!(w, "• {}", intel)?;
    }
    writeln!(w)?;

    writeln!(w, "{}", heavy_rule())?;
    writeln!(w, "{}", FOOTER)?;
    writeln!(w, "{}", heavy_rule())
}

/// Snapshot of objective and artifact progress with status glyphs.
pub fn render_progress(quest: &Quest) -> String {
    let mut out = String::new();
    let _ = write_progress(&mut out, quest);
    out
}

fn write_progress(w: &mut impl Write, quest: &Quest) -> fmt::Result {
    let bar = "═".repeat(66);
    writeln!(w)?;
    writeln!(w, "╔{}╗", bar)?;
    writeln!(w, "║ QUEST PROGRESS: {:<44} ║", quest.title())?;
    writeln!(w, "╚{}╝", bar)?;
    writeln!(w)?;
    writeln!(w, "Mission ID: {}", quest.quest_id())?;
    writeln!(w, "Difficulty: {}", quest.difficulty().as_str().to_uppercase())?;
    writeln!(w)?;

    writeln!(
        w,
        "OBJECTIVES: {}/{} completed",
        quest.completed_objectives(),
        quest.objectives().len()
    )?;
    for (i, obj) in quest.objectives().iter().enumerate() {
        writeln!(w, "  {} {}. {}", obj.status().glyph(), i + 1, obj.description())?;
    }

    writeln!(
        w,
        "\nARTIFACTS: {}/{} discovered",
        quest.discovered_artifacts(),
        quest.artifacts().len()
    )?;
    for art in quest.artifacts() {
        writeln!(w, "  {} {}", art.glyph(), art.name())?;
    }

    writeln!(
        w,
        "\nMEMORY MOMENTS: {} recorded",
        quest.memory_moments().len()
    )
}
