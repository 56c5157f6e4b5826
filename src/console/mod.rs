//! Interactive line-based front end for `questbot play`.
//!
//! The console owns no game rules. It prompts, bounds-checks menu selections
//! before touching the quest, and renders what the [`QuestSession`] reports.
//! Input and output are generic so whole sessions can be scripted in tests.

use anyhow::Result;
use log::{info, warn};
use rand::Rng;
use std::io::{self, BufRead, Write};

use crate::logutil::escape_log;
use crate::quest::{Handler, IdAllocator, ObjectiveStatus, PlayerContext, Quest, QuestSession};
use crate::validation::{sanitize_note, MAX_NOTE_BYTES};

pub const DEFAULT_TIME: &str = "afternoon";
pub const DEFAULT_LOCATION: &str = "urban downtown";
pub const DEFAULT_CONDITIONS: &str = "clear";
pub const DEFAULT_MOOD: &str = "adventurous";

pub const FAREWELL: &str = "The Handler awaits your return.";

const BANNER: &str = r#"
╔══════════════════════════════════════════════════════════════════╗
║                          QUEST-BOT                               ║
║                   Adventure Quest System                         ║
║                                                                  ║
║              "What seems ordinary conceals the                   ║
║                     extraordinary."                              ║
║                                                                  ║
║                        — The Handler                             ║
╚══════════════════════════════════════════════════════════════════╝"#;

const RULE_WIDTH: usize = 70;

#[derive(Clone, Copy)]
enum ObjectiveAction {
    Complete,
    Fail,
}

pub struct Console<'s, I, O, R, A> {
    session: QuestSession<'s>,
    handler: Handler<R, A>,
    input: I,
    output: O,
}

impl<'s, I, O, R, A> Console<'s, I, O, R, A>
where
    I: BufRead,
    O: Write,
    R: Rng,
    A: IdAllocator,
{
    pub fn new(session: QuestSession<'s>, handler: Handler<R, A>, input: I, output: O) -> Self {
        Self {
            session,
            handler,
            input,
            output,
        }
    }

    pub fn session(&self) -> &QuestSession<'s> {
        &self.session
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    /// Menu loop until the player exits or input ends.
    pub fn run(&mut self) -> Result<()> {
        writeln!(self.output, "{}", BANNER)?;
        loop {
            self.show_menu()?;
            let Some(choice) = self.read_line()? else {
                writeln!(self.output, "\n\n{}", FAREWELL)?;
                return Ok(());
            };
            if choice == "0" {
                writeln!(self.output, "\n{}", FAREWELL)?;
                return Ok(());
            }
            if let Err(e) = self.dispatch(&choice) {
                warn!("console action failed: {:#}", e);
                writeln!(self.output, "\nError: {:#}", e)?;
            }
        }
    }

    fn show_menu(&mut self) -> io::Result<()> {
        if self.session.has_active() {
            heading(&mut self.output, "ACTIVE QUEST IN PROGRESS")?;
            writeln!(self.output, "\n1. View Quest Details")?;
            writeln!(self.output, "2. Complete Objective")?;
            writeln!(self.output, "3. Fail Objective")?;
            writeln!(self.output, "4. Discover Artifact")?;
            writeln!(self.output, "5. Add Memory Moment")?;
            writeln!(self.output, "6. View Progress")?;
            writeln!(self.output, "7. Complete Quest")?;
            writeln!(self.output, "8. Abandon Quest")?;
        } else {
            heading(&mut self.output, "HANDLER OPERATIONS")?;
            writeln!(self.output, "\n1. Request New Quest")?;
            writeln!(self.output, "2. View Past Quests")?;
            writeln!(self.output, "3. Resume Quest")?;
        }
        write!(self.output, "\n0. Exit\n\nEnter choice: ")?;
        self.output.flush()
    }

    fn dispatch(&mut self, choice: &str) -> Result<()> {
        if self.session.has_active() {
            match choice {
                "1" => self.view_quest_details(),
                "2" => self.update_objective(ObjectiveAction::Complete),
                "3" => self.update_objective(ObjectiveAction::Fail),
                "4" => self.discover_artifact(),
                "5" => self.add_memory_moment(),
                "6" => self.view_progress(),
                "7" => self.complete_quest(),
                "8" => self.abandon_quest(),
                _ => self.invalid_choice(),
            }
        } else {
            match choice {
                "1" => self.request_new_quest(),
                "2" => self.view_past_quests(),
                "3" => self.resume_quest(),
                _ => self.invalid_choice(),
            }
        }
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn ask(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "\n{}\n> ", label)?;
        self.output.flush()?;
        self.read_line()
    }

    fn ask_or(&mut self, label: &str, default: &str) -> io::Result<Option<String>> {
        Ok(self.ask(label)?.map(|answer| {
            if answer.is_empty() {
                default.to_string()
            } else {
                answer
            }
        }))
    }

    /// 1-based menu pick mapped to an index below `len`; `None` on cancel or a bad pick.
    fn select(&mut self, len: usize) -> io::Result<Option<usize>> {
        let Some(answer) = self.read_line()? else {
            return Ok(None);
        };
        match answer.parse::<usize>() {
            Ok(0) => Ok(None),
            Ok(n) if n <= len => Ok(Some(n - 1)),
            _ => {
                writeln!(self.output, "\nInvalid choice.")?;
                Ok(None)
            }
        }
    }

    fn confirm(&mut self, label: &str) -> io::Result<bool> {
        Ok(self
            .ask(label)?
            .is_some_and(|answer| answer.eq_ignore_ascii_case("yes")))
    }

    fn invalid_choice(&mut self) -> Result<()> {
        writeln!(self.output, "\nInvalid choice.")?;
        Ok(())
    }

    fn request_new_quest(&mut self) -> Result<()> {
        heading(&mut self.output, "MISSION PARAMETERS")?;
        writeln!(self.output, "\nThe Handler requires the following information...")?;

        let Some(time) = self.ask_or(
            "Time of day (e.g., morning, afternoon, evening, night):",
            DEFAULT_TIME,
        )?
        else {
            return Ok(());
        };
        let Some(location) = self.ask_or(
            "Location (e.g., urban downtown, forest trail, suburban neighborhood, park):",
            DEFAULT_LOCATION,
        )?
        else {
            return Ok(());
        };
        let Some(conditions) = self.ask_or(
            "Current conditions (e.g., sunny, rainy, foggy, snowy, cloudy):",
            DEFAULT_CONDITIONS,
        )?
        else {
            return Ok(());
        };
        let Some(mood) = self.ask_or(
            "Your mood (e.g., adventurous, contemplative, energetic, mysterious, curious):",
            DEFAULT_MOOD,
        )?
        else {
            return Ok(());
        };

        info!(
            "quest requested: time='{}' location='{}' conditions='{}' mood='{}'",
            escape_log(&time),
            escape_log(&location),
            escape_log(&conditions),
            escape_log(&mood)
        );
        heading(&mut self.output, "GENERATING TRANSMISSION...")?;
        let quest = self
            .handler
            .generate_quest(&PlayerContext::new(time, location, conditions, mood));
        self.session.start_quest(quest)?;

        if let Some(quest) = self.session.active() {
            write_briefing(&mut self.output, quest)?;
        }
        Ok(())
    }

    fn view_quest_details(&mut self) -> Result<()> {
        let Some(quest) = self.session.active() else {
            return self.no_active_quest();
        };
        let out = &mut self.output;

        heading(out, &format!("QUEST: {}\nMission ID: {}", quest.title(), quest.quest_id()))?;
        writeln!(out, "\n{}\n", quest.transmission())?;
        writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
        writeln!(out, "OBJECTIVES:")?;
        for (i, obj) in quest.objectives().iter().enumerate() {
            writeln!(out, "  {} {}. {}", obj.status().glyph(), i + 1, obj.description())?;
            if !obj.notes().is_empty() {
                writeln!(out, "     Notes: {}", obj.notes())?;
            }
        }
        writeln!(out, "\nARTIFACTS:")?;
        for art in quest.artifacts() {
            writeln!(out, "  {} {}: {}", art.glyph(), art.name(), art.description())?;
        }
        Ok(())
    }

    fn update_objective(&mut self, action: ObjectiveAction) -> Result<()> {
        let Some(quest) = self.session.active() else {
            return self.no_active_quest();
        };
        let open: Vec<(usize, String)> = quest
            .objectives()
            .iter()
            .enumerate()
            .filter(|(_, o)| {
                matches!(o.status(), ObjectiveStatus::Pending | ObjectiveStatus::InProgress)
            })
            .map(|(i, o)| (i, o.description().to_string()))
            .collect();

        if open.is_empty() {
            writeln!(self.output, "\nAll objectives resolved!")?;
            return Ok(());
        }

        let (title, verb) = match action {
            ObjectiveAction::Complete => ("COMPLETE OBJECTIVE", "complete"),
            ObjectiveAction::Fail => ("FAIL OBJECTIVE", "mark as failed"),
        };
        heading(&mut self.output, title)?;
        for (n, (_, description)) in open.iter().enumerate() {
            writeln!(self.output, "{}. {}", n + 1, description)?;
        }
        write!(
            self.output,
            "\nSelect objective to {} (or 0 to cancel):\n> ",
            verb
        )?;
        self.output.flush()?;
        let Some(pick) = self.select(open.len())? else {
            return Ok(());
        };
        let Some(notes) = self.ask("Add notes about this objective (optional):")? else {
            return Ok(());
        };
        let notes = sanitize_note(&notes, MAX_NOTE_BYTES)?;

        let (index, description) = &open[pick];
        if let Some(objective) = self
            .session
            .active_mut()
            .and_then(|q| q.objective_mut(*index))
        {
            match action {
                ObjectiveAction::Complete => objective.complete(Some(&notes)),
                ObjectiveAction::Fail => objective.fail(Some(&notes)),
            }
        }
        self.session.update_quest()?;

        match action {
            ObjectiveAction::Complete => {
                writeln!(self.output, "\n✓ Objective completed: {}", description)?
            }
            ObjectiveAction::Fail => writeln!(self.output, "\n✗ Objective failed: {}", description)?,
        }
        Ok(())
    }

    fn discover_artifact(&mut self) -> Result<()> {
        let Some(quest) = self.session.active() else {
            return self.no_active_quest();
        };
        let undiscovered: Vec<(usize, String, String)> = quest
            .artifacts()
            .iter()
            .enumerate()
            .filter(|(_, a)| !a.is_discovered())
            .map(|(i, a)| (i, a.name().to_string(), a.description().to_string()))
            .collect();

        if undiscovered.is_empty() {
            writeln!(self.output, "\nAll artifacts discovered!")?;
            return Ok(());
        }

        heading(&mut self.output, "DISCOVER ARTIFACT")?;
        for (n, (_, name, description)) in undiscovered.iter().enumerate() {
            writeln!(self.output, "{}. {}: {}", n + 1, name, description)?;
        }
        write!(
            self.output,
            "\nSelect artifact to discover (or 0 to cancel):\n> "
        )?;
        self.output.flush()?;
        let Some(pick) = self.select(undiscovered.len())? else {
            return Ok(());
        };
        let Some(notes) = self.ask("Describe your discovery:")? else {
            return Ok(());
        };
        let notes = sanitize_note(&notes, MAX_NOTE_BYTES)?;

        let (index, name, _) = &undiscovered[pick];
        if let Some(artifact) = self
            .session
            .active_mut()
            .and_then(|q| q.artifact_mut(*index))
        {
            artifact.discover(Some(&notes));
        }
        self.session.update_quest()?;
        writeln!(self.output, "\n★ Artifact discovered: {}", name)?;
        Ok(())
    }

    fn add_memory_moment(&mut self) -> Result<()> {
        if !self.session.has_active() {
            return self.no_active_quest();
        }
        heading(&mut self.output, "ADD MEMORY MOMENT")?;

        let title = self.ask("Title for this moment:")?.unwrap_or_default();
        if title.is_empty() {
            writeln!(self.output, "\nCancelled.")?;
            return Ok(());
        }
        let description = self.ask("Describe this moment:")?.unwrap_or_default();
        if description.is_empty() {
            writeln!(self.output, "\nCancelled.")?;
            return Ok(());
        }
        let hint = self.ask("Location hint (optional):")?.unwrap_or_default();

        let title = sanitize_note(&title, MAX_NOTE_BYTES)?;
        let description = sanitize_note(&description, MAX_NOTE_BYTES)?;
        let hint = sanitize_note(&hint, MAX_NOTE_BYTES)?;
        if self
            .session
            .add_memory_moment(&title, &description, Some(&hint))?
            .is_some()
        {
            writeln!(self.output, "\n✓ Memory moment recorded.")?;
        }
        Ok(())
    }

    fn view_progress(&mut self) -> Result<()> {
        let report = self.session.generate_progress_report();
        writeln!(self.output, "{}", report)?;
        Ok(())
    }

    fn complete_quest(&mut self) -> Result<()> {
        let Some(quest) = self.session.active() else {
            return self.no_active_quest();
        };
        if !quest.is_completed() {
            heading(&mut self.output, "WARNING: Not all objectives are completed.")?;
            if !self.confirm("Are you sure you want to complete this quest? (yes/no):")? {
                writeln!(self.output, "\nQuest remains active.")?;
                return Ok(());
            }
        }

        let Some(done) = self.session.complete_quest()? else {
            return Ok(());
        };
        heading(&mut self.output, "QUEST COMPLETED")?;
        writeln!(self.output, "\nMission ID: {}", done.quest_id())?;
        writeln!(self.output, "Title: {}", done.title())?;
        writeln!(
            self.output,
            "\nA narrative summary has been logged for posterity."
        )?;
        writeln!(self.output, "\nThe Handler acknowledges your effort.")?;
        writeln!(
            self.output,
            "\n\"The path reveals itself to those who dare to look.\""
        )?;
        writeln!(self.output, "\n— The Handler")?;
        Ok(())
    }

    fn abandon_quest(&mut self) -> Result<()> {
        heading(&mut self.output, "ABANDON QUEST")?;
        if self.confirm("Are you sure? Progress will be saved but the quest will end. (yes/no):")? {
            self.session.abandon_quest()?;
            writeln!(self.output, "\nQuest abandoned. The Handler understands.")?;
        } else {
            writeln!(self.output, "\nQuest remains active.")?;
        }
        Ok(())
    }

    fn view_past_quests(&mut self) -> Result<()> {
        let summaries = self.session.store().summaries()?;
        if summaries.is_empty() {
            writeln!(self.output, "\nNo quest logs found.")?;
            return Ok(());
        }

        heading(&mut self.output, "QUEST ARCHIVES")?;
        for summary in summaries {
            writeln!(self.output, "\n{} - {}", summary.quest_id, summary.title)?;
            writeln!(self.output, "  Status: {}", summary.status_label())?;
            writeln!(
                self.output,
                "  Difficulty: {}",
                summary.difficulty.as_str().to_uppercase()
            )?;
        }
        Ok(())
    }

    fn resume_quest(&mut self) -> Result<()> {
        let id = self.ask("Mission ID to resume:")?.unwrap_or_default();
        if id.is_empty() {
            writeln!(self.output, "\nCancelled.")?;
            return Ok(());
        }
        if self.session.resume(&id)? {
            if let Some(quest) = self.session.active() {
                writeln!(self.output, "\nQuest resumed: {}", quest.title())?;
            }
        } else {
            writeln!(self.output, "\nNo unfinished quest with that ID.")?;
        }
        Ok(())
    }

    fn no_active_quest(&mut self) -> Result<()> {
        writeln!(self.output, "\nNo active quest.")?;
        Ok(())
    }
}

fn heading(out: &mut impl Write, title: &str) -> io::Result<()> {
    let rule = "=".repeat(RULE_WIDTH);
    writeln!(out, "\n{}\n{}\n{}", rule, title, rule)
}

/// Print a freshly issued quest: transmission, header, objectives, artifacts and hints.
pub fn write_briefing(out: &mut impl Write, quest: &Quest) -> io::Result<()> {
    heading(out, "INCOMING TRANSMISSION FROM THE HANDLER")?;
    writeln!(out, "\n{}\n", quest.transmission())?;

    let rule = "=".repeat(RULE_WIDTH);
    writeln!(out, "{}", rule)?;
    writeln!(out, "QUEST: {}", quest.title())?;
    writeln!(out, "Mission ID: {}", quest.quest_id())?;
    writeln!(
        out,
        "Difficulty: {}",
        quest.difficulty().as_str().to_uppercase()
    )?;
    writeln!(out, "{}", rule)?;

    writeln!(out, "\nOBJECTIVES:")?;
    for (i, obj) in quest.objectives().iter().enumerate() {
        writeln!(out, "  {}. {}", i + 1, obj.description())?;
    }
    writeln!(out, "\nARTIFACTS TO DISCOVER:")?;
    for art in quest.artifacts() {
        writeln!(out, "  • {}: {}", art.name(), art.description())?;
    }
    writeln!(out, "\nSIDE INTELLIGENCE:")?;
    for intel in quest.side_intelligence() {
        writeln!(out, "  • {}", intel)?;
    }
    Ok(())
}
