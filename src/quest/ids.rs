//! Quest identifier allocation.
//!
//! Identifiers look like `QUEST-20240315-007`: the UTC date plus a counter
//! zero-padded to three digits. [`SessionCounter`] restarts at 1 with every
//! process, so two runs on the same day can collide. [`StoreCounter`] resumes
//! after the highest counter already persisted for the date.

use std::collections::HashSet;

use chrono::NaiveDate;

pub const QUEST_ID_PREFIX: &str = "QUEST-";

/// Strategy that hands out quest identifiers.
pub trait IdAllocator {
    fn allocate(&mut self, date: NaiveDate) -> String;
}

pub fn format_quest_id(date: NaiveDate, counter: u32) -> String {
    format!("{}{}-{:03}", QUEST_ID_PREFIX, date.format("%Y%m%d"), counter)
}

/// Split an id into its date stamp and counter, e.g. `("20240315", 7)`.
pub fn parse_quest_id(id: &str) -> Option<(&str, u32)> {
    let rest = id.strip_prefix(QUEST_ID_PREFIX)?;
    let (date, counter) = rest.split_once('-')?;
    if date.len() != 8 || !date.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some((date, counter.parse().ok()?))
}

/// Process-local counter starting at 1.
#[derive(Debug, Default)]
pub struct SessionCounter {
    issued: u32,
}

impl SessionCounter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdAllocator for SessionCounter {
    fn allocate(&mut self, date: NaiveDate) -> String {
        self.issued += 1;
        format_quest_id(date, self.issued)
    }
}

/// Counter seeded from the ids already in the quest store.
#[derive(Debug, Default)]
pub struct StoreCounter {
    known: Vec<String>,
}

impl StoreCounter {
    pub fn new<I, S>(known_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            known: known_ids.into_iter().map(Into::into).collect(),
        }
    }

    fn counters_for<'a>(&'a self, stamp: &'a str) -> impl Iterator<Item = u32> + 'a {
        self.known
            .iter()
            .filter_map(|id| parse_quest_id(id))
            .filter(move |(date, _)| *date == stamp)
            .map(|(_, counter)| counter)
    }

    /// Next counter for the date. Past `u32::MAX` the lowest unused one is taken.
    fn next_counter(&self, stamp: &str) -> u32 {
        let highest = self.counters_for(stamp).max().unwrap_or(0);
        if let Some(next) = highest.checked_add(1) {
            return next;
        }
        let used: HashSet<u32> = self.counters_for(stamp).collect();
        (1..=u32::MAX).find(|c| !used.contains(c)).unwrap_or(0)
    }
}

impl IdAllocator for StoreCounter {
    fn allocate(&mut self, date: NaiveDate) -> String {
        let stamp = date.format("%Y%m%d").to_string();
        let id = format_quest_id(date, self.next_counter(&stamp));
        self.known.push(id.clone());
        id
    }
}

impl<A: IdAllocator + ?Sized> IdAllocator for Box<A> {
    fn allocate(&mut self, date: NaiveDate) -> String {
        (**self).allocate(date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn session_counter_starts_at_one() {
        let mut ids = SessionCounter::new();
        assert_eq!(ids.allocate(day(15)), "QUEST-20240315-001");
        assert_eq!(ids.allocate(day(15)), "QUEST-20240315-002");
        assert_eq!(ids.allocate(day(16)), "QUEST-20240316-003");
    }

    #[test]
    fn counter_pads_to_three_digits_only() {
        assert_eq!(format_quest_id(day(1), 1234), "QUEST-20240301-1234");
    }

    #[test]
    fn parse_round_trips() {
        assert_eq!(parse_quest_id("QUEST-20240315-042"), Some(("20240315", 42)));
        assert_eq!(parse_quest_id("QUEST-2024-042"), None);
        assert_eq!(parse_quest_id("notes.json"), None);
    }

    #[test]
    fn store_counter_resumes_after_persisted_ids() {
        let mut ids = StoreCounter::new([
            "QUEST-20240315-001",
            "QUEST-20240315-004",
            "QUEST-20240314-009",
            "something-else",
        ]);
        assert_eq!(ids.allocate(day(15)), "QUEST-20240315-005");
        assert_eq!(ids.allocate(day(15)), "QUEST-20240315-006");
        assert_eq!(ids.allocate(day(16)), "QUEST-20240316-001");
    }

    #[test]
    fn store_counter_at_max_falls_back_to_free_counters() {
        let mut ids = StoreCounter::new(["QUEST-20240315-4294967295", "QUEST-20240315-001"]);
        assert_eq!(ids.allocate(day(15)), "QUEST-20240315-002");
        assert_eq!(ids.allocate(day(15)), "QUEST-20240315-003");
        assert_eq!(ids.allocate(day(16)), "QUEST-20240316-001");
    }
}
