//! Outcome events and the history log they accumulate into.
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The user's judgment of a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Solved,
    Unsolved,
}

/// One row of the history file. Field order matches the column order `date,status,title`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeEvent {
    pub date: NaiveDate,
    pub status: Verdict,
    pub title: String,
}

impl OutcomeEvent {
    pub fn new(date: NaiveDate, status: Verdict, title: impl Into<String>) -> Self {
        Self {
            date,
            status,
            title: title.into(),
        }
    }
}

/// Chronological sequence of outcome events. Later entries are more recent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HistoryLog {
    events: Vec<OutcomeEvent>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_events(events: Vec<OutcomeEvent>) -> Self {
        Self { events }
    }

    pub fn events(&self) -> &[OutcomeEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn push(&mut self, event: OutcomeEvent) {
        self.events.push(event);
    }

    /// Removes the most recent event.
    pub fn pop(&mut self) -> Option<OutcomeEvent> {
        self.events.pop()
    }

    /// Drops every event dated `date`. Returns how many were removed.
    pub fn purge_date(&mut self, date: NaiveDate) -> usize {
        let before = self.events.len();
        self.events.retain(|event| event.date != date);
        before - self.events.len()
    }

    /// Most recent event for `title` on any date.
    pub fn latest_for(&self, title: &str) -> Option<&OutcomeEvent> {
        self.events.iter().rev().find(|event| event.title == title)
    }

    /// Most recent event for `title` dated `date`.
    pub fn latest_for_on(&self, title: &str, date: NaiveDate) -> Option<&OutcomeEvent> {
        self.events
            .iter()
            .rev()
            .find(|event| event.title == title && event.date == date)
    }

    /// Counts of (solved, unsolved) events dated `date`.
    pub fn tally_on(&self, date: NaiveDate) -> (usize, usize) {
        self.events
            .iter()
            .filter(|event| event.date == date)
            .fold((0, 0), |(solved, unsolved), event| match event.status {
                Verdict::Solved => (solved + 1, unsolved),
                Verdict::Unsolved => (solved, unsolved + 1),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn sample_log() -> HistoryLog {
        HistoryLog::from_events(vec![
            OutcomeEvent::new(day(1), Verdict::Unsolved, "Two Sum"),
            OutcomeEvent::new(day(1), Verdict::Solved, "Two Sum"),
            OutcomeEvent::new(day(2), Verdict::Unsolved, "Two Sum"),
            OutcomeEvent::new(day(2), Verdict::Solved, "Valid Parentheses"),
        ])
    }

    #[test]
    fn test_latest_for_uses_last_entry() {
        let log = sample_log();

        let latest = log.latest_for("Two Sum").unwrap();
        assert_eq!(latest.date, day(2));
        assert_eq!(latest.status, Verdict::Unsolved);
        assert!(log.latest_for("Unknown").is_none());
    }

    #[test]
    fn test_latest_for_on_filters_by_date() {
        let log = sample_log();

        let on_first = log.latest_for_on("Two Sum", day(1)).unwrap();
        assert_eq!(on_first.status, Verdict::Solved);
        assert!(log.latest_for_on("Valid Parentheses", day(1)).is_none());
    }

    #[test]
    fn test_purge_date() {
        let mut log = sample_log();

        assert_eq!(log.purge_date(day(2)), 2);
        assert_eq!(log.len(), 2);
        assert!(log.events().iter().all(|event| event.date == day(1)));
        assert_eq!(log.purge_date(day(2)), 0);
    }

    #[test]
    fn test_pop_removes_latest() {
        let mut log = sample_log();

        let popped = log.pop().unwrap();
        assert_eq!(popped.title, "Valid Parentheses");
        assert_eq!(log.len(), 3);
        assert!(HistoryLog::new().pop().is_none());
    }

    #[test]
    fn test_tally_on() {
        let log = sample_log();

        assert_eq!(log.tally_on(day(1)), (1, 1));
        assert_eq!(log.tally_on(day(2)), (1, 1));
        assert_eq!(log.tally_on(day(3)), (0, 0));
    }
}
