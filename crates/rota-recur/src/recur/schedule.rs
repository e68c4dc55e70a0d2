//! Ordered schedules of recurring obligations.

use chrono::{DateTime, Utc};
use rota_core::types::Task;

use crate::error::RecurResult;

use super::decode::decode_entry;
use super::document::ScheduleDocument;
use super::expand::occurrences;
use super::rule::RecurrenceRule;

/// A titled obligation paired with its recurrence rule.
///
/// Titles need not be unique across a schedule; duplicates expand
/// independently, though the title is the identity key reconciliation
/// matches on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleEntry {
    title: String,
    recurrence: RecurrenceRule,
}

impl ScheduleEntry {
    #[must_use]
    pub fn new(title: impl Into<String>, recurrence: RecurrenceRule) -> Self {
        Self {
            title: title.into(),
            recurrence,
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub const fn recurrence(&self) -> &RecurrenceRule {
        &self.recurrence
    }
}

/// An ordered collection of schedule entries.
///
/// Entry order is preserved from the source document so expansion output
/// is stable between runs. Read-only after construction.
#[derive(Debug, Clone, Default)]
pub struct Schedule {
    entries: Vec<ScheduleEntry>,
}

impl Schedule {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn add(&mut self, entry: ScheduleEntry) {
        self.entries.push(entry);
    }

    #[must_use]
    pub fn entries(&self) -> &[ScheduleEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// ## Summary
    /// Builds a schedule from a parsed document with the given phase
    /// anchor shared by every rule.
    ///
    /// Construction is fail-fast: the first record that fails to decode
    /// aborts the whole schedule with that record's error. There is no
    /// partial or degraded schedule.
    ///
    /// ## Errors
    /// Propagates the originating decode or validation error unchanged.
    pub fn from_document(document: &ScheduleDocument, anchor: DateTime<Utc>) -> RecurResult<Self> {
        let mut entries = Vec::with_capacity(document.tasks.len());
        for record in &document.tasks {
            entries.push(decode_entry(record, anchor)?);
        }
        tracing::debug!(entries = entries.len(), "Schedule constructed");
        Ok(Self { entries })
    }

    /// ## Summary
    /// Expands every entry over the inclusive window `[start, end]`.
    ///
    /// Occurrences are concatenated in entry order, chronological within
    /// each entry, and fully materialized; windows are always bounded.
    /// Repeated calls with the same window yield identical output.
    #[must_use]
    pub fn for_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<Task> {
        let mut tasks = Vec::new();
        for entry in &self.entries {
            for due in occurrences(entry.recurrence(), start, end) {
                tasks.push(Task::new(entry.title(), due));
            }
        }
        tasks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RecurError;
    use crate::recur::decode::DecodeError;
    use crate::recur::rule::Weekday;
    use chrono::TimeZone;

    fn anchor() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2000, 2, 1, 0, 0, 0).unwrap()
    }

    fn utc(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn from_document_preserves_order() {
        let doc = ScheduleDocument::from_yaml(
            "tasks:\n  - title: B\n    freq: daily\n  - title: A\n    freq: weekly\n",
        )
        .expect("document should parse");
        let schedule = Schedule::from_document(&doc, anchor()).expect("schedule should build");
        let titles: Vec<_> = schedule.entries().iter().map(ScheduleEntry::title).collect();
        assert_eq!(titles, vec!["B", "A"]);
    }

    #[test]
    fn from_document_fails_fast_on_first_bad_record() {
        let doc = ScheduleDocument::from_yaml(
            "tasks:\n  - title: Good\n    freq: daily\n  - title: Bad\n    freq: hourly\n  - title: Later\n    freq: bogus\n",
        )
        .expect("document should parse");
        let err = Schedule::from_document(&doc, anchor()).expect_err("bad record must abort");
        assert!(matches!(
            err,
            RecurError::Decode(DecodeError::UnknownFrequency(ref token)) if token == "hourly"
        ));
    }

    #[test]
    fn for_range_concatenates_in_entry_order() {
        let mut schedule = Schedule::new();
        schedule.add(ScheduleEntry::new(
            "Second weekday",
            RecurrenceRule::weekly(anchor()).with_weekdays([Weekday::Friday]),
        ));
        schedule.add(ScheduleEntry::new(
            "First weekday",
            RecurrenceRule::weekly(anchor()).with_weekdays([Weekday::Monday]),
        ));

        let tasks = schedule.for_range(utc(2024, 3, 1), utc(2024, 3, 8));
        let titles: Vec<_> = tasks.iter().map(|t| t.title.as_str()).collect();
        // All of the first entry's occurrences precede the second entry's,
        // even though the second entry's dates interleave chronologically.
        assert_eq!(
            titles,
            vec!["Second weekday", "Second weekday", "First weekday"]
        );
        assert_eq!(tasks[0].due, utc(2024, 3, 1));
        assert_eq!(tasks[1].due, utc(2024, 3, 8));
        assert_eq!(tasks[2].due, utc(2024, 3, 4));
    }

    #[test]
    fn duplicate_titles_expand_independently() {
        let mut schedule = Schedule::new();
        schedule.add(ScheduleEntry::new(
            "Water plants",
            RecurrenceRule::weekly(anchor()).with_weekdays([Weekday::Sunday]),
        ));
        schedule.add(ScheduleEntry::new(
            "Water plants",
            RecurrenceRule::weekly(anchor()).with_weekdays([Weekday::Sunday]),
        ));
        let tasks = schedule.for_range(utc(2024, 3, 1), utc(2024, 3, 9));
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0], tasks[1]);
    }

    #[test]
    fn empty_schedule_expands_to_nothing() {
        let schedule = Schedule::new();
        assert!(schedule.is_empty());
        assert!(schedule.for_range(utc(2024, 3, 1), utc(2024, 3, 31)).is_empty());
    }
}
