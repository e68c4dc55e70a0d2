//! Decoding declarative records into typed schedule entries.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::error::RecurError;

use super::document::TaskRecord;
use super::rule::{Frequency, RecurrenceRule, Weekday};
use super::schedule::ScheduleEntry;

/// An unrecognized token in a rule record. Always fatal to schedule
/// construction; nothing is silently defaulted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("frequency '{0}' is not understood")]
    UnknownFrequency(String),

    #[error("week day '{0}' is not understood")]
    UnknownWeekday(String),
}

/// A structurally invalid rule record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("record is missing required field `title`")]
    MissingTitle,

    #[error("record has an empty `title`")]
    EmptyTitle,

    #[error("'{title}' is missing required field `freq`")]
    MissingFrequency { title: String },

    #[error("'{title}' has interval {interval}, expected a positive integer")]
    InvalidInterval { title: String, interval: i64 },
}

/// ## Summary
/// Decodes one document record into a schedule entry.
///
/// The `anchor` is the shared phase epoch; it is injected here rather than
/// read from a global so callers (and tests) choose it explicitly. The
/// weekday set decodes for every frequency but only restricts weekly
/// expansion.
///
/// ## Errors
/// Returns a decode error for an unrecognized frequency or weekday token
/// (naming the offending token) and a validation error for a missing or
/// empty `title`, a missing `freq`, or a non-positive `interval`.
pub fn decode_entry(record: &TaskRecord, anchor: DateTime<Utc>) -> Result<ScheduleEntry, RecurError> {
    let title = record.title.as_deref().ok_or(ValidationError::MissingTitle)?;
    if title.is_empty() {
        return Err(ValidationError::EmptyTitle.into());
    }

    let freq_token = record
        .freq
        .as_deref()
        .ok_or_else(|| ValidationError::MissingFrequency {
            title: title.to_owned(),
        })?;
    let frequency = Frequency::parse(freq_token)
        .ok_or_else(|| DecodeError::UnknownFrequency(freq_token.to_owned()))?;

    let interval = match record.interval {
        None => 1,
        Some(raw) => match u32::try_from(raw) {
            Ok(value) if value >= 1 => value,
            _ => {
                return Err(ValidationError::InvalidInterval {
                    title: title.to_owned(),
                    interval: raw,
                }
                .into());
            }
        },
    };

    let mut weekdays = Vec::with_capacity(record.byweekday.len());
    for token in &record.byweekday {
        let day =
            Weekday::parse(token).ok_or_else(|| DecodeError::UnknownWeekday(token.clone()))?;
        weekdays.push(day);
    }

    let rule = RecurrenceRule::new(frequency, anchor)
        .with_interval(interval)
        .with_weekdays(weekdays);

    Ok(ScheduleEntry::new(title, rule))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn anchor() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2000, 2, 1, 0, 0, 0).unwrap()
    }

    fn record(title: Option<&str>, freq: Option<&str>) -> TaskRecord {
        TaskRecord {
            title: title.map(String::from),
            freq: freq.map(String::from),
            ..TaskRecord::default()
        }
    }

    #[test]
    fn decodes_minimal_record() {
        let entry = decode_entry(&record(Some("Water plants"), Some("daily")), anchor())
            .expect("record should decode");
        assert_eq!(entry.title(), "Water plants");
        assert_eq!(entry.recurrence().frequency(), Frequency::Daily);
        assert_eq!(entry.recurrence().interval(), 1);
        assert_eq!(entry.recurrence().anchor(), anchor());
    }

    #[test]
    fn decodes_weekday_tokens() {
        let mut rec = record(Some("Laundry"), Some("weekly"));
        rec.byweekday = vec!["SU".into(), "WE".into()];
        let entry = decode_entry(&rec, anchor()).expect("record should decode");
        assert_eq!(
            entry.recurrence().weekdays(),
            &[Weekday::Wednesday, Weekday::Sunday]
        );
    }

    #[test]
    fn unknown_frequency_names_the_token() {
        let err = decode_entry(&record(Some("x"), Some("fortnightly")), anchor())
            .expect_err("unknown frequency must fail");
        assert!(matches!(
            err,
            RecurError::Decode(DecodeError::UnknownFrequency(ref token)) if token == "fortnightly"
        ));
    }

    #[test]
    fn uppercase_frequency_is_rejected() {
        let err = decode_entry(&record(Some("x"), Some("Daily")), anchor())
            .expect_err("tokens are case-sensitive");
        assert!(matches!(err, RecurError::Decode(DecodeError::UnknownFrequency(_))));
    }

    #[test]
    fn unknown_weekday_names_the_token() {
        let mut rec = record(Some("x"), Some("weekly"));
        rec.byweekday = vec!["MO".into(), "FUNDAY".into()];
        let err = decode_entry(&rec, anchor()).expect_err("unknown weekday must fail");
        assert!(matches!(
            err,
            RecurError::Decode(DecodeError::UnknownWeekday(ref token)) if token == "FUNDAY"
        ));
    }

    #[test]
    fn missing_title_fails_validation() {
        let err = decode_entry(&record(None, Some("daily")), anchor())
            .expect_err("missing title must fail");
        assert!(matches!(
            err,
            RecurError::Validation(ValidationError::MissingTitle)
        ));
    }

    #[test]
    fn empty_title_fails_validation() {
        let err = decode_entry(&record(Some(""), Some("daily")), anchor())
            .expect_err("empty title must fail");
        assert!(matches!(
            err,
            RecurError::Validation(ValidationError::EmptyTitle)
        ));
    }

    #[test]
    fn missing_frequency_fails_validation() {
        let err =
            decode_entry(&record(Some("x"), None), anchor()).expect_err("missing freq must fail");
        assert!(matches!(
            err,
            RecurError::Validation(ValidationError::MissingFrequency { .. })
        ));
    }

    #[test]
    fn non_positive_interval_fails_validation() {
        for bad in [0, -1, -52] {
            let mut rec = record(Some("x"), Some("weekly"));
            rec.interval = Some(bad);
            let err = decode_entry(&rec, anchor()).expect_err("non-positive interval must fail");
            assert!(matches!(
                err,
                RecurError::Validation(ValidationError::InvalidInterval { interval, .. })
                    if interval == bad
            ));
        }
    }

    #[test]
    fn absent_interval_defaults_to_one() {
        let entry = decode_entry(&record(Some("x"), Some("monthly")), anchor())
            .expect("record should decode");
        assert_eq!(entry.recurrence().interval(), 1);
    }
}
