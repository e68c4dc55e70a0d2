//! Pure expansion of recurrence rules over bounded windows.
//!
//! All arithmetic is performed on UTC calendar dates measured against the
//! rule's anchor, so the same rule and window always produce the same
//! occurrence set on every machine.

use chrono::{DateTime, Datelike, Days, NaiveDate, Utc};

use super::rule::{Frequency, RecurrenceRule, Weekday};

/// ## Summary
/// Expands `rule` into every occurrence inside the window `[start, end]`.
///
/// Both window edges are inclusive. Occurrences carry the anchor's
/// time-of-day, are produced in chronological order, and never precede the
/// anchor itself. A window that ends before it begins is empty, not an
/// error, as is a rule whose anchor postdates `end`.
#[must_use]
pub fn occurrences(
    rule: &RecurrenceRule,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Vec<DateTime<Utc>> {
    if start > end {
        return Vec::new();
    }

    let anchor = rule.anchor();
    let floor = if anchor > start { anchor } else { start };
    let last = end.date_naive();

    let mut out = Vec::new();
    let mut date = floor.date_naive();
    while date <= last {
        if matches_date(rule, date) {
            let at = DateTime::from_naive_utc_and_offset(date.and_time(anchor.time()), Utc);
            if at >= floor && at <= end {
                out.push(at);
            }
        }
        match date.succ_opt() {
            Some(next) => date = next,
            None => break,
        }
    }

    out
}

/// Whether `date` satisfies the rule's frequency, interval phase, and
/// weekday restriction. Total over all dates; expansion applies the
/// anchor floor and window separately.
fn matches_date(rule: &RecurrenceRule, date: NaiveDate) -> bool {
    let anchor = rule.anchor().date_naive();
    let interval = i64::from(rule.interval());

    match rule.frequency() {
        Frequency::Daily => (date - anchor).num_days().rem_euclid(interval) == 0,
        Frequency::Weekly => {
            let weeks = (week_start(date) - week_start(anchor)).num_days() / 7;
            weeks.rem_euclid(interval) == 0 && on_scheduled_weekday(rule, date)
        }
        Frequency::Monthly => {
            // Months lacking the anchor's day-of-month are skipped, never
            // clamped to their last day.
            date.day() == anchor.day()
                && months_between(anchor, date).rem_euclid(interval) == 0
        }
    }
}

/// Whether `date` falls on a weekday the rule schedules. An empty set
/// falls back to the anchor's own weekday.
fn on_scheduled_weekday(rule: &RecurrenceRule, date: NaiveDate) -> bool {
    let day = Weekday::from_chrono(date.weekday());
    if rule.weekdays().is_empty() {
        day == Weekday::from_chrono(rule.anchor().weekday())
    } else {
        rule.weekdays().contains(&day)
    }
}

/// Monday of the week containing `date`. Weekly interval phase counts
/// whole Monday-aligned weeks between anchor and candidate.
fn week_start(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.weekday().num_days_from_monday()))
}

/// Signed count of calendar months from `anchor`'s month to `date`'s.
fn months_between(anchor: NaiveDate, date: NaiveDate) -> i64 {
    (i64::from(date.year()) - i64::from(anchor.year())) * 12 + i64::from(date.month())
        - i64::from(anchor.month())
}
