//! Constants shared across crates.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

/// Shared recurrence epoch: 2000-02-01T00:00:00Z.
///
/// Every rule measures its interval phase from this instant, so two runs
/// with the same window produce identical occurrence sets regardless of
/// when or where they execute. Decoding takes the anchor as an explicit
/// parameter; this constant is the production value, tests substitute
/// their own.
pub const DEFAULT_ANCHOR: DateTime<Utc> = match NaiveDate::from_ymd_opt(2000, 2, 1) {
    Some(date) => {
        DateTime::from_naive_utc_and_offset(NaiveDateTime::new(date, NaiveTime::MIN), Utc)
    }
    None => panic!("recurrence epoch is not a valid date"),
};

/// Rendering of due instants when talking to the store. Millisecond
/// precision with a literal `Z`; reconciliation compares these strings
/// character for character.
pub const DUE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Task store API origin and versioned base path.
pub const STORE_API_ORIGIN: &str = "https://tasks.googleapis.com";
pub const STORE_API_BASE: &str = const_str::concat!(STORE_API_ORIGIN, "/tasks/v1");

/// OAuth scope required to read and write task lists.
pub const STORE_OAUTH_SCOPE: &str = "https://www.googleapis.com/auth/tasks";

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn default_anchor_value() {
        assert_eq!(DEFAULT_ANCHOR.year(), 2000);
        assert_eq!(DEFAULT_ANCHOR.month(), 2);
        assert_eq!(DEFAULT_ANCHOR.day(), 1);
        assert_eq!(DEFAULT_ANCHOR.hour(), 0);
    }

    #[test]
    fn store_api_base_is_versioned() {
        assert_eq!(STORE_API_BASE, "https://tasks.googleapis.com/tasks/v1");
    }
}
