//! Recurrence rule value types.

use std::fmt;

use chrono::{DateTime, Utc};

/// Recurrence frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
}

impl Frequency {
    /// Returns the document token for this frequency.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }

    /// Parses a frequency token. Tokens are case-sensitive: the document
    /// format uses lowercase names only.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s {
            "daily" => Self::Daily,
            "weekly" => Self::Weekly,
            "monthly" => Self::Monthly,
            _ => return None,
        })
    }

    /// Singular English unit for this frequency.
    #[must_use]
    pub const fn unit(self) -> &'static str {
        match self {
            Self::Daily => "day",
            Self::Weekly => "week",
            Self::Monthly => "month",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Day of the week, Monday first to match the week alignment used for
/// weekly interval phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// Returns the two-letter abbreviation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Monday => "MO",
            Self::Tuesday => "TU",
            Self::Wednesday => "WE",
            Self::Thursday => "TH",
            Self::Friday => "FR",
            Self::Saturday => "SA",
            Self::Sunday => "SU",
        }
    }

    /// Parses a two-letter weekday code. Codes are case-sensitive
    /// (`MO`..`SU`).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s {
            "MO" => Self::Monday,
            "TU" => Self::Tuesday,
            "WE" => Self::Wednesday,
            "TH" => Self::Thursday,
            "FR" => Self::Friday,
            "SA" => Self::Saturday,
            "SU" => Self::Sunday,
            _ => return None,
        })
    }

    /// Converts from chrono's weekday representation.
    #[must_use]
    pub const fn from_chrono(weekday: chrono::Weekday) -> Self {
        match weekday {
            chrono::Weekday::Mon => Self::Monday,
            chrono::Weekday::Tue => Self::Tuesday,
            chrono::Weekday::Wed => Self::Wednesday,
            chrono::Weekday::Thu => Self::Thursday,
            chrono::Weekday::Fri => Self::Friday,
            chrono::Weekday::Sat => Self::Saturday,
            chrono::Weekday::Sun => Self::Sunday,
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One repeating pattern: frequency, interval, weekday set, and the phase
/// anchor.
///
/// The anchor is the fixed instant establishing which day/week/month is
/// interval index zero. All rules in a schedule share one anchor so
/// interval phase is comparable and reproducible between runs. Immutable
/// once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurrenceRule {
    frequency: Frequency,
    interval: u32,
    weekdays: Vec<Weekday>,
    anchor: DateTime<Utc>,
}

impl RecurrenceRule {
    /// Creates a rule with interval 1 and no weekday restriction.
    #[must_use]
    pub const fn new(frequency: Frequency, anchor: DateTime<Utc>) -> Self {
        Self {
            frequency,
            interval: 1,
            weekdays: Vec::new(),
            anchor,
        }
    }

    /// Creates a daily rule.
    #[must_use]
    pub const fn daily(anchor: DateTime<Utc>) -> Self {
        Self::new(Frequency::Daily, anchor)
    }

    /// Creates a weekly rule.
    #[must_use]
    pub const fn weekly(anchor: DateTime<Utc>) -> Self {
        Self::new(Frequency::Weekly, anchor)
    }

    /// Creates a monthly rule.
    #[must_use]
    pub const fn monthly(anchor: DateTime<Utc>) -> Self {
        Self::new(Frequency::Monthly, anchor)
    }

    /// Sets the interval.
    ///
    /// ## Panics
    ///
    /// Panics if `interval` is zero.
    #[must_use]
    pub fn with_interval(mut self, interval: u32) -> Self {
        assert!(interval >= 1, "interval must be at least 1");
        self.interval = interval;
        self
    }

    /// Sets the weekday set. The set is sorted and deduplicated so equal
    /// rules compare equal regardless of authoring order.
    #[must_use]
    pub fn with_weekdays(mut self, weekdays: impl IntoIterator<Item = Weekday>) -> Self {
        let mut days: Vec<Weekday> = weekdays.into_iter().collect();
        days.sort_unstable();
        days.dedup();
        self.weekdays = days;
        self
    }

    #[must_use]
    pub const fn frequency(&self) -> Frequency {
        self.frequency
    }

    #[must_use]
    pub const fn interval(&self) -> u32 {
        self.interval
    }

    /// Weekday restriction; meaningful for weekly rules only. Empty means
    /// "the anchor's own weekday".
    #[must_use]
    pub fn weekdays(&self) -> &[Weekday] {
        &self.weekdays
    }

    #[must_use]
    pub const fn anchor(&self) -> DateTime<Utc> {
        self.anchor
    }
}

impl fmt::Display for RecurrenceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.interval == 1 {
            write!(f, "every {}", self.frequency.unit())?;
        } else {
            write!(f, "every {} {}s", self.interval, self.frequency.unit())?;
        }

        if self.frequency == Frequency::Weekly && !self.weekdays.is_empty() {
            let days: Vec<_> = self.weekdays.iter().map(|d| d.as_str()).collect();
            write!(f, " on {}", days.join(", "))?;
        }

        Ok(())
    }
}
