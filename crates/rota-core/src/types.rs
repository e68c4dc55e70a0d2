//! Domain types shared between the recurrence engine, the store client,
//! and reconciliation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::DUE_FORMAT;

/// A projected occurrence: one obligation due at one concrete instant.
///
/// Produced transiently by expansion; persistence is the store's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    /// Display name, copied from the owning schedule entry. Also the
    /// identity key used for reconciliation.
    pub title: String,
    /// Concrete due instant, always inside the requested window.
    pub due: DateTime<Utc>,
}

impl Task {
    #[must_use]
    pub fn new(title: impl Into<String>, due: DateTime<Utc>) -> Self {
        Self {
            title: title.into(),
            due,
        }
    }

    /// Renders the due instant with the exact precision and zone
    /// convention the store uses.
    #[must_use]
    pub fn due_string(&self) -> String {
        self.due.format(DUE_FORMAT).to_string()
    }
}

impl std::fmt::Display for Task {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.title, self.due_string())
    }
}

/// What the store actually returns for an existing item.
///
/// Both fields may be absent; an absent field never matches anything
/// during reconciliation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedTask {
    pub title: Option<String>,
    pub due: Option<String>,
}

impl PersistedTask {
    #[must_use]
    pub fn new(title: Option<String>, due: Option<String>) -> Self {
        Self { title, due }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn due_string_has_millisecond_precision_and_zulu() {
        let task = Task::new(
            "Water plants",
            Utc.with_ymd_and_hms(2024, 3, 10, 0, 0, 0).unwrap(),
        );
        assert_eq!(task.due_string(), "2024-03-10T00:00:00.000Z");
    }

    #[test]
    fn task_display_includes_title_and_due() {
        let task = Task::new("Mow lawn", Utc.with_ymd_and_hms(2024, 3, 3, 0, 0, 0).unwrap());
        assert_eq!(task.to_string(), "Mow lawn - 2024-03-03T00:00:00.000Z");
    }
}
