//! Reconciliation of projected occurrences against store ground truth.

use rota_core::types::{PersistedTask, Task};

/// ## Summary
/// Returns the projected tasks not yet present in the store, preserving
/// projected order.
///
/// A projected task is present iff some persisted item carries exactly its
/// title and exactly its rendered due string. Comparison is character
/// exact with no fuzzy date matching, and a persisted item missing either
/// field never matches anything (absence is not a wildcard).
///
/// Pure function of its inputs; nothing is mutated. The delta is only as
/// minimal as `existing` is complete — callers list the full current store
/// state so a re-run after a partial failure recomputes a correct delta
/// without any internal exactly-once tracking.
#[must_use]
pub fn missing_tasks(projected: &[Task], existing: &[PersistedTask]) -> Vec<Task> {
    projected
        .iter()
        .filter(|task| !is_persisted(task, existing))
        .cloned()
        .collect()
}

/// Whether `task` already exists in the store.
fn is_persisted(task: &Task, existing: &[PersistedTask]) -> bool {
    let due = task.due_string();
    existing.iter().any(|persisted| {
        persisted.title.as_deref() == Some(task.title.as_str())
            && persisted.due.as_deref() == Some(due.as_str())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn task(title: &str, y: i32, m: u32, d: u32) -> Task {
        Task::new(title, Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap())
    }

    fn persisted(title: &str, due: &str) -> PersistedTask {
        PersistedTask::new(Some(title.to_owned()), Some(due.to_owned()))
    }

    #[test]
    fn exact_match_is_excluded_from_delta() {
        let projected = vec![task("Water plants", 2024, 3, 10)];
        let existing = vec![persisted("Water plants", "2024-03-10T00:00:00.000Z")];
        assert!(missing_tasks(&projected, &existing).is_empty());
    }

    #[test]
    fn differing_precision_does_not_match() {
        let projected = vec![task("Water plants", 2024, 3, 10)];
        // Same instant, second precision instead of millisecond.
        let existing = vec![persisted("Water plants", "2024-03-10T00:00:00Z")];
        assert_eq!(missing_tasks(&projected, &existing).len(), 1);
    }

    #[test]
    fn differing_zone_spelling_does_not_match() {
        let projected = vec![task("Water plants", 2024, 3, 10)];
        // Same instant, offset notation instead of Z.
        let existing = vec![persisted("Water plants", "2024-03-10T00:00:00.000+00:00")];
        assert_eq!(missing_tasks(&projected, &existing).len(), 1);
    }

    #[test]
    fn differing_title_does_not_match() {
        let projected = vec![task("Water plants", 2024, 3, 10)];
        let existing = vec![persisted("Water the plants", "2024-03-10T00:00:00.000Z")];
        assert_eq!(missing_tasks(&projected, &existing).len(), 1);
    }

    #[test]
    fn absent_due_never_matches() {
        let projected = vec![task("Water plants", 2024, 3, 10)];
        let existing = vec![PersistedTask::new(Some("Water plants".to_owned()), None)];
        assert_eq!(missing_tasks(&projected, &existing).len(), 1);
    }

    #[test]
    fn absent_title_never_matches() {
        let projected = vec![task("Water plants", 2024, 3, 10)];
        let existing = vec![PersistedTask::new(
            None,
            Some("2024-03-10T00:00:00.000Z".to_owned()),
        )];
        assert_eq!(missing_tasks(&projected, &existing).len(), 1);
    }

    #[test]
    fn delta_preserves_projected_order() {
        let projected = vec![
            task("B", 2024, 3, 17),
            task("A", 2024, 3, 3),
            task("C", 2024, 3, 10),
        ];
        let existing = vec![persisted("A", "2024-03-03T00:00:00.000Z")];
        let delta = missing_tasks(&projected, &existing);
        let titles: Vec<_> = delta.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["B", "C"]);
    }

    #[test]
    fn inputs_are_untouched_and_empty_inputs_are_valid() {
        assert!(missing_tasks(&[], &[]).is_empty());

        let projected = vec![task("A", 2024, 3, 3)];
        let delta = missing_tasks(&projected, &[]);
        assert_eq!(delta, projected);

        let existing = vec![persisted("A", "2024-03-03T00:00:00.000Z")];
        assert!(missing_tasks(&[], &existing).is_empty());
    }

    #[test]
    fn duplicate_projection_both_survive_when_unmatched() {
        let projected = vec![task("A", 2024, 3, 3), task("A", 2024, 3, 3)];
        let delta = missing_tasks(&projected, &[]);
        assert_eq!(delta.len(), 2);
    }
}
