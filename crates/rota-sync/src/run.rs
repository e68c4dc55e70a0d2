//! The sequenced sync run.

use chrono::{DateTime, Utc};

use rota_recur::recur::{Schedule, ScheduleDocument};
use rota_store::client::TasksClient;

use crate::error::SyncResult;
use crate::reconcile::missing_tasks;

/// Outcome counts for one sync run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncReport {
    /// Occurrences projected into the window.
    pub projected: usize,
    /// Items the store already held when the run listed it.
    pub existing: usize,
    /// Occurrences newly recorded by this run.
    pub created: usize,
}

/// ## Summary
/// Loads the schedule document at `path` and builds the schedule with the
/// given shared anchor, logging each entry's rule in human-readable form.
///
/// ## Errors
/// Propagates document format, decode, and validation errors; one bad
/// record aborts the whole schedule.
pub fn load_schedule(path: &str, anchor: DateTime<Utc>) -> SyncResult<Schedule> {
    let document = ScheduleDocument::from_path(path)?;
    let schedule = Schedule::from_document(&document, anchor)?;
    for entry in schedule.entries() {
        tracing::info!(" - {} - {}", entry.title(), entry.recurrence());
    }
    Ok(schedule)
}

/// ## Summary
/// Runs one reconciliation pass over `[start, end]`: expands the
/// schedule, lists the complete current store state, computes the
/// creation delta, and records each missing occurrence.
///
/// Creation calls run strictly one at a time with no retry or backoff; a
/// failed creation aborts the run. Because the next run recomputes the
/// delta against freshly listed ground truth, completed creations are
/// never repeated (idempotence without internal exactly-once tracking —
/// though two runs racing each other can still double-create).
///
/// ## Errors
/// Propagates store listing and creation errors.
pub async fn sync_window(
    client: &TasksClient,
    list_id: &str,
    schedule: &Schedule,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> SyncResult<SyncReport> {
    let projected = schedule.for_range(start, end);
    tracing::info!(count = projected.len(), %start, %end, "Expanded schedule over window");

    let existing = client.list_tasks(list_id).await?;
    tracing::info!(count = existing.len(), "Listed current store state");

    let delta = missing_tasks(&projected, &existing);
    tracing::info!(count = delta.len(), "Reconciled; creating missing occurrences");

    for task in &delta {
        client.insert_task(list_id, task).await?;
        tracing::info!(%task, "Created task");
    }

    Ok(SyncReport {
        projected: projected.len(),
        existing: existing.len(),
        created: delta.len(),
    })
}
