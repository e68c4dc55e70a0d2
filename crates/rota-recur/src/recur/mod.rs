//! Declarative recurrence model.
//!
//! This module defines the typed rule values, the loose document shape
//! rules are authored in, the decode step that turns one into the other,
//! and the pure expansion math. The types are designed for:
//! - Determinism: a fixed shared anchor makes interval phase reproducible
//!   between runs and machines
//! - Fail-fast construction: one bad record aborts the whole schedule
//! - Exhaustiveness: frequency and weekday are closed enums, so unhandled
//!   cases are compile errors rather than silent defaults

mod decode;
mod document;
mod expand;
mod rule;
mod schedule;

pub use decode::{DecodeError, ValidationError, decode_entry};
pub use document::{ScheduleDocument, TaskRecord};
pub use expand::occurrences;
pub use rule::{Frequency, RecurrenceRule, Weekday};
pub use schedule::{Schedule, ScheduleEntry};
