//! Recurrence engine: typed rule values, declarative document decoding,
//! and deterministic expansion over bounded windows.

pub mod error;
pub mod recur;
