//! Sync layer: pure reconciliation of projected occurrences against store
//! ground truth, window helpers, and the sequenced run driver.

pub mod error;
pub mod reconcile;
pub mod run;
pub mod window;
