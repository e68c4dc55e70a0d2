//! Declarative schedule document model.
//!
//! The document is a YAML file with a `tasks` list:
//!
//! ```yaml
//! tasks:
//!   - title: Water plants
//!     freq: weekly
//!     byweekday: [SU]
//!   - title: Change filters
//!     freq: monthly
//!     interval: 3
//! ```

use config::{Config, File, FileFormat};
use serde::Deserialize;

use crate::error::RecurResult;

/// One rule record as authored in the schedule document.
///
/// Every field is optional at this level so that missing required values
/// surface as domain validation failures during decode instead of opaque
/// deserialization errors.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskRecord {
    pub title: Option<String>,
    pub freq: Option<String>,
    pub interval: Option<i64>,
    #[serde(default)]
    pub byweekday: Vec<String>,
}

/// The whole declarative document: an ordered list of rule records.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScheduleDocument {
    #[serde(default)]
    pub tasks: Vec<TaskRecord>,
}

impl ScheduleDocument {
    /// ## Summary
    /// Loads a schedule document from a YAML file.
    ///
    /// ## Errors
    /// Returns a format error if the file cannot be read or does not
    /// deserialize into the document shape.
    pub fn from_path(path: &str) -> RecurResult<Self> {
        tracing::debug!(path, "Loading schedule document");
        Ok(Config::builder()
            .add_source(File::new(path, FileFormat::Yaml))
            .build()?
            .try_deserialize::<Self>()?)
    }

    /// ## Summary
    /// Parses a schedule document from YAML text.
    ///
    /// ## Errors
    /// Returns a format error if the text does not deserialize into the
    /// document shape.
    pub fn from_yaml(text: &str) -> RecurResult<Self> {
        Ok(Config::builder()
            .add_source(File::from_str(text, FileFormat::Yaml))
            .build()?
            .try_deserialize::<Self>()?)
    }
}
