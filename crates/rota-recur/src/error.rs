use thiserror::Error;

use crate::recur::{DecodeError, ValidationError};

/// Recurrence decoding and schedule document errors
#[derive(Error, Debug)]
pub enum RecurError {
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Schedule document error: {0}")]
    Format(#[from] config::ConfigError),
}

pub type RecurResult<T> = std::result::Result<T, RecurError>;
