use thiserror::Error;

/// Task store client errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Store API error (status {status}): {body}")]
    Api { status: u16, body: String },

    #[error("Authorization error: {0}")]
    Auth(String),

    #[error("Token cache error: {0}")]
    TokenCache(#[from] std::io::Error),

    #[error("Credentials error: {0}")]
    Credentials(#[from] serde_json::Error),

    #[error("Task list '{0}' is missing")]
    MissingList(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
