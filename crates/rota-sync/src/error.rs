use thiserror::Error;

/// Sync layer errors - combines all error types
#[derive(Error, Debug)]
pub enum SyncError {
    #[error(transparent)]
    Recur(#[from] rota_recur::error::RecurError),

    #[error(transparent)]
    Store(#[from] rota_store::error::StoreError),

    #[error(transparent)]
    Core(#[from] rota_core::error::CoreError),
}

pub type SyncResult<T> = std::result::Result<T, SyncError>;
