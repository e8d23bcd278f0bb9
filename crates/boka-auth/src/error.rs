//! Auth error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Not signed in")]
    NotAuthenticated,

    #[error("Already signed in; sign out first")]
    AlreadySignedIn,

    #[error("Another session operation is in flight")]
    Busy,

    #[error("Session manager not initialized")]
    NotInitialized,

    #[error("Storage error: {0}")]
    Storage(#[from] boka_storage::StorageError),

    #[error("API error: {0}")]
    Api(#[from] boka_api::ApiError),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
