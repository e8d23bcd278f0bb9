//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Storage error: {0}")]
    Storage(#[from] boka_storage::StorageError),

    #[error("Auth error: {0}")]
    Auth(#[from] boka_auth::AuthError),

    #[error("API error: {0}")]
    Api(#[from] boka_api::ApiError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::Config(e.to_string())
    }
}
