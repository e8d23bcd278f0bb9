//! Boka Storage Layer
//!
//! SQLite-based persistence for all client state.
//! Credential writes are transactional: the token and the serialized
//! user either land together or not at all.

mod credentials;
mod database;
mod error;
mod migrations;

pub use credentials::CredentialStore;
pub use database::Database;
pub use error::StorageError;

pub type Result<T> = std::result::Result<T, StorageError>;
