//! Boka Core
//!
//! Central coordination layer for the booking client. One `App` is
//! built at process start; screens receive clones of it and never
//! construct their own storage, client, or auth manager.

mod app;
mod config;
mod error;

pub use app::App;
pub use config::Config;
pub use error::CoreError;

// Re-export core components
pub use boka_api::{
    ApiClient, ApiError, Appointment, HourAvailability, ProfileUpdate, Provider, UserProfile,
};
pub use boka_auth::{AuthError, AuthManager, AuthState};
pub use boka_storage::{CredentialStore, Database, StorageError};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
