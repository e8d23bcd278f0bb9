//! Boka Session Management
//!
//! Owns the user's authenticated session: restores it from storage at
//! startup, establishes it on sign-in, tears it down on sign-out, and
//! keeps the shared HTTP client's bearer token in step with every
//! transition. Consumers only ever observe one of three states:
//! loading, signed out, or signed in with a full profile. A token
//! without a user (or the reverse) is never visible.

mod error;
mod manager;
mod state;

pub use error::AuthError;
pub use manager::AuthManager;
pub use state::AuthState;

pub type Result<T> = std::result::Result<T, AuthError>;
