//! Boka Remote API
//!
//! HTTP client for the booking backend. One `ApiClient` is shared by the
//! whole process; its bearer-token slot is written only by the auth
//! manager, and every outgoing request derives its `Authorization`
//! header from it.

mod client;
mod error;
mod types;

pub use client::{ApiClient, AuthApi};
pub use error::ApiError;
pub use types::{
    Appointment, HourAvailability, ProfileUpdate, Provider, SessionGrant, UserProfile,
};

pub type Result<T> = std::result::Result<T, ApiError>;
