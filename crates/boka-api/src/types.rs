//! Wire types shared with the booking backend

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The authenticated user's profile as the server reports it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar_url: Option<String>,
}

/// Response of `POST /sessions`: a fresh token and the signed-in user.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionGrant {
    pub token: String,
    pub user: UserProfile,
}

/// Payload of `PUT /profile`. The password block is only sent when the
/// user is actually changing their password.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileUpdate {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_confirmation: Option<String>,
}

/// A service provider the user can book with.
#[derive(Debug, Clone, Deserialize)]
pub struct Provider {
    pub id: String,
    pub name: String,
    pub avatar_url: Option<String>,
}

/// One slot of a provider's day availability.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct HourAvailability {
    pub hour: u32,
    pub available: bool,
}

/// A booked appointment.
#[derive(Debug, Clone, Deserialize)]
pub struct Appointment {
    pub id: String,
    pub provider_id: String,
    pub date: DateTime<Utc>,
}
