//! Main application state container
//!
//! Rust owns all state; screens are renderers over the views exposed
//! here. The single `App` instance built at startup is the only place
//! the database, the HTTP client, and the auth manager are created.

use chrono::{DateTime, Utc};

use boka_api::{ApiClient, Appointment, HourAvailability, ProfileUpdate, Provider, UserProfile};
use boka_auth::{AuthManager, AuthState};
use boka_storage::{CredentialStore, Database};

use crate::config::Config;
use crate::Result;

pub struct App {
    config: Config,
    db: Database,
    api: ApiClient,
    auth: AuthManager<ApiClient>,
}

impl App {
    /// Build the application container. Does not touch the network.
    pub fn new(config: Config) -> Result<Self> {
        // Ensure data directory exists
        if let Some(parent) = config.database_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let db = Database::open(&config.database_path)?;
        let api = ApiClient::new(config.api_base_url.clone());
        let auth = AuthManager::new(CredentialStore::new(db.clone()), api.clone());

        Ok(Self {
            config,
            db,
            api,
            auth,
        })
    }

    /// Restore persisted state. Call once, before the first screen asks
    /// for the auth state.
    pub async fn initialize(&self) -> AuthState {
        let state = self.auth.initialize().await;

        tracing::info!(signed_in = state.is_signed_in(), "App initialized");

        state
    }

    // === Auth operations ===

    pub fn auth(&self) -> &AuthManager<ApiClient> {
        &self.auth
    }

    pub fn auth_state(&self) -> AuthState {
        self.auth.state()
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<UserProfile> {
        Ok(self.auth.sign_in(email, password).await?)
    }

    pub async fn sign_out(&self) -> Result<()> {
        Ok(self.auth.sign_out().await?)
    }

    /// Push a profile change to the backend, then fold the confirmed
    /// profile into the session. The token is untouched either way.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<UserProfile> {
        let user = self.api.update_profile(update).await?;
        Ok(self.auth.update_user(user).await?)
    }

    // === Booking operations ===

    pub async fn providers(&self) -> Result<Vec<Provider>> {
        Ok(self.api.list_providers().await?)
    }

    pub async fn provider_day_availability(
        &self,
        provider_id: &str,
        year: i32,
        month: u32,
        day: u32,
    ) -> Result<Vec<HourAvailability>> {
        Ok(self
            .api
            .provider_day_availability(provider_id, year, month, day)
            .await?)
    }

    pub async fn book_appointment(
        &self,
        provider_id: &str,
        date: DateTime<Utc>,
    ) -> Result<Appointment> {
        Ok(self.api.create_appointment(provider_id, date).await?)
    }

    // === Config ===

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

impl Clone for App {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            db: self.db.clone(),
            api: self.api.clone(),
            auth: self.auth.clone(),
        }
    }
}
