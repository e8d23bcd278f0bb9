//! Shared HTTP client
//!
//! Wraps reqwest with the backend's base URL and the process-wide
//! bearer-token slot. The auth manager is the only writer of that slot;
//! everything else just sends requests through the client.

use parking_lot::RwLock;
use reqwest::{Method, RequestBuilder, Response};
use serde::Deserialize;
use std::sync::Arc;
use url::Url;

use crate::types::{
    Appointment, HourAvailability, ProfileUpdate, Provider, SessionGrant, UserProfile,
};
use crate::{ApiError, Result};

/// The slice of the client the auth manager depends on.
///
/// Splitting this out lets tests drive the manager against a fake
/// backend and assert on the token slot directly.
pub trait AuthApi {
    /// Set or clear the bearer token applied to all subsequent requests.
    fn set_bearer_token(&self, token: Option<&str>);

    /// Current value of the token slot.
    fn bearer_token(&self) -> Option<String>;

    /// Exchange credentials for a session (`POST /sessions`).
    fn create_session(
        &self,
        email: &str,
        password: &str,
    ) -> impl std::future::Future<Output = Result<SessionGrant>> + Send;
}

pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    bearer: Arc<RwLock<Option<String>>>,
}

impl ApiClient {
    pub fn new(base_url: Url) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            bearer: Arc::new(RwLock::new(None)),
        }
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = self.base_url.join(path)?;
        let builder = self.http.request(method, url);

        Ok(match self.bearer.read().clone() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        })
    }

    /// Turn a non-2xx response into `ApiError::Rejected`, surfacing the
    /// server's own message when it sent one.
    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        #[derive(Deserialize)]
        struct ServerMessage {
            message: String,
        }

        let message = match response.json::<ServerMessage>().await {
            Ok(body) => body.message,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string(),
        };

        Err(ApiError::Rejected {
            status: status.as_u16(),
            message,
        })
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<UserProfile> {
        let response = self
            .request(Method::PUT, "profile")?
            .json(update)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    pub async fn list_providers(&self) -> Result<Vec<Provider>> {
        let response = self.request(Method::GET, "providers")?.send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    pub async fn provider_day_availability(
        &self,
        provider_id: &str,
        year: i32,
        month: u32,
        day: u32,
    ) -> Result<Vec<HourAvailability>> {
        let path = format!("providers/{provider_id}/day-availability");
        let response = self
            .request(Method::GET, &path)?
            .query(&[
                ("year", year.to_string()),
                ("month", month.to_string()),
                ("day", day.to_string()),
            ])
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    pub async fn create_appointment(
        &self,
        provider_id: &str,
        date: chrono::DateTime<chrono::Utc>,
    ) -> Result<Appointment> {
        let response = self
            .request(Method::POST, "appointments")?
            .json(&serde_json::json!({
                "provider_id": provider_id,
                "date": date,
            }))
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }
}

impl AuthApi for ApiClient {
    fn set_bearer_token(&self, token: Option<&str>) {
        *self.bearer.write() = token.map(|t| t.to_string());
    }

    fn bearer_token(&self) -> Option<String> {
        self.bearer.read().clone()
    }

    async fn create_session(&self, email: &str, password: &str) -> Result<SessionGrant> {
        let response = self
            .request(Method::POST, "sessions")?
            .json(&serde_json::json!({
                "email": email,
                "password": password,
            }))
            .send()
            .await?;

        let grant: SessionGrant = Self::check(response).await?.json().await?;

        tracing::debug!(user_id = %grant.user.id, "Session created");

        Ok(grant)
    }
}

impl Clone for ApiClient {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            bearer: Arc::clone(&self.bearer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ApiClient {
        ApiClient::new(Url::parse("http://localhost:3333/").unwrap())
    }

    #[test]
    fn test_bearer_slot_starts_empty() {
        assert!(client().bearer_token().is_none());
    }

    #[test]
    fn test_bearer_slot_set_and_clear() {
        let client = client();

        client.set_bearer_token(Some("t1"));
        assert_eq!(client.bearer_token().as_deref(), Some("t1"));

        client.set_bearer_token(None);
        assert!(client.bearer_token().is_none());
    }

    #[test]
    fn test_clones_share_the_token_slot() {
        let client = client();
        let handle = client.clone();

        client.set_bearer_token(Some("t1"));
        assert_eq!(handle.bearer_token().as_deref(), Some("t1"));
    }

    #[test]
    fn test_paths_resolve_against_base_url() {
        let client = client();
        let request = client.request(Method::GET, "providers").unwrap();
        let built = request.build().unwrap();
        assert_eq!(built.url().as_str(), "http://localhost:3333/providers");
    }

    #[test]
    fn test_request_carries_bearer_header() {
        let client = client();
        client.set_bearer_token(Some("t1"));

        let built = client
            .request(Method::GET, "providers")
            .unwrap()
            .build()
            .unwrap();
        let header = built
            .headers()
            .get(reqwest::header::AUTHORIZATION)
            .unwrap();
        assert_eq!(header.to_str().unwrap(), "Bearer t1");
    }
}
