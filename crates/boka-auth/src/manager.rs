//! Auth Manager
//!
//! The sole orchestrator of session transitions and the sole writer of
//! the HTTP client's bearer-token slot. One instance is built at
//! process start and handed (cloned) to every consumer.
//!
//! Transitions:
//!
//! ```text
//! Loading ──(restore finds credentials)──→ SignedIn(user)
//! Loading ──(nothing stored / load fails)──→ SignedOut
//! SignedOut ──(sign_in ok)──→ SignedIn(user)
//! SignedIn ──(sign_out)──→ SignedOut
//! SignedIn ──(update_user ok)──→ SignedIn(user')   // same token
//! ```
//!
//! Mutating operations are serialized: at most one of `initialize`,
//! `sign_in`, `sign_out`, `update_user` runs at a time, and an
//! overlapping call fails with `AuthError::Busy`. Each operation
//! updates storage first, then the token slot, then in-memory state,
//! so a failure leaves all three exactly as they were.

use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

use boka_api::{AuthApi, UserProfile};
use boka_storage::CredentialStore;

use crate::error::AuthError;
use crate::state::{AuthSession, AuthState};
use crate::Result;

enum SessionSlot {
    Loading,
    Empty,
    Active(AuthSession),
}

pub struct AuthManager<A: AuthApi> {
    /// In-memory session, `Loading` until `initialize` resolves
    session: Arc<RwLock<SessionSlot>>,
    /// Durable token + user entries
    store: CredentialStore,
    /// Shared HTTP client (bearer-token slot + sessions endpoint)
    api: A,
    /// Serializes mutating operations
    op_guard: Arc<Mutex<()>>,
    initialized: Arc<AtomicBool>,
}

impl<A: AuthApi> AuthManager<A> {
    pub fn new(store: CredentialStore, api: A) -> Self {
        Self {
            session: Arc::new(RwLock::new(SessionSlot::Loading)),
            store,
            api,
            op_guard: Arc::new(Mutex::new(())),
            initialized: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Restore the persisted session, once per process.
    ///
    /// Never fails: a storage error, a malformed user entry, or a
    /// half-written pair all mean "no session" and land in `SignedOut`.
    /// Calling it again after the first resolution is a no-op.
    pub async fn initialize(&self) -> AuthState {
        let _guard = self.op_guard.lock().await;

        if self.initialized.load(Ordering::Acquire) {
            return self.state();
        }

        match self.restore_session() {
            Some(session) => {
                self.api.set_bearer_token(Some(&session.token));
                tracing::info!(user_id = %session.user.id, "Restored session");
                *self.session.write() = SessionSlot::Active(session);
            }
            None => {
                *self.session.write() = SessionSlot::Empty;
            }
        }

        self.initialized.store(true, Ordering::Release);
        self.state()
    }

    fn restore_session(&self) -> Option<AuthSession> {
        let (token, user_json) = match self.store.load_all() {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("Failed to read stored credentials: {e}");
                return None;
            }
        };

        match (token, user_json) {
            (Some(token), Some(user_json)) => match serde_json::from_str(&user_json) {
                Ok(user) => Some(AuthSession { token, user }),
                Err(e) => {
                    tracing::warn!("Discarding unreadable stored user: {e}");
                    self.discard_stored_credentials();
                    None
                }
            },
            (None, None) => None,
            _ => {
                // One entry without the other means an interrupted write;
                // treat the pair as corrupt.
                tracing::warn!("Discarding partial stored credentials");
                self.discard_stored_credentials();
                None
            }
        }
    }

    fn discard_stored_credentials(&self) {
        if let Err(e) = self.store.clear_all() {
            tracing::warn!("Failed to clear stored credentials: {e}");
        }
    }

    /// Exchange credentials for a session and persist it.
    ///
    /// A remote rejection or a storage failure leaves the store, the
    /// bearer slot, and the observed state untouched.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<UserProfile> {
        self.ensure_ready()?;
        let _guard = self.op_guard.try_lock().map_err(|_| AuthError::Busy)?;

        if matches!(&*self.session.read(), SessionSlot::Active(_)) {
            return Err(AuthError::AlreadySignedIn);
        }

        let grant = self.api.create_session(email, password).await?;
        let user_json = serde_json::to_string(&grant.user)?;
        self.store.save_all(&grant.token, &user_json)?;

        self.api.set_bearer_token(Some(&grant.token));
        *self.session.write() = SessionSlot::Active(AuthSession {
            token: grant.token,
            user: grant.user.clone(),
        });

        tracing::info!(user_id = %grant.user.id, "Signed in");

        Ok(grant.user)
    }

    /// Drop the session everywhere: store, bearer slot, memory.
    ///
    /// Idempotent; signing out while already signed out succeeds.
    /// In-flight requests keep the header they were sent with, but no
    /// request issued after this call carries it.
    pub async fn sign_out(&self) -> Result<()> {
        self.ensure_ready()?;
        let _guard = self.op_guard.try_lock().map_err(|_| AuthError::Busy)?;

        self.store.clear_all()?;
        self.api.set_bearer_token(None);
        *self.session.write() = SessionSlot::Empty;

        tracing::info!("Signed out");

        Ok(())
    }

    /// Replace the signed-in user's profile, keeping the current token.
    pub async fn update_user(&self, user: UserProfile) -> Result<UserProfile> {
        self.ensure_ready()?;
        let _guard = self.op_guard.try_lock().map_err(|_| AuthError::Busy)?;

        if !matches!(&*self.session.read(), SessionSlot::Active(_)) {
            return Err(AuthError::NotAuthenticated);
        }

        let user_json = serde_json::to_string(&user)?;
        self.store.save_user(&user_json)?;

        if let SessionSlot::Active(session) = &mut *self.session.write() {
            session.user = user.clone();
        }

        tracing::info!(user_id = %user.id, "Updated profile");

        Ok(user)
    }

    /// Current lifecycle state, reflecting the most recently completed
    /// operation.
    pub fn state(&self) -> AuthState {
        match &*self.session.read() {
            SessionSlot::Loading => AuthState::Loading,
            SessionSlot::Empty => AuthState::SignedOut,
            SessionSlot::Active(session) => AuthState::SignedIn(session.user.clone()),
        }
    }

    pub fn current_user(&self) -> Option<UserProfile> {
        match &*self.session.read() {
            SessionSlot::Active(session) => Some(session.user.clone()),
            _ => None,
        }
    }

    fn ensure_ready(&self) -> Result<()> {
        if self.initialized.load(Ordering::Acquire) {
            Ok(())
        } else {
            Err(AuthError::NotInitialized)
        }
    }
}

impl<A: AuthApi + Clone> Clone for AuthManager<A> {
    fn clone(&self) -> Self {
        Self {
            session: Arc::clone(&self.session),
            store: self.store.clone(),
            api: self.api.clone(),
            op_guard: Arc::clone(&self.op_guard),
            initialized: Arc::clone(&self.initialized),
        }
    }
}
