//! Session state as consumers observe it

use boka_api::UserProfile;

/// A live session: the credential token paired with the user it belongs
/// to. The token never leaves this crate.
#[derive(Debug, Clone)]
pub(crate) struct AuthSession {
    pub(crate) token: String,
    pub(crate) user: UserProfile,
}

/// What a screen sees when it asks "who is signed in?".
///
/// `Loading` covers the window between first render and the storage
/// read resolving, so consumers can show a splash instead of guessing.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthState {
    Loading,
    SignedOut,
    SignedIn(UserProfile),
}

impl AuthState {
    pub fn is_signed_in(&self) -> bool {
        matches!(self, AuthState::SignedIn(_))
    }

    pub fn user(&self) -> Option<&UserProfile> {
        match self {
            AuthState::SignedIn(user) => Some(user),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> UserProfile {
        UserProfile {
            id: "1".to_string(),
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            avatar_url: None,
        }
    }

    #[test]
    fn test_state_projections() {
        assert!(!AuthState::Loading.is_signed_in());
        assert!(AuthState::Loading.user().is_none());
        assert!(!AuthState::SignedOut.is_signed_in());

        let state = AuthState::SignedIn(user());
        assert!(state.is_signed_in());
        assert_eq!(state.user().unwrap().name, "Ana");
    }
}
