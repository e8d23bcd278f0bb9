//! Credential persistence
//!
//! Exactly two entries survive restarts: the opaque session token and
//! the serialized user profile. The auth manager is the only component
//! allowed to touch them.

use rusqlite::OptionalExtension;

use crate::database::Database;
use crate::Result;

const TOKEN_KEY: &str = "auth_token";
const USER_KEY: &str = "auth_user";

/// Durable store for the session's two entries.
pub struct CredentialStore {
    db: Database,
}

impl CredentialStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Read both entries in one batch. A key that was never written
    /// comes back as `None`, not an error.
    pub fn load_all(&self) -> Result<(Option<String>, Option<String>)> {
        self.db.with_connection(|conn| {
            let token = conn
                .query_row(
                    "SELECT value FROM credentials WHERE key = ?1",
                    [TOKEN_KEY],
                    |row| row.get(0),
                )
                .optional()?;
            let user = conn
                .query_row(
                    "SELECT value FROM credentials WHERE key = ?1",
                    [USER_KEY],
                    |row| row.get(0),
                )
                .optional()?;
            Ok((token, user))
        })
    }

    /// Write both entries in a single transaction so a crash can never
    /// leave a token without its user, or the reverse.
    pub fn save_all(&self, token: &str, user_json: &str) -> Result<()> {
        self.db.transaction(|conn| {
            conn.execute(
                "INSERT OR REPLACE INTO credentials (key, value) VALUES (?1, ?2)",
                rusqlite::params![TOKEN_KEY, token],
            )?;
            conn.execute(
                "INSERT OR REPLACE INTO credentials (key, value) VALUES (?1, ?2)",
                rusqlite::params![USER_KEY, user_json],
            )?;
            Ok(())
        })
    }

    /// Replace only the user entry, leaving the token untouched.
    pub fn save_user(&self, user_json: &str) -> Result<()> {
        self.db.with_connection(|conn| {
            conn.execute(
                "INSERT OR REPLACE INTO credentials (key, value) VALUES (?1, ?2)",
                rusqlite::params![USER_KEY, user_json],
            )?;
            Ok(())
        })
    }

    /// Remove both entries. Clearing an already-empty store succeeds.
    pub fn clear_all(&self) -> Result<()> {
        self.db.with_connection(|conn| {
            conn.execute(
                "DELETE FROM credentials WHERE key IN (?1, ?2)",
                rusqlite::params![TOKEN_KEY, USER_KEY],
            )?;
            Ok(())
        })
    }
}

impl Clone for CredentialStore {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> CredentialStore {
        CredentialStore::new(Database::open_in_memory().unwrap())
    }

    #[test]
    fn test_empty_store_loads_absent() {
        let store = store();
        let (token, user) = store.load_all().unwrap();
        assert!(token.is_none());
        assert!(user.is_none());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let store = store();
        store.save_all("t1", r#"{"id":"1"}"#).unwrap();

        let (token, user) = store.load_all().unwrap();
        assert_eq!(token.as_deref(), Some("t1"));
        assert_eq!(user.as_deref(), Some(r#"{"id":"1"}"#));
    }

    #[test]
    fn test_save_user_keeps_token() {
        let store = store();
        store.save_all("t1", r#"{"name":"A"}"#).unwrap();
        store.save_user(r#"{"name":"A2"}"#).unwrap();

        let (token, user) = store.load_all().unwrap();
        assert_eq!(token.as_deref(), Some("t1"));
        assert_eq!(user.as_deref(), Some(r#"{"name":"A2"}"#));
    }

    #[test]
    fn test_clear_is_idempotent() {
        let store = store();
        store.clear_all().unwrap();

        store.save_all("t1", "{}").unwrap();
        store.clear_all().unwrap();
        store.clear_all().unwrap();

        let (token, user) = store.load_all().unwrap();
        assert!(token.is_none());
        assert!(user.is_none());
    }
}
