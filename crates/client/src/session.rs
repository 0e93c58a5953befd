//! Session state and its file-backed persistence.
//!
//! The token and the cached identity are stored together and restored
//! together: a file with only one half (or garbage) is wiped rather than
//! producing a partial session.

use std::{fs, path::PathBuf};

use engine::{OrganizerRole, Role, UserRank};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Cached identity of the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub name: String,
    pub email: String,
    pub organizer_role: OrganizerRole,
    pub rank: UserRank,
    pub organization_id: Option<i64>,
}

impl Identity {
    /// Folds the two role fields into the domain role value.
    pub fn role(&self) -> Role {
        Role::from_parts(self.organizer_role, self.rank)
    }
}

/// A bearer token together with the identity it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub identity: Identity,
}

/// JSON file persistence for [`Session`].
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Restores the persisted session, if any.
    ///
    /// Both-or-nothing: a missing file yields `None`, an unreadable or
    /// malformed one (including an empty token) is deleted and also yields
    /// `None`.
    pub fn load(&self) -> Option<Session> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return None,
            Err(err) => {
                tracing::warn!("unreadable session file, clearing: {err}");
                self.clear();
                return None;
            }
        };
        match serde_json::from_str::<Session>(&content) {
            Ok(session) if !session.token.is_empty() => Some(session),
            _ => {
                tracing::warn!("malformed session file, clearing");
                self.clear();
                None
            }
        }
    }

    pub fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let payload = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, payload)?;
        Ok(())
    }

    /// Removes the persisted session. Idempotent.
    pub fn clear(&self) {
        let _ = fs::remove_file(&self.path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> SessionStore {
        let path = std::env::temp_dir().join(format!("postavka_session_{}.json", uuid::Uuid::new_v4()));
        SessionStore::new(path)
    }

    fn session() -> Session {
        Session {
            token: "tok-123".to_string(),
            identity: Identity {
                name: "alice".to_string(),
                email: "alice@example.com".to_string(),
                organizer_role: OrganizerRole::Company,
                rank: UserRank::Admin,
                organization_id: Some(1),
            },
        }
    }

    #[test]
    fn round_trips() {
        let store = temp_store();
        store.save(&session()).unwrap();
        assert_eq!(store.load(), Some(session()));
        store.clear();
        assert_eq!(store.load(), None);
    }

    #[test]
    fn missing_file_is_no_session() {
        assert_eq!(temp_store().load(), None);
    }

    #[test]
    fn malformed_file_is_wiped() {
        let store = temp_store();
        store.save(&session()).unwrap();
        fs::write(store.path.clone(), "{\"token\": \"half a session\"").unwrap();
        assert_eq!(store.load(), None);
        // The broken file must be gone, not retried forever.
        assert!(!store.path.exists());
    }

    #[test]
    fn empty_token_counts_as_no_session() {
        let store = temp_store();
        let mut broken = session();
        broken.token.clear();
        store.save(&broken).unwrap();
        assert_eq!(store.load(), None);
    }

    #[test]
    fn clear_is_idempotent() {
        let store = temp_store();
        store.clear();
        store.clear();
    }
}
