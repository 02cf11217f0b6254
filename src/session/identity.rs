//! Session identifiers and their persistence.

use std::fmt;

use tracing::{debug, warn};
use uuid::Uuid;

use crate::storage::{KeyValueStore, SESSION_ID_KEY};

/// Opaque conversation identifier.
///
/// Freshly generated ids are random UUID-v4 strings
/// (`xxxxxxxx-xxxx-4xxx-yxxx-xxxxxxxxxxxx`, lowercase, `y` in `8..=b`). Ids
/// adopted from the server's history are taken as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    /// Generate a new random id.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the id has the shape of a generated v4 id.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        let groups: Vec<&str> = self.0.split('-').collect();
        let lengths_ok = groups.len() == 5
            && groups
                .iter()
                .zip([8, 4, 4, 4, 12])
                .all(|(group, len)| group.len() == len);
        let hex_ok = groups
            .iter()
            .flat_map(|group| group.chars())
            .all(|c| matches!(c, '0'..='9' | 'a'..='f'));

        lengths_ok
            && hex_ok
            && groups[2].starts_with('4')
            && groups[3].starts_with(['8', '9', 'a', 'b'])
    }
}

impl From<String> for SessionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for SessionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Owns the current session id and keeps the tab-scoped store in sync.
#[derive(Debug)]
pub struct SessionManager {
    store: Box<dyn KeyValueStore>,
    current: SessionId,
}

impl SessionManager {
    /// Read the stored id, generating and storing one if there is none.
    pub fn init(store: Box<dyn KeyValueStore>) -> Self {
        let stored = store
            .get(SESSION_ID_KEY)
            .filter(|value| !value.trim().is_empty());

        let mut manager = Self {
            store,
            current: SessionId::generate(),
        };
        match stored {
            Some(value) => {
                debug!(name: "session.restored", session_id = %value, "Session id restored");
                manager.current = SessionId::from(value);
            }
            None => manager.persist(),
        }
        manager
    }

    /// The id in effect.
    pub fn current(&self) -> &SessionId {
        &self.current
    }

    /// Replace the current id with a fresh one and return it.
    pub fn reset(&mut self) -> SessionId {
        self.current = SessionId::generate();
        self.persist();
        debug!(name: "session.reset", session_id = %self.current, "New session id issued");
        self.current.clone()
    }

    /// Make an existing session (e.g. one picked from history) current.
    pub fn adopt(&mut self, id: SessionId) {
        self.current = id;
        self.persist();
    }

    fn persist(&mut self) {
        if let Err(err) = self.store.set(SESSION_ID_KEY, self.current.as_str()) {
            warn!(
                name: "session.persist.failed",
                error = %err,
                "Could not store session id; keeping it in memory"
            );
        }
    }
}
