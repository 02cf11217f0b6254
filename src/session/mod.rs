//! Client-side session identity.
//!
//! A session id names one conversation thread on the server. The client keeps
//! exactly one current id, persisted in the tab-scoped store under
//! [`SESSION_ID_KEY`](crate::storage::SESSION_ID_KEY), and replaces it whenever
//! the user starts over.
//!
//! # Example
//!
//! ```rust
//! use chat_ui_client::session::SessionManager;
//! use chat_ui_client::storage::MemoryStore;
//!
//! let mut sessions = SessionManager::init(Box::new(MemoryStore::new()));
//! let first = sessions.current().clone();
//! let second = sessions.reset();
//! assert_ne!(first, second);
//! assert!(second.is_well_formed());
//! ```

mod identity;

pub use identity::{SessionId, SessionManager};
