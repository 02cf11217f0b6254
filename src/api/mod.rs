//! REST surface of the chat server.
//!
//! # Architecture
//!
//! - [`ChatBackend`]: the five calls the client makes, as an async trait
//! - [`Client`]: `reqwest` implementation talking to a live server
//! - [`types`]: request and response bodies

mod client;
pub mod types;

use async_trait::async_trait;

use crate::error::Result;

pub use client::Client;
pub use types::{ChatReply, ChatRequest, Exchange, HistoryEntry};

/// Requests the controller issues against the chat server.
///
/// Implementations report transport and decode problems as errors; a server
/// that answers with a failure status yields [`crate::Error::Api`].
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// `POST /chat`.
    async fn send_message(&self, message: &str, session_id: &str) -> Result<ChatReply>;

    /// `GET /history`, rows in server order.
    async fn list_history(&self) -> Result<Vec<HistoryEntry>>;

    /// `GET /get_session_conversation/{session_id}`.
    ///
    /// An unknown session yields an empty list rather than an error.
    async fn get_conversation(&self, session_id: &str) -> Result<Vec<Exchange>>;

    /// `DELETE /delete_chat/{chat_id}`; removes the whole session the row belongs to.
    async fn delete_chat(&self, chat_id: i64) -> Result<()>;

    /// `POST /clear_history`.
    async fn clear_history(&self) -> Result<()>;
}
