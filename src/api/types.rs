//! Wire types for the chat server's REST endpoints.

use serde::{Deserialize, Serialize};

// =============================================================================
// Chat
// =============================================================================

/// Body of `POST /chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The user's message, already trimmed.
    pub message: String,
    /// Session the message belongs to.
    pub session_id: String,
}

/// Body returned by `POST /chat`.
///
/// The server also uses this shape for its own error text (for example a
/// missing session id yields a 400 with a `reply`), so the reply is rendered
/// regardless of status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    /// Markdown produced by the model.
    pub reply: String,
}

// =============================================================================
// History
// =============================================================================

/// One row of `GET /history`: the latest exchange of a past session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Server-assigned row key, used for deletion.
    pub id: i64,
    /// Session the row summarizes.
    pub session_id: String,
    /// Preview text (the user side of the latest exchange).
    pub user: String,
    /// Bot side of the latest exchange, when the server sends it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bot: Option<String>,
    /// Last activity time as reported by the server.
    pub timestamp: String,
}

/// Body returned by `GET /history`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryResponse {
    /// Rows in server order.
    pub history: Vec<HistoryEntry>,
    /// Server-side failure description, sent alongside an empty list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// =============================================================================
// Conversation
// =============================================================================

/// One user/bot pair of a stored conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exchange {
    /// What the user sent.
    pub user: String,
    /// What the bot answered (Markdown).
    pub bot: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// Body returned by `GET /get_session_conversation/{id}`.
///
/// An unknown session comes back as `{"error": ...}` with no `conversation`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation: Option<Vec<Exchange>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ConversationResponse {
    /// The exchanges, or an empty list when the server had none.
    pub fn into_exchanges(self) -> Vec<Exchange> {
        self.conversation.unwrap_or_default()
    }
}
