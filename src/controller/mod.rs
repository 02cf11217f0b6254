//! The chat UI controller.
//!
//! Owns the whole UI state and exposes one method per user action. Every
//! action follows the same shape: mutate local state, issue at most a few
//! requests through the [`ChatBackend`], and hand each result to a render
//! function in [`render`].
//!
//! # Example
//!
//! ```rust,no_run
//! use chat_ui_client::api::Client;
//! use chat_ui_client::controller::{ChatController, Dialogs};
//! use chat_ui_client::session::SessionManager;
//! use chat_ui_client::storage::MemoryStore;
//! use chat_ui_client::theme::ThemeManager;
//!
//! # async fn example(dialogs: Box<dyn Dialogs>) -> Result<(), Box<dyn std::error::Error>> {
//! let mut controller = ChatController::new(
//!     Client::new("http://127.0.0.1:5000")?,
//!     SessionManager::init(Box::new(MemoryStore::new())),
//!     ThemeManager::init(Box::new(MemoryStore::new()), false),
//!     dialogs,
//! );
//! controller.start().await;
//! controller.set_input("What is Rust?");
//! controller.submit().await;
//! # Ok(())
//! # }
//! ```

pub mod messages;
pub mod render;

use async_trait::async_trait;
use tracing::{error, info, warn};

use crate::api::{ChatBackend, ChatReply};
use crate::error::Result;
use crate::history::{HistoryPanel, RowAction, RowTarget};
use crate::session::{SessionId, SessionManager};
use crate::theme::{Theme, ThemeManager};
use crate::transcript::{EntryId, Sender, Transcript, TypingIndicator};

/// Blocking prompts shown to the user.
#[async_trait]
pub trait Dialogs: Send {
    /// Ask a yes/no question; `true` means go ahead.
    async fn confirm(&mut self, message: &str) -> bool;

    /// Show a message the user must acknowledge.
    async fn alert(&mut self, message: &str);
}

/// How a confirmable action ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The user declined; nothing was sent.
    Cancelled,
    Completed,
    /// The request failed and the user was alerted; local state is unchanged.
    Failed,
}

/// Mutable view state: what the page would show.
#[derive(Debug, Default)]
pub struct UiState {
    pub transcript: Transcript,
    pub history: HistoryPanel,
    /// Contents of the message input.
    pub input: String,
    pub input_focused: bool,
}

/// A submitted message waiting for its reply.
#[derive(Debug)]
pub struct PendingChat {
    pub message: String,
    pub session_id: SessionId,
    indicator: TypingIndicator,
}

/// Drives the UI state from user actions.
pub struct ChatController<B> {
    backend: B,
    sessions: SessionManager,
    theme: ThemeManager,
    dialogs: Box<dyn Dialogs>,
    state: UiState,
    /// Typing indicator of the submission still waiting for its reply.
    awaiting: Option<EntryId>,
}

impl<B> std::fmt::Debug for ChatController<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatController")
            .field("session_id", self.sessions.current())
            .field("theme", &self.theme.theme())
            .field("state", &self.state)
            .field("awaiting", &self.awaiting)
            .finish_non_exhaustive()
    }
}

impl<B: ChatBackend> ChatController<B> {
    pub fn new(
        backend: B,
        sessions: SessionManager,
        theme: ThemeManager,
        dialogs: Box<dyn Dialogs>,
    ) -> Self {
        Self {
            backend,
            sessions,
            theme,
            dialogs,
            state: UiState::default(),
            awaiting: None,
        }
    }

    /// Show the greeting and populate the history panel.
    pub async fn start(&mut self) {
        if self.state.transcript.is_empty() {
            self.state.transcript.reset_with_status(messages::GREETING);
        }
        info!(
            name: "controller.started",
            session_id = %self.sessions.current(),
            theme = %self.theme.theme(),
            "Chat controller started"
        );
        self.load_history().await;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn transcript(&self) -> &Transcript {
        &self.state.transcript
    }

    pub fn history(&self) -> &HistoryPanel {
        &self.state.history
    }

    pub fn session_id(&self) -> &SessionId {
        self.sessions.current()
    }

    pub fn theme(&self) -> &ThemeManager {
        &self.theme
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Whether a submission is waiting for its reply.
    ///
    /// A transcript reset removes the typing indicator and with it the claim
    /// of the pending submission.
    pub fn is_in_flight(&self) -> bool {
        self.awaiting
            .is_some_and(|id| self.state.transcript.contains(id))
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.state.input = text.into();
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Chat submission
    // ─────────────────────────────────────────────────────────────────────────

    /// Submit the input field and wait for the reply.
    pub async fn submit(&mut self) {
        let Some(pending) = self.begin_submit() else {
            return;
        };
        let outcome = self.send(&pending).await;
        self.finish_submit(pending, outcome).await;
    }

    /// Validate and echo the input, and show the typing indicator.
    ///
    /// Returns `None` without touching anything when the trimmed input is
    /// empty, or when another submission is still waiting for its reply.
    /// Hand the returned value to [`finish_submit`](Self::finish_submit);
    /// until then, or until the transcript is reset, later submissions are
    /// rejected.
    pub fn begin_submit(&mut self) -> Option<PendingChat> {
        let message = self.state.input.trim().to_string();
        if message.is_empty() {
            return None;
        }
        if self.is_in_flight() {
            warn!(
                name: "chat.submit.rejected",
                "Previous message is still waiting for a reply"
            );
            return None;
        }

        self.state.transcript.add_message(Sender::User, message.clone());
        self.state.input.clear();
        let indicator = self.state.transcript.add_typing_indicator();
        self.awaiting = Some(indicator.id());

        let session_id = self.sessions.current().clone();
        info!(
            name: "chat.submit",
            session_id = %session_id,
            message_len = message.len(),
            "Message submitted"
        );
        Some(PendingChat {
            message,
            session_id,
            indicator,
        })
    }

    /// Issue the `/chat` request for a pending submission.
    pub async fn send(&self, pending: &PendingChat) -> Result<ChatReply> {
        self.backend
            .send_message(&pending.message, pending.session_id.as_str())
            .await
    }

    /// Render the reply (or the failure notice) and refresh history on success.
    pub async fn finish_submit(&mut self, pending: PendingChat, outcome: Result<ChatReply>) {
        if self.awaiting == Some(pending.indicator.id()) {
            self.awaiting = None;
        }
        let reached = render::render_reply(&mut self.state.transcript, &pending.indicator, outcome);
        if reached {
            self.load_history().await;
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // History panel
    // ─────────────────────────────────────────────────────────────────────────

    /// Refetch the full history list and rebuild the panel.
    pub async fn load_history(&mut self) {
        let outcome = self.backend.list_history().await;
        render::render_history(&mut self.state.history, outcome);
    }

    /// Replace the transcript with the stored conversation of `session_id`.
    pub async fn display_chat_conversation(&mut self, session_id: &SessionId) {
        let outcome = self.backend.get_conversation(session_id.as_str()).await;
        render::render_conversation(&mut self.state.transcript, session_id, outcome);
    }

    /// Handle a click on part of a history row.
    ///
    /// Returns the action that ran, or `None` if there is no such row.
    pub async fn click_history_row(&mut self, index: usize, target: RowTarget) -> Option<RowAction> {
        let action = self.state.history.get(index)?.action(target);
        match &action {
            RowAction::Select { session_id } => self.select_session(session_id.clone()).await,
            RowAction::Delete { chat_id } => {
                self.delete_chat_item(*chat_id).await;
            }
        }
        Some(action)
    }

    /// Make the session of row `index` current and show its conversation.
    pub async fn select_history_row(&mut self, index: usize) -> bool {
        self.click_history_row(index, RowTarget::Text).await.is_some()
    }

    async fn select_session(&mut self, session_id: SessionId) {
        info!(name: "session.selected", session_id = %session_id, "History session selected");
        self.sessions.adopt(session_id.clone());
        self.display_chat_conversation(&session_id).await;
        self.state.input_focused = true;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // New chat / delete / clear
    // ─────────────────────────────────────────────────────────────────────────

    /// Start over locally; the server is not involved.
    pub fn new_chat(&mut self) -> SessionId {
        self.state.transcript.reset_with_status(messages::GREETING);
        self.state.input.clear();
        self.state.input_focused = true;
        self.sessions.reset()
    }

    /// Delete the session owning history row `chat_id`, after confirmation.
    pub async fn delete_chat_item(&mut self, chat_id: i64) -> ActionOutcome {
        if !self.dialogs.confirm(messages::CONFIRM_DELETE).await {
            return ActionOutcome::Cancelled;
        }

        match self.backend.delete_chat(chat_id).await {
            Ok(()) => {
                info!(name: "history.deleted", chat_id, "Chat session deleted");
                self.load_history().await;
                self.state.transcript.reset_with_status(messages::SESSION_DELETED);
                self.state.input.clear();
                self.sessions.reset();
                ActionOutcome::Completed
            }
            Err(err) => {
                let alert = if err.is_server_reported() {
                    error!(name: "history.delete.failed", chat_id, error = %err, "Failed to delete chat item");
                    messages::DELETE_FAILED
                } else {
                    error!(name: "history.delete.error", chat_id, error = %err, "Error deleting chat item");
                    messages::DELETE_ERROR
                };
                self.dialogs.alert(alert).await;
                ActionOutcome::Failed
            }
        }
    }

    /// Delete every stored session, after confirmation.
    pub async fn clear_all_history(&mut self) -> ActionOutcome {
        if !self.dialogs.confirm(messages::CONFIRM_CLEAR).await {
            return ActionOutcome::Cancelled;
        }

        match self.backend.clear_history().await {
            Ok(()) => {
                info!(name: "history.cleared", "All chat history cleared");
                self.state.history.clear();
                self.state.transcript.reset_with_status(messages::HISTORY_CLEARED);
                self.state.input.clear();
                self.sessions.reset();
                ActionOutcome::Completed
            }
            Err(err) => {
                let alert = if err.is_server_reported() {
                    error!(name: "history.clear.failed", error = %err, "Failed to clear all history");
                    messages::CLEAR_FAILED
                } else {
                    error!(name: "history.clear.error", error = %err, "Error clearing all history");
                    messages::CLEAR_ERROR
                };
                self.dialogs.alert(alert).await;
                ActionOutcome::Failed
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Theme
    // ─────────────────────────────────────────────────────────────────────────

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme.toggle()
    }
}
