//! Fetch results applied to the view model.
//!
//! Each function consumes the `Result` of one request and updates the
//! transcript or history panel; none of them touches the network.

use tracing::{error, info, warn};

use super::messages;
use crate::api::{ChatReply, Exchange, HistoryEntry};
use crate::error::Result;
use crate::history::HistoryPanel;
use crate::session::SessionId;
use crate::transcript::{Sender, Transcript, TypingIndicator};

/// Replace the typing indicator with the bot's reply, or with the
/// unreachable-server notice.
///
/// Returns whether the exchange reached the server (and so may have changed
/// the history).
pub fn render_reply(
    transcript: &mut Transcript,
    indicator: &TypingIndicator,
    outcome: Result<ChatReply>,
) -> bool {
    transcript.remove_typing_indicator(indicator);
    match outcome {
        Ok(reply) => {
            info!(
                name: "chat.reply.received",
                reply_len = reply.reply.len(),
                "Bot reply received"
            );
            transcript.add_message(Sender::Bot, reply.reply);
            true
        }
        Err(err) => {
            error!(name: "chat.submit.failed", error = %err, "Chat submission error");
            transcript.add_message(Sender::Bot, messages::SERVER_UNREACHABLE);
            false
        }
    }
}

/// Rebuild the panel from a full listing. A failed fetch leaves it as it was.
pub fn render_history(panel: &mut HistoryPanel, outcome: Result<Vec<HistoryEntry>>) {
    match outcome {
        Ok(entries) => {
            info!(name: "history.loaded", rows = entries.len(), "History loaded");
            panel.replace_all(entries);
        }
        Err(err) => {
            error!(name: "history.load.failed", error = %err, "Error loading history");
        }
    }
}

/// Replace the transcript with a stored conversation.
///
/// No exchanges and a failed fetch both end in the not-found notice.
pub fn render_conversation(
    transcript: &mut Transcript,
    session_id: &SessionId,
    outcome: Result<Vec<Exchange>>,
) {
    match outcome {
        Ok(exchanges) if !exchanges.is_empty() => {
            transcript.clear();
            for exchange in exchanges {
                transcript.add_message(Sender::User, exchange.user);
                transcript.add_message(Sender::Bot, exchange.bot);
            }
        }
        Ok(_) => {
            warn!(
                name: "conversation.not_found",
                session_id = %session_id,
                "Conversation data not found or incomplete"
            );
            transcript.reset_with_status(messages::CONVERSATION_NOT_FOUND);
        }
        Err(err) => {
            error!(
                name: "conversation.load.failed",
                session_id = %session_id,
                error = %err,
                "Error displaying chat conversation"
            );
            transcript.reset_with_status(messages::CONVERSATION_NOT_FOUND);
        }
    }
}
