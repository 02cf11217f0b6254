//! User-facing text.

pub const GREETING: &str = "Hello! I'm a helpful assistant. How can I help you today?";
pub const SERVER_UNREACHABLE: &str = "Error: Could not reach server.";
pub const CONVERSATION_NOT_FOUND: &str = "No conversation found for this session. Start a new one!";

pub const CONFIRM_DELETE: &str = "Are you sure you want to delete this chat session?";
pub const SESSION_DELETED: &str = "Chat session deleted. Start a new conversation!";
pub const DELETE_FAILED: &str = "Failed to delete chat session.";
pub const DELETE_ERROR: &str = "Error deleting chat session.";

pub const CONFIRM_CLEAR: &str =
    "Are you sure you want to clear ALL chat history? This action cannot be undone.";
pub const HISTORY_CLEARED: &str = "All chat history cleared! Ready for a fresh start.";
pub const CLEAR_FAILED: &str = "Failed to clear all chat history.";
pub const CLEAR_ERROR: &str = "Error clearing all chat history.";
