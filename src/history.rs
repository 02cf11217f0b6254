//! The history panel: one row per past session.
//!
//! The panel is never patched in place. Every refresh replaces all rows with
//! the server's list, in the server's order.

use chrono::NaiveDateTime;

use crate::api::HistoryEntry;
use crate::session::SessionId;

/// Clickable part of a history row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowTarget {
    /// The preview text.
    Text,
    /// The trash button nested in the row.
    DeleteButton,
}

/// What a click on a row resolves to. Exactly one action per click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowAction {
    /// Make this session current and show its conversation.
    Select { session_id: SessionId },
    /// Delete the session this row belongs to.
    Delete { chat_id: i64 },
}

/// A rendered history row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRow {
    entry: HistoryEntry,
}

impl HistoryRow {
    pub fn entry(&self) -> &HistoryEntry {
        &self.entry
    }

    /// Row text: the session's preview message.
    pub fn label(&self) -> &str {
        &self.entry.user
    }

    pub fn tooltip(&self) -> String {
        format!("Last message: {}", self.entry.timestamp)
    }

    /// Parsed last-activity time; the server sends SQLite's `YYYY-MM-DD HH:MM:SS`.
    pub fn last_activity(&self) -> Option<NaiveDateTime> {
        let raw = self.entry.timestamp.trim();
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f"))
            .ok()
    }

    /// Resolve a click. The delete button consumes its click, so it never selects.
    pub fn action(&self, target: RowTarget) -> RowAction {
        match target {
            RowTarget::Text => RowAction::Select {
                session_id: SessionId::from(self.entry.session_id.clone()),
            },
            RowTarget::DeleteButton => RowAction::Delete {
                chat_id: self.entry.id,
            },
        }
    }
}

/// Ordered list of rows.
#[derive(Debug, Default, Clone)]
pub struct HistoryPanel {
    rows: Vec<HistoryRow>,
}

impl HistoryPanel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Destructive rebuild from a full server listing.
    pub fn replace_all(&mut self, entries: Vec<HistoryEntry>) {
        self.rows = entries
            .into_iter()
            .map(|entry| HistoryRow { entry })
            .collect();
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }

    pub fn rows(&self) -> &[HistoryRow] {
        &self.rows
    }

    pub fn get(&self, index: usize) -> Option<&HistoryRow> {
        self.rows.get(index)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
