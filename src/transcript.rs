//! The message transcript.
//!
//! An ordered list of rendered blocks standing in for the chat box: user
//! messages, bot messages, the transient typing indicator, and status blocks
//! (greetings and notices shown after the transcript is reset).

use std::fmt::Write as _;

use crate::markdown;

/// Text shown while a reply is outstanding.
pub const TYPING_TEXT: &str = "Typing...";

/// Who wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

/// Stable handle of one transcript block.
///
/// Ids are never reused, even across clears, so a stale handle cannot reach a
/// newer block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(u64);

/// What a block holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    /// Literal user text, never interpreted as markup.
    User { text: String },
    /// Bot Markdown together with its rendered HTML.
    Bot { markdown: String, html: String },
    /// Placeholder while a request is in flight.
    Typing,
    /// Greeting or notice inserted when the transcript is reset.
    Status { text: String },
}

/// One rendered block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    id: EntryId,
    kind: EntryKind,
}

impl Entry {
    pub fn id(&self) -> EntryId {
        self.id
    }

    pub fn kind(&self) -> &EntryKind {
        &self.kind
    }

    /// Bot-styled blocks are everything not typed by the user.
    pub fn sender(&self) -> Sender {
        match self.kind {
            EntryKind::User { .. } => Sender::User,
            _ => Sender::Bot,
        }
    }

    /// Source text of the block.
    pub fn text(&self) -> &str {
        match &self.kind {
            EntryKind::User { text } | EntryKind::Status { text } => text,
            EntryKind::Bot { markdown, .. } => markdown,
            EntryKind::Typing => TYPING_TEXT,
        }
    }

    pub fn css_classes(&self) -> &'static str {
        match self.kind {
            EntryKind::User { .. } => "chat-message user",
            EntryKind::Bot { .. } => "chat-message bot dynamic-bot-message",
            EntryKind::Typing => "chat-message bot typing",
            EntryKind::Status { .. } => "chat-message bot initial-greeting",
        }
    }

    /// HTML for this block; only bot blocks carry markup.
    pub fn to_html(&self) -> String {
        let body = match &self.kind {
            EntryKind::Bot { html, .. } => html.clone(),
            _ => markdown::escape_html(self.text()),
        };
        format!(r#"<div class="{}">{body}</div>"#, self.css_classes())
    }
}

/// Handle returned by [`Transcript::add_typing_indicator`].
#[derive(Debug, PartialEq, Eq)]
pub struct TypingIndicator {
    id: EntryId,
}

impl TypingIndicator {
    pub fn id(&self) -> EntryId {
        self.id
    }
}

/// Ordered transcript with auto-scroll to the newest block.
#[derive(Debug, Default, Clone)]
pub struct Transcript {
    entries: Vec<Entry>,
    next_id: u64,
    scroll_anchor: Option<EntryId>,
}

impl Transcript {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message. Bot text is rendered as Markdown, user text is kept literal.
    pub fn add_message(&mut self, sender: Sender, text: impl Into<String>) -> EntryId {
        let text = text.into();
        let kind = match sender {
            Sender::User => EntryKind::User { text },
            Sender::Bot => EntryKind::Bot {
                html: markdown::to_html(&text),
                markdown: text,
            },
        };
        self.push(kind)
    }

    pub fn add_typing_indicator(&mut self) -> TypingIndicator {
        TypingIndicator {
            id: self.push(EntryKind::Typing),
        }
    }

    /// Remove the indicator if it is still present.
    ///
    /// Returns whether anything was removed; a cleared transcript or an
    /// indicator removed earlier is not an error.
    pub fn remove_typing_indicator(&mut self, indicator: &TypingIndicator) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != indicator.id);
        if self.scroll_anchor == Some(indicator.id) {
            self.scroll_anchor = self.entries.last().map(Entry::id);
        }
        self.entries.len() != before
    }

    /// Discard every block.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.scroll_anchor = None;
    }

    /// Discard every block and show a single status message.
    pub fn reset_with_status(&mut self, text: impl Into<String>) {
        self.clear();
        self.push(EntryKind::Status { text: text.into() });
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: EntryId) -> bool {
        self.entries.iter().any(|entry| entry.id == id)
    }

    pub fn has_typing_indicator(&self) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.kind == EntryKind::Typing)
    }

    /// Block the view is scrolled to.
    pub fn scroll_anchor(&self) -> Option<EntryId> {
        self.scroll_anchor
    }

    /// Blocks appended after `id`, for incremental painting.
    pub fn entries_after(&self, id: Option<EntryId>) -> &[Entry] {
        let start = id.map_or(0, |id| {
            self.entries
                .iter()
                .position(|entry| entry.id > id)
                .unwrap_or(self.entries.len())
        });
        &self.entries[start..]
    }

    /// HTML for the whole chat box.
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        for entry in &self.entries {
            let _ = writeln!(html, "{}", entry.to_html());
        }
        html
    }

    fn push(&mut self, kind: EntryKind) -> EntryId {
        let id = EntryId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry { id, kind });
        self.scroll_anchor = Some(id);
        id
    }
}
