//! Line-oriented terminal front end.
//!
//! Reads commands and messages from stdin, drives the [`ChatController`], and
//! paints whatever changed in the transcript after each action.

use std::io::Write as _;
use std::sync::Arc;

use async_trait::async_trait;
use colored::Colorize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tokio::sync::Mutex;
use tracing::debug;

use crate::api::ChatBackend;
use crate::controller::{ActionOutcome, ChatController, Dialogs};
use crate::history::{HistoryPanel, RowTarget};
use crate::markdown;
use crate::theme::Palette;
use crate::transcript::{Entry, EntryId, EntryKind, Transcript};

/// Stdin lines shared between the command loop and confirmation prompts.
pub type SharedLines = Arc<Mutex<Lines<Box<dyn AsyncBufRead + Unpin + Send>>>>;

/// Wrap a reader for use by [`run`] and [`TerminalDialogs`].
pub fn shared_lines(reader: Box<dyn AsyncBufRead + Unpin + Send>) -> SharedLines {
    Arc::new(Mutex::new(reader.lines()))
}

const HELP: &str = "\
Commands:
  /new          start a new chat
  /history      refresh and show past sessions
  /open N       load session N from the history list
  /delete N     delete session N
  /clear        delete all history
  /theme        toggle light/dark
  /help         show this help
  /quit         exit
Anything else is sent as a message.";

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Message(String),
    NewChat,
    History,
    Open(usize),
    Delete(usize),
    ClearAll,
    ToggleTheme,
    Help,
    Quit,
    /// Unrecognized or malformed command, with a hint for the user.
    Invalid(String),
}

/// Parse a line. Row numbers are 1-based as displayed.
pub fn parse_command(line: &str) -> Command {
    let trimmed = line.trim();
    let Some(rest) = trimmed.strip_prefix('/') else {
        return Command::Message(line.to_string());
    };

    let mut parts = rest.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let arg = parts.next();

    let row = |arg: Option<&str>| match arg.and_then(|a| a.parse::<usize>().ok()) {
        Some(n) if n > 0 => Ok(n - 1),
        _ => Err(Command::Invalid(format!("usage: /{name} N (N from /history)"))),
    };

    match name {
        "new" => Command::NewChat,
        "history" | "h" => Command::History,
        "open" | "o" => row(arg).map_or_else(|e| e, Command::Open),
        "delete" | "d" => row(arg).map_or_else(|e| e, Command::Delete),
        "clear" => Command::ClearAll,
        "theme" => Command::ToggleTheme,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => Command::Invalid(format!("unknown command /{other}, try /help")),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Dialogs
// ─────────────────────────────────────────────────────────────────────────────

/// Confirmations and alerts on the terminal.
pub struct TerminalDialogs {
    lines: SharedLines,
}

impl TerminalDialogs {
    pub fn new(lines: SharedLines) -> Self {
        Self { lines }
    }
}

impl std::fmt::Debug for TerminalDialogs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerminalDialogs").finish_non_exhaustive()
    }
}

#[async_trait]
impl Dialogs for TerminalDialogs {
    async fn confirm(&mut self, message: &str) -> bool {
        print!("{} [y/N] ", message.bold());
        let _ = std::io::stdout().flush();
        let answer = self.lines.lock().await.next_line().await;
        matches!(
            answer.ok().flatten().as_deref().map(str::trim),
            Some("y" | "Y" | "yes" | "Yes")
        )
    }

    async fn alert(&mut self, message: &str) {
        println!("{} {message}", "!".red().bold());
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Painting
// ─────────────────────────────────────────────────────────────────────────────

/// Tracks what has been printed so each action only prints new blocks.
#[derive(Debug, Default)]
pub struct Painter {
    first: Option<EntryId>,
    last: Option<EntryId>,
}

impl Painter {
    /// Text for blocks added since the previous call.
    ///
    /// When the transcript was reset in between, a separator precedes the
    /// new contents.
    pub fn paint(&mut self, transcript: &Transcript, palette: Palette) -> String {
        let mut out = String::new();
        let first = transcript.entries().first().map(Entry::id);

        let fresh = if first == self.first {
            transcript.entries_after(self.last)
        } else {
            if self.first.is_some() {
                out.push_str(&"────────────────".color(palette.muted).to_string());
                out.push('\n');
            }
            self.first = first;
            transcript.entries()
        };

        for entry in fresh {
            out.push_str(&paint_entry(entry, palette));
            out.push('\n');
        }
        self.last = transcript.entries().last().map(Entry::id).or(self.last);
        out
    }
}

fn paint_entry(entry: &Entry, palette: Palette) -> String {
    match entry.kind() {
        EntryKind::User { text } => format!("{} {}", "you ›".color(palette.user).bold(), text),
        EntryKind::Bot { markdown, .. } => format!(
            "{} {}",
            "bot ›".color(palette.accent).bold(),
            markdown::to_terminal(markdown, palette)
        ),
        EntryKind::Typing => entry.text().color(palette.muted).italic().to_string(),
        EntryKind::Status { text } => text.color(palette.status).to_string(),
    }
}

/// History list with 1-based row numbers.
pub fn paint_history(panel: &HistoryPanel, palette: Palette) -> String {
    if panel.is_empty() {
        return "No chat history yet.".color(palette.muted).to_string();
    }
    let mut out = String::from("History:\n");
    for (index, row) in panel.rows().iter().enumerate() {
        let when = row
            .last_activity()
            .map_or_else(|| row.entry().timestamp.clone(), |t| t.format("%b %d %H:%M").to_string());
        out.push_str(&format!(
            "  {:>2}. {}  {}\n",
            index + 1,
            row.label(),
            when.color(palette.muted)
        ));
    }
    out.push_str(&"  /open N to load, /delete N to remove".color(palette.muted).to_string());
    out
}

// ─────────────────────────────────────────────────────────────────────────────
// Loop
// ─────────────────────────────────────────────────────────────────────────────

/// Run the interactive loop until `/quit` or end of input.
pub async fn run<B: ChatBackend>(
    controller: &mut ChatController<B>,
    lines: SharedLines,
) -> std::io::Result<()> {
    let mut painter = Painter::default();

    controller.start().await;
    emit(&painter.paint(controller.transcript(), palette(controller)));
    emit(&paint_history(controller.history(), palette(controller)));
    println!("{}", "Type /help for commands.".color(palette(controller).muted));

    loop {
        let icon = controller.theme().appearance().icon.glyph();
        print!("{icon} › ");
        std::io::stdout().flush()?;

        let Some(line) = lines.lock().await.next_line().await? else {
            break;
        };
        let command = parse_command(&line);
        debug!(name: "repl.command", command = ?command, "Command received");

        match command {
            Command::Message(text) => {
                controller.set_input(text);
                if let Some(pending) = controller.begin_submit() {
                    emit(&painter.paint(controller.transcript(), palette(controller)));
                    let outcome = controller.send(&pending).await;
                    controller.finish_submit(pending, outcome).await;
                }
            }
            Command::NewChat => {
                controller.new_chat();
            }
            Command::History => {
                controller.load_history().await;
                emit(&paint_history(controller.history(), palette(controller)));
            }
            Command::Open(index) => {
                if !controller.select_history_row(index).await {
                    println!("No history row {}; run /history.", index + 1);
                }
            }
            Command::Delete(index) => {
                match controller.click_history_row(index, RowTarget::DeleteButton).await {
                    Some(_) => emit(&paint_history(controller.history(), palette(controller))),
                    None => println!("No history row {}; run /history.", index + 1),
                }
            }
            Command::ClearAll => {
                if controller.clear_all_history().await == ActionOutcome::Completed {
                    emit(&paint_history(controller.history(), palette(controller)));
                }
            }
            Command::ToggleTheme => {
                let theme = controller.toggle_theme();
                println!("Theme: {theme}");
            }
            Command::Help => println!("{HELP}"),
            Command::Quit => break,
            Command::Invalid(hint) => println!("{hint}"),
        }

        emit(&painter.paint(controller.transcript(), palette(controller)));
    }

    Ok(())
}

fn palette<B: ChatBackend>(controller: &ChatController<B>) -> Palette {
    controller.theme().theme().palette()
}

fn emit(text: &str) {
    if !text.is_empty() {
        println!("{}", text.trim_end());
    }
}
