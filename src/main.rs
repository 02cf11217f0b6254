//! Chat UI client
//!
//! Entry point for the terminal chat client.

use mimalloc::MiMalloc;

/// Global allocator for improved performance (M-MIMALLOC-APPS).
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

use anyhow::Context;
use dotenvy::dotenv;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use chat_ui_client::api::Client;
use chat_ui_client::config::AppConfig;
use chat_ui_client::controller::ChatController;
use chat_ui_client::repl::{self, TerminalDialogs};
use chat_ui_client::session::SessionManager;
use chat_ui_client::storage::{FileStore, MemoryStore};
use chat_ui_client::theme::{self, ThemeManager};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Load .env (if present)
    let _ = dotenv();

    let config = AppConfig::load().context("Failed to load configuration")?;

    // Initialize tracing (M-LOG-STRUCTURED); stderr keeps logs out of the transcript
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    if config.logging.json {
        tracing_subscriber::registry()
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .with(filter)
            .init();
    }

    info!(
        name: "client.config.loaded",
        base_url = %config.server.base_url,
        state_dir = %config.storage.state_dir.display(),
        "Client configuration loaded"
    );

    let client = match config.server.request_timeout() {
        Some(timeout) => Client::with_timeout(&config.server.base_url, timeout),
        None => Client::new(&config.server.base_url),
    }
    .context("Invalid server URL")?;

    let sessions = SessionManager::init(Box::new(MemoryStore::new()));
    let os_prefers_dark = config.ui.prefers_dark.unwrap_or_else(theme::os_prefers_dark);
    let preferences = FileStore::open(config.storage.preferences_path());
    let themes = ThemeManager::init(Box::new(preferences), os_prefers_dark);

    let lines = repl::shared_lines(Box::new(tokio::io::BufReader::new(tokio::io::stdin())));
    let dialogs = TerminalDialogs::new(std::sync::Arc::clone(&lines));

    let mut controller = ChatController::new(client, sessions, themes, Box::new(dialogs));
    repl::run(&mut controller, lines)
        .await
        .context("Terminal I/O failed")?;

    info!(name: "client.stopped", "Chat client stopped");
    Ok(())
}
