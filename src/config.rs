use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use config::{Config, Environment, File};
use serde::Deserialize;

/// Default config file looked up in the working directory.
const DEFAULT_CONFIG_FILE: &str = "chat-ui.yaml";

#[derive(Parser, Debug)]
#[command(author, version, about = "Terminal client for the chat server", long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(short, long, env = "CONFIG_FILE")]
    pub config: Option<String>,

    /// Base URL of the chat server
    #[arg(long, env = "CHAT_SERVER_URL")]
    pub server_url: Option<String>,

    /// Give up on a request after this many seconds (no limit by default)
    #[arg(long, env = "CHAT_REQUEST_TIMEOUT")]
    pub request_timeout_secs: Option<u64>,

    /// Directory holding the durable preferences file
    #[arg(long, env = "CHAT_STATE_DIR")]
    pub state_dir: Option<PathBuf>,

    /// Start in dark mode when no theme has been saved
    #[arg(long)]
    pub prefers_dark: Option<bool>,

    /// Emit logs as JSON
    #[arg(long, env = "LOG_JSON")]
    pub log_json: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub base_url: String,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl ServerConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    pub state_dir: PathBuf,
}

impl StorageConfig {
    /// File backing the durable store.
    pub fn preferences_path(&self) -> PathBuf {
        self.state_dir.join("preferences.json")
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct UiConfig {
    /// Overrides terminal color-scheme detection.
    #[serde(default)]
    pub prefers_dark: Option<bool>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct LoggingConfig {
    #[serde(default)]
    pub json: bool,
}

fn default_state_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(env::temp_dir)
        .join("chat-ui")
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from_args(env::args())
    }

    pub fn load_from_args<I, T>(args: I) -> Result<Self, config::ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli =
            Cli::try_parse_from(args).map_err(|e| config::ConfigError::Message(e.to_string()))?;
        Self::from_cli(&cli)
    }

    /// Layer defaults, config file, `CHAT_UI_*` env vars, then CLI flags.
    pub fn from_cli(cli: &Cli) -> Result<Self, config::ConfigError> {
        let mut builder = Config::builder();

        // 1. Defaults
        builder = builder
            .set_default("server.base_url", "http://127.0.0.1:5000")?
            .set_default(
                "storage.state_dir",
                default_state_dir().to_string_lossy().into_owned(),
            )?
            .set_default("logging.json", false)?;

        // 2. Config file: explicit path must exist, ./chat-ui.yaml is optional
        if let Some(path) = &cli.config {
            builder = builder.add_source(File::from(Path::new(path)).required(true));
        } else if Path::new(DEFAULT_CONFIG_FILE).exists() {
            builder = builder.add_source(File::from(Path::new(DEFAULT_CONFIG_FILE)).required(false));
        }

        // 3. Environment, e.g. CHAT_UI_SERVER__BASE_URL=http://host:5000
        builder = builder.add_source(
            Environment::with_prefix("CHAT_UI")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        // 4. CLI flags (and the env vars clap maps onto them) win
        if let Some(url) = &cli.server_url {
            builder = builder.set_override("server.base_url", url.as_str())?;
        }
        if let Some(secs) = cli.request_timeout_secs {
            builder = builder.set_override("server.request_timeout_secs", secs)?;
        }
        if let Some(dir) = &cli.state_dir {
            builder = builder.set_override("storage.state_dir", dir.to_string_lossy().into_owned())?;
        }
        if let Some(dark) = cli.prefers_dark {
            builder = builder.set_override("ui.prefers_dark", dark)?;
        }
        if cli.log_json {
            builder = builder.set_override("logging.json", true)?;
        }

        let cfg = builder.build()?;
        cfg.try_deserialize()
    }
}
