use chat_ui_client::config::AppConfig;
use serial_test::serial;
use std::env;
use std::fs;
use std::time::Duration;

// Helper to clear environment variables that might interfere with tests
fn clear_env_vars() {
    unsafe {
        env::remove_var("CHAT_UI_SERVER__BASE_URL");
        env::remove_var("CHAT_UI_SERVER__REQUEST_TIMEOUT_SECS");
        env::remove_var("CHAT_SERVER_URL");
        env::remove_var("CHAT_REQUEST_TIMEOUT");
        env::remove_var("CHAT_STATE_DIR");
        env::remove_var("CONFIG_FILE");
        env::remove_var("LOG_JSON");
    }
}

#[test]
#[serial]
fn test_default_config() {
    clear_env_vars();

    let config = AppConfig::load_from_args(["chat-ui"]).expect("defaults should load");
    assert_eq!(config.server.base_url, "http://127.0.0.1:5000");
    assert!(config.server.request_timeout().is_none());
    assert!(config.storage.state_dir.ends_with("chat-ui"));
    assert!(config.ui.prefers_dark.is_none());
    assert!(!config.logging.json);
}

#[test]
#[serial]
fn test_env_override() {
    clear_env_vars();
    unsafe {
        env::set_var("CHAT_UI_SERVER__BASE_URL", "http://chat.internal:8080");
        env::set_var("CHAT_UI_SERVER__REQUEST_TIMEOUT_SECS", "45");
    }

    let config = AppConfig::load_from_args(["chat-ui"]).expect("Failed to load config");
    assert_eq!(config.server.base_url, "http://chat.internal:8080");
    assert_eq!(config.server.request_timeout(), Some(Duration::from_secs(45)));

    clear_env_vars();
}

#[test]
#[serial]
fn test_file_load() {
    clear_env_vars();

    let dir = tempfile::tempdir().unwrap();
    let file_path = dir.path().join("client.yaml");
    fs::write(
        &file_path,
        r#"
server:
  base_url: "http://from-file:5000"
ui:
  prefers_dark: true
    "#,
    )
    .expect("Failed to write temp config");

    let config = AppConfig::load_from_args(["chat-ui", "--config", file_path.to_str().unwrap()])
        .expect("Failed to load config from file");
    assert_eq!(config.server.base_url, "http://from-file:5000");
    assert_eq!(config.ui.prefers_dark, Some(true));
}

#[test]
#[serial]
fn test_missing_explicit_file_is_an_error() {
    clear_env_vars();

    let result = AppConfig::load_from_args(["chat-ui", "--config", "/nonexistent/client.yaml"]);
    assert!(result.is_err());
}

#[test]
#[serial]
fn test_cli_beats_env() {
    clear_env_vars();
    unsafe {
        env::set_var("CHAT_UI_SERVER__BASE_URL", "http://from-env:1");
    }

    let dir = tempfile::tempdir().unwrap();
    let state_dir = dir.path().to_str().unwrap().to_string();
    let config = AppConfig::load_from_args([
        "chat-ui",
        "--server-url",
        "http://from-cli:2",
        "--state-dir",
        state_dir.as_str(),
        "--log-json",
    ])
    .expect("Failed to load config");

    assert_eq!(config.server.base_url, "http://from-cli:2");
    assert_eq!(
        config.storage.preferences_path(),
        dir.path().join("preferences.json")
    );
    assert!(config.logging.json);

    clear_env_vars();
}
