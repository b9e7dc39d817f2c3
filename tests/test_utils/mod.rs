//! Test utilities for integration tests
use std::sync::Arc;
use std::time::Duration;

use axum::{Router, body::Body};
use tempfile::TempDir;

use blather::api::AppState;
use blather::api::app;
use blather::bot::Bot;
use blather::core::AppConfig;

/// A test application wired to a temporary presets directory and an
/// LLM endpoint at `llm_url` (usually a `mockito` server).
///
/// The presets directory starts with `preset1` (the default) and
/// `pirate`. Keep the returned `TempDir` alive for the duration of
/// the test.
pub fn test_app(llm_url: &str) -> (Router, TempDir) {
    let dir = TempDir::new().expect("Failed to create presets directory");
    std::fs::write(dir.path().join("preset1.txt"), "You are helpful.\nx\n\n")
        .expect("Failed to write preset");
    std::fs::write(
        dir.path().join("pirate.txt"),
        "You are a pirate.\nAlways say arr.\n",
    )
    .expect("Failed to write preset");

    let config = AppConfig {
        presets_path: dir.path().display().to_string(),
        default_preset: String::from("preset1"),
        admin_role: String::from("ad"),
        command_prefix: String::from("./"),
        openai_api_hostname: llm_url.to_string(),
        openai_api_key: String::from("test-api-key"),
        completion_timeout: Duration::from_secs(5),
    };
    let bot = Bot::from_config(&config);
    let app_state = AppState::new(bot);

    (app(Arc::new(app_state)), dir)
}

pub async fn body_to_string(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Failed to read body");
    String::from_utf8(bytes.to_vec()).expect("Body is not UTF-8")
}

/// A JSON body for `POST /api/bot/messages`
pub fn message(content: &str, roles: &[&str]) -> String {
    serde_json::json!({
        "author": {"name": "tester", "roles": roles, "bot": false},
        "content": content,
        "mentions_bot": false,
    })
    .to_string()
}
