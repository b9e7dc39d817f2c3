use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;

use super::routes;
use crate::api::state::AppState;
use crate::bot::Bot;
use crate::core::AppConfig;

pub fn app(shared_state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/api", routes::router())
        .layer(TraceLayer::new_for_http())
        .with_state(shared_state)
}

// Run the server
pub async fn serve(host: String, port: String, config: AppConfig) -> anyhow::Result<()> {
    let bot = Bot::from_config(&config);
    tracing::info!(
        "Starting on preset {} with presets in {}",
        config.default_preset,
        config.presets_path
    );

    let app_state = AppState::new(bot);
    let app = app(Arc::new(app_state));

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", host, port)).await?;

    tracing::debug!("Server started. Listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
