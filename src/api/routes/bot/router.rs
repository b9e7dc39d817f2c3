//! Router for the bot API

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};

use super::public::{IncomingMessage, MessageReply, PresetsResponse, SessionResponse};
use crate::api::public::ApiError;
use crate::api::state::AppState;

type SharedState = Arc<AppState>;

/// Handle a message forwarded from the chat platform
async fn message_handler(
    State(state): State<SharedState>,
    Json(message): Json<IncomingMessage>,
) -> Json<MessageReply> {
    tracing::debug!("Received message from {}", message.author.name);
    let reply = state
        .bot
        .handle_message(&message.author, &message.content, message.mentions_bot)
        .await;
    Json(MessageReply { reply })
}

/// List the stored presets
async fn presets_handler(
    State(state): State<SharedState>,
) -> Result<Json<PresetsResponse>, ApiError> {
    let presets = state.bot.manager().store().list().await?;
    Ok(Json(PresetsResponse { presets }))
}

/// Inspect the active session
async fn session_handler(State(state): State<SharedState>) -> Json<SessionResponse> {
    let session = state.bot.manager().current().await;
    Json(SessionResponse {
        id: session.id().to_string(),
        preset: session.preset_name().to_string(),
        model: session.model().to_string(),
        rules: session.rules().to_vec(),
    })
}

/// Create the bot router
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/messages", post(message_handler))
        .route("/presets", get(presets_handler))
        .route("/session", get(session_handler))
}
