//! Public types for the bot API
use serde::{Deserialize, Serialize};

use crate::bot::{Author, Rule};

/// A message delivered by the chat platform
#[derive(Debug, Deserialize, Serialize)]
pub struct IncomingMessage {
    pub author: Author,
    pub content: String,
    #[serde(default)]
    pub mentions_bot: bool,
}

/// What to post back to the channel. `None` means stay quiet.
#[derive(Debug, Deserialize, Serialize)]
pub struct MessageReply {
    pub reply: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PresetsResponse {
    pub presets: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub id: String,
    pub preset: String,
    pub model: String,
    pub rules: Vec<Rule>,
}
