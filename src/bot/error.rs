use std::time::Duration;

use thiserror::Error;

use crate::openai::OpenAiError;

/// Every way the remote completion call can fail. The session manager
/// treats all of them the same (full reset) but the kind is kept for
/// logging.
#[derive(Error, Debug)]
pub enum CompletionError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("completion response had no content")]
    MissingContent,

    #[error("completion timed out after {0:?}")]
    Timeout(Duration),
}

impl From<OpenAiError> for CompletionError {
    fn from(err: OpenAiError) -> Self {
        match err {
            OpenAiError::Http(e) if e.is_timeout() => Self::Transport(format!("timeout: {}", e)),
            OpenAiError::Http(e) => Self::Transport(e.to_string()),
            OpenAiError::Status { status, message } => Self::Api { status, message },
            OpenAiError::MissingContent(_) => Self::MissingContent,
        }
    }
}

#[derive(Error, Debug)]
pub enum BotError {
    #[error("Preset {0} not found")]
    NotFound(String),

    #[error("Invalid preset name {0}")]
    InvalidPresetName(String),

    #[error(transparent)]
    Completion(#[from] CompletionError),

    #[error("Invalid permissions. Need {0} role")]
    PermissionDenied(String),

    #[error("Failed to fetch the file: {0}")]
    Download(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for BotError {
    fn from(err: reqwest::Error) -> Self {
        Self::Download(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, BotError>;
