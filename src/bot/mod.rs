//! The conversation core of the bot: presets, the live session and
//! the commands that drive them.
pub mod commands;
pub mod completer;
pub mod error;
pub mod manager;
pub mod model;
pub mod preset;
pub mod rule;
pub mod session;

pub use commands::{Author, Bot, Command};
pub use completer::{Completer, OpenAiCompleter};
pub use error::{BotError, CompletionError};
pub use manager::SessionManager;
pub use model::Model;
pub use preset::PresetStore;
pub use rule::{Rule, RuleRole};
pub use session::ConversationSession;
