//! Turns chat messages into session and preset operations and
//! renders the reply that goes back to the chat.
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::completer::OpenAiCompleter;
use super::error::{BotError, Result};
use super::manager::SessionManager;
use super::preset::{PresetStore, preset_name_from_content_disposition};
use crate::core::AppConfig;

const NO_COMPLETION: &str = "No completion done";

/// Who sent a message, as reported by the chat platform.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Author {
    pub name: String,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub bot: bool,
}

impl Author {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Ask(String),
    Switch(String),
    Add(String),
    Remove(String),
    Show,
    Inspect(String),
    Model(String),
}

impl Command {
    /// Parses `<prefix><name> <argument>`. The argument is the rest of
    /// the line. A message that isn't a command but mentions the bot is
    /// a question. Returns `None` for anything else, including known
    /// commands missing their argument.
    pub fn parse(prefix: &str, content: &str, mentions_bot: bool) -> Option<Self> {
        let content = content.trim();

        let Some(rest) = content.strip_prefix(prefix) else {
            if mentions_bot && !content.is_empty() {
                return Some(Self::Ask(content.to_string()));
            }
            return None;
        };

        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        };
        let arg = (!arg.is_empty()).then(|| arg.to_string());

        match (name, arg) {
            ("show", _) => Some(Self::Show),
            ("bt", Some(arg)) => Some(Self::Ask(arg)),
            ("switch", Some(arg)) => Some(Self::Switch(arg)),
            ("add", Some(arg)) => Some(Self::Add(arg)),
            ("remove", Some(arg)) => Some(Self::Remove(arg)),
            ("inspect", Some(arg)) => Some(Self::Inspect(arg)),
            ("model", Some(arg)) => Some(Self::Model(arg)),
            _ => {
                tracing::debug!("Ignoring unknown or incomplete command: {}", content);
                None
            }
        }
    }

    pub fn requires_admin(&self) -> bool {
        matches!(self, Self::Switch(_) | Self::Add(_) | Self::Remove(_))
    }
}

/// The bot as seen by a transport: give it a message, get back the
/// reply to post, if any.
pub struct Bot {
    manager: SessionManager,
    http: reqwest::Client,
    default_preset: String,
    admin_role: String,
    command_prefix: String,
}

impl Bot {
    pub fn new(manager: SessionManager, config: &AppConfig) -> Self {
        Self {
            manager,
            http: reqwest::Client::new(),
            default_preset: config.default_preset.clone(),
            admin_role: config.admin_role.clone(),
            command_prefix: config.command_prefix.clone(),
        }
    }

    /// Wires up the preset directory and the OpenAI completer from
    /// config, starting on the default preset.
    pub fn from_config(config: &AppConfig) -> Self {
        let completer = OpenAiCompleter::new(
            &config.openai_api_hostname,
            &config.openai_api_key,
            config.completion_timeout,
        );
        let manager = SessionManager::new(
            PresetStore::new(&config.presets_path),
            Arc::new(completer),
            &config.default_preset,
            config.completion_timeout,
        );
        Self::new(manager, config)
    }

    pub fn manager(&self) -> &SessionManager {
        &self.manager
    }

    pub async fn handle_message(
        &self,
        author: &Author,
        content: &str,
        mentions_bot: bool,
    ) -> Option<String> {
        if author.bot {
            return None;
        }
        let command = Command::parse(&self.command_prefix, content, mentions_bot)?;
        self.execute(author, command).await
    }

    pub async fn execute(&self, author: &Author, command: Command) -> Option<String> {
        if command.requires_admin() && !author.has_role(&self.admin_role) {
            tracing::warn!("{} is missing the {} role for {:?}", author.name, self.admin_role, command);
            return Some(BotError::PermissionDenied(self.admin_role.clone()).to_string());
        }

        let store = self.manager.store();

        match command {
            Command::Ask(question) => match self.manager.generate_response(&question).await {
                Ok(completion) => Some(completion),
                Err(BotError::Completion(_)) => Some(NO_COMPLETION.to_string()),
                Err(e) => Some(e.to_string()),
            },
            Command::Switch(name) => {
                self.manager.switch_preset(&name).await;
                Some(format!("Preset changed to {}", name))
            }
            Command::Add(url) => match self.download_preset(&url).await {
                Ok(name) => Some(format!("{}.txt added successfully.", name)),
                Err(e) => {
                    tracing::error!("Adding preset from {} failed: {}", url, e);
                    Some("Failed to fetch the file.".to_string())
                }
            },
            Command::Remove(name) => match store.remove(&name).await {
                Ok(()) => {
                    self.manager
                        .on_preset_removed(&name, &self.default_preset)
                        .await;
                    Some(format!("{} successfully removed", name))
                }
                Err(e) => {
                    tracing::error!("Removing preset {} failed: {}", name, e);
                    Some(format!("Unable to remove {}", name))
                }
            },
            Command::Show => match store.list().await {
                Ok(names) if names.is_empty() => Some("No presets available".to_string()),
                Ok(names) => Some(names.join("\n")),
                Err(e) => {
                    tracing::error!("Listing presets failed: {}", e);
                    Some("Unable to list presets".to_string())
                }
            },
            Command::Inspect(name) => match store.inspect(&name).await {
                Ok(text) => Some(text),
                Err(e) => Some(e.to_string()),
            },
            Command::Model(name) => self
                .manager
                .set_model(&name)
                .await
                .map(|model| format!("Changed model to {}", model.label())),
        }
    }

    /// Fetches an attachment and stores it as a preset named after the
    /// `Content-Disposition` filename.
    async fn download_preset(&self, url: &str) -> Result<String> {
        let response = self.http.get(url).send().await?.error_for_status()?;
        let disposition = response
            .headers()
            .get(reqwest::header::CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| BotError::Download(format!("No content-disposition for {}", url)))?
            .to_string();
        let name = preset_name_from_content_disposition(&disposition)?;
        let bytes = response.bytes().await?;

        self.manager.store().store(&name, &bytes).await?;
        Ok(name)
    }
}
