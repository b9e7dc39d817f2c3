use std::fmt;

use serde::Serialize;

/// The two completion models the bot can be switched between.
#[derive(Clone, Copy, Serialize, Debug, Default, PartialEq, Eq)]
pub enum Model {
    #[default]
    #[serde(rename = "gpt-3.5-turbo")]
    Gpt3,
    #[serde(rename = "gpt4")]
    Gpt4,
}

impl Model {
    /// Only the exact wire names are recognized. Anything else is
    /// `None` and callers leave the current model untouched.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "gpt-3.5-turbo" => Some(Self::Gpt3),
            "gpt4" => Some(Self::Gpt4),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gpt3 => "gpt-3.5-turbo",
            Self::Gpt4 => "gpt4",
        }
    }

    /// Short name used in replies to the chat.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Gpt3 => "GPT3",
            Self::Gpt4 => "GPT4",
        }
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
