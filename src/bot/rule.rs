//! A single role-tagged entry in the rule list sent to the LLM.
use serde::Serialize;

use crate::openai::{Message, Role};

#[derive(Clone, Copy, Serialize, Debug, PartialEq, Eq)]
pub enum RuleRole {
    #[serde(rename = "system")]
    System,
    #[serde(rename = "user")]
    User,
}

impl From<RuleRole> for Role {
    fn from(role: RuleRole) -> Self {
        match role {
            RuleRole::System => Role::System,
            RuleRole::User => Role::User,
        }
    }
}

/// Immutable once created. Fields are private so a rule in a session
/// can only ever be replaced, never edited.
#[derive(Clone, Serialize, Debug, PartialEq, Eq)]
pub struct Rule {
    role: RuleRole,
    content: String,
}

impl Rule {
    pub fn new(role: RuleRole, content: &str) -> Self {
        Self {
            role,
            content: content.to_string(),
        }
    }

    pub fn system(content: &str) -> Self {
        Self::new(RuleRole::System, content)
    }

    pub fn user(content: &str) -> Self {
        Self::new(RuleRole::User, content)
    }

    pub fn role(&self) -> RuleRole {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn to_message(&self) -> Message {
        Message::new(self.role.into(), &self.content)
    }
}
