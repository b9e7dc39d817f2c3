//! The live rule list for the active preset.
//!
//! A session is `Idle` when it only holds the preset's system rules
//! and `Pending` while one trailing user rule is waiting on the
//! completion endpoint. The context is rebuilt from the preset for
//! every question, nothing accumulates into a multi-turn transcript.
use uuid::Uuid;

use super::model::Model;
use super::rule::{Rule, RuleRole};
use crate::openai::Message;

#[derive(Clone, Debug)]
pub struct ConversationSession {
    id: String,
    preset_name: String,
    model: Model,
    rules: Vec<Rule>,
}

impl ConversationSession {
    /// A fresh session with the default model and no rules. The
    /// preset isn't read until the first question so a missing preset
    /// only fails then.
    pub fn new(preset_name: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            preset_name: preset_name.to_string(),
            model: Model::default(),
            rules: Vec::new(),
        }
    }

    pub fn with_rules(preset_name: &str, rules: Vec<Rule>) -> Self {
        Self {
            rules,
            ..Self::new(preset_name)
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn preset_name(&self) -> &str {
        &self.preset_name
    }

    pub fn model(&self) -> Model {
        self.model
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn is_pending(&self) -> bool {
        self.rules.iter().any(|r| r.role() == RuleRole::User)
    }

    /// Changes the model in place. Unrecognized names are ignored and
    /// `None` is returned.
    pub fn set_model(&mut self, model_name: &str) -> Option<Model> {
        let model = Model::parse(model_name)?;
        self.model = model;
        Some(model)
    }

    /// Idle -> Pending. Replaces the rule list with the freshly loaded
    /// system rules and appends the question as the only user rule.
    pub fn reload_and_ask(&mut self, system_rules: Vec<Rule>, question: &str) {
        self.rules = system_rules;
        self.rules.push(Rule::user(question));
    }

    /// Pending -> Idle. Drops every user rule so no turn survives the
    /// request that created it.
    pub fn finish(&mut self) {
        self.rules.retain(|r| r.role() == RuleRole::System);
    }

    /// The request body for the completion endpoint: every rule, in
    /// order.
    pub fn messages(&self) -> Vec<Message> {
        self.rules.iter().map(Rule::to_message).collect()
    }
}
