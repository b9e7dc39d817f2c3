//! Holder of the one active `ConversationSession`.
//!
//! The session lives behind a mutex that is only held while the rule
//! list is being mutated. Reading the preset and waiting on the
//! completion endpoint happen with the lock released, so a slow
//! completion never blocks preset switches or model changes.
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;

use super::completer::Completer;
use super::error::{BotError, CompletionError, Result};
use super::model::Model;
use super::preset::PresetStore;
use super::rule::Rule;
use super::session::ConversationSession;

pub struct SessionManager {
    store: PresetStore,
    completer: Arc<dyn Completer>,
    completion_timeout: Duration,
    session: Mutex<ConversationSession>,
}

impl SessionManager {
    pub fn new(
        store: PresetStore,
        completer: Arc<dyn Completer>,
        preset_name: &str,
        completion_timeout: Duration,
    ) -> Self {
        Self {
            store,
            completer,
            completion_timeout,
            session: Mutex::new(ConversationSession::new(preset_name)),
        }
    }

    pub fn store(&self) -> &PresetStore {
        &self.store
    }

    /// A snapshot of the active session.
    pub async fn current(&self) -> ConversationSession {
        self.session.lock().await.clone()
    }

    /// Replaces the session with an empty one for `name` on the default
    /// model. Whether the preset exists is only checked on the next
    /// question.
    pub async fn switch_preset(&self, name: &str) {
        let mut session = self.session.lock().await;
        *session = ConversationSession::new(name);
        tracing::info!("Switched preset to {} (session {})", name, session.id());
    }

    /// Changes the model of the current session in place. Unknown
    /// model names are a no-op and return `None`.
    pub async fn set_model(&self, model_name: &str) -> Option<Model> {
        let mut session = self.session.lock().await;
        let model = session.set_model(model_name);
        match model {
            Some(m) => tracing::info!("Changed model to {}", m),
            None => tracing::debug!("Ignoring unknown model {}", model_name),
        }
        model
    }

    /// Throws away the current session and starts over with the same
    /// preset on the default model. If the session is switched while
    /// the preset is being read, the newer session is left as is.
    pub async fn on_completion_failure(&self) {
        let (session_id, preset_name) = {
            let session = self.session.lock().await;
            (session.id().to_string(), session.preset_name().to_string())
        };
        let rules = match self.store.load(&preset_name).await {
            Ok(rules) => rules,
            Err(e) => {
                tracing::warn!("Could not preload preset {}: {}", preset_name, e);
                Vec::new()
            }
        };

        let mut session = self.session.lock().await;
        if session.id() != session_id {
            tracing::debug!("Session {} already replaced, skipping reset", session_id);
            return;
        }
        Self::replace(&mut session, rules);
    }

    /// Falls back to `default_name` if the removed preset was the
    /// active one. Returns whether a switch happened.
    pub async fn on_preset_removed(&self, removed_name: &str, default_name: &str) -> bool {
        let is_active = self.session.lock().await.preset_name() == removed_name;
        if is_active {
            self.switch_preset(default_name).await;
        }
        is_active
    }

    fn replace(session: &mut ConversationSession, rules: Vec<Rule>) {
        let old_id = session.id().to_string();
        *session = ConversationSession::with_rules(session.preset_name(), rules);
        tracing::warn!(
            "Replaced session {} with {} for preset {}",
            old_id,
            session.id(),
            session.preset_name()
        );
    }

    /// Asks the current preset a question.
    ///
    /// The preset is reloaded from the store, the question appended as
    /// a user rule and the whole rule list sent to the completer. On
    /// success the user rule is stripped again. On failure the session
    /// is replaced by a new one for the same preset.
    pub async fn generate_response(&self, question: &str) -> Result<String> {
        let (session_id, messages, model, system_rules) = loop {
            let (session_id, preset_name) = {
                let session = self.session.lock().await;
                (session.id().to_string(), session.preset_name().to_string())
            };

            let system_rules = self.store.load(&preset_name).await?;

            let mut session = self.session.lock().await;
            // The preset was switched while reading, the rules are stale
            if session.id() != session_id {
                continue;
            }
            session.reload_and_ask(system_rules.clone(), question);
            break (session_id, session.messages(), session.model(), system_rules);
        };

        tracing::debug!(
            "Requesting completion from {} with {} rules",
            model,
            messages.len()
        );

        let result =
            match tokio::time::timeout(self.completion_timeout, self.completer.complete(model, &messages))
                .await
            {
                Ok(res) => res,
                Err(_) => Err(CompletionError::Timeout(self.completion_timeout)),
            };

        let mut session = self.session.lock().await;
        // Another request may have replaced the session in the meantime,
        // in which case there is nothing left to clean up.
        let still_current = session.id() == session_id;

        match result {
            Ok(text) => {
                if still_current {
                    session.finish();
                }
                tracing::info!("Completion successfully done");
                Ok(text)
            }
            Err(e) => {
                tracing::error!("Completion failed: {}", e);
                if still_current {
                    Self::replace(&mut session, system_rules);
                }
                Err(BotError::Completion(e))
            }
        }
    }
}
