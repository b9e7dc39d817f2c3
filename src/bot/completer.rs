use std::time::Duration;

use async_trait::async_trait;

use super::error::CompletionError;
use super::model::Model;
use crate::openai::{Message, complete};

/// The remote completion call. Implementations get the entire rule
/// list every time and return the text of the first choice.
#[async_trait]
pub trait Completer: Send + Sync {
    async fn complete(&self, model: Model, messages: &[Message]) -> Result<String, CompletionError>;
}

/// Talks to an OpenAI compatible `/v1/chat/completions` endpoint.
pub struct OpenAiCompleter {
    api_hostname: String,
    api_key: String,
    timeout: Duration,
}

impl OpenAiCompleter {
    pub fn new(api_hostname: &str, api_key: &str, timeout: Duration) -> Self {
        Self {
            api_hostname: api_hostname.to_string(),
            api_key: api_key.to_string(),
            timeout,
        }
    }
}

#[async_trait]
impl Completer for OpenAiCompleter {
    async fn complete(&self, model: Model, messages: &[Message]) -> Result<String, CompletionError> {
        let text = complete(
            messages,
            &self.api_hostname,
            &self.api_key,
            model.as_str(),
            self.timeout,
        )
        .await?;
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::openai::Role;

    #[tokio::test]
    async fn test_openai_completer_sends_model_name() {
        let mut server = mockito::Server::new_async().await;

        let mock = server
            .mock("POST", "/v1/chat/completions")
            .match_body(mockito::Matcher::PartialJson(
                serde_json::json!({"model": "gpt4"}),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices":[{"message":{"role":"assistant","content":"Hello!"}}]}"#)
            .create_async()
            .await;

        let completer = OpenAiCompleter::new(&server.url(), "test-key", Duration::from_secs(5));
        let messages = vec![Message::new(Role::User, "Hi")];
        let result = completer.complete(Model::Gpt4, &messages).await;

        mock.assert_async().await;
        assert_eq!(result.unwrap(), "Hello!");
    }

    #[tokio::test]
    async fn test_openai_completer_normalizes_api_errors() {
        let mut server = mockito::Server::new_async().await;

        let _mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(500)
            .with_body("upstream exploded")
            .create_async()
            .await;

        let completer = OpenAiCompleter::new(&server.url(), "test-key", Duration::from_secs(5));
        let messages = vec![Message::new(Role::User, "Hi")];
        let result = completer.complete(Model::Gpt3, &messages).await;

        match result {
            Err(CompletionError::Api { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "upstream exploded");
            }
            other => panic!("Expected API error, got {:?}", other),
        }
    }
}
