use std::time::Duration;

use crate::openai::{Message, OpenAiError, completion};

/// Sends the whole transcript to the LLM and returns the content of
/// the first choice. There is no tool calling or streaming, a single
/// request produces a single completion.
pub async fn complete(
    history: &[Message],
    api_hostname: &str,
    api_key: &str,
    model: &str,
    timeout: Duration,
) -> Result<String, OpenAiError> {
    let resp = completion(history, api_hostname, api_key, model, timeout).await?;

    if let Some(msg) = resp["choices"][0]["message"]["content"].as_str() {
        Ok(msg.to_string())
    } else {
        Err(OpenAiError::MissingContent(resp))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::openai::Role;

    #[tokio::test]
    async fn test_complete_extracts_first_choice() {
        let mut server = mockito::Server::new_async().await;

        let response_body = r#"{
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "First"}},
                {"index": 1, "message": {"role": "assistant", "content": "Second"}}
            ]
        }"#;

        let _mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(response_body)
            .create_async()
            .await;

        let history = vec![
            Message::new(Role::System, "You are helpful."),
            Message::new(Role::User, "Hi"),
        ];
        let url = server.url();
        let result = complete(&history, &url, "test-key", "gpt-3.5-turbo", Duration::from_secs(5)).await;

        assert_eq!(result.unwrap(), "First");
    }

    #[tokio::test]
    async fn test_complete_missing_content() {
        let mut server = mockito::Server::new_async().await;

        let _mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices": []}"#)
            .create_async()
            .await;

        let history = vec![Message::new(Role::User, "Hi")];
        let url = server.url();
        let result = complete(&history, &url, "test-key", "gpt-3.5-turbo", Duration::from_secs(5)).await;

        assert!(matches!(result, Err(OpenAiError::MissingContent(_))));
    }
}
