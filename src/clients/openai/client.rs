use crate::config::settings::AppSettings;
use crate::error::AppError;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{error, info, instrument};

use super::structs::*;
use crate::clients::CompletionProvider;

// Longest slice of an upstream error body kept in messages and logs
const MAX_ERROR_BODY_CHARS: usize = 500;

#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    #[error("OPENAI_API_KEY is not set")]
    MissingApiKey,
    #[error("Completion API rejected the credential: {0}")]
    Unauthorized(String),
    #[error("Completion API rate limit reached: {0}")]
    RateLimited(String),
    #[error("Completion request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Completion API returned status {status}: {message}")]
    Api { status: u16, message: String },
    #[error("Unexpected completion response: {0}")]
    MalformedResponse(String),
}

#[derive(Debug)]
pub struct OpenAIClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
}

impl OpenAIClient {
    pub fn new(app_settings: &AppSettings) -> Result<Self, AppError> {
        let client =
            crate::utils::http_client::new_api_client(app_settings.completion.timeout_secs)?;

        Ok(Self {
            client,
            api_key: app_settings.api_keys.openai_api_key.clone(),
            base_url: app_settings.completion.base_url.clone(),
            model: app_settings.completion.model.clone(),
        })
    }

    pub fn new_with_base_url(
        api_key: Option<String>,
        base_url: String,
        model: String,
    ) -> Result<Self, AppError> {
        let client = crate::utils::http_client::new_api_client(None)?;

        Ok(Self {
            client,
            api_key,
            base_url,
            model,
        })
    }

    fn endpoint_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    // Chat Completions
    #[instrument(skip(self, request), fields(model = %request.model))]
    pub async fn chat_completion(
        &self,
        request: &OpenAIChatRequest,
    ) -> Result<OpenAIChatResponse, CompletionError> {
        let api_key = self.api_key.as_deref().ok_or(CompletionError::MissingApiKey)?;

        let url = self.endpoint_url();
        info!("Sending chat completion request to {}", url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response".to_string());
            let message = upstream_error_message(&error_text);
            error!("Completion API returned {}: {}", status, message);

            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    CompletionError::Unauthorized(message)
                }
                StatusCode::TOO_MANY_REQUESTS => CompletionError::RateLimited(message),
                _ => CompletionError::Api {
                    status: status.as_u16(),
                    message,
                },
            });
        }

        let body = response.text().await?;
        let chat_response: OpenAIChatResponse = serde_json::from_str(&body).map_err(|e| {
            CompletionError::MalformedResponse(format!("could not decode response body: {}", e))
        })?;

        if let Some(usage) = &chat_response.usage {
            info!(
                "Completion finished: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        Ok(chat_response)
    }
}

#[async_trait]
impl CompletionProvider for OpenAIClient {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let request = OpenAIChatRequest::single_user_message(&self.model, prompt);
        let response = self.chat_completion(&request).await?;
        first_choice_text(response)
    }

    fn model(&self) -> &str {
        &self.model
    }
}

/// Returns the text of the first choice, failing when the model returned none.
pub fn first_choice_text(response: OpenAIChatResponse) -> Result<String, CompletionError> {
    response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| CompletionError::MalformedResponse("response contained no choices".to_string()))?
        .message
        .content
        .ok_or_else(|| CompletionError::MalformedResponse("first choice has no content".to_string()))
}

fn upstream_error_message(body: &str) -> String {
    let message = match serde_json::from_str::<OpenAIError>(body) {
        Ok(parsed) => parsed.error.message,
        Err(_) => body.to_string(),
    };
    if message.chars().count() > MAX_ERROR_BODY_CHARS {
        let truncated: String = message.chars().take(MAX_ERROR_BODY_CHARS).collect();
        format!("{}... (truncated)", truncated)
    } else {
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn client_for(server: &mockito::ServerGuard, api_key: Option<&str>) -> OpenAIClient {
        OpenAIClient::new_with_base_url(
            api_key.map(str::to_string),
            server.url(),
            "gpt-4o".to_string(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_complete_returns_first_choice() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer test-key")
            .match_body(Matcher::PartialJson(json!({
                "model": "gpt-4o",
                "messages": [{"role": "user", "content": "Describe the Library domain"}]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "id": "chatcmpl-1",
                    "model": "gpt-4o",
                    "choices": [
                        {"index": 0, "message": {"role": "assistant", "content": "<p>ok</p>"}, "finish_reason": "stop"}
                    ],
                    "usage": {"prompt_tokens": 5, "completion_tokens": 2, "total_tokens": 7}
                })
                .to_string(),
            )
            .expect(1)
            .create_async()
            .await;

        let client = client_for(&server, Some("test-key"));
        let text = client.complete("Describe the Library domain").await.unwrap();

        assert_eq!(text, "<p>ok</p>");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_missing_key_fails_without_network_call() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .expect(0)
            .create_async()
            .await;

        let client = client_for(&server, None);
        let result = client.complete("anything").await;

        assert!(matches!(result, Err(CompletionError::MissingApiKey)));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_status_codes_are_classified() {
        let mut server = mockito::Server::new_async().await;
        let _unauthorized = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer bad-key")
            .with_status(401)
            .with_body(r#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error"}}"#)
            .create_async()
            .await;
        let _limited = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer busy-key")
            .with_status(429)
            .with_body(r#"{"error":{"message":"Rate limit reached"}}"#)
            .create_async()
            .await;
        let _broken = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer odd-key")
            .with_status(500)
            .with_body("upstream exploded")
            .create_async()
            .await;

        let result = client_for(&server, Some("bad-key")).complete("p").await;
        match result {
            Err(CompletionError::Unauthorized(msg)) => assert_eq!(msg, "Incorrect API key provided"),
            other => panic!("expected Unauthorized, got {:?}", other),
        }

        let result = client_for(&server, Some("busy-key")).complete("p").await;
        assert!(matches!(result, Err(CompletionError::RateLimited(_))));

        let result = client_for(&server, Some("odd-key")).complete("p").await;
        match result {
            Err(CompletionError::Api { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "upstream exploded");
            }
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unexpected_shapes_are_malformed() {
        let mut server = mockito::Server::new_async().await;
        let _not_json = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer text-key")
            .with_status(200)
            .with_body("<html>gateway</html>")
            .create_async()
            .await;
        let _no_choices = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer empty-key")
            .with_status(200)
            .with_body(r#"{"choices": []}"#)
            .create_async()
            .await;

        let result = client_for(&server, Some("text-key")).complete("p").await;
        assert!(matches!(result, Err(CompletionError::MalformedResponse(_))));

        let result = client_for(&server, Some("empty-key")).complete("p").await;
        assert!(matches!(result, Err(CompletionError::MalformedResponse(_))));
    }

    #[test]
    fn test_upstream_error_message_truncates() {
        let long = "x".repeat(MAX_ERROR_BODY_CHARS + 10);
        let message = upstream_error_message(&long);
        assert!(message.ends_with("... (truncated)"));
        assert_eq!(message.chars().count(), MAX_ERROR_BODY_CHARS + "... (truncated)".len());
    }
}
