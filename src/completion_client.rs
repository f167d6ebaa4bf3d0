use crate::config::{AiMode, Config};
use crate::errors::AppError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const SYSTEM_PROMPT: &str = "You are an expert in lead qualification.";

/// A text-generation service: prompt in, free-text completion out.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, AppError>;
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Client for an OpenAI-compatible chat completions endpoint.
#[derive(Clone)]
pub struct OpenAiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl OpenAiClient {
    /// Creates a new `OpenAiClient`.
    ///
    /// The request timeout bounds every call; an expired call surfaces as an
    /// `ExternalApiError` like any other transport failure.
    pub fn new(
        base_url: String,
        api_key: String,
        model: String,
        timeout: Duration,
    ) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                AppError::ExternalApiError(format!("Failed to create OpenAI client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model,
            max_tokens: 100,
            temperature: 0.5,
        })
    }

    /// Builds a client from configuration, or `None` when no key is set.
    pub fn from_config(config: &Config) -> Result<Option<Self>, AppError> {
        if config.ai_mode() == AiMode::Disabled {
            return Ok(None);
        }
        let Some(api_key) = config.openai_api_key.as_deref().map(str::trim) else {
            return Ok(None);
        };

        Self::new(
            config.openai_base_url.clone(),
            api_key.to_string(),
            config.openai_model.clone(),
            Duration::from_secs(config.openai_timeout_secs),
        )
        .map(Some)
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(&self, prompt: &str) -> Result<String, AppError> {
        let url = format!("{}/chat/completions", self.base_url);
        tracing::debug!("Requesting completion from {} (model {})", url, self.model);

        let body = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::ExternalApiError(format!("OpenAI request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::ExternalApiError(format!(
                "OpenAI returned {}: {}",
                status, error_text
            )));
        }

        let data: ChatCompletionResponse = response.json().await.map_err(|e| {
            AppError::ExternalApiError(format!("Failed to parse OpenAI response: {}", e))
        })?;

        let content = data
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                AppError::ExternalApiError("OpenAI response contained no message".to_string())
            })?;

        Ok(content.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = OpenAiClient::new(
            "https://api.openai.com/v1/".to_string(),
            "sk-test".to_string(),
            "gpt-3.5-turbo".to_string(),
            Duration::from_secs(5),
        );
        assert!(client.is_ok());
        assert_eq!(client.unwrap().base_url, "https://api.openai.com/v1");
    }

    #[test]
    fn test_from_config_sends_trimmed_key() {
        let config = Config {
            openai_api_key: Some("  sk-test \n".to_string()),
            ..Config::default()
        };
        let client = OpenAiClient::from_config(&config).unwrap().unwrap();
        assert_eq!(client.api_key, "sk-test");
    }

    #[test]
    fn test_from_config_without_key() {
        let client = OpenAiClient::from_config(&Config::default()).unwrap();
        assert!(client.is_none());
    }
}
