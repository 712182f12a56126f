//! OpenAI-compatible chat-completion backend.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::errors::{InferenceError, InferenceResult};
use super::TextGenerator;

/// Chat-completion client used when a credential is available
#[derive(Clone)]
pub struct OpenAiGenerator {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

impl OpenAiGenerator {
    pub fn new(client: Client, base_url: &str, model: &str, api_key: String) -> Self {
        Self {
            client,
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
            model: model.to_string(),
            api_key,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn parse_body(body: &str) -> InferenceResult<String> {
        let parsed: ChatCompletionResponse = serde_json::from_str(body).map_err(|e| {
            InferenceError::MalformedResponse(format!("{}, body: {}", e, body))
        })?;

        let choice = parsed.choices.into_iter().next().ok_or_else(|| {
            InferenceError::MalformedResponse("No choices in response".to_string())
        })?;

        match choice.message.content {
            Some(text) if !text.trim().is_empty() => Ok(text),
            _ => Err(InferenceError::EmptyResponse),
        }
    }
}

#[async_trait]
impl TextGenerator for OpenAiGenerator {
    fn name(&self) -> &str {
        "openai"
    }

    async fn generate(&self, prompt: &str, max_tokens: u32) -> InferenceResult<String> {
        let request = ChatCompletionRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens,
        };

        tracing::debug!(
            "Sending chat completion request: model={}, max_tokens={}",
            self.model,
            max_tokens
        );

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(InferenceError::from_transport)?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(InferenceError::from_transport)?;

        if !status.is_success() {
            return Err(InferenceError::from_status(status.as_u16(), &body));
        }

        Self::parse_body(&body)
    }
}
