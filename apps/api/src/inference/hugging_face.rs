//! Hosted inference API backend (text-generation task).

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::errors::{InferenceError, InferenceResult};
use super::TextGenerator;

/// Client for a hosted text-generation model
#[derive(Clone)]
pub struct HuggingFaceGenerator {
    client: Client,
    endpoint: String,
    token: Option<String>,
}

#[derive(Debug, Serialize)]
struct TextGenerationRequest<'a> {
    inputs: &'a str,
    parameters: TextGenerationParameters,
}

#[derive(Debug, Serialize)]
struct TextGenerationParameters {
    max_new_tokens: u32,
    return_full_text: bool,
}

#[derive(Debug, Deserialize)]
struct GeneratedText {
    generated_text: String,
}

/// The API answers with either a one-element list or a bare object
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TextGenerationResponse {
    Batch(Vec<GeneratedText>),
    Single(GeneratedText),
}

impl HuggingFaceGenerator {
    pub fn new(client: Client, base_url: &str, model: &str, token: Option<String>) -> Self {
        Self {
            client,
            endpoint: format!("{}/models/{}", base_url.trim_end_matches('/'), model),
            token: token.filter(|t| !t.trim().is_empty()),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn parse_body(body: &str) -> InferenceResult<String> {
        let parsed: TextGenerationResponse = serde_json::from_str(body).map_err(|e| {
            InferenceError::MalformedResponse(format!("{}, body: {}", e, body))
        })?;

        let text = match parsed {
            TextGenerationResponse::Batch(items) => items
                .into_iter()
                .next()
                .map(|g| g.generated_text)
                .ok_or_else(|| {
                    InferenceError::MalformedResponse("No generations in response".to_string())
                })?,
            TextGenerationResponse::Single(g) => g.generated_text,
        };

        if text.trim().is_empty() {
            return Err(InferenceError::EmptyResponse);
        }

        Ok(text)
    }
}

#[async_trait]
impl TextGenerator for HuggingFaceGenerator {
    fn name(&self) -> &str {
        "huggingface"
    }

    async fn generate(&self, prompt: &str, max_tokens: u32) -> InferenceResult<String> {
        let request = TextGenerationRequest {
            inputs: prompt,
            parameters: TextGenerationParameters {
                max_new_tokens: max_tokens,
                return_full_text: false,
            },
        };

        tracing::debug!(
            "Sending text-generation request to {} (max_new_tokens={})",
            self.endpoint,
            max_tokens
        );

        let mut builder = self.client.post(&self.endpoint).json(&request);
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await.map_err(InferenceError::from_transport)?;

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

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const MODEL: &str = "mistralai/Mistral-7B-Instruct";

    #[test]
    fn endpoint_joins_base_and_model() {
        let generator =
            HuggingFaceGenerator::new(Client::new(), "https://example.test/", MODEL, None);
        assert_eq!(
            generator.endpoint(),
            "https://example.test/models/mistralai/Mistral-7B-Instruct"
        );
    }

    #[test]
    fn parse_body_accepts_list_and_object() {
        assert_eq!(
            HuggingFaceGenerator::parse_body(r#"[{"generated_text": "hello"}]"#).unwrap(),
            "hello"
        );
        assert_eq!(
            HuggingFaceGenerator::parse_body(r#"{"generated_text": "hi"}"#).unwrap(),
            "hi"
        );
    }

    #[test]
    fn parse_body_rejects_empty_and_malformed() {
        assert!(matches!(
            HuggingFaceGenerator::parse_body("[]"),
            Err(InferenceError::MalformedResponse(_))
        ));
        assert!(matches!(
            HuggingFaceGenerator::parse_body(r#"[{"generated_text": "  \n"}]"#),
            Err(InferenceError::EmptyResponse)
        ));
        assert!(matches!(
            HuggingFaceGenerator::parse_body("not json"),
            Err(InferenceError::MalformedResponse(_))
        ));
    }

    #[tokio::test]
    async fn generate_sends_text_generation_request() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(format!("/models/{}", MODEL)))
            .and(header("authorization", "Bearer hf_test"))
            .and(body_json(serde_json::json!({
                "inputs": "Say hi",
                "parameters": {"max_new_tokens": 42, "return_full_text": false}
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"[{"generated_text": "Hi there"}]"#),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let generator = HuggingFaceGenerator::new(
            Client::new(),
            &mock_server.uri(),
            MODEL,
            Some("hf_test".to_string()),
        );

        let text = generator.generate("Say hi", 42).await.unwrap();
        assert_eq!(text, "Hi there");
    }

    #[tokio::test]
    async fn generate_surfaces_error_status() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(503)
                    .set_body_string(r#"{"error": "Model is currently loading"}"#),
            )
            .mount(&mock_server)
            .await;

        let generator = HuggingFaceGenerator::new(Client::new(), &mock_server.uri(), MODEL, None);

        match generator.generate("Say hi", 10).await {
            Err(InferenceError::Status { status, message }) => {
                assert_eq!(status, 503);
                assert_eq!(message, "Model is currently loading");
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn generate_reports_unreachable_endpoint() {
        let generator =
            HuggingFaceGenerator::new(Client::new(), "http://127.0.0.1:1", MODEL, None);

        let result = generator.generate("Say hi", 10).await;
        assert!(matches!(result, Err(InferenceError::Network(_))));
    }
}
