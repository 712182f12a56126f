// Inference client modules
//
// Every model call in the service goes through the `TextGenerator` trait.
// Concrete backends talk to a hosted inference API or to an OpenAI-style
// chat-completion API; `Backends` decides which one serves a given run.

pub mod errors;
pub mod hugging_face;
pub mod openai;

pub use errors::{InferenceError, InferenceResult};
pub use hugging_face::HuggingFaceGenerator;
pub use openai::OpenAiGenerator;

use async_trait::async_trait;
use reqwest::Client;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use crate::config::Settings;

/// A text-generation capability: one prompt in, one completion out.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Short backend identifier used in logs and reports
    fn name(&self) -> &str;

    /// Generate at most `max_tokens` new tokens for `prompt`
    async fn generate(&self, prompt: &str, max_tokens: u32) -> InferenceResult<String>;
}

/// How a caller-supplied credential influences backend choice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendSelection {
    /// Always use the hosted inference API; credentials are ignored
    Hosted,
    /// Use the hosted API unless the caller supplies a credential, in which
    /// case the manager and every employee switch to the OpenAI backend
    Credential,
    /// Always use the OpenAI backend with the server-side key; credentials
    /// are ignored
    OpenAi,
}

impl BackendSelection {
    /// Whether a caller-supplied credential has any effect
    pub fn accepts_credentials(&self) -> bool {
        matches!(self, BackendSelection::Credential)
    }
}

impl FromStr for BackendSelection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hosted" | "huggingface" => Ok(BackendSelection::Hosted),
            "credential" => Ok(BackendSelection::Credential),
            "openai" => Ok(BackendSelection::OpenAi),
            other => Err(format!(
                "unknown backend selection '{}' (expected hosted, credential or openai)",
                other
            )),
        }
    }
}

impl std::fmt::Display for BackendSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendSelection::Hosted => write!(f, "hosted"),
            BackendSelection::Credential => write!(f, "credential"),
            BackendSelection::OpenAi => write!(f, "openai"),
        }
    }
}

/// Build the shared HTTP client used by every backend
pub fn build_http_client(timeout: Duration) -> InferenceResult<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| InferenceError::Config(format!("Failed to create HTTP client: {}", e)))
}

#[derive(Clone)]
struct OpenAiEndpoint {
    client: Client,
    base_url: String,
    model: String,
}

/// Resolves the generator that serves one pipeline run.
///
/// Built once at startup and cloned into request state; resolving never
/// mutates shared state, so concurrent runs cannot observe each other's
/// credentials.
#[derive(Clone)]
pub struct Backends {
    selection: BackendSelection,
    default: Arc<dyn TextGenerator>,
    openai: Option<OpenAiEndpoint>,
}

impl Backends {
    /// Construct the backends described by `settings`
    pub fn from_settings(settings: &Settings, client: Client) -> InferenceResult<Self> {
        let openai = OpenAiEndpoint {
            client: client.clone(),
            base_url: settings.openai_api_url.clone(),
            model: settings.openai_model.clone(),
        };

        let default: Arc<dyn TextGenerator> = match settings.backend {
            BackendSelection::OpenAi => {
                let key = settings.openai_api_key.clone().ok_or_else(|| {
                    InferenceError::Config(
                        "OPENAI_API_KEY must be set when the openai backend is selected"
                            .to_string(),
                    )
                })?;
                Arc::new(OpenAiGenerator::new(
                    client,
                    &openai.base_url,
                    &openai.model,
                    key,
                ))
            }
            BackendSelection::Hosted | BackendSelection::Credential => {
                Arc::new(HuggingFaceGenerator::new(
                    client,
                    &settings.hf_api_url,
                    &settings.hf_model,
                    settings.hf_api_token.clone(),
                ))
            }
        };

        Ok(Self {
            selection: settings.backend,
            default,
            openai: Some(openai),
        })
    }

    /// Serve every run with one fixed generator, ignoring credentials
    pub fn fixed(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            selection: BackendSelection::Hosted,
            default: generator,
            openai: None,
        }
    }

    pub fn selection(&self) -> BackendSelection {
        self.selection
    }

    /// Pick the generator for a run, given the caller's credential (if any)
    pub fn resolve(&self, credential: Option<&str>) -> Arc<dyn TextGenerator> {
        let credential = credential.map(str::trim).filter(|c| !c.is_empty());

        match (self.selection, credential, &self.openai) {
            (BackendSelection::Credential, Some(key), Some(endpoint)) => {
                Arc::new(OpenAiGenerator::new(
                    endpoint.client.clone(),
                    &endpoint.base_url,
                    &endpoint.model,
                    key.to_string(),
                ))
            }
            _ => self.default.clone(),
        }
    }
}
