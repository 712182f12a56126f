use thiserror::Error;

/// Errors raised by a text-generation backend
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Endpoint returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Model returned an empty response")]
    EmptyResponse,

    #[error("Configuration error: {0}")]
    Config(String),
}

impl InferenceError {
    /// Classify a reqwest transport failure
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            InferenceError::Network(format!("Request timeout: {}", err))
        } else if err.is_connect() {
            InferenceError::Network(format!("Connection failed: {}", err))
        } else {
            InferenceError::Network(format!("Request failed: {}", err))
        }
    }

    /// Build a status error, preferring the provider's own `error` message
    /// when the body is JSON.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|value| match &value["error"] {
                serde_json::Value::String(s) => Some(s.clone()),
                serde_json::Value::Object(obj) => obj
                    .get("message")
                    .and_then(|m| m.as_str())
                    .map(str::to_string),
                _ => None,
            })
            .unwrap_or_else(|| body.trim().to_string());

        InferenceError::Status { status, message }
    }
}

pub type InferenceResult<T> = Result<T, InferenceError>;
