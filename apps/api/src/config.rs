use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;

use crate::agents::{TaskCountPolicy, TokenBudgets};
use crate::inference::BackendSelection;

/// Errors raised while reading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: &'static str, message: String },
}

/// Service settings, read from the environment (and `.env` via dotenv)
#[derive(Debug, Clone)]
pub struct Settings {
    pub bind_addr: SocketAddr,
    pub hf_api_url: String,
    pub hf_model: String,
    pub hf_api_token: Option<String>,
    pub openai_api_url: String,
    pub openai_model: String,
    pub openai_api_key: Option<String>,
    pub backend: BackendSelection,
    pub roles: Vec<String>,
    pub task_policy: TaskCountPolicy,
    pub budgets: TokenBudgets,
    pub request_timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            hf_api_url: "https://api-inference.huggingface.co".to_string(),
            hf_model: "mistralai/Mistral-7B-Instruct".to_string(),
            hf_api_token: None,
            openai_api_url: "https://api.openai.com/v1".to_string(),
            openai_model: "gpt-3.5-turbo".to_string(),
            openai_api_key: None,
            backend: BackendSelection::Credential,
            roles: vec![
                "Researcher".to_string(),
                "Writer".to_string(),
                "Editor".to_string(),
            ],
            task_policy: TaskCountPolicy::Strict,
            budgets: TokenBudgets::default(),
            request_timeout: Duration::from_secs(120),
        }
    }
}

impl Settings {
    /// Load settings from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings through an arbitrary key lookup. Unset or blank keys
    /// keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut settings = Settings::default();

        if let Some(addr) = get("SYNC_SPACE_ADDR") {
            settings.bind_addr = parse_value("SYNC_SPACE_ADDR", &addr)?;
        }
        if let Some(url) = get("HF_API_URL") {
            settings.hf_api_url = url;
        }
        if let Some(model) = get("HF_MODEL") {
            settings.hf_model = model;
        }
        settings.hf_api_token = get("HF_API_TOKEN");
        if let Some(url) = get("OPENAI_API_URL") {
            settings.openai_api_url = url;
        }
        if let Some(model) = get("OPENAI_MODEL") {
            settings.openai_model = model;
        }
        settings.openai_api_key = get("OPENAI_API_KEY");
        if let Some(backend) = get("SYNC_SPACE_BACKEND") {
            settings.backend = parse_value("SYNC_SPACE_BACKEND", &backend)?;
        }
        if let Some(roles) = get("SYNC_SPACE_ROLES") {
            let roles: Vec<String> = roles
                .split(',')
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .map(str::to_string)
                .collect();
            if roles.is_empty() {
                return Err(ConfigError::InvalidValue {
                    key: "SYNC_SPACE_ROLES",
                    message: "at least one role is required".to_string(),
                });
            }
            settings.roles = roles;
        }
        if let Some(policy) = get("SYNC_SPACE_TASK_POLICY") {
            settings.task_policy = parse_value("SYNC_SPACE_TASK_POLICY", &policy)?;
        }
        if let Some(tokens) = get("SYNC_SPACE_BREAKDOWN_TOKENS") {
            settings.budgets.breakdown = parse_value("SYNC_SPACE_BREAKDOWN_TOKENS", &tokens)?;
        }
        if let Some(tokens) = get("SYNC_SPACE_EMPLOYEE_TOKENS") {
            settings.budgets.employee = parse_value("SYNC_SPACE_EMPLOYEE_TOKENS", &tokens)?;
        }
        if let Some(tokens) = get("SYNC_SPACE_COMBINE_TOKENS") {
            settings.budgets.combine = parse_value("SYNC_SPACE_COMBINE_TOKENS", &tokens)?;
        }
        if let Some(secs) = get("SYNC_SPACE_TIMEOUT_SECS") {
            let secs: u64 = parse_value("SYNC_SPACE_TIMEOUT_SECS", &secs)?;
            settings.request_timeout = Duration::from_secs(secs);
        }

        Ok(settings)
    }
}

fn parse_value<T>(key: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e: T::Err| ConfigError::InvalidValue {
            key,
            message: e.to_string(),
        })
}
