//! Scripted text generator shared by unit and integration tests.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::inference::{InferenceError, InferenceResult, TextGenerator};

/// Replays canned responses in order and records every prompt it receives
pub struct ScriptedGenerator {
    responses: Mutex<VecDeque<InferenceResult<String>>>,
    calls: Mutex<Vec<(String, u32)>>,
}

impl ScriptedGenerator {
    pub fn new(responses: Vec<InferenceResult<String>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(responses: &[&str]) -> Self {
        Self::new(responses.iter().map(|r| Ok(r.to_string())).collect())
    }

    pub fn calls(&self) -> Vec<(String, u32)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.calls().into_iter().map(|(prompt, _)| prompt).collect()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn generate(&self, prompt: &str, max_tokens: u32) -> InferenceResult<String> {
        self.calls
            .lock()
            .unwrap()
            .push((prompt.to_string(), max_tokens));
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(InferenceError::Network("script exhausted".to_string())))
    }
}
