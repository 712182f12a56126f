use std::sync::Arc;

use super::errors::AgentResult;
use super::prompts::library;
use crate::inference::TextGenerator;

/// Default token budget for a single employee call
pub const DEFAULT_EMPLOYEE_TOKENS: u32 = 300;

/// Employee Agent: turns one task into one role-flavored model call
#[derive(Clone)]
pub struct EmployeeAgent {
    role: String,
    generator: Arc<dyn TextGenerator>,
    max_tokens: u32,
}

impl std::fmt::Debug for EmployeeAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmployeeAgent")
            .field("role", &self.role)
            .field("backend", &self.generator.name())
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

impl EmployeeAgent {
    /// Create an employee with the given role label
    pub fn new(role: impl Into<String>, generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            role: role.into(),
            generator,
            max_tokens: DEFAULT_EMPLOYEE_TOKENS,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    /// The exact prompt sent for `task`
    pub fn prompt_for(&self, task: &str) -> String {
        library::employee_task().render(&[("role", self.role.as_str()), ("task", task)])
    }

    /// Complete a task. The task text is passed through unchanged and the
    /// model's response is returned verbatim.
    pub async fn work(&self, task: &str) -> AgentResult<String> {
        tracing::debug!(role = %self.role, backend = self.generator.name(), "Employee working on task");

        let output = self
            .generator
            .generate(&self.prompt_for(task), self.max_tokens)
            .await?;

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::errors::AgentError;
    use crate::agents::testing::ScriptedGenerator;
    use crate::inference::InferenceError;

    #[test]
    fn employee_creation() {
        let generator = Arc::new(ScriptedGenerator::replying(&[]));
        let employee = EmployeeAgent::new("Researcher", generator);

        assert_eq!(employee.role(), "Researcher");
        assert_eq!(employee.max_tokens(), 300);
        assert_eq!(employee.with_max_tokens(150).max_tokens(), 150);
    }

    #[test]
    fn debug_shows_role_and_backend() {
        let generator = Arc::new(ScriptedGenerator::replying(&[]));
        let employee = EmployeeAgent::new("Editor", generator);

        let debug = format!("{:?}", employee);
        assert!(debug.contains("\"Editor\""));
        assert!(debug.contains("scripted"));
        assert!(debug.contains("300"));
    }

    #[tokio::test]
    async fn work_sends_role_prompt_and_returns_output_verbatim() {
        let generator = Arc::new(ScriptedGenerator::replying(&["  Findings:\n- solar\n"]));
        let employee = EmployeeAgent::new("Researcher", generator.clone());

        let output = employee.work("Research topic").await.unwrap();

        assert_eq!(output, "  Findings:\n- solar\n");
        assert_eq!(
            generator.calls(),
            vec![(
                "You are an AI Researcher. Complete this task:\nResearch topic".to_string(),
                300
            )]
        );
    }

    #[tokio::test]
    async fn work_passes_empty_task_through() {
        let generator = Arc::new(ScriptedGenerator::replying(&["?"]));
        let employee = EmployeeAgent::new("Editor", generator.clone());

        employee.work("").await.unwrap();

        assert_eq!(
            generator.prompts(),
            vec!["You are an AI Editor. Complete this task:\n".to_string()]
        );
    }

    #[tokio::test]
    async fn work_propagates_inference_failure() {
        let generator = Arc::new(ScriptedGenerator::new(vec![Err(InferenceError::Status {
            status: 500,
            message: "boom".to_string(),
        })]));
        let employee = EmployeeAgent::new("Writer", generator);

        let err = employee.work("Draft post").await.unwrap_err();
        assert!(matches!(
            err,
            AgentError::Inference(InferenceError::Status { status: 500, .. })
        ));
    }
}
