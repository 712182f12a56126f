use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One unit of collected work: which employee did which task, and what the
/// model returned for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskResult {
    pub role: String,
    pub task: String,
    pub output: String,
}

/// Everything produced by a single pipeline run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectReport {
    pub id: Uuid,
    pub description: String,
    pub backend: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub tasks: Vec<String>,
    pub results: Vec<TaskResult>,
    pub final_output: Option<String>,
}

impl ProjectReport {
    pub fn new(description: impl Into<String>, backend: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            description: description.into(),
            backend: backend.into(),
            started_at: Utc::now(),
            finished_at: None,
            tasks: Vec::new(),
            results: Vec::new(),
            final_output: None,
        }
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }
}

/// Token budgets for each kind of model call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenBudgets {
    pub breakdown: u32,
    pub employee: u32,
    pub combine: u32,
}

impl Default for TokenBudgets {
    fn default() -> Self {
        Self {
            breakdown: 150,
            employee: 300,
            combine: 400,
        }
    }
}

/// What to do when the breakdown yields more tasks than there are employees
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskCountPolicy {
    /// Fail the run
    #[default]
    Strict,
    /// Append the extra tasks to the last employee's assignment
    FoldExtra,
    /// Drop the extra tasks (logged)
    Truncate,
}

impl std::str::FromStr for TaskCountPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "strict" => Ok(TaskCountPolicy::Strict),
            "fold" | "fold_extra" => Ok(TaskCountPolicy::FoldExtra),
            "truncate" => Ok(TaskCountPolicy::Truncate),
            other => Err(format!(
                "unknown task policy '{}' (expected strict, fold or truncate)",
                other
            )),
        }
    }
}
