// Agent system modules
//
// A project manager agent decomposes a project description into tasks,
// hands each task to a role-labeled employee agent, and combines the
// collected results into one deliverable. Every model call goes through an
// injected `TextGenerator`.

pub mod employee;
pub mod errors;
pub mod manager;
pub mod prompts;
pub mod state;
pub mod tasks;
pub mod types;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

// Re-export main types
pub use employee::EmployeeAgent;
pub use errors::{AgentError, AgentResult, PipelineFailure};
pub use manager::ProjectManagerAgent;
pub use state::RunStage;
pub use tasks::parse_task_candidates;
pub use types::{ProjectReport, TaskCountPolicy, TaskResult, TokenBudgets};
