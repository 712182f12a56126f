use thiserror::Error;

use super::state::RunStage;
use super::types::ProjectReport;
use crate::inference::InferenceError;

/// Errors that can occur in the agent system
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("Inference failed: {0}")]
    Inference(#[from] InferenceError),

    #[error("Project description is empty")]
    EmptyDescription,

    #[error("At least one employee is required")]
    NoEmployees,

    #[error("Project breakdown produced no tasks")]
    NoTasks,

    #[error("Project breakdown produced {tasks} tasks but only {employees} employees are available")]
    TaskCountMismatch { tasks: usize, employees: usize },
}

pub type AgentResult<T> = Result<T, AgentError>;

/// A pipeline run that stopped early.
///
/// `report` holds everything completed before `stage` failed.
#[derive(Debug, Error)]
#[error("{stage} failed: {source}")]
pub struct PipelineFailure {
    pub stage: RunStage,
    pub report: Box<ProjectReport>,
    #[source]
    pub source: AgentError,
}

impl PipelineFailure {
    pub fn new(stage: RunStage, report: ProjectReport, source: AgentError) -> Self {
        Self {
            stage,
            report: Box::new(report),
            source,
        }
    }
}
