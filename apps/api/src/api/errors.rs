use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use crate::agents::{AgentError, PipelineFailure};

/// API error type with HTTP status code and message
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    /// Extra fields merged into the JSON body
    pub details: Option<Value>,
}

impl ApiError {
    /// Creates a new API error
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            details: None,
        }
    }

    /// Attach extra JSON fields to the error body
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Creates a 400 Bad Request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Creates a 401 Unauthorized error
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    /// Creates a 422 Unprocessable Entity error
    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, message)
    }

    /// Creates a 502 Bad Gateway error
    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, message)
    }

    /// Creates a 500 Internal Server Error
    pub fn internal_server_error(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut body = json!({
            "error": self.message
        });

        if let (Some(Value::Object(extra)), Value::Object(map)) = (self.details, &mut body) {
            map.extend(extra);
        }

        (self.status, Json(body)).into_response()
    }
}

impl From<AgentError> for ApiError {
    fn from(err: AgentError) -> Self {
        let message = err.to_string();
        match err {
            AgentError::EmptyDescription => Self::bad_request(message),
            AgentError::NoTasks | AgentError::TaskCountMismatch { .. } => {
                Self::unprocessable(message)
            }
            AgentError::Inference(_) => Self::bad_gateway(message),
            AgentError::NoEmployees => Self::internal_server_error(message),
        }
    }
}

impl From<PipelineFailure> for ApiError {
    fn from(failure: PipelineFailure) -> Self {
        let details = json!({
            "stage": failure.stage,
            "report": &*failure.report,
        });
        ApiError::from(failure.source).with_details(details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::{ProjectReport, RunStage};
    use crate::inference::InferenceError;

    #[test]
    fn agent_errors_map_to_status_codes() {
        assert_eq!(
            ApiError::from(AgentError::EmptyDescription).status,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(AgentError::TaskCountMismatch { tasks: 4, employees: 3 }).status,
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::from(AgentError::Inference(InferenceError::EmptyResponse)).status,
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn pipeline_failure_carries_stage_and_report() {
        let mut report = ProjectReport::new("Project", "scripted");
        report.tasks = vec!["A".to_string()];
        let failure = PipelineFailure::new(
            RunStage::Synthesis,
            report,
            AgentError::Inference(InferenceError::Network("down".to_string())),
        );

        let err = ApiError::from(failure);
        assert_eq!(err.status, StatusCode::BAD_GATEWAY);
        let details = err.details.expect("details present");
        assert_eq!(details["stage"], "synthesis");
        assert_eq!(details["report"]["tasks"][0], "A");
    }
}
