use axum::{extract::State, Json};
use serde::Deserialize;

use crate::agents::ProjectReport;
use crate::api::errors::ApiError;
use crate::api::middleware::ProviderCredential;
use crate::api::state::AppState;

/// Request body for a project run
#[derive(Debug, Deserialize)]
pub struct RunProjectRequest {
    pub description: String,
}

/// Run the full pipeline for a project description
///
/// POST /api/projects
pub async fn run_project(
    State(state): State<AppState>,
    ProviderCredential(credential): ProviderCredential,
    Json(req): Json<RunProjectRequest>,
) -> Result<Json<ProjectReport>, ApiError> {
    if req.description.trim().is_empty() {
        return Err(ApiError::bad_request("Project description is required"));
    }

    let manager = state.manager_for(credential.as_deref())?;
    let report = manager.run(&req.description).await?;

    Ok(Json(report))
}

/// Health check endpoint
///
/// GET /health
pub async fn health_check() -> &'static str {
    "OK"
}
