// API layer module (adapters for the agent pipeline)
// The HTML form and the JSON endpoint are two surfaces over the same run

pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod page;
pub mod state;

pub use state::AppState;

use axum::{
    routing::{get, post},
    Router,
};

use handlers::{projects, ui};

/// Build the application routes (without transport middleware)
pub fn router(state: AppState) -> Router {
    Router::new()
        // Project form
        .route("/", get(ui::index).post(ui::submit))
        // Health check
        .route("/health", get(projects::health_check))
        // JSON API
        .route("/api/projects", post(projects::run_project))
        // Shared state
        .with_state(state)
}
