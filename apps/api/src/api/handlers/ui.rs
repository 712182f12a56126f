use axum::{extract::State, response::Html, Form};
use serde::Deserialize;

use crate::api::page::{self, Outcome, EMPTY_DESCRIPTION_WARNING};
use crate::api::state::AppState;

/// Fields posted by the project form
#[derive(Debug, Default, Deserialize)]
pub struct ProjectForm {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub api_key: Option<String>,
}

/// Render the empty project form
///
/// GET /
pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(page::render("", state.accepts_credentials(), Outcome::None))
}

/// Handle a form submission and render the run's results
///
/// POST /
pub async fn submit(State(state): State<AppState>, Form(form): Form<ProjectForm>) -> Html<String> {
    let show_credential = state.accepts_credentials();

    if form.description.trim().is_empty() {
        return Html(page::render(
            &form.description,
            show_credential,
            Outcome::Warning(EMPTY_DESCRIPTION_WARNING),
        ));
    }

    let manager = match state.manager_for(form.api_key.as_deref()) {
        Ok(manager) => manager,
        Err(e) => {
            let message = e.to_string();
            return Html(page::render(
                &form.description,
                show_credential,
                Outcome::Warning(&message),
            ));
        }
    };

    let html = match manager.run(&form.description).await {
        Ok(report) => page::render(&form.description, show_credential, Outcome::Completed(&report)),
        Err(failure) => {
            let message = failure.source.to_string();
            page::render(
                &form.description,
                show_credential,
                Outcome::Failed {
                    report: &failure.report,
                    stage: failure.stage,
                    message: &message,
                },
            )
        }
    };

    Html(html)
}
