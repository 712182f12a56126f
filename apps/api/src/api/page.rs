//! Server-rendered HTML for the single-page UI.

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::agents::{ProjectReport, RunStage};

pub const TITLE: &str = "AI Project Sync Space";
pub const EMPTY_DESCRIPTION_WARNING: &str = "Please enter a project description.";

/// What to show below the form
#[derive(Debug)]
pub enum Outcome<'a> {
    None,
    Warning(&'a str),
    Completed(&'a ProjectReport),
    Failed {
        report: &'a ProjectReport,
        stage: RunStage,
        message: &'a str,
    },
}

/// Render the full page: form plus whatever the last submission produced
pub fn render(description: &str, show_credential: bool, outcome: Outcome<'_>) -> String {
    let mut body = String::new();
    body.push_str(&render_form(description, show_credential));

    match outcome {
        Outcome::None => {}
        Outcome::Warning(message) => {
            body.push_str(&format!(
                "<div class=\"warning\">{}</div>\n",
                encode_text(message)
            ));
        }
        Outcome::Completed(report) => body.push_str(&render_report(report)),
        Outcome::Failed {
            report,
            stage,
            message,
        } => {
            body.push_str(&render_report(report));
            body.push_str(&format!(
                "<div class=\"error\"><strong>Run failed during {}:</strong> {}</div>\n",
                stage,
                encode_text(message)
            ));
        }
    }

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n<style>{style}</style>\n</head>\n<body>\n<h1>{title}</h1>\n<p>An AI Project Manager assigns tasks to AI Employees, collects results, and produces a final deliverable.</p>\n{body}</body>\n</html>\n",
        title = TITLE,
        style = STYLE,
        body = body
    )
}

fn render_form(description: &str, show_credential: bool) -> String {
    let credential = if show_credential {
        "<label for=\"api_key\">Optional API key (switches to the alternate provider):</label>\n\
         <input type=\"password\" id=\"api_key\" name=\"api_key\" autocomplete=\"off\">\n"
    } else {
        ""
    };

    format!(
        "<form method=\"post\" action=\"/\">\n\
         <label for=\"description\">Enter your project description:</label>\n\
         <textarea id=\"description\" name=\"description\" rows=\"5\">{}</textarea>\n\
         {}<button type=\"submit\">Run Project</button>\n\
         </form>\n",
        encode_text(description),
        credential
    )
}

fn render_report(report: &ProjectReport) -> String {
    let mut html = String::new();

    if !report.tasks.is_empty() {
        html.push_str("<h2>Task Breakdown</h2>\n<ul class=\"tasks\">\n");
        for (i, task) in report.tasks.iter().enumerate() {
            html.push_str(&format!(
                "<li><strong>Task {}:</strong> {}</li>\n",
                i + 1,
                encode_text(task)
            ));
        }
        html.push_str("</ul>\n");
    }

    if !report.results.is_empty() {
        html.push_str("<h2>Employee Outputs</h2>\n");
        for result in &report.results {
            html.push_str(&format!(
                "<details data-role=\"{}\">\n<summary>{} - {}</summary>\n<div class=\"output\">{}</div>\n</details>\n",
                encode_double_quoted_attribute(&result.role),
                encode_text(&result.role),
                encode_text(&result.task),
                encode_text(&result.output)
            ));
        }
    }

    if let Some(final_output) = &report.final_output {
        html.push_str(&format!(
            "<h2>Final Output</h2>\n<div class=\"success output\">{}</div>\n",
            encode_text(final_output)
        ));
    }

    html
}

const STYLE: &str = "body{font-family:sans-serif;max-width:60rem;margin:2rem auto;padding:0 1rem}\
textarea,input{width:100%;box-sizing:border-box;margin:.25rem 0 1rem}\
.output{white-space:pre-wrap}\
.warning{background:#fff4ce;padding:.75rem}\
.error{background:#fde7e9;padding:.75rem}\
.success{background:#dff6dd;padding:.75rem}\
details{margin:.5rem 0}";
