// Prompt templates for LLM interactions
//
// This module contains all prompt templates used by the agent system.
// Templates use `{{name}}` placeholders and are versioned so a run's output
// can be traced back to the exact wording that produced it.

/// Prompt template structure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptTemplate {
    pub name: &'static str,
    pub version: &'static str,
    pub template: &'static str,
}

impl PromptTemplate {
    /// Render the template, substituting `{{key}}` placeholders.
    ///
    /// Substitution is a single pass: placeholder-looking text inside a
    /// substituted value is left alone. Unknown placeholders are kept as-is.
    pub fn render(&self, variables: &[(&str, &str)]) -> String {
        let mut out = String::with_capacity(self.template.len());
        let mut rest = self.template;

        while let Some(start) = rest.find("{{") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];

            let Some(end) = after.find("}}") else {
                out.push_str(&rest[start..]);
                return out;
            };

            let key = after[..end].trim();
            match variables.iter().find(|(name, _)| *name == key) {
                Some((_, value)) => out.push_str(value),
                None => out.push_str(&rest[start..start + end + 4]),
            }
            rest = &after[end + 2..];
        }

        out.push_str(rest);
        out
    }
}

pub mod library {
    use super::PromptTemplate;

    /// Decompose a project description into a fixed number of tasks
    pub fn project_breakdown() -> PromptTemplate {
        PromptTemplate {
            name: "project_breakdown",
            version: "1.0.0",
            template: "You are a project manager. Break down this project into {{count}} clear tasks:\n{{description}}",
        }
    }

    /// Role-flavored instruction for an employee
    pub fn employee_task() -> PromptTemplate {
        PromptTemplate {
            name: "employee_task",
            version: "1.0.0",
            template: "You are an AI {{role}}. Complete this task:\n{{task}}",
        }
    }

    /// Header + body for one collected result inside the synthesis prompt
    pub fn result_section() -> PromptTemplate {
        PromptTemplate {
            name: "result_section",
            version: "1.0.0",
            template: "### {{role}} ({{task}}):\n{{output}}",
        }
    }

    /// Merge all collected work into one deliverable
    pub fn combine_results() -> PromptTemplate {
        PromptTemplate {
            name: "combine_results",
            version: "1.0.0",
            template: "Combine the following work into a polished final output:\n{{work}}",
        }
    }
}
