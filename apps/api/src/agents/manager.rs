use std::sync::Arc;

use super::employee::EmployeeAgent;
use super::errors::{AgentError, AgentResult, PipelineFailure};
use super::prompts::library;
use super::state::RunStage;
use super::tasks::parse_task_candidates;
use super::types::{ProjectReport, TaskCountPolicy, TaskResult, TokenBudgets};
use crate::inference::TextGenerator;

/// Project Manager Agent responsible for task decomposition, delegation to
/// employees, and synthesis of the final deliverable
#[derive(Clone)]
pub struct ProjectManagerAgent {
    generator: Arc<dyn TextGenerator>,
    employees: Vec<EmployeeAgent>,
    budgets: TokenBudgets,
    policy: TaskCountPolicy,
}

impl std::fmt::Debug for ProjectManagerAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectManagerAgent")
            .field("backend", &self.generator.name())
            .field("employees", &self.employees)
            .field("budgets", &self.budgets)
            .field("policy", &self.policy)
            .finish()
    }
}

impl ProjectManagerAgent {
    /// Create a manager for an existing roster of employees
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        employees: Vec<EmployeeAgent>,
    ) -> AgentResult<Self> {
        if employees.is_empty() {
            return Err(AgentError::NoEmployees);
        }

        Ok(Self {
            generator,
            employees,
            budgets: TokenBudgets::default(),
            policy: TaskCountPolicy::default(),
        })
    }

    /// Create a manager and one employee per role, all sharing `generator`
    pub fn with_roles<S: AsRef<str>>(
        generator: Arc<dyn TextGenerator>,
        roles: &[S],
        budgets: TokenBudgets,
    ) -> AgentResult<Self> {
        let employees = roles
            .iter()
            .map(|role| {
                EmployeeAgent::new(role.as_ref(), generator.clone())
                    .with_max_tokens(budgets.employee)
            })
            .collect();

        Ok(Self::new(generator, employees)?.with_budgets(budgets))
    }

    pub fn with_budgets(mut self, budgets: TokenBudgets) -> Self {
        self.budgets = budgets;
        self
    }

    pub fn with_policy(mut self, policy: TaskCountPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn employees(&self) -> &[EmployeeAgent] {
        &self.employees
    }

    pub fn policy(&self) -> TaskCountPolicy {
        self.policy
    }

    /// Ask the model to decompose a project description into tasks.
    ///
    /// The model is asked for one task per employee; the response is split
    /// into normalized candidates but the count is not checked here.
    pub async fn breakdown(&self, description: &str) -> AgentResult<Vec<String>> {
        let count = self.employees.len().to_string();
        let prompt = library::project_breakdown()
            .render(&[("count", count.as_str()), ("description", description)]);

        let raw = self
            .generator
            .generate(&prompt, self.budgets.breakdown)
            .await?;

        let tasks: Vec<String> = parse_task_candidates(&raw).collect();
        tracing::debug!("Breakdown produced {} candidate tasks", tasks.len());

        Ok(tasks)
    }

    /// Validate breakdown output against the roster and apply the task
    /// count policy. Returns one assignment per engaged employee.
    pub fn prepare_assignments(&self, tasks: &[String]) -> AgentResult<Vec<String>> {
        let employees = self.employees.len();

        if tasks.is_empty() {
            return Err(AgentError::NoTasks);
        }
        if tasks.len() <= employees {
            return Ok(tasks.to_vec());
        }

        match self.policy {
            TaskCountPolicy::Strict => Err(AgentError::TaskCountMismatch {
                tasks: tasks.len(),
                employees,
            }),
            TaskCountPolicy::Truncate => {
                tracing::warn!(
                    "Dropping {} tasks beyond the {} available employees",
                    tasks.len() - employees,
                    employees
                );
                Ok(tasks[..employees].to_vec())
            }
            TaskCountPolicy::FoldExtra => {
                let mut assignments = tasks[..employees - 1].to_vec();
                assignments.push(tasks[employees - 1..].join("\n"));
                Ok(assignments)
            }
        }
    }

    /// Pair tasks with employees positionally and collect their results.
    ///
    /// Stops at the shorter of the two lists. Calls run one at a time, in
    /// order; the first failure aborts the whole delegation.
    pub async fn assign_and_collect(&self, tasks: &[String]) -> AgentResult<Vec<TaskResult>> {
        let mut results = Vec::with_capacity(tasks.len().min(self.employees.len()));
        self.delegate(tasks, &mut results).await?;
        Ok(results)
    }

    async fn delegate(&self, tasks: &[String], results: &mut Vec<TaskResult>) -> AgentResult<()> {
        for (task, employee) in tasks.iter().zip(&self.employees) {
            let output = employee.work(task).await?;
            results.push(TaskResult {
                role: employee.role().to_string(),
                task: task.clone(),
                output,
            });
        }
        Ok(())
    }

    /// Merge collected results into one final deliverable
    pub async fn combine(&self, results: &[TaskResult]) -> AgentResult<String> {
        let section = library::result_section();
        let work = results
            .iter()
            .map(|r| {
                section.render(&[
                    ("role", r.role.as_str()),
                    ("task", r.task.as_str()),
                    ("output", r.output.as_str()),
                ])
            })
            .collect::<Vec<_>>()
            .join("\n\n");

        let prompt = library::combine_results().render(&[("work", work.as_str())]);
        let final_output = self.generator.generate(&prompt, self.budgets.combine).await?;

        Ok(final_output)
    }

    /// Run the full pipeline: breakdown, delegation, synthesis.
    ///
    /// A blank description fails at `Intake` without any model call. Any
    /// later failure stops the run; the returned failure carries the partial
    /// report built so far.
    pub async fn run(&self, description: &str) -> Result<ProjectReport, PipelineFailure> {
        let description = description.trim();
        let mut report = ProjectReport::new(description, self.generator.name());

        if description.is_empty() {
            report.finish();
            return Err(PipelineFailure::new(
                RunStage::Intake,
                report,
                AgentError::EmptyDescription,
            ));
        }

        tracing::info!(
            run_id = %report.id,
            backend = %report.backend,
            employees = self.employees.len(),
            "Starting project run"
        );

        let tasks = match self.breakdown(description).await {
            Ok(tasks) => tasks,
            Err(e) => return Err(Self::fail(RunStage::Breakdown, report, e)),
        };
        report.tasks = tasks;

        let assignments = match self.prepare_assignments(&report.tasks) {
            Ok(assignments) => assignments,
            Err(e) => return Err(Self::fail(RunStage::Breakdown, report, e)),
        };

        let mut results = Vec::with_capacity(assignments.len());
        let delegated = self.delegate(&assignments, &mut results).await;
        report.results = results;
        if let Err(e) = delegated {
            return Err(Self::fail(RunStage::Delegation, report, e));
        }

        let combined = self.combine(&report.results).await;
        match combined {
            Ok(final_output) => report.final_output = Some(final_output),
            Err(e) => return Err(Self::fail(RunStage::Synthesis, report, e)),
        }

        report.finish();
        tracing::info!(
            run_id = %report.id,
            tasks = report.tasks.len(),
            results = report.results.len(),
            "Project run completed"
        );

        Ok(report)
    }

    fn fail(stage: RunStage, mut report: ProjectReport, error: AgentError) -> PipelineFailure {
        report.finish();
        tracing::error!(run_id = %report.id, %stage, "Project run failed: {}", error);
        PipelineFailure::new(stage, report, error)
    }
}
