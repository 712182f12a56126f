use std::sync::Arc;

use crate::agents::{AgentResult, ProjectManagerAgent, TaskCountPolicy, TokenBudgets};
use crate::config::Settings;
use crate::inference::Backends;

/// Shared handler state.
///
/// Holds only immutable configuration and the backend resolver; every
/// request builds its own manager, so runs never share agent state.
#[derive(Clone)]
pub struct AppState {
    backends: Backends,
    roles: Arc<Vec<String>>,
    budgets: TokenBudgets,
    policy: TaskCountPolicy,
}

impl AppState {
    pub fn new(backends: Backends, roles: Vec<String>) -> Self {
        Self {
            backends,
            roles: Arc::new(roles),
            budgets: TokenBudgets::default(),
            policy: TaskCountPolicy::default(),
        }
    }

    pub fn from_settings(settings: &Settings, backends: Backends) -> Self {
        Self::new(backends, settings.roles.clone())
            .with_budgets(settings.budgets)
            .with_policy(settings.task_policy)
    }

    pub fn with_budgets(mut self, budgets: TokenBudgets) -> Self {
        self.budgets = budgets;
        self
    }

    pub fn with_policy(mut self, policy: TaskCountPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Whether the UI should offer a credential field
    pub fn accepts_credentials(&self) -> bool {
        self.backends.selection().accepts_credentials()
    }

    /// Build the manager (and its employees) for one run
    pub fn manager_for(&self, credential: Option<&str>) -> AgentResult<ProjectManagerAgent> {
        let generator = self.backends.resolve(credential);
        Ok(ProjectManagerAgent::with_roles(generator, self.roles.as_slice(), self.budgets)?
            .with_policy(self.policy))
    }
}
