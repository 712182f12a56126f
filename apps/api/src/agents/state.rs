use serde::{Deserialize, Serialize};

/// Steps of a pipeline run, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStage {
    /// Input validation, before any model call
    Intake,
    /// Project description decomposed into tasks
    Breakdown,
    /// Tasks handed to employees and results collected
    Delegation,
    /// Results combined into the final deliverable
    Synthesis,
}

impl std::fmt::Display for RunStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunStage::Intake => write!(f, "intake"),
            RunStage::Breakdown => write!(f, "breakdown"),
            RunStage::Delegation => write!(f, "delegation"),
            RunStage::Synthesis => write!(f, "synthesis"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_are_ordered() {
        assert!(RunStage::Intake < RunStage::Breakdown);
        assert!(RunStage::Breakdown < RunStage::Delegation);
        assert!(RunStage::Delegation < RunStage::Synthesis);
    }

    #[test]
    fn stage_display_and_serde_agree() {
        for stage in [
            RunStage::Intake,
            RunStage::Breakdown,
            RunStage::Delegation,
            RunStage::Synthesis,
        ] {
            let json = serde_json::to_string(&stage).unwrap();
            assert_eq!(json, format!("\"{}\"", stage));
        }
    }
}
