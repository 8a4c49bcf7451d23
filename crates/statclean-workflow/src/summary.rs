use crate::activity::ActivityEntry;
use crate::fixtures::DATA_QUALITY_SCORE;
use crate::state::WorkflowState;
use crate::types::Step;
use serde::{Deserialize, Serialize};

/// Which parts of the workflow a session has exercised
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureUsage {
    pub data_upload: bool,
    pub cleaning: bool,
    pub survey_weights: bool,
    pub report_generation: bool,
}

/// Session overview for status displays and exports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowSummary {
    pub current_step: Step,
    pub entries: usize,
    pub features: FeatureUsage,
    pub data_quality: f64,
}

impl WorkflowSummary {
    #[must_use]
    pub fn from_state(state: &WorkflowState) -> Self {
        let log = state.activity_log().entries();
        let mentions = |needle: &str| log.iter().any(|e: &ActivityEntry| e.action_mentions(needle));

        Self {
            current_step: state.current_step(),
            entries: log.len(),
            features: FeatureUsage {
                data_upload: state.dataset_loaded(),
                cleaning: mentions("imputation"),
                survey_weights: mentions("weights"),
                report_generation: mentions("report"),
            },
            data_quality: DATA_QUALITY_SCORE,
        }
    }
}
