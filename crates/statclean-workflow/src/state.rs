use crate::activity::{ActivityEntry, ActivityLog};
use crate::dataset::DatasetDescriptor;
use crate::types::Step;
use serde::{Deserialize, Serialize};

/// Mutable session state. Only the controller writes to it.
#[derive(Debug, Clone, Default)]
pub struct WorkflowState {
    pub(crate) current_step: Step,
    pub(crate) dataset: Option<DatasetDescriptor>,
    pub(crate) activity_log: ActivityLog,
}

impl WorkflowState {
    #[inline]
    #[must_use]
    pub fn current_step(&self) -> Step {
        self.current_step
    }

    #[inline]
    #[must_use]
    pub fn dataset_loaded(&self) -> bool {
        self.dataset.is_some()
    }

    #[inline]
    #[must_use]
    pub fn dataset(&self) -> Option<&DatasetDescriptor> {
        self.dataset.as_ref()
    }

    #[inline]
    #[must_use]
    pub fn activity_log(&self) -> &ActivityLog {
        &self.activity_log
    }

    #[must_use]
    pub fn snapshot(&self) -> WorkflowSnapshot {
        WorkflowSnapshot {
            current_step: self.current_step,
            dataset_loaded: self.dataset_loaded(),
            dataset: self.dataset.clone(),
            activity_log: self.activity_log.entries().to_vec(),
        }
    }
}

/// Read-only copy of the state handed to observers and callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowSnapshot {
    pub current_step: Step,
    pub dataset_loaded: bool,
    pub dataset: Option<DatasetDescriptor>,
    pub activity_log: Vec<ActivityEntry>,
}

impl WorkflowSnapshot {
    #[must_use]
    pub fn latest_entry(&self) -> Option<&ActivityEntry> {
        self.activity_log.last()
    }
}

/// Proof of a step change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionReceipt {
    pub from: Step,
    pub to: Step,
    /// Sequence number of the activity entry written for the move
    pub entry_seq: u64,
}
