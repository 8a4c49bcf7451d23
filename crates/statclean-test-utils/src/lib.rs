//! Testing utilities for StatClean workspace
//!
//! Shared test helpers, fixtures, and observers.

#![allow(missing_docs)]

use parking_lot::Mutex;
use statclean_workflow::{
    DatasetDescriptor, DatasetSource, Step, WorkflowController, WorkflowObserver, WorkflowSnapshot,
};
use std::sync::Arc;

/// Upload descriptor shaped like the demo survey
pub fn upload_descriptor(file_name: &str) -> DatasetDescriptor {
    DatasetDescriptor::new(file_name, 15, 8).with_size(4096)
}

/// Controller with the demo dataset loaded, still on Upload
pub fn loaded_controller() -> WorkflowController {
    let mut controller = WorkflowController::new();
    controller
        .load_dataset(DatasetSource::Demo, DatasetDescriptor::demo())
        .unwrap();
    controller
}

/// Controller advanced to `step` by plain `advance_step` calls
pub fn controller_at(step: Step) -> WorkflowController {
    let mut controller = WorkflowController::new();
    while controller.current_step() < step {
        controller.advance_step().unwrap();
    }
    controller
}

/// Observer that keeps every snapshot it receives
#[derive(Debug, Default)]
pub struct RecordingObserver {
    snapshots: Mutex<Vec<WorkflowSnapshot>>,
}

impl RecordingObserver {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn count(&self) -> usize {
        self.snapshots.lock().len()
    }

    pub fn last(&self) -> Option<WorkflowSnapshot> {
        self.snapshots.lock().last().cloned()
    }

    /// Step seen in each notification, oldest first
    pub fn steps(&self) -> Vec<Step> {
        self.snapshots
            .lock()
            .iter()
            .map(|s| s.current_step)
            .collect()
    }
}

impl WorkflowObserver for RecordingObserver {
    fn on_change(&self, snapshot: &WorkflowSnapshot) {
        self.snapshots.lock().push(snapshot.clone());
    }
}
