use crate::activity::ActivityEntry;
use crate::config::WorkflowConfig;
use crate::controller::WorkflowController;
use crate::dataset::{DatasetDescriptor, DatasetSource};
use crate::error::{LogIntegrityError, WorkflowError};
use crate::observer::WorkflowObserver;
use crate::state::{TransitionReceipt, WorkflowSnapshot};
use crate::summary::WorkflowSummary;
use crate::types::{EntryId, SessionId, Step};
use parking_lot::Mutex;
use std::sync::Arc;

/// Shared handle to the single controller of a session.
///
/// Clones point at the same controller. Each method takes the lock once, so
/// every operation is atomic with respect to every other.
#[derive(Debug, Clone)]
pub struct WorkflowHandle {
    session_id: SessionId,
    inner: Arc<Mutex<WorkflowController>>,
}

impl WorkflowHandle {
    /// Create a new handle with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::from_controller(WorkflowController::new())
    }

    /// Create a new handle with custom configuration
    #[must_use]
    pub fn with_config(config: &WorkflowConfig) -> Self {
        Self::from_controller(WorkflowController::with_config(config))
    }

    #[must_use]
    pub fn from_controller(controller: WorkflowController) -> Self {
        Self {
            session_id: controller.session_id(),
            inner: Arc::new(Mutex::new(controller)),
        }
    }

    #[inline]
    #[must_use]
    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    /// Run a read-only closure against the controller
    pub fn read<R>(&self, f: impl FnOnce(&WorkflowController) -> R) -> R {
        f(&self.inner.lock())
    }

    pub fn advance_step(&self) -> Result<Option<TransitionReceipt>, WorkflowError> {
        self.inner.lock().advance_step()
    }

    pub fn retreat_step(&self) -> Option<TransitionReceipt> {
        self.inner.lock().retreat_step()
    }

    pub fn jump_to_step(&self, target: u8) -> Result<Option<TransitionReceipt>, WorkflowError> {
        self.inner.lock().jump_to_step(target)
    }

    pub fn reset_workflow(&self) {
        self.inner.lock().reset_workflow();
    }

    pub fn load_dataset(
        &self,
        source: DatasetSource,
        descriptor: DatasetDescriptor,
    ) -> Result<(), WorkflowError> {
        self.inner.lock().load_dataset(source, descriptor)
    }

    pub fn record_activity(
        &self,
        action: impl Into<String>,
        details: impl Into<String>,
    ) -> Result<EntryId, WorkflowError> {
        self.inner.lock().record_activity(action, details)
    }

    pub fn subscribe(&self, observer: Arc<dyn WorkflowObserver>) {
        self.inner.lock().subscribe(observer);
    }

    #[must_use]
    pub fn current_step(&self) -> Step {
        self.inner.lock().current_step()
    }

    #[must_use]
    pub fn dataset_loaded(&self) -> bool {
        self.inner.lock().dataset_loaded()
    }

    #[must_use]
    pub fn activity_log(&self) -> Vec<ActivityEntry> {
        self.inner.lock().activity_log().to_vec()
    }

    #[must_use]
    pub fn snapshot(&self) -> WorkflowSnapshot {
        self.inner.lock().snapshot()
    }

    #[must_use]
    pub fn summary(&self) -> WorkflowSummary {
        self.inner.lock().summary()
    }

    pub fn verify_integrity(&self) -> Result<(), LogIntegrityError> {
        self.inner.lock().verify_integrity()
    }
}

impl Default for WorkflowHandle {
    fn default() -> Self {
        Self::new()
    }
}
