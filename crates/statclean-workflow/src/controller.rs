//! Workflow controller
//!
//! Owns the session state, enforces the six-step sequence and writes the
//! activity trail. Every operation is synchronous and all-or-nothing: a
//! rejected call leaves the state exactly as it found it.

use crate::activity::ActivityEntry;
use crate::config::WorkflowConfig;
use crate::dataset::{DatasetDescriptor, DatasetSource, FileFormat};
use crate::error::{LogIntegrityError, WorkflowError};
use crate::gate::{gate_for, StepGate};
use crate::observer::WorkflowObserver;
use crate::state::{TransitionReceipt, WorkflowSnapshot, WorkflowState};
use crate::state_machine;
use crate::summary::WorkflowSummary;
use crate::types::{EntryId, SessionId, Step};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct WorkflowController {
    session_id: SessionId,
    state: WorkflowState,
    gate: Box<dyn StepGate>,
    observers: Vec<Arc<dyn WorkflowObserver>>,
}

impl WorkflowController {
    /// Create a controller with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(&WorkflowConfig::default())
    }

    #[must_use]
    pub fn with_config(config: &WorkflowConfig) -> Self {
        Self::with_gate(gate_for(config))
    }

    /// Create a controller with a custom step gate
    #[must_use]
    pub fn with_gate(gate: Box<dyn StepGate>) -> Self {
        let session_id = SessionId::new();
        debug!(session = %session_id, gate = gate.name(), "workflow session created");
        Self {
            session_id,
            state: WorkflowState::default(),
            gate,
            observers: Vec::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    #[inline]
    #[must_use]
    pub fn current_step(&self) -> Step {
        self.state.current_step()
    }

    #[inline]
    #[must_use]
    pub fn dataset_loaded(&self) -> bool {
        self.state.dataset_loaded()
    }

    #[inline]
    #[must_use]
    pub fn dataset(&self) -> Option<&DatasetDescriptor> {
        self.state.dataset()
    }

    #[inline]
    #[must_use]
    pub fn activity_log(&self) -> &[ActivityEntry] {
        self.state.activity_log().entries()
    }

    #[must_use]
    pub fn snapshot(&self) -> WorkflowSnapshot {
        self.state.snapshot()
    }

    #[must_use]
    pub fn summary(&self) -> WorkflowSummary {
        WorkflowSummary::from_state(&self.state)
    }

    /// Steps reachable by `jump_to_step` right now
    #[must_use]
    pub fn allowed_targets(&self) -> Vec<Step> {
        state_machine::allowed_targets(self.current_step())
    }

    pub fn verify_integrity(&self) -> Result<(), LogIntegrityError> {
        self.state.activity_log().verify_integrity()
    }

    /// Register an observer notified after every state change
    pub fn subscribe(&mut self, observer: Arc<dyn WorkflowObserver>) {
        self.observers.push(observer);
    }

    /// Move forward one step.
    ///
    /// Returns `Ok(None)` without touching anything when already on the last
    /// step.
    ///
    /// # Errors
    /// `WorkflowError::StepIncomplete` when the configured gate refuses.
    pub fn advance_step(&mut self) -> Result<Option<TransitionReceipt>, WorkflowError> {
        let from = self.current_step();
        let Some(to) = from.next() else {
            debug!(session = %self.session_id, "already on the last step");
            return Ok(None);
        };

        if let Err(reason) = self.gate.check(&self.state) {
            warn!(
                session = %self.session_id,
                step = from.number(),
                gate = self.gate.name(),
                %reason,
                "step gate refused to advance"
            );
            return Err(WorkflowError::StepIncomplete { step: from, reason });
        }

        let details = format!("Advanced to step {}", to.number());
        Ok(Some(self.move_to(from, to, details)))
    }

    /// Move back one step. `None` when already on the first step.
    pub fn retreat_step(&mut self) -> Option<TransitionReceipt> {
        let from = self.current_step();
        let Some(to) = from.previous() else {
            debug!(session = %self.session_id, "already on the first step");
            return None;
        };

        let details = format!("Returned to step {}", to.number());
        Some(self.move_to(from, to, details))
    }

    /// Jump to any reached step, or one step ahead.
    ///
    /// Jumping to the current step is a no-op; jumping ahead behaves exactly
    /// like `advance_step`.
    ///
    /// # Errors
    /// `WorkflowError::InvalidTransition` for any other target, including
    /// numbers outside `1..=6`.
    pub fn jump_to_step(&mut self, target: u8) -> Result<Option<TransitionReceipt>, WorkflowError> {
        let from = self.current_step();
        let to = state_machine::validate_jump(from, target).map_err(|err| {
            warn!(session = %self.session_id, from = from.number(), to = target, "rejected step jump");
            err
        })?;

        if to == from {
            Ok(None)
        } else if to > from {
            self.advance_step()
        } else {
            let details = format!("Revisited step {}", to.number());
            Ok(Some(self.move_to(from, to, details)))
        }
    }

    /// Back to step 1 with no dataset and an empty trail. Cannot be undone.
    pub fn reset_workflow(&mut self) {
        let dropped = self.state.activity_log().len();
        self.state = WorkflowState::default();
        info!(session = %self.session_id, dropped_entries = dropped, "workflow reset");
        self.notify();
    }

    /// Accept a dataset and log where it came from.
    ///
    /// # Errors
    /// `WorkflowError::UnsupportedFormat` for an upload whose file name is
    /// not `.csv`, `.xlsx` or `.xls`; nothing is changed in that case.
    pub fn load_dataset(
        &mut self,
        source: DatasetSource,
        descriptor: DatasetDescriptor,
    ) -> Result<(), WorkflowError> {
        let (action, details) = match source {
            DatasetSource::Upload => {
                FileFormat::detect(&descriptor.name).map_err(|err| {
                    warn!(session = %self.session_id, file = %descriptor.name, "unsupported upload format");
                    err
                })?;
                ("File upload", upload_details(&descriptor))
            }
            DatasetSource::Demo => (
                "Demo data loaded",
                format!(
                    "{} records, {} variables from {}",
                    descriptor.records, descriptor.fields, descriptor.name
                ),
            ),
        };

        info!(
            session = %self.session_id,
            %source,
            records = descriptor.records,
            fields = descriptor.fields,
            "dataset loaded"
        );
        self.state.dataset = Some(descriptor);
        self.append(action, details);
        self.notify();
        Ok(())
    }

    /// Append a free-form entry stamped with the current time and step.
    ///
    /// # Errors
    /// `WorkflowError::EmptyAction` when `action` is empty.
    pub fn record_activity(
        &mut self,
        action: impl Into<String>,
        details: impl Into<String>,
    ) -> Result<EntryId, WorkflowError> {
        let action = action.into();
        if action.is_empty() {
            return Err(WorkflowError::EmptyAction);
        }
        let id = self.append(action, details.into()).id;
        self.notify();
        Ok(id)
    }

    fn move_to(&mut self, from: Step, to: Step, details: String) -> TransitionReceipt {
        self.state.current_step = to;
        let action = format!("Step {} → {}", from.number(), to.number());
        let entry_seq = self.append(action, details).seq;
        self.notify();
        TransitionReceipt { from, to, entry_seq }
    }

    fn append(&mut self, action: impl Into<String>, details: impl Into<String>) -> &ActivityEntry {
        let step = self.state.current_step;
        let session = self.session_id;
        let entry = self.state.activity_log.append(step, action, details);
        debug!(
            session = %session,
            seq = entry.seq,
            step = step.number(),
            action = %entry.action,
            details = %entry.details,
            "activity recorded"
        );
        entry
    }

    fn notify(&self) {
        if self.observers.is_empty() {
            return;
        }
        let snapshot = self.state.snapshot();
        for observer in &self.observers {
            observer.on_change(&snapshot);
        }
    }
}

impl Default for WorkflowController {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for WorkflowController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkflowController")
            .field("session_id", &self.session_id)
            .field("state", &self.state)
            .field("gate", &self.gate.name())
            .field("observers", &self.observers.len())
            .finish()
    }
}

fn upload_details(descriptor: &DatasetDescriptor) -> String {
    match descriptor.size_label() {
        Some(size) => format!(
            "{} ({size}), {} records, {} variables",
            descriptor.name, descriptor.records, descriptor.fields
        ),
        None => format!(
            "{}, {} records, {} variables",
            descriptor.name, descriptor.records, descriptor.fields
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::DatasetRequiredGate;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn starts_on_upload_with_empty_trail() {
        let controller = WorkflowController::new();
        assert_eq!(controller.current_step(), Step::Upload);
        assert!(!controller.dataset_loaded());
        assert!(controller.activity_log().is_empty());
    }

    #[test]
    fn advance_logs_transition_with_new_step() {
        let mut controller = WorkflowController::new();
        let receipt = controller.advance_step().unwrap().unwrap();

        assert_eq!(receipt.from, Step::Upload);
        assert_eq!(receipt.to, Step::Clean);
        let entry = &controller.activity_log()[0];
        assert_eq!(entry.action, "Step 1 → 2");
        assert_eq!(entry.details, "Advanced to step 2");
        assert_eq!(entry.step, Step::Clean);
    }

    #[test]
    fn retreat_is_noop_on_first_step() {
        let mut controller = WorkflowController::new();
        assert!(controller.retreat_step().is_none());
        assert!(controller.activity_log().is_empty());
    }

    #[test]
    fn backward_jump_is_logged_as_revisit() {
        let mut controller = WorkflowController::new();
        for _ in 0..3 {
            controller.advance_step().unwrap();
        }
        let receipt = controller.jump_to_step(2).unwrap().unwrap();
        assert_eq!(receipt.to, Step::Clean);
        assert_eq!(controller.activity_log().last().unwrap().details, "Revisited step 2");
    }

    #[test]
    fn jump_to_current_step_changes_nothing() {
        let mut controller = WorkflowController::new();
        assert_eq!(controller.jump_to_step(1), Ok(None));
        assert!(controller.activity_log().is_empty());
    }

    #[test]
    fn upload_details_include_size() {
        let mut controller = WorkflowController::new();
        controller
            .load_dataset(
                DatasetSource::Upload,
                DatasetDescriptor::new("wave1.xlsx", 15, 8).with_size(2048),
            )
            .unwrap();
        let entry = &controller.activity_log()[0];
        assert_eq!(entry.action, "File upload");
        assert_eq!(entry.details, "wave1.xlsx (2.0 KB), 15 records, 8 variables");
    }

    #[test]
    fn only_empty_action_is_rejected() {
        let mut controller = WorkflowController::new();
        assert_eq!(
            controller.record_activity("", "details"),
            Err(WorkflowError::EmptyAction)
        );
        assert!(controller.activity_log().is_empty());

        controller.record_activity("  ", "d").unwrap();
        assert_eq!(controller.activity_log().len(), 1);
        assert_eq!(controller.activity_log()[0].action, "  ");
    }

    #[test]
    fn strict_gate_holds_upload_until_data_arrives() {
        let mut controller = WorkflowController::with_gate(Box::new(DatasetRequiredGate));
        assert!(matches!(
            controller.advance_step(),
            Err(WorkflowError::StepIncomplete { step: Step::Upload, .. })
        ));
        assert!(controller.jump_to_step(2).is_err());
        assert_eq!(controller.current_step(), Step::Upload);

        controller
            .load_dataset(DatasetSource::Demo, DatasetDescriptor::demo())
            .unwrap();
        assert!(controller.advance_step().unwrap().is_some());
    }

    #[test]
    fn observers_skip_noops() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let mut controller = WorkflowController::new();
        controller.subscribe(Arc::new(move |_: &WorkflowSnapshot| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        controller.retreat_step();
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        controller.advance_step().unwrap();
        controller.record_activity("Template selection", "Policy Brief").unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
