//! Guided demo session
//!
//! `DemoSession` is the presentation-side driver: it owns the shared
//! workflow handle, runs simulated tasks through a `ProcessingBackend` and
//! logs the instantaneous UI actions (template choice, weight method, table
//! switches). All mutation still goes through the workflow controller.

use crate::config::{DemoConfig, LatencyConfig};
use crate::error::DemoError;
use crate::processing::{
    ProcessingBackend, ProcessingTask, ReportTemplate, SimulatedBackend, TaskOutcome,
};
use serde::Serialize;
use statclean_workflow::fixtures::CLEANED_QUALITY_LABEL;
use statclean_workflow::{
    DatasetDescriptor, DatasetSource, EntryId, FileFormat, Step, WorkflowHandle, WorkflowSummary,
};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Table shown on the Estimate step during the walkthrough
const WALKTHROUGH_TABLE: &str = "regional";

/// Result of a full walkthrough
#[derive(Debug, Clone, Serialize)]
pub struct WalkthroughReport {
    pub outcomes: Vec<TaskOutcome>,
    pub summary: WorkflowSummary,
    pub quality_label: &'static str,
}

pub struct DemoSession {
    workflow: WorkflowHandle,
    backend: Arc<dyn ProcessingBackend>,
    latency: LatencyConfig,
    template: ReportTemplate,
}

impl DemoSession {
    /// Session with the simulated backend
    #[must_use]
    pub fn new(config: &DemoConfig) -> Self {
        let backend = Arc::new(SimulatedBackend::new(config.latency.clone()));
        Self::with_backend(config, backend)
    }

    /// Session with a custom backend
    #[must_use]
    pub fn with_backend(config: &DemoConfig, backend: Arc<dyn ProcessingBackend>) -> Self {
        Self {
            workflow: WorkflowHandle::with_config(&config.workflow),
            backend,
            latency: config.latency.clone(),
            template: ReportTemplate::default(),
        }
    }

    #[inline]
    #[must_use]
    pub fn workflow(&self) -> &WorkflowHandle {
        &self.workflow
    }

    #[inline]
    #[must_use]
    pub fn template(&self) -> ReportTemplate {
        self.template
    }

    /// Accept an uploaded file.
    ///
    /// The extension is checked before the simulated delay, so a rejected
    /// file never waits and never touches the workflow.
    pub async fn upload_file(
        &self,
        file_name: &str,
        size_bytes: u64,
    ) -> Result<DatasetDescriptor, DemoError> {
        let format = FileFormat::detect(file_name)?;
        tracing::info!(file = file_name, format = ?format, size_bytes, "processing upload");

        pause(self.latency.upload()).await;

        // uploads are not parsed; they stand in for the demo survey
        let fixture = DatasetDescriptor::demo();
        let descriptor = DatasetDescriptor::new(file_name, fixture.records, fixture.fields)
            .with_size(size_bytes);
        self.workflow
            .load_dataset(DatasetSource::Upload, descriptor.clone())?;
        Ok(descriptor)
    }

    /// Load the built-in survey fixture
    pub async fn load_demo_data(&self) -> Result<DatasetDescriptor, DemoError> {
        tracing::info!("loading demo survey");
        pause(self.latency.demo_load()).await;

        let descriptor = DatasetDescriptor::demo();
        self.workflow
            .load_dataset(DatasetSource::Demo, descriptor.clone())?;
        Ok(descriptor)
    }

    /// Load the demo data, then move to the Clean step
    pub async fn start_demo(&self) -> Result<Step, DemoError> {
        self.load_demo_data().await?;
        self.workflow.advance_step()?;
        Ok(self.workflow.current_step())
    }

    pub async fn run_task(&self, task: ProcessingTask) -> Result<TaskOutcome, DemoError> {
        let current = self.workflow.current_step();
        if task.step() != current {
            tracing::debug!(task = %task, expected = %task.step(), current = %current, "task run off its step");
        }
        self.backend.run(task, &self.workflow).await
    }

    pub fn select_template(&mut self, template: ReportTemplate) -> Result<EntryId, DemoError> {
        self.template = template;
        Ok(self
            .workflow
            .record_activity("Template selection", template.title())?)
    }

    pub fn change_weight_method(&self, method: &str) -> Result<EntryId, DemoError> {
        Ok(self
            .workflow
            .record_activity("Weight method", format!("Changed to {method} weighting"))?)
    }

    pub fn show_table(&self, kind: &str) -> Result<EntryId, DemoError> {
        Ok(self
            .workflow
            .record_activity("Table view", format!("Switched to {kind} estimates"))?)
    }

    /// Mark the demo finished and return the session summary
    pub fn complete(&self) -> Result<WorkflowSummary, DemoError> {
        self.workflow
            .record_activity("Demo completed", "All workflow steps completed successfully")?;
        Ok(self.workflow.summary())
    }

    /// Reset the workflow and the template choice
    pub fn restart(&mut self) {
        self.workflow.reset_workflow();
        self.template = ReportTemplate::default();
        tracing::info!(session = %self.workflow.session_id(), "demo restarted");
    }

    /// Drive the session from its current step through Report.
    ///
    /// Loads the demo data first when nothing is loaded, runs each step's
    /// tasks, advances, and finally marks the demo complete.
    pub async fn run_walkthrough(&self) -> Result<WalkthroughReport, DemoError> {
        if !self.workflow.dataset_loaded() {
            self.load_demo_data().await?;
        }

        let mut outcomes = Vec::new();
        loop {
            let step = self.workflow.current_step();
            for task in ProcessingTask::for_step(step, self.template) {
                outcomes.push(self.run_task(task).await?);
            }
            if step == Step::Estimate {
                self.show_table(WALKTHROUGH_TABLE)?;
            }
            if step == Step::LAST {
                break;
            }
            self.workflow.advance_step()?;
        }

        let summary = self.complete()?;
        Ok(WalkthroughReport {
            outcomes,
            summary,
            quality_label: CLEANED_QUALITY_LABEL,
        })
    }
}

impl fmt::Debug for DemoSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DemoSession")
            .field("workflow", &self.workflow)
            .field("latency", &self.latency)
            .field("template", &self.template)
            .finish_non_exhaustive()
    }
}

async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
