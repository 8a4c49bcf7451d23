//! Simulated processing tasks
//!
//! Every task waits for its configured latency and then appends one canned
//! entry to the activity log. Nothing is computed; the figures come from the
//! workflow fixtures.

use crate::config::LatencyConfig;
use crate::error::DemoError;
use serde::{Deserialize, Serialize};
use statclean_workflow::fixtures::{CleaningResults, DATA_QUALITY_SCORE};
use statclean_workflow::{EntryId, Step, WorkflowHandle};
use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};

/// Output format for a generated report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Pdf,
    Excel,
    Csv,
    Html,
}

impl ReportFormat {
    pub const ALL: [ReportFormat; 4] = [Self::Pdf, Self::Excel, Self::Csv, Self::Html];

    /// Upper-case label used in log entries
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Pdf => "PDF",
            Self::Excel => "EXCEL",
            Self::Csv => "CSV",
            Self::Html => "HTML",
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ReportFormat {
    type Err = DemoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pdf" => Ok(Self::Pdf),
            "excel" | "xlsx" => Ok(Self::Excel),
            "csv" => Ok(Self::Csv),
            "html" => Ok(Self::Html),
            _ => Err(DemoError::InvalidValue {
                key: "report format".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Report layout offered at the Report step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportTemplate {
    #[default]
    ExecutiveSummary,
    TechnicalReport,
    PolicyBrief,
    StatisticalTables,
}

impl ReportTemplate {
    pub const ALL: [ReportTemplate; 4] = [
        Self::ExecutiveSummary,
        Self::TechnicalReport,
        Self::PolicyBrief,
        Self::StatisticalTables,
    ];

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::ExecutiveSummary => "Executive Summary",
            Self::TechnicalReport => "Technical Report",
            Self::PolicyBrief => "Policy Brief",
            Self::StatisticalTables => "Statistical Tables",
        }
    }
}

impl fmt::Display for ReportTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// A simulated unit of work triggered from the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "task", rename_all = "snake_case")]
pub enum ProcessingTask {
    Imputation,
    OutlierDetection,
    Validation,
    ApplyWeights,
    ReportPreview,
    GenerateReport {
        template: ReportTemplate,
        format: ReportFormat,
    },
    SaveProject,
    ExportResults,
}

impl ProcessingTask {
    /// Step whose screen offers this task
    #[must_use]
    pub fn step(&self) -> Step {
        match self {
            Self::Imputation | Self::OutlierDetection => Step::Clean,
            Self::Validation => Step::Validate,
            Self::ApplyWeights => Step::Weight,
            Self::ReportPreview
            | Self::GenerateReport { .. }
            | Self::SaveProject
            | Self::ExportResults => Step::Report,
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Imputation => "imputation",
            Self::OutlierDetection => "outlier_detection",
            Self::Validation => "validation",
            Self::ApplyWeights => "apply_weights",
            Self::ReportPreview => "report_preview",
            Self::GenerateReport { .. } => "generate_report",
            Self::SaveProject => "save_project",
            Self::ExportResults => "export_results",
        }
    }

    /// Action and details appended to the activity log on completion
    #[must_use]
    pub fn activity(&self) -> (String, String) {
        let cleaning = CleaningResults::default();
        let (action, details) = match self {
            Self::Imputation => (
                "Missing value imputation",
                format!(
                    "KNN method applied to {} missing values",
                    cleaning.missing_values
                ),
            ),
            Self::OutlierDetection => (
                "Outlier detection",
                format!(
                    "Z-Score method detected {} outlier in income column",
                    cleaning.outliers
                ),
            ),
            Self::Validation => (
                "Data validation",
                "All validation rules passed successfully".to_string(),
            ),
            Self::ApplyWeights => (
                "Survey weights",
                "Regional weights applied successfully".to_string(),
            ),
            Self::ReportPreview => ("Report preview", "Interactive preview generated".to_string()),
            Self::GenerateReport { template, format } => (
                "Report generation",
                format!("{template} report in {format} format"),
            ),
            Self::SaveProject => (
                "Project save",
                "All workflow data and settings saved".to_string(),
            ),
            Self::ExportResults => (
                "Results export",
                "Statistical results exported to CSV".to_string(),
            ),
        };
        (action.to_string(), details)
    }

    /// Message shown to the user once the task finishes
    #[must_use]
    pub fn success_message(&self) -> String {
        match self {
            Self::Imputation => format!(
                "Imputation completed! {} missing values filled using KNN.",
                CleaningResults::default().missing_values
            ),
            Self::OutlierDetection => {
                "Outlier detection completed! 1 outlier flagged in income data (ID: 6, $95,000)."
                    .to_string()
            }
            Self::Validation => format!(
                "Validation completed! All records pass consistency checks. Data quality: {DATA_QUALITY_SCORE}%"
            ),
            Self::ApplyWeights => {
                "Weights applied successfully! Population estimates updated with design effects."
                    .to_string()
            }
            Self::ReportPreview => "Report preview ready!".to_string(),
            Self::GenerateReport { template, .. } => {
                format!("{template} report generated successfully!")
            }
            Self::SaveProject => {
                "Project saved successfully! You can resume this analysis later.".to_string()
            }
            Self::ExportResults => {
                "Results exported! CSV file with estimates and confidence intervals ready."
                    .to_string()
            }
        }
    }

    #[must_use]
    pub fn latency(&self, latency: &LatencyConfig) -> Duration {
        let ms = match self {
            Self::Imputation => latency.imputation_ms,
            Self::OutlierDetection => latency.outlier_detection_ms,
            Self::Validation => latency.validation_ms,
            Self::ApplyWeights => latency.weights_ms,
            Self::ReportPreview => latency.report_preview_ms,
            Self::GenerateReport { .. } => latency.report_generation_ms,
            Self::SaveProject => latency.save_ms,
            Self::ExportResults => latency.export_ms,
        };
        Duration::from_millis(ms)
    }

    /// Tasks the guided walkthrough runs on `step`, in order
    #[must_use]
    pub fn for_step(step: Step, template: ReportTemplate) -> Vec<ProcessingTask> {
        match step {
            Step::Upload | Step::Estimate => Vec::new(),
            Step::Clean => vec![Self::Imputation, Self::OutlierDetection],
            Step::Validate => vec![Self::Validation],
            Step::Weight => vec![Self::ApplyWeights],
            Step::Report => vec![
                Self::ReportPreview,
                Self::GenerateReport {
                    template,
                    format: ReportFormat::Pdf,
                },
                Self::SaveProject,
                Self::ExportResults,
            ],
        }
    }
}

impl fmt::Display for ProcessingTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of a finished task
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskOutcome {
    pub task: ProcessingTask,
    pub entry_id: EntryId,
    pub message: String,
    pub elapsed_ms: u64,
}

/// Runs processing tasks against a workflow session
///
/// Implementations must log through the handle; they never touch workflow
/// state directly.
#[async_trait::async_trait]
pub trait ProcessingBackend: Send + Sync {
    async fn run(
        &self,
        task: ProcessingTask,
        workflow: &WorkflowHandle,
    ) -> Result<TaskOutcome, DemoError>;
}

/// Backend that sleeps for the configured latency, then logs the canned result
#[derive(Debug, Clone, Default)]
pub struct SimulatedBackend {
    latency: LatencyConfig,
}

impl SimulatedBackend {
    #[must_use]
    pub fn new(latency: LatencyConfig) -> Self {
        Self { latency }
    }

    #[must_use]
    pub fn latency(&self) -> &LatencyConfig {
        &self.latency
    }
}

#[async_trait::async_trait]
impl ProcessingBackend for SimulatedBackend {
    async fn run(
        &self,
        task: ProcessingTask,
        workflow: &WorkflowHandle,
    ) -> Result<TaskOutcome, DemoError> {
        let delay = task.latency(&self.latency);
        tracing::info!(task = %task, delay_ms = delay.as_millis(), "task started");

        let started = Instant::now();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let (action, details) = task.activity();
        let entry_id = workflow.record_activity(action, details)?;
        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        tracing::info!(task = %task, elapsed_ms, "task finished");
        Ok(TaskOutcome {
            task,
            entry_id,
            message: task.success_message(),
            elapsed_ms,
        })
    }
}
