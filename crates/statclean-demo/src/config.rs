//! Demo configuration
//!
//! Defaults match the pacing of the original guided demo. A TOML file may
//! override any key, and `STATCLEAN_*` environment variables are applied last.

use crate::error::DemoError;
use serde::{Deserialize, Serialize};
use statclean_workflow::WorkflowConfig;
use std::path::Path;
use std::time::Duration;

/// Environment variable toggling strict step gating
pub const ENV_STRICT_GATING: &str = "STATCLEAN_STRICT_GATING";

/// Environment variable scaling every simulated delay
pub const ENV_LATENCY_SCALE: &str = "STATCLEAN_LATENCY_SCALE";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub workflow: WorkflowConfig,
    pub latency: LatencyConfig,
}

/// Simulated processing delay per task, in milliseconds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatencyConfig {
    pub upload_ms: u64,
    pub demo_load_ms: u64,
    pub imputation_ms: u64,
    pub outlier_detection_ms: u64,
    pub validation_ms: u64,
    pub weights_ms: u64,
    pub report_preview_ms: u64,
    pub report_generation_ms: u64,
    pub save_ms: u64,
    pub export_ms: u64,
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            upload_ms: 1500,
            demo_load_ms: 1200,
            imputation_ms: 2000,
            outlier_detection_ms: 1800,
            validation_ms: 1500,
            weights_ms: 1600,
            report_preview_ms: 2000,
            report_generation_ms: 2500,
            save_ms: 1500,
            export_ms: 1800,
        }
    }
}

impl LatencyConfig {
    /// Every delay set to zero
    #[must_use]
    pub fn instant() -> Self {
        Self::default().scaled(0.0)
    }

    /// Multiply every delay by `factor` (negative factors clamp to zero)
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn scaled(&self, factor: f64) -> Self {
        let factor = factor.max(0.0);
        let scale = |ms: u64| (ms as f64 * factor).round() as u64;
        Self {
            upload_ms: scale(self.upload_ms),
            demo_load_ms: scale(self.demo_load_ms),
            imputation_ms: scale(self.imputation_ms),
            outlier_detection_ms: scale(self.outlier_detection_ms),
            validation_ms: scale(self.validation_ms),
            weights_ms: scale(self.weights_ms),
            report_preview_ms: scale(self.report_preview_ms),
            report_generation_ms: scale(self.report_generation_ms),
            save_ms: scale(self.save_ms),
            export_ms: scale(self.export_ms),
        }
    }

    #[must_use]
    pub fn upload(&self) -> Duration {
        Duration::from_millis(self.upload_ms)
    }

    #[must_use]
    pub fn demo_load(&self) -> Duration {
        Duration::from_millis(self.demo_load_ms)
    }

    /// Sum of all task delays
    #[must_use]
    pub fn total(&self) -> Duration {
        Duration::from_millis(
            self.upload_ms
                + self.demo_load_ms
                + self.imputation_ms
                + self.outlier_detection_ms
                + self.validation_ms
                + self.weights_ms
                + self.report_preview_ms
                + self.report_generation_ms
                + self.save_ms
                + self.export_ms,
        )
    }
}

impl DemoConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With latency profile
    #[inline]
    #[must_use]
    pub fn with_latency(mut self, latency: LatencyConfig) -> Self {
        self.latency = latency;
        self
    }

    /// With workflow configuration
    #[inline]
    #[must_use]
    pub fn with_workflow(mut self, workflow: WorkflowConfig) -> Self {
        self.workflow = workflow;
        self
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, DemoError> {
        Ok(toml::from_str(raw)?)
    }

    /// Read a config file, then apply environment overrides.
    ///
    /// # Errors
    /// `DemoError::Io` when the file cannot be read, `DemoError::Toml` when
    /// it does not parse, `DemoError::InvalidValue` for a bad override.
    pub fn load(path: Option<&Path>) -> Result<Self, DemoError> {
        let mut config = match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path).map_err(|source| DemoError::Io {
                    path: path.to_path_buf(),
                    source,
                })?;
                Self::from_toml_str(&raw)?
            }
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply `STATCLEAN_*` overrides from any key lookup.
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), DemoError> {
        if let Some(raw) = lookup(ENV_STRICT_GATING) {
            self.workflow.strict_gating = parse_flag(ENV_STRICT_GATING, &raw)?;
        }
        if let Some(raw) = lookup(ENV_LATENCY_SCALE) {
            let factor = raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|f| f.is_finite() && *f >= 0.0)
                .ok_or_else(|| invalid(ENV_LATENCY_SCALE, &raw))?;
            self.latency = self.latency.scaled(factor);
        }
        Ok(())
    }
}

fn parse_flag(key: &str, raw: &str) -> Result<bool, DemoError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(invalid(key, raw)),
    }
}

fn invalid(key: &str, raw: &str) -> DemoError {
    DemoError::InvalidValue {
        key: key.to_string(),
        value: raw.to_string(),
    }
}
