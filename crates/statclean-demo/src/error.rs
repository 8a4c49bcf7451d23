//! Error types for the demo front end

use statclean_workflow::WorkflowError;
use std::path::PathBuf;

/// Main demo error type
#[derive(Debug, thiserror::Error)]
pub enum DemoError {
    /// Rejected by the workflow controller
    #[error("workflow error: {0}")]
    Workflow(#[from] WorkflowError),

    /// Config file could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for `DemoConfig`
    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),

    /// An override carried a value that could not be parsed
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },
}

impl DemoError {
    /// Errors the user can fix and retry without restarting
    #[inline]
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Workflow(err) => err.is_recoverable(),
            Self::Io { .. } | Self::Toml(_) | Self::InvalidValue { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workflow_errors_stay_recoverable() {
        let err = DemoError::from(WorkflowError::EmptyAction);
        assert!(err.is_recoverable());
        assert!(err.to_string().contains("activity action must not be empty"));
    }

    #[test]
    fn invalid_value_display() {
        let err = DemoError::InvalidValue {
            key: "STATCLEAN_LATENCY_SCALE".into(),
            value: "fast".into(),
        };
        assert!(!err.is_recoverable());
        assert_eq!(
            err.to_string(),
            "invalid value for STATCLEAN_LATENCY_SCALE: \"fast\""
        );
    }
}
