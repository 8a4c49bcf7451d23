//! Error types for the workflow controller
//!
//! Every error here is local and recoverable: the caller shows a message and
//! the controller state is left exactly as it was before the call.

use crate::types::Step;

/// Main workflow error type
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorkflowError {
    /// Uploaded file extension is not in the allow-list
    #[error("unsupported file format: {file_name} (expected .csv, .xlsx or .xls)")]
    UnsupportedFormat {
        /// Name of the rejected file
        file_name: String,
    },

    /// Requested step jump is not reachable from the current step
    #[error("invalid transition: step {from} -> step {to}")]
    InvalidTransition {
        /// Step number at the time of the request
        from: u8,
        /// Requested target (may lie outside 1..=6)
        to: u8,
    },

    /// Activity recorded without an action label
    #[error("activity action must not be empty")]
    EmptyAction,

    /// The configured step gate refused to advance
    #[error("step {step} is not complete: {reason}")]
    StepIncomplete {
        /// Step that could not be left
        step: Step,
        /// Gate explanation
        reason: String,
    },
}

impl WorkflowError {
    /// All workflow errors leave state untouched and can be retried by the user.
    #[inline]
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::UnsupportedFormat { .. }
            | Self::InvalidTransition { .. }
            | Self::EmptyAction
            | Self::StepIncomplete { .. } => true,
        }
    }

    /// Errors caused by caller-supplied input rather than workflow progress
    #[inline]
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedFormat { .. } | Self::InvalidTransition { .. } | Self::EmptyAction
        )
    }

    /// Convenience constructor for a rejected jump
    #[inline]
    #[must_use]
    pub fn invalid_transition(from: Step, to: u8) -> Self {
        Self::InvalidTransition {
            from: from.number(),
            to,
        }
    }
}

/// Activity trail integrity errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LogIntegrityError {
    /// An entry does not point at its predecessor's hash
    #[error("broken chain at entry {seq}")]
    BrokenChain {
        /// Sequence number of the offending entry
        seq: u64,
    },

    /// An entry's stored hash does not match its content
    #[error("hash mismatch at entry {seq}")]
    HashMismatch {
        /// Sequence number of the offending entry
        seq: u64,
    },

    /// Sequence numbers are not contiguous
    #[error("sequence gap: expected {expected}, found {found}")]
    SequenceGap {
        /// Expected sequence number
        expected: u64,
        /// Sequence number found in the trail
        found: u64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = WorkflowError::UnsupportedFormat {
            file_name: "notes.txt".to_string(),
        };
        assert!(err.to_string().contains("notes.txt"));

        let err = WorkflowError::invalid_transition(Step::Clean, 5);
        assert_eq!(err.to_string(), "invalid transition: step 2 -> step 5");
    }

    #[test]
    fn every_workflow_error_is_recoverable() {
        let errors = [
            WorkflowError::UnsupportedFormat {
                file_name: "a.pdf".into(),
            },
            WorkflowError::invalid_transition(Step::Upload, 3),
            WorkflowError::EmptyAction,
            WorkflowError::StepIncomplete {
                step: Step::Upload,
                reason: "no dataset".into(),
            },
        ];
        assert!(errors.iter().all(WorkflowError::is_recoverable));
    }

    #[test]
    fn gate_refusal_is_not_an_input_error() {
        let err = WorkflowError::StepIncomplete {
            step: Step::Upload,
            reason: "no dataset".into(),
        };
        assert!(!err.is_input_error());
        assert!(WorkflowError::EmptyAction.is_input_error());
    }
}
