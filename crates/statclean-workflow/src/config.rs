//! Workflow configuration

use serde::{Deserialize, Serialize};

/// Controller configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    /// Refuse to leave the upload step until a dataset is loaded
    pub strict_gating: bool,
}

impl WorkflowConfig {
    /// Create default configuration (permissive gating)
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With strict gating
    #[inline]
    #[must_use]
    pub fn with_strict_gating(mut self, strict: bool) -> Self {
        self.strict_gating = strict;
        self
    }
}
