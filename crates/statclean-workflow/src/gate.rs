//! Step completion gates
//!
//! A gate is asked before the controller advances. The default gate lets
//! every step through; stricter rules plug in here without touching the
//! state machine.

use crate::config::WorkflowConfig;
use crate::state::WorkflowState;
use crate::types::Step;

/// Per-step completion check consulted by `advance_step`
pub trait StepGate: Send + Sync {
    /// `Err(reason)` keeps the session on its current step.
    fn check(&self, state: &WorkflowState) -> Result<(), String>;

    /// Gate name for diagnostics
    fn name(&self) -> &'static str;
}

/// Always allows progression
#[derive(Debug, Clone, Copy, Default)]
pub struct PermissiveGate;

impl StepGate for PermissiveGate {
    fn check(&self, _state: &WorkflowState) -> Result<(), String> {
        Ok(())
    }

    fn name(&self) -> &'static str {
        "Permissive"
    }
}

/// Keeps the session on Upload until a dataset is loaded
#[derive(Debug, Clone, Copy, Default)]
pub struct DatasetRequiredGate;

impl StepGate for DatasetRequiredGate {
    fn check(&self, state: &WorkflowState) -> Result<(), String> {
        if state.current_step() == Step::Upload && !state.dataset_loaded() {
            return Err("load a dataset or the demo data first".to_string());
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "DatasetRequired"
    }
}

/// Gate selected by configuration
#[must_use]
pub fn gate_for(config: &WorkflowConfig) -> Box<dyn StepGate> {
    if config.strict_gating {
        Box::new(DatasetRequiredGate)
    } else {
        Box::new(PermissiveGate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::DatasetDescriptor;

    #[test]
    fn permissive_gate_never_blocks() {
        assert!(PermissiveGate.check(&WorkflowState::default()).is_ok());
    }

    #[test]
    fn dataset_gate_blocks_only_empty_upload() {
        let mut state = WorkflowState::default();
        assert!(DatasetRequiredGate.check(&state).is_err());

        state.dataset = Some(DatasetDescriptor::demo());
        assert!(DatasetRequiredGate.check(&state).is_ok());

        state.dataset = None;
        state.current_step = Step::Clean;
        assert!(DatasetRequiredGate.check(&state).is_ok());
    }

    #[test]
    fn config_selects_gate() {
        assert_eq!(gate_for(&WorkflowConfig::default()).name(), "Permissive");
        assert_eq!(
            gate_for(&WorkflowConfig::new().with_strict_gating(true)).name(),
            "DatasetRequired"
        );
    }
}
