//! StatClean workflow controller
//!
//! Drives a guided six-step survey workflow
//! (Upload → Clean → Validate → Weight → Estimate → Report):
//! - Enforces the step sequence and bounded jumps
//! - Keeps an append-only, hash-chained activity trail
//! - Tracks whether a dataset has been loaded
//! - Notifies presentation code after every state change
//!
//! # Example
//!
//! ```rust
//! use statclean_workflow::{DatasetDescriptor, DatasetSource, Step, WorkflowController};
//!
//! let mut controller = WorkflowController::new();
//! controller.load_dataset(DatasetSource::Demo, DatasetDescriptor::demo()).unwrap();
//! controller.advance_step().unwrap();
//!
//! assert_eq!(controller.current_step(), Step::Clean);
//! assert_eq!(controller.activity_log().len(), 2);
//! assert!(controller.jump_to_step(5).is_err());
//! ```

#![allow(missing_docs)]

pub mod activity;
pub mod config;
pub mod controller;
pub mod dataset;
pub mod error;
pub mod fixtures;
pub mod gate;
pub mod handle;
pub mod observer;
pub mod state;
pub mod state_machine;
pub mod summary;
pub mod types;

pub use activity::{ActivityEntry, ActivityLog};
pub use config::WorkflowConfig;
pub use controller::WorkflowController;
pub use dataset::{Dataset, DatasetDescriptor, DatasetSource, FileFormat, SurveyRecord};
pub use error::{LogIntegrityError, WorkflowError};
pub use gate::{DatasetRequiredGate, PermissiveGate, StepGate};
pub use handle::WorkflowHandle;
pub use observer::WorkflowObserver;
pub use state::{TransitionReceipt, WorkflowSnapshot, WorkflowState};
pub use summary::{FeatureUsage, WorkflowSummary};
pub use types::{EntryId, SessionId, Step};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for driving a workflow session
    pub use crate::{
        DatasetDescriptor, DatasetSource, Step, WorkflowController, WorkflowError, WorkflowHandle,
        WorkflowObserver, WorkflowSnapshot,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
