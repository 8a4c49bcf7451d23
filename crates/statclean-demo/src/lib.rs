//! StatClean guided demo
//!
//! Presentation-side collaborators of the workflow controller:
//! - Simulated processing tasks behind an async backend trait
//! - A demo session that drives the controller through all six steps
//! - A console renderer subscribed as a workflow observer
//! - TOML + environment configuration of simulated latency and gating
//! - The `statclean` command line

#![allow(missing_docs)]

pub mod cli;
pub mod config;
pub mod error;
pub mod processing;
pub mod render;
pub mod session;

pub use config::{DemoConfig, LatencyConfig};
pub use error::DemoError;
pub use processing::{
    ProcessingBackend, ProcessingTask, ReportFormat, ReportTemplate, SimulatedBackend, TaskOutcome,
};
pub use render::{badge_for, progress_percent, render_log, step_bar, ConsoleRenderer, StepBadge};
pub use session::{DemoSession, WalkthroughReport};
