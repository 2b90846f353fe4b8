//! Workflow module
//!
//! This module contains components for orchestrating a consolidation run.

mod context;
mod engine;
mod reporter;

pub use context::{ConsolidationReport, FileOutcome, RunState};
pub use engine::consolidate;
pub use reporter::{Event, LogReporter, Reporter};
