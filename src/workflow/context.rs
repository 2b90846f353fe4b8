//! Run state and per-file outcomes
//!
//! This module defines what a consolidation run produces.

use std::path::{Path, PathBuf};

use crate::errors::Error;

/// Stage of a consolidation run
///
/// `NotStarted → ValidatingSource → (Aborted | PreparingDestination) →
/// Traversing → Completed`. `Aborted` is only reached when the source
/// directory is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    NotStarted,
    ValidatingSource,
    Aborted,
    PreparingDestination,
    Traversing,
    Completed,
}

/// Result of handling one file that passed the filters
#[derive(Debug)]
pub enum FileOutcome {
    /// The file was copied or moved (or would be, in a dry run)
    Transferred {
        source: PathBuf,
        destination: PathBuf,
    },
    /// The transfer failed; the run carried on
    Failed { source: PathBuf, error: Error },
}

impl FileOutcome {
    /// Path of the file in the source tree
    pub fn source(&self) -> &Path {
        match self {
            FileOutcome::Transferred { source, .. } | FileOutcome::Failed { source, .. } => source,
        }
    }

    /// Final destination path, if the transfer succeeded
    pub fn destination(&self) -> Option<&Path> {
        match self {
            FileOutcome::Transferred { destination, .. } => Some(destination),
            FileOutcome::Failed { .. } => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, FileOutcome::Transferred { .. })
    }
}

/// Everything a run did, in the order it happened
#[derive(Debug, Default)]
pub struct ConsolidationReport {
    /// Stage the run ended in
    pub state: RunState,
    /// One entry per file that passed the filters
    pub outcomes: Vec<FileOutcome>,
    /// Directories that could not be read during traversal
    pub scan_errors: Vec<Error>,
    /// Whether nothing was written to disk
    pub dry_run: bool,
}

impl ConsolidationReport {
    /// Creates an empty report for a run that has not started
    pub fn new(dry_run: bool) -> Self {
        ConsolidationReport {
            dry_run,
            ..Default::default()
        }
    }

    /// Number of files copied or moved
    pub fn transferred(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    /// Number of files whose transfer failed
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.transferred()
    }

    /// Destination paths of the successful transfers
    pub fn destinations(&self) -> impl Iterator<Item = &Path> {
        self.outcomes.iter().filter_map(FileOutcome::destination)
    }
}
