//! Workflow engine
//!
//! This module contains the engine that gathers the files of a source tree
//! into the destination directory.

use std::collections::HashSet;
use std::fs::create_dir_all;
use std::path::PathBuf;

use log::debug;

use crate::config::Options;
use crate::discovery::{FileEntry, scan_tree};
use crate::errors::{Result, file_operation_error};
use crate::file_ops::transfer_file;
use crate::path_gen::resolve_unique_destination;

use super::context::{ConsolidationReport, FileOutcome, RunState};
use super::reporter::{Event, Reporter};

/// Gathers every matching file below `options.source` into
/// `options.destination`
///
/// This function orchestrates the workflow steps:
/// 1. Check that the source directory exists, stopping the run if not
/// 2. Create the destination directory and its parents
/// 3. Walk the source tree, pruning excluded directories
/// 4. Pick a free destination name for each matching file
/// 5. Copy or move the file, recording the outcome
///
/// A failed transfer is reported and the run continues with the next file.
/// A missing source ends the run in [`RunState::Aborted`] without touching
/// the destination.
///
/// # Errors
/// Returns an error only if the destination directory cannot be created
pub fn consolidate(
    options: &Options,
    reporter: &mut dyn Reporter,
) -> Result<ConsolidationReport> {
    let mut report = ConsolidationReport::new(options.dry_run);

    report.state = RunState::ValidatingSource;
    if !options.source.is_dir() {
        reporter.report(&Event::SourceMissing {
            source: &options.source,
        });
        report.state = RunState::Aborted;
        return Ok(report);
    }

    report.state = RunState::PreparingDestination;
    if !options.dry_run {
        create_dir_all(&options.destination).map_err(|e| {
            file_operation_error(e, options.destination.clone(), "create directory")
        })?;
    }
    reporter.report(&Event::Started {
        mode: options.mode,
        source: &options.source,
        destination: &options.destination,
        dry_run: options.dry_run,
    });

    report.state = RunState::Traversing;
    let mut planned = HashSet::new();
    let entries = scan_tree(
        &options.source,
        &options.exclude,
        &options.types,
        Some(options.destination.as_path()),
    );
    for entry in entries {
        match entry {
            Ok(entry) => {
                let outcome = handle_entry(&entry, options, &mut planned);
                reporter.report(&Event::FileHandled {
                    mode: options.mode,
                    outcome: &outcome,
                    dry_run: options.dry_run,
                });
                report.outcomes.push(outcome);
            }
            Err(error) => {
                reporter.report(&Event::ScanFailed { error: &error });
                report.scan_errors.push(error);
            }
        }
    }

    report.state = RunState::Completed;
    reporter.report(&Event::Completed { report: &report });

    Ok(report)
}

// A dry run writes nothing, so its names are remembered in `planned`.
fn handle_entry(
    entry: &FileEntry,
    options: &Options,
    planned: &mut HashSet<PathBuf>,
) -> FileOutcome {
    let destination = resolve_unique_destination(&options.destination, &entry.file_name, planned);
    debug!(
        "Resolved destination for {}: {}",
        entry.path.display(),
        destination.display()
    );

    if options.dry_run {
        planned.insert(destination.clone());
        return FileOutcome::Transferred {
            source: entry.path.clone(),
            destination,
        };
    }

    match transfer_file(&entry.path, &destination, options.mode) {
        Ok(()) => FileOutcome::Transferred {
            source: entry.path.clone(),
            destination,
        },
        Err(error) => FileOutcome::Failed {
            source: entry.path.clone(),
            error,
        },
    }
}
