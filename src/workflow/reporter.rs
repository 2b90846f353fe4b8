//! Run event reporting
//!
//! The engine describes what happens through [`Event`]s; a [`Reporter`]
//! turns them into output. [`LogReporter`] writes one log record per event
//! through an explicit `log::Log` handle.

use std::fmt;
use std::path::Path;

use log::{Level, Log, Record};

use crate::config::TransferMode;
use crate::constants::LOG_TARGET;
use crate::errors::Error;

use super::context::{ConsolidationReport, FileOutcome};

/// Something worth reporting during a run
#[derive(Debug)]
pub enum Event<'a> {
    /// The source directory does not exist; the run stops
    SourceMissing { source: &'a Path },
    /// Pre-flight succeeded and traversal is about to begin
    Started {
        mode: TransferMode,
        source: &'a Path,
        destination: &'a Path,
        dry_run: bool,
    },
    /// A file that passed the filters was handled
    FileHandled {
        mode: TransferMode,
        outcome: &'a FileOutcome,
        dry_run: bool,
    },
    /// A directory could not be read
    ScanFailed { error: &'a Error },
    /// Every file was visited
    Completed { report: &'a ConsolidationReport },
}

/// Receives run events in the order they occur
pub trait Reporter {
    fn report(&mut self, event: &Event<'_>);
}

/// Writes every event as a log record
pub struct LogReporter<'a> {
    logger: &'a dyn Log,
}

impl<'a> LogReporter<'a> {
    /// Reporter writing to the given logger
    pub fn new(logger: &'a dyn Log) -> Self {
        LogReporter { logger }
    }

    fn emit(&self, level: Level, args: fmt::Arguments<'_>) {
        self.logger.log(
            &Record::builder()
                .level(level)
                .target(LOG_TARGET)
                .args(args)
                .build(),
        );
    }
}

impl LogReporter<'static> {
    /// Reporter writing to the process-wide logger
    pub fn global() -> Self {
        LogReporter::new(log::logger())
    }
}

impl Reporter for LogReporter<'_> {
    fn report(&mut self, event: &Event<'_>) {
        match event {
            Event::SourceMissing { source } => self.emit(
                Level::Error,
                format_args!("Source directory '{}' does not exist.", source.display()),
            ),
            Event::Started {
                mode,
                source,
                destination,
                dry_run,
            } => {
                if *dry_run {
                    self.emit(
                        Level::Info,
                        format_args!("Starting a dry run of the {} process.", mode.verb()),
                    );
                } else {
                    self.emit(
                        Level::Info,
                        format_args!("Starting the {} process.", mode.verb()),
                    );
                }
                self.emit(Level::Info, format_args!("Source: {}", source.display()));
                self.emit(
                    Level::Info,
                    format_args!("Destination: {}", destination.display()),
                );
            }
            Event::FileHandled {
                mode,
                outcome,
                dry_run,
            } => match outcome {
                FileOutcome::Transferred {
                    source,
                    destination,
                } if *dry_run => self.emit(
                    Level::Info,
                    format_args!(
                        "Would {}: {} -> {}",
                        mode.verb(),
                        source.display(),
                        destination.display()
                    ),
                ),
                FileOutcome::Transferred {
                    source,
                    destination,
                } => self.emit(
                    Level::Info,
                    format_args!(
                        "{}: {} -> {}",
                        mode.past_tense(),
                        source.display(),
                        destination.display()
                    ),
                ),
                FileOutcome::Failed { source, error } => self.emit(
                    Level::Error,
                    format_args!("Error processing file {}: {}", source.display(), error),
                ),
            },
            Event::ScanFailed { error } => {
                self.emit(Level::Error, format_args!("Error scanning source: {error}"))
            }
            Event::Completed { report } => {
                self.emit(Level::Info, format_args!("Process complete."));
                self.emit(
                    Level::Debug,
                    format_args!(
                        "{} files transferred, {} failed, {} unreadable directories",
                        report.transferred(),
                        report.failed(),
                        report.scan_errors.len()
                    ),
                );
            }
        }
    }
}
