use std::fmt::Display;
use std::path::Path;

use anyhow::Result;
use chrono::{DateTime, Local};
use fern::Dispatch;
use fern::colors::{Color, ColoredLevelConfig};
use log::{Level, LevelFilter};

use crate::constants::LOG_TIMESTAMP_FORMAT;

/// Verbosity level for logging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Error messages only
    Error,
    /// Warning and error messages
    Warning,
    /// Info, warning, and error messages (default)
    #[default]
    Info,
    /// Debug, info, warning, and error messages
    Debug,
    /// Trace, debug, info, warning, and error messages
    Trace,
}

impl LogLevel {
    /// Convert verbosity level to log::LevelFilter
    pub fn to_level_filter(&self) -> LevelFilter {
        match self {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warning => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }

    /// Get the verbosity level from the number of occurrences of a flag
    pub fn from_occurrences(occurrences: u8) -> Self {
        match occurrences {
            0 => LogLevel::Info,  // Default
            1 => LogLevel::Debug, // -v
            _ => LogLevel::Trace, // -vv or more
        }
    }
}

/// Name printed for a level in every log line
pub fn level_name(level: Level) -> &'static str {
    match level {
        Level::Error => "ERROR",
        Level::Warn => "WARNING",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    }
}

/// Formats one log line as `<timestamp> - <LEVEL> - <message>`
///
/// The timestamp has millisecond resolution, e.g. `2024-05-01 13:45:09,042`.
pub fn format_line(timestamp: &DateTime<Local>, level: Level, message: impl Display) -> String {
    format!(
        "{} - {} - {}",
        timestamp.format(LOG_TIMESTAMP_FORMAT),
        level_name(level),
        message
    )
}

/// Builds the dispatch for a single run
///
/// With a log file, records are appended to it and nothing is printed.
/// Without one, records go to stdout, coloured by level when stdout is a
/// terminal.
///
/// # Errors
/// Returns an error if the log file cannot be opened for appending
pub fn build_dispatch(verbosity: LogLevel, log_file: Option<&Path>) -> Result<Dispatch> {
    let base_logger = Dispatch::new().level(verbosity.to_level_filter());

    match log_file {
        Some(path) => {
            let file_logger = Dispatch::new()
                .format(|out, message, record| {
                    out.finish(format_args!(
                        "{}",
                        format_line(&Local::now(), record.level(), message)
                    ))
                })
                .chain(fern::log_file(path)?);
            Ok(base_logger.chain(file_logger))
        }
        None if atty::is(atty::Stream::Stdout) => {
            let colors_line = ColoredLevelConfig::new()
                .error(Color::Red)
                .warn(Color::Yellow)
                .info(Color::White)
                .debug(Color::White)
                .trace(Color::BrightBlack);

            let output_logger = Dispatch::new()
                .format(move |out, message, record| {
                    out.finish(format_args!(
                        "\x1B[{}m{}\x1B[0m",
                        colors_line.get_color(&record.level()).to_fg_str(),
                        format_line(&Local::now(), record.level(), message)
                    ))
                })
                .chain(std::io::stdout());
            Ok(base_logger.chain(output_logger))
        }
        None => {
            let output_logger = Dispatch::new()
                .format(|out, message, record| {
                    out.finish(format_args!(
                        "{}",
                        format_line(&Local::now(), record.level(), message)
                    ))
                })
                .chain(std::io::stdout());
            Ok(base_logger.chain(output_logger))
        }
    }
}

/// Initialise the process-wide logger
///
/// # Errors
/// Returns an error if the log file cannot be opened or a logger is
/// already installed
pub fn init_logger(verbosity: LogLevel, log_file: Option<&Path>) -> Result<()> {
    build_dispatch(verbosity, log_file)?.apply()?;

    log::debug!("Logger initialized with verbosity level: {verbosity:?}");

    Ok(())
}
