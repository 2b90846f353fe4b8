//! Gathers the files of a directory tree into a single folder.
//!
//! Files are copied or moved into a flat destination directory, optionally
//! restricted to some extensions and skipping named folders anywhere in the
//! tree. A file whose name is already taken in the destination gets a
//! timestamp inserted before its extension. Every action and error is
//! reported as a log record.
//!
//! ```no_run
//! use file_gather::prelude::*;
//!
//! let options = Options::builder("Downloads", "Gathered")
//!     .types(TypeFilter::new(["jpg", "png"]))
//!     .exclude(ExclusionSet::new([".cache"]))
//!     .build();
//! let report = consolidate(&options, &mut LogReporter::global())?;
//! println!("{} files gathered", report.transferred());
//! # Ok::<(), file_gather::Error>(())
//! ```

pub use errors::*;

pub mod cli;
pub mod config;
mod constants;
pub mod discovery;
mod errors;
pub mod file_ops;
pub mod logging;
pub mod path_gen;
pub mod workflow;

pub mod prelude {
    pub use crate::cli::{Arguments, build_command, get_arguments, get_matches};
    pub use crate::config::{
        Defaults, ExclusionSet, Options, TransferMode, TypeFilter, resolve_defaults,
    };
    pub use crate::errors::{
        Error, Result, config_parsing_error, file_operation_error, generic_error,
        path_operation_error,
    };
    pub use crate::logging::{LogLevel, init_logger};
    pub use crate::workflow::{
        ConsolidationReport, Event, FileOutcome, LogReporter, Reporter, RunState, consolidate,
    };
}
