//! Option data structures
//!
//! This module contains the resolved options of a single run and the
//! normalised filters derived from raw user input.

use std::collections::HashSet;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use crate::constants::EXTENSION_SEPARATOR;
use crate::logging::LogLevel;

/// How files are placed into the destination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransferMode {
    /// Duplicate the file, leaving the source untouched
    #[default]
    Copy,
    /// Relocate the file, removing it from the source tree
    Move,
}

impl TransferMode {
    /// Picks the mode from the value of the move flag
    pub fn from_move_flag(is_move: bool) -> Self {
        if is_move {
            TransferMode::Move
        } else {
            TransferMode::Copy
        }
    }

    /// Lowercase verb used when announcing the run
    pub fn verb(&self) -> &'static str {
        match self {
            TransferMode::Copy => "copy",
            TransferMode::Move => "move",
        }
    }

    /// Past tense used in per-file success records
    pub fn past_tense(&self) -> &'static str {
        match self {
            TransferMode::Copy => "Copied",
            TransferMode::Move => "Moved",
        }
    }
}

/// Normalises an extension token to lowercase with a leading separator
///
/// `jpg`, `JPG` and `.jpg` all become `.jpg`.
pub fn normalize_extension(token: &str) -> String {
    let lowered = token.to_lowercase();
    if lowered.starts_with(EXTENSION_SEPARATOR) {
        lowered
    } else {
        format!("{EXTENSION_SEPARATOR}{lowered}")
    }
}

/// Extension allow-list
///
/// An empty filter lets every file through.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeFilter {
    extensions: Option<HashSet<String>>,
}

impl TypeFilter {
    /// Builds a filter from raw extension tokens
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let extensions: HashSet<String> = tokens
            .into_iter()
            .map(|token| normalize_extension(token.as_ref()))
            .collect();

        TypeFilter {
            extensions: (!extensions.is_empty()).then_some(extensions),
        }
    }

    /// Whether any extension restriction is in place
    pub fn is_active(&self) -> bool {
        self.extensions.is_some()
    }

    /// The normalised extensions, if the filter is active
    pub fn extensions(&self) -> Option<&HashSet<String>> {
        self.extensions.as_ref()
    }

    /// Checks a file path against the filter, ignoring case
    pub fn accepts(&self, path: &Path) -> bool {
        let Some(extensions) = &self.extensions else {
            return true;
        };

        path.extension()
            .and_then(OsStr::to_str)
            .filter(|ext| !ext.is_empty())
            .map(normalize_extension)
            .is_some_and(|ext| extensions.contains(&ext))
    }
}

/// Directory names pruned from traversal at every depth
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    names: HashSet<String>,
}

impl ExclusionSet {
    /// Builds the set from raw directory names
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ExclusionSet {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Whether a directory with this base name must be skipped
    pub fn excludes(&self, name: &OsStr) -> bool {
        name.to_str().is_some_and(|name| self.names.contains(name))
    }
}

/// Fully resolved options for one consolidation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Directory tree to scan
    pub source: PathBuf,
    /// Flat directory receiving the files
    pub destination: PathBuf,
    /// Copy or move
    pub mode: TransferMode,
    /// Extension allow-list
    pub types: TypeFilter,
    /// Pruned directory names
    pub exclude: ExclusionSet,
    /// Log file; the console is used when absent
    pub log_file: Option<PathBuf>,
    /// Log verbosity
    pub verbosity: LogLevel,
    /// Only report planned transfers
    pub dry_run: bool,
}

impl Options {
    /// Creates a new OptionsBuilder for the given source and destination
    pub fn builder(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> OptionsBuilder {
        OptionsBuilder::new(source, destination)
    }
}

/// Builder for creating Options instances
#[derive(Debug, Clone)]
pub struct OptionsBuilder {
    options: Options,
}

impl OptionsBuilder {
    /// Creates a builder that copies every file and logs to the console
    pub fn new(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        OptionsBuilder {
            options: Options {
                source: source.into(),
                destination: destination.into(),
                mode: TransferMode::Copy,
                types: TypeFilter::default(),
                exclude: ExclusionSet::default(),
                log_file: None,
                verbosity: LogLevel::Info,
                dry_run: false,
            },
        }
    }

    pub fn mode(mut self, mode: TransferMode) -> Self {
        self.options.mode = mode;
        self
    }

    pub fn types(mut self, types: TypeFilter) -> Self {
        self.options.types = types;
        self
    }

    pub fn exclude(mut self, exclude: ExclusionSet) -> Self {
        self.options.exclude = exclude;
        self
    }

    pub fn log_file(mut self, log_file: Option<PathBuf>) -> Self {
        self.options.log_file = log_file;
        self
    }

    pub fn verbosity(mut self, verbosity: LogLevel) -> Self {
        self.options.verbosity = verbosity;
        self
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.options.dry_run = dry_run;
        self
    }

    pub fn build(self) -> Options {
        self.options
    }
}
