use std::path::PathBuf;

use clap::{Arg, ArgAction, ArgMatches, Command, command, crate_authors, crate_description, crate_version};

use crate::config::{Defaults, ExclusionSet, Options, TransferMode, TypeFilter, expand_path};
use crate::constants::{
    CONFIG_HELP, DESTINATION_HELP, DRY_RUN_HELP, EXCLUDE_HELP, LOG_FILE_HELP, MOVE_HELP,
    SOURCE_HELP, TYPES_HELP, VERBOSE_HELP,
};
use crate::errors::{Result, generic_error};
use crate::logging::LogLevel;

/// Raw command-line input, before defaults and normalisation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Arguments {
    pub source: String,
    pub destination: String,
    pub move_files: bool,
    pub types: Vec<String>,
    pub exclude: Vec<String>,
    pub log_file: Option<String>,
    pub config: Option<String>,
    pub dry_run: bool,
    pub verbose: u8,
}

impl Arguments {
    /// Merges the arguments with the defaults file into run options
    ///
    /// Values given on the command line win. A non-empty `--types` or
    /// `--exclude` list replaces the list from the defaults file, and
    /// `--move` can only switch move mode on.
    pub fn into_options(self, defaults: Defaults) -> Options {
        let types = if self.types.is_empty() {
            defaults.types
        } else {
            self.types
        };
        let exclude = if self.exclude.is_empty() {
            defaults.exclude
        } else {
            self.exclude
        };
        let log_file = self
            .log_file
            .or(defaults.log)
            .map(|path| PathBuf::from(expand_path(&path)));

        Options::builder(expand_path(&self.source), expand_path(&self.destination))
            .mode(TransferMode::from_move_flag(
                self.move_files || defaults.move_files,
            ))
            .types(TypeFilter::new(types))
            .exclude(ExclusionSet::new(exclude))
            .log_file(log_file)
            .verbosity(LogLevel::from_occurrences(self.verbose))
            .dry_run(self.dry_run)
            .build()
    }
}

/// Defines the command-line interface
///
/// Defines the following arguments:
/// - `source`, `destination`: positional directories
/// - `move`: move instead of copy
/// - `types`: extensions to process
/// - `exclude`: folder names to skip
/// - `log`: log file
/// - `config`: defaults file
/// - `dry`: run without touching any files
/// - `verbose`: increase verbosity level
pub fn build_command() -> Command {
    let arg_source = Arg::new("source").required(true).help(SOURCE_HELP);

    let arg_destination = Arg::new("destination")
        .required(true)
        .help(DESTINATION_HELP);

    let arg_move = Arg::new("move")
        .short('m')
        .long("move")
        .help(MOVE_HELP)
        .action(ArgAction::SetTrue);

    let arg_types = Arg::new("types")
        .short('t')
        .long("types")
        .help(TYPES_HELP)
        .value_name("EXT")
        .num_args(0..)
        .action(ArgAction::Append);

    let arg_exclude = Arg::new("exclude")
        .short('e')
        .long("exclude")
        .help(EXCLUDE_HELP)
        .value_name("DIR")
        .num_args(0..)
        .action(ArgAction::Append);

    let arg_log = Arg::new("log")
        .short('l')
        .long("log")
        .help(LOG_FILE_HELP)
        .value_name("FILE");

    let arg_config = Arg::new("config")
        .short('c')
        .long("config")
        .help(CONFIG_HELP)
        .value_name("FILE");

    let arg_dry = Arg::new("dry")
        .short('n')
        .long("dry-run")
        .help(DRY_RUN_HELP)
        .action(ArgAction::SetTrue);

    // define arg for verbosity level
    let arg_verbose = Arg::new("verbose")
        .short('v')
        .long("verbose")
        .help(VERBOSE_HELP)
        .action(ArgAction::Count);

    command!()
        .name("fgather")
        .author(crate_authors!())
        .about(crate_description!())
        .version(crate_version!())
        .arg(arg_source)
        .arg(arg_destination)
        .arg(arg_move)
        .arg(arg_types)
        .arg(arg_exclude)
        .arg(arg_log)
        .arg(arg_config)
        .arg(arg_dry)
        .arg(arg_verbose)
}

/// Parses the process arguments, exiting with usage help on error
pub fn get_matches() -> ArgMatches {
    build_command().get_matches()
}

/// Extracts the raw arguments from parsed matches
///
/// # Errors
/// Returns an error if a required positional argument is absent
pub fn get_arguments(matches: &ArgMatches) -> Result<Arguments> {
    let source = matches
        .get_one::<String>("source")
        .cloned()
        .ok_or_else(|| generic_error("Source directory argument not found"))?;
    let destination = matches
        .get_one::<String>("destination")
        .cloned()
        .ok_or_else(|| generic_error("Destination directory argument not found"))?;

    Ok(Arguments {
        source,
        destination,
        move_files: matches.get_flag("move"),
        types: get_list(matches, "types"),
        exclude: get_list(matches, "exclude"),
        log_file: matches.get_one::<String>("log").cloned(),
        config: matches.get_one::<String>("config").cloned(),
        dry_run: matches.get_flag("dry"),
        verbose: matches.get_count("verbose"),
    })
}

fn get_list(matches: &ArgMatches, id: &str) -> Vec<String> {
    matches
        .get_many::<String>(id)
        .map(|values| values.cloned().collect())
        .unwrap_or_default()
}
