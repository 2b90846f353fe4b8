use std::process::ExitCode;

use anyhow::Result;
use human_panic::setup_panic;
use log::{debug, error};

use file_gather::prelude::*;

fn main() -> ExitCode {
    setup_panic!();

    let options = match resolve_options() {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_logger(options.verbosity, options.log_file.as_deref()) {
        eprintln!("Error: failed to set up logging: {e:#}");
        return ExitCode::FAILURE;
    }
    debug!("Resolved options: {options:?}");

    let result = consolidate(&options, &mut LogReporter::global());
    let code = match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    };
    log::logger().flush();
    code
}

/// Reads the command line and the defaults file into run options
fn resolve_options() -> Result<Options> {
    let arguments = get_arguments(&get_matches())?;
    let defaults = resolve_defaults(arguments.config.as_deref())?;
    Ok(arguments.into_options(defaults))
}
