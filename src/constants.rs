/// Constants used throughout the application
///
/// This module centralises all constants used in the application to make
/// them easier to manage and update.

/// Qualifier string used for application identification
pub const QUALIFIER: &str = "com";

/// Organisation name used for application identification
pub const ORGANIZATION: &str = "Ondřej Vágner";

/// Application name used for identification
///
/// This is used to locate the platform configuration directory.
pub const APPLICATION: &str = "file_gather";

/// Name of the defaults file looked up in the configuration directory
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";

/// Format of the timestamp inserted into colliding file names
pub const UNIQUE_SUFFIX_FORMAT: &str = "%Y%m%d%H%M%S";

/// Format of the timestamp at the start of every log line
pub const LOG_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

/// Separator expected at the start of every extension in the type filter
pub const EXTENSION_SEPARATOR: char = '.';

/// Log target used by the consolidation reporter
pub const LOG_TARGET: &str = "file_gather";

/// Help text for the source positional argument
pub const SOURCE_HELP: &str = "Directory to scan for files";

/// Help text for the destination positional argument
pub const DESTINATION_HELP: &str = "Directory that receives the gathered files";

/// Help text for the move flag
pub const MOVE_HELP: &str = "Move the files instead of copying them";

/// Help text for the types option
pub const TYPES_HELP: &str = "File extensions to process (e.g. jpg .pdf)";

/// Help text for the exclude option
pub const EXCLUDE_HELP: &str = "Folder names to skip anywhere in the tree";

/// Help text for the log option
pub const LOG_FILE_HELP: &str = "Append log records to this file instead of the console";

/// Help text for the config option
pub const CONFIG_HELP: &str = "Read default options from a specific YAML file";

/// Help text for the dry-run flag
pub const DRY_RUN_HELP: &str = "Run without copying or moving any files";

/// Help text for the verbose command-line option
pub const VERBOSE_HELP: &str = "Increase verbosity level (can be used multiple times)";
