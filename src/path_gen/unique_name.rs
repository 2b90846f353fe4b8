//! Unique destination name resolution
//!
//! The check and the later write are separate filesystem calls, so a
//! concurrent writer could still take the name in between. Runs are
//! sequential, which makes this safe for a single process.

use std::collections::HashSet;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::constants::{EXTENSION_SEPARATOR, UNIQUE_SUFFIX_FORMAT};

/// Returns a path in `destination` for `file_name` that is not taken yet
///
/// The plain name is used when it is free. Otherwise the current local
/// time is inserted between stem and extension, e.g.
/// `photo_20240501134509.jpg`.
///
/// Paths in `planned` count as taken even if nothing exists there yet,
/// which lets a dry run hand out distinct names.
pub fn resolve_unique_destination(
    destination: &Path,
    file_name: &OsStr,
    planned: &HashSet<PathBuf>,
) -> PathBuf {
    resolve_unique_destination_at(destination, file_name, &Local::now(), planned)
}

/// Same as [`resolve_unique_destination`] with an explicit clock reading
///
/// When the timestamped name is taken as well, a counter is appended
/// after the timestamp (`photo_20240501134509_1.jpg`, `_2`, ...).
pub fn resolve_unique_destination_at(
    destination: &Path,
    file_name: &OsStr,
    now: &DateTime<Local>,
    planned: &HashSet<PathBuf>,
) -> PathBuf {
    let candidate = destination.join(file_name);
    if !is_taken(&candidate, planned) {
        return candidate;
    }

    let timestamp = now.format(UNIQUE_SUFFIX_FORMAT).to_string();
    let mut counter = 0;
    loop {
        let path = destination.join(suffixed_name(file_name, &timestamp, counter));
        if !is_taken(&path, planned) {
            return path;
        }
        counter += 1;
    }
}

/// Builds `stem_<timestamp>[_<counter>][.ext]`
fn suffixed_name(file_name: &OsStr, timestamp: &str, counter: usize) -> OsString {
    let path = Path::new(file_name);
    let mut name = path.file_stem().unwrap_or(file_name).to_os_string();

    name.push("_");
    name.push(timestamp);
    if counter > 0 {
        name.push(format!("_{counter}"));
    }
    if let Some(extension) = path.extension() {
        name.push(EXTENSION_SEPARATOR.to_string());
        name.push(extension);
    }
    name
}

// A dangling symlink still occupies the name.
fn is_taken(path: &Path, planned: &HashSet<PathBuf>) -> bool {
    planned.contains(path) || path.symlink_metadata().is_ok()
}
