//! File operation functionality
//!
//! This module contains functions for copying and moving a single file into
//! the destination while keeping its metadata.

use std::fs::{self, Metadata};
use std::io;
use std::path::Path;

use filetime::{FileTime, set_file_times};
use fs_extra::file::{CopyOptions, copy, move_file};
use log::trace;

use crate::config::TransferMode;
use crate::errors::{Result, file_operation_error};

/// Copies or moves `source` to `target`
///
/// The target must not exist yet; an occupied target is reported as an
/// error rather than overwritten. Permission bits and access/modification
/// times of the source are applied to the target. A move is a rename when
/// source and target share a filesystem; across filesystems it falls back
/// to a copy followed by removal of the source.
///
/// # Errors
/// Returns an error naming the source if it cannot be read, or if the
/// copy, move or metadata update fails
pub fn transfer_file(source: &Path, target: &Path, mode: TransferMode) -> Result<()> {
    let metadata = fs::metadata(source)
        .map_err(|e| file_operation_error(e, source.to_path_buf(), "read metadata of"))?;
    let options = CopyOptions::new();

    match mode {
        TransferMode::Copy => {
            trace!("Copying file: {} -> {}", source.display(), target.display());
            copy(source, target, &options).map_err(|e| {
                file_operation_error(io::Error::other(e), source.to_path_buf(), "copy")
            })?;
        }
        TransferMode::Move => {
            trace!("Moving file: {} -> {}", source.display(), target.display());
            move_or_rename(source, target, &options)?;
        }
    }

    preserve_metadata(&metadata, target)
}

fn move_or_rename(source: &Path, target: &Path, options: &CopyOptions) -> Result<()> {
    // rename replaces an existing target, so check first.
    if target.symlink_metadata().is_ok() {
        let error = io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{} already exists", target.display()),
        );
        return Err(file_operation_error(error, source.to_path_buf(), "move"));
    }

    match fs::rename(source, target) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
            trace!("Rename crosses devices, copying instead: {}", source.display());
            move_file(source, target, options).map(|_| ()).map_err(|e| {
                file_operation_error(io::Error::other(e), source.to_path_buf(), "move")
            })
        }
        Err(e) => Err(file_operation_error(e, source.to_path_buf(), "move")),
    }
}

// Times go first: a read-only target cannot be touched afterwards on Windows.
fn preserve_metadata(metadata: &Metadata, target: &Path) -> Result<()> {
    let accessed = FileTime::from_last_access_time(metadata);
    let modified = FileTime::from_last_modification_time(metadata);
    set_file_times(target, accessed, modified)
        .map_err(|e| file_operation_error(e, target.to_path_buf(), "set timestamps on"))?;

    fs::set_permissions(target, metadata.permissions())
        .map_err(|e| file_operation_error(e, target.to_path_buf(), "set permissions on"))
}
