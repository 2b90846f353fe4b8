//! Directory tree scanning functionality
//!
//! This module walks the source tree, prunes excluded directories and yields
//! the files that pass the type filter.

use std::ffi::OsString;
use std::fs::canonicalize;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;
use walkdir::{DirEntry, WalkDir};

use crate::config::{ExclusionSet, TypeFilter};
use crate::errors::{Result, file_operation_error, path_operation_error};

/// A file discovered during traversal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Full path of the file inside the source tree
    pub path: PathBuf,
    /// Base name of the file
    pub file_name: OsString,
}

impl FileEntry {
    /// Creates a new FileEntry from a path
    ///
    /// # Errors
    /// Returns an error if the path has no final component
    pub fn new(path: PathBuf) -> Result<Self> {
        let file_name = path
            .file_name()
            .ok_or_else(|| path_operation_error(path.clone(), "get filename"))?
            .to_os_string();

        Ok(FileEntry { path, file_name })
    }
}

/// Walks `root` and yields every file that passes `types`
///
/// Directories named in `exclude` are never entered, at any depth. The
/// `skip` directory, usually the destination, is pruned as well so files
/// placed there are not picked up again. The walk is depth-first with
/// entries sorted by file name. Symbolic links to directories are neither
/// descended nor yielded. Every other entry is yielded as a file, including
/// dangling links, so a failed transfer is reported for them.
///
/// Unreadable directories are yielded as errors and the walk continues.
pub fn scan_tree<'a>(
    root: &'a Path,
    exclude: &'a ExclusionSet,
    types: &'a TypeFilter,
    skip: Option<&'a Path>,
) -> impl Iterator<Item = Result<FileEntry>> + 'a {
    debug!("Scanning directory tree: {}", root.display());
    let skip = skip.and_then(|path| canonicalize(path).ok());

    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(move |entry| !is_pruned(entry, exclude, skip.as_deref()))
        .filter_map(move |entry| match entry {
            Ok(entry) => (is_file_like(&entry) && types.accepts(entry.path()))
                .then(|| FileEntry::new(entry.into_path())),
            Err(e) => {
                let path = e.path().map(Path::to_path_buf).unwrap_or_default();
                Some(Err(file_operation_error(
                    io::Error::from(e),
                    path,
                    "read directory",
                )))
            }
        })
}

fn is_pruned(entry: &DirEntry, exclude: &ExclusionSet, skip: Option<&Path>) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }

    exclude.excludes(entry.file_name()) || skip.is_some_and(|skip| is_same_dir(entry.path(), skip))
}

// `canonical` must already be canonicalized.
fn is_same_dir(path: &Path, canonical: &Path) -> bool {
    canonicalize(path).is_ok_and(|path| path == canonical)
}

fn is_file_like(entry: &DirEntry) -> bool {
    if entry.file_type().is_dir() {
        return false;
    }
    !(entry.path_is_symlink() && entry.path().is_dir())
}
