//! File discovery module
//!
//! This module contains components for walking the source tree and finding
//! files.

mod scanner;

pub use scanner::{FileEntry, scan_tree};
