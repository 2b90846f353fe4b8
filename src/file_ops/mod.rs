//! File operations module
//!
//! This module contains components for copying and moving files.

mod actions;

pub use actions::transfer_file;
