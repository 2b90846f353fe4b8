//! Path generation module
//!
//! This module contains components for choosing destination paths.

mod unique_name;

pub use unique_name::{resolve_unique_destination, resolve_unique_destination_at};
