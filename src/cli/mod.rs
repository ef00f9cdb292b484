//! Command-line interface for vinilos.
//!
//! This module provides CLI commands for browsing the catalog, creating
//! albums and tracks, and commenting as the configured collector.

mod commands;

pub use commands::{Cli, Commands, run_command};
