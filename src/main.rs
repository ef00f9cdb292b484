//! Vinilos - a client for a vinyl catalog service.
//!
//! Browses albums, artists and collectors from the Vinilos REST API, and
//! adds albums, tracks and comments. The screen logic lives in reducers
//! that the CLI drives.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod state;
#[cfg(test)]
pub mod test_utils;

use clap::{CommandFactory, Parser};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive("vinilos=info".parse()?))
        .init();

    if !cli::run_command(&args)? {
        cli::Cli::command().print_help()?;
    }
    Ok(())
}
