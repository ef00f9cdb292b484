//! Configuration commands.

use crate::config::{self, Config};

/// Show the effective configuration, optionally persisting it
pub fn cmd_config(config: &Config, save: bool) -> anyhow::Result<()> {
    match config::config_path() {
        Some(path) => println!("# {}", path.display()),
        None => println!("# (no config directory available)"),
    }
    print!("{}", toml::to_string_pretty(config)?);

    if save {
        let path = config::save(config)?;
        println!("\nSaved to {}", path.display());
    }
    Ok(())
}
