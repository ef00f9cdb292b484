//! CLI command definitions and dispatch.
//!
//! Each subcommand is implemented in its own submodule:
//! - `albums`: album list, detail, creation, comments and tracks
//! - `people`: artists and collectors
//! - `settings`: effective configuration

mod albums;
mod people;
mod settings;

use std::sync::Arc;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tokio::runtime::Runtime;

pub use albums::{cmd_add_track, cmd_album, cmd_albums, cmd_comment, cmd_create_album};
pub use people::{
    cmd_artist, cmd_artists, cmd_collector, cmd_collectors, cmd_create_artist,
    cmd_create_collector,
};
pub use settings::cmd_config;

use crate::catalog::{CatalogCache, CatalogRepository, HttpCatalogApi};
use crate::config::{self, Config};
use crate::error::{Result, ResultExt};

/// Vinilos catalog CLI
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Catalog API base URL (overrides config file)
    #[arg(long, global = true, env = "VINILOS_API_URL")]
    pub api_url: Option<String>,

    /// Request timeout in seconds (overrides config file)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Collector to post comments as (overrides config file)
    #[arg(long, global = true)]
    pub collector_id: Option<i64>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// List all albums
    Albums {
        /// Skip the cache and reload from the server
        #[arg(long)]
        refresh: bool,
    },
    /// Show one album with its tracks and comments
    Album { id: i64 },
    /// Create a new album
    CreateAlbum {
        #[arg(long)]
        name: String,
        /// Cover image URL
        #[arg(long, default_value = "")]
        cover: String,
        /// Release date (YYYY-MM-DD)
        #[arg(long)]
        release_date: NaiveDate,
        #[arg(long, default_value = "")]
        description: String,
        /// Classical, Salsa, Rock or Folk
        #[arg(long)]
        genre: String,
        #[arg(long)]
        record_label: String,
    },
    /// Comment on an album as the configured collector
    Comment {
        album_id: i64,
        text: String,
        /// Rating from 1 to 5
        #[arg(short, long, default_value_t = 5)]
        rating: i32,
    },
    /// Add a track to an album
    AddTrack {
        album_id: i64,
        name: String,
        /// Duration as MM:SS
        duration: String,
    },
    /// List all artists
    Artists {
        #[arg(long)]
        refresh: bool,
    },
    /// Show one artist with their albums
    Artist { id: i64 },
    /// Register a new musician
    CreateArtist {
        #[arg(long)]
        name: String,
        /// Portrait image URL
        #[arg(long, default_value = "")]
        image: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Birth date (YYYY-MM-DD)
        #[arg(long)]
        birth_date: Option<NaiveDate>,
    },
    /// List all collectors
    Collectors {
        #[arg(long)]
        refresh: bool,
    },
    /// Show one collector with their collection
    Collector { id: i64 },
    /// Register a new collector
    CreateCollector {
        #[arg(long)]
        name: String,
        #[arg(long)]
        telephone: String,
        #[arg(long)]
        email: String,
    },
    /// Show the effective configuration
    Config {
        /// Persist the effective configuration to the config file
        #[arg(long)]
        save: bool,
    },
}

/// Everything a catalog command needs.
pub(crate) struct Session {
    pub repository: Arc<CatalogRepository>,
    pub collector_id: i64,
}

impl Session {
    pub fn open(config: &Config) -> Result<Self> {
        let api = HttpCatalogApi::new(&config.api.base_url, config.api.timeout())
            .map_err(crate::error::Error::from)
            .with_context(format!("connecting to {}", config.api.base_url))?;
        tracing::debug!("Using catalog API at {}", api.base_url());

        let repository = CatalogRepository::new(Arc::new(api), Arc::new(CatalogCache::new()));
        Ok(Self {
            repository: Arc::new(repository),
            collector_id: config.session.collector_id,
        })
    }
}

/// Config file merged with command-line overrides.
pub(crate) fn effective_config(cli: &Cli, mut config: Config) -> Config {
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }
    if let Some(timeout) = cli.timeout {
        config.api.timeout_secs = timeout;
    }
    if let Some(id) = cli.collector_id {
        config.session.collector_id = id;
    }
    config
}

/// Run the specified CLI command.
///
/// Returns `Ok(false)` if no command was specified.
pub fn run_command(cli: &Cli) -> anyhow::Result<bool> {
    let Some(command) = &cli.command else {
        return Ok(false);
    };

    let config = effective_config(cli, config::load());
    let rt = Runtime::new()?;
    let session = Session::open(&config)?;

    match command {
        Commands::Albums { refresh } => cmd_albums(&rt, &session, *refresh)?,
        Commands::Album { id } => cmd_album(&rt, &session, *id)?,
        Commands::CreateAlbum {
            name,
            cover,
            release_date,
            description,
            genre,
            record_label,
        } => {
            let album = crate::catalog::Album {
                name: name.clone(),
                cover: cover.clone(),
                release_date: Some(*release_date),
                description: description.clone(),
                genre: genre.clone(),
                record_label: record_label.clone(),
                ..Default::default()
            };
            cmd_create_album(&rt, &session, &album)?
        }
        Commands::Comment {
            album_id,
            text,
            rating,
        } => cmd_comment(&rt, &session, *album_id, text, *rating)?,
        Commands::AddTrack {
            album_id,
            name,
            duration,
        } => cmd_add_track(&rt, &session, *album_id, name, duration)?,
        Commands::Artists { refresh } => cmd_artists(&rt, &session, *refresh)?,
        Commands::Artist { id } => cmd_artist(&rt, &session, *id)?,
        Commands::CreateArtist {
            name,
            image,
            description,
            birth_date,
        } => {
            let artist = crate::catalog::Artist {
                name: name.clone(),
                image: image.clone(),
                description: description.clone(),
                birth_date: *birth_date,
                ..Default::default()
            };
            cmd_create_artist(&rt, &session, &artist)?
        }
        Commands::Collectors { refresh } => cmd_collectors(&rt, &session, *refresh)?,
        Commands::Collector { id } => cmd_collector(&rt, &session, *id)?,
        Commands::CreateCollector {
            name,
            telephone,
            email,
        } => {
            let collector = crate::catalog::Collector {
                name: name.clone(),
                telephone: telephone.clone(),
                email: email.clone(),
                ..Default::default()
            };
            cmd_create_collector(&rt, &session, &collector)?
        }
        Commands::Config { save } => cmd_config(&config, *save)?,
    }
    Ok(true)
}

// ============================================================================
// Shared helper functions
// ============================================================================

/// Turn a screen error into a command failure.
pub(crate) fn fail_on(error: Option<String>) -> anyhow::Result<()> {
    match error {
        Some(message) => Err(anyhow::anyhow!(message)),
        None => Ok(()),
    }
}

/// Render an optional date for listings.
pub(crate) fn date_or_dash(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string())
}
