//! CLI command handlers
//!
//! Each subcommand has its own module with handler functions.

pub mod config;
pub mod locate;
pub mod search;
pub mod view;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::explorer::initial_center;
use crate::geo::{get_locator, Geolocator};
use crate::model::Coordinates;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Street photo explorer
#[derive(Parser)]
#[command(name = "street-explorer")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Find photos (and house listings) around a location
    Search(search::SearchArgs),

    /// Open a photo in the headless panorama viewer
    View(view::ViewArgs),

    /// Show the current location from IP geolocation
    Locate(locate::LocateArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

/// Run the CLI
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Search(args) => search::run(args).await,
        Commands::View(args) => view::run(args).await,
        Commands::Locate(args) => locate::run(args).await,
        Commands::Config(args) => config::run(args),
    }
}

/// Where a command should search
///
/// `--here` asks IP geolocation and fails loudly; explicit coordinates win
/// otherwise; with neither, the configured startup center is used.
pub(crate) async fn query_center(
    lat: Option<f64>,
    lng: Option<f64>,
    here: bool,
    config: &Config,
) -> Result<Coordinates> {
    let locator = get_locator();

    let center = if here {
        let location = locator.current_location().await?;
        eprintln!("Using IP location: {}", location.display_name);
        location.coordinates()
    } else {
        match (lat, lng) {
            (Some(lat), Some(lng)) => Coordinates::new(lat, lng),
            (None, None) => initial_center(config, &locator).await,
            _ => {
                return Err(Error::InvalidCoordinates(
                    "Both --lat and --lng are required".to_string(),
                ))
            }
        }
    };

    center.validate()?;
    Ok(center)
}
