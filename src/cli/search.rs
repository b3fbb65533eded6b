//! Search command handler
//!
//! Queries photos and houses around a center and prints the result.

use crate::cli::query_center;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::explorer::{Explorer, QueryOutcome};
use crate::format::{available_formats, get_formatter, SearchReport};
use crate::map::{GeoJsonMap, MapNotice};
use crate::panorama::PanoramaState;
use crate::search::HttpTransport;
use clap::Args;

/// Search command arguments
#[derive(Args)]
pub struct SearchArgs {
    /// Latitude
    #[arg(long, allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Longitude
    #[arg(long, allow_negative_numbers = true)]
    pub lng: Option<f64>,

    /// Use current location (IP geolocation)
    #[arg(long, conflicts_with_all = ["lat", "lng"])]
    pub here: bool,

    /// Search radius in meters
    #[arg(long, short = 'r')]
    pub radius: Option<f64>,

    /// Skip house listings
    #[arg(long)]
    pub no_houses: bool,

    /// Output format
    #[arg(long, short = 'f')]
    pub format: Option<String>,

    /// Write output to file
    #[arg(long, short = 'o')]
    pub output: Option<String>,

    /// List available formats
    #[arg(short = 'F', long = "list-formats")]
    pub list_formats: bool,
}

/// Run the search command
pub async fn run(args: SearchArgs) -> Result<()> {
    if args.list_formats {
        list_formats();
        return Ok(());
    }

    let config = Config::load()?;

    let format = args.format.unwrap_or_else(|| config.output.format.clone());
    let formatter = get_formatter(&format)
        .ok_or_else(|| Error::Config(format!("Unknown format: {}", format)))?;

    let radius = args.radius.unwrap_or(config.search.radius);
    let center = query_center(args.lat, args.lng, args.here, &config)
        .await?
        .with_radius(radius);
    center.validate()?;

    let transport = HttpTransport::from_config(&config)?;
    let mut explorer =
        Explorer::new(transport, GeoJsonMap::new(), PanoramaState::new()).configured(&config);

    let notice = match explorer.load_photos(&center).await? {
        QueryOutcome::NoResults => Some(MapNotice::NoResults),
        QueryOutcome::Rendered { .. } | QueryOutcome::Superseded => None,
    };

    if config.search.include_houses && !args.no_houses {
        explorer.load_houses(&center).await;
    }

    let houses = explorer
        .map()
        .house_markers()
        .map(|(_, house)| house.clone())
        .collect();
    let report = SearchReport::new(
        center,
        &explorer.route(),
        houses,
        notice,
        explorer.map().map().to_feature_collection(),
    );

    let output = formatter.format(&report, &config)?;

    // Write output
    if let Some(path) = args.output {
        std::fs::write(&path, &output)?;
        eprintln!("Output written to {}", path);
    } else {
        println!("{}", output);
    }

    Ok(())
}

/// Print available output formats
fn list_formats() {
    println!("Available output formats:");
    for format in available_formats() {
        println!("  {:<8} - {}", format.name, format.description);
    }
}
