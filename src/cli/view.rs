//! View command handler
//!
//! Loads the photos around a location, selects one and opens it in the
//! headless panorama viewer, then replays navigation keys against it.

use crate::cli::query_center;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::explorer::{Explorer, QueryOutcome};
use crate::map::GeoJsonMap;
use crate::panorama::PanoramaState;
use crate::search::HttpTransport;
use crate::viewer::{HeadlessEngine, HttpImageFetcher, NavKey, PanoramaViewer, ViewerState};
use clap::Args;

/// View command arguments
#[derive(Args)]
pub struct ViewArgs {
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

    /// Photo to open (defaults to the oldest photo on the route)
    #[arg(long)]
    pub id: Option<String>,

    /// Navigation keys to apply, comma separated (left,right,up,down,+,-)
    #[arg(long = "key", short = 'k', value_delimiter = ',', allow_hyphen_values = true)]
    pub keys: Vec<String>,
}

/// Run the view command
pub async fn run(args: ViewArgs) -> Result<()> {
    let keys = args
        .keys
        .iter()
        .map(|k| k.parse::<NavKey>())
        .collect::<Result<Vec<_>>>()?;

    let config = Config::load()?;
    let radius = args.radius.unwrap_or(config.search.radius);
    let center = query_center(args.lat, args.lng, args.here, &config)
        .await?
        .with_radius(radius);

    let state = PanoramaState::new();
    let transport = HttpTransport::from_config(&config)?;
    let mut explorer =
        Explorer::new(transport, GeoJsonMap::new(), state.clone()).configured(&config);

    if explorer.load_photos(&center).await? == QueryOutcome::NoResults {
        return Err(Error::Viewer("No images found at this location.".to_string()));
    }

    if let Some(id) = &args.id {
        let photo = state
            .photo_by_id(id)
            .ok_or_else(|| Error::Viewer(format!("No photo with id '{}' near this location", id)))?;
        state.show(photo);
    }

    let fetcher = HttpImageFetcher::from_config(&config)?;
    let mut viewer = PanoramaViewer::new(HeadlessEngine::new(), fetcher).with_hfov(config.viewer.hfov);
    let mut selection = state.subscribe();
    if let Some(selected) = selection.try_next() {
        viewer.apply(selected).await;
    }

    if let ViewerState::Error(message) = viewer.state() {
        return Err(Error::Viewer(message.clone()));
    }

    for key in keys {
        viewer.handle_key(key);
    }

    if let (Some(photo), Some(info)) = (viewer.photo(), viewer.view_info()) {
        println!("Photo: {}", photo.id);
        println!("Taken: {}", photo.timestamp.format("%Y-%m-%d %H:%M:%S UTC"));
        println!(
            "Position: ({:.6}, {:.6})",
            photo.coordinates.latitude, photo.coordinates.longitude
        );
        if let Some(image) = viewer.image() {
            println!("Image: {} ({} bytes)", photo.url, image.len());
        }
        println!("Yaw: {:.0}°", info.yaw);
        println!("Pitch: {:.0}°", info.pitch);
        println!("Zoom: {}%", info.zoom_percent);
    }

    Ok(())
}
