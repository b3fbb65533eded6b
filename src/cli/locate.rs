//! Locate command handler

use crate::error::Result;
use crate::geo::{get_locator, Geolocator};
use clap::Args;

/// Locate command arguments
#[derive(Args)]
pub struct LocateArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run the locate command
pub async fn run(args: LocateArgs) -> Result<()> {
    let location = get_locator().current_location().await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&location)?);
    } else {
        println!("{}", location.display_name);
        println!("Latitude: {:.6}", location.lat);
        println!("Longitude: {:.6}", location.lng);
    }

    Ok(())
}
