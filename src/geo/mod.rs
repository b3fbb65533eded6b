//! Geography helpers
//!
//! Distance math plus the read-only geolocation source used to pick the
//! initial map center.

pub mod distance;
pub mod ip_location;

use crate::error::Result;
use crate::model::Coordinates;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// A located position with a human-readable description
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoLocation {
    /// Latitude
    pub lat: f64,
    /// Longitude
    pub lng: f64,
    /// Display name (address or description)
    pub display_name: String,
}

impl GeoLocation {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lng)
    }
}

/// Trait for "where is the user" sources
pub trait Geolocator: Send + Sync {
    /// Current position of the user
    fn current_location(&self) -> impl std::future::Future<Output = Result<GeoLocation>> + Send;
}

/// Get the default geolocation source
pub fn get_locator() -> ip_location::IpLocator {
    ip_location::IpLocator::new()
}

/// Pick the initial map center
///
/// Asks `locator` for the user's position; any failure (or an out-of-range
/// answer) is logged and the `fallback` center is used instead.
pub async fn resolve_center<G: Geolocator>(locator: &G, fallback: Coordinates) -> Coordinates {
    match locator.current_location().await {
        Ok(location) => {
            let center = location.coordinates();
            match center.validate() {
                Ok(()) => {
                    info!(
                        lat = center.latitude,
                        lng = center.longitude,
                        "Using user location: {}",
                        location.display_name
                    );
                    center
                }
                Err(e) => {
                    warn!("Ignoring geolocation result: {}", e);
                    fallback
                }
            }
        }
        Err(e) => {
            warn!("Could not get user location, using default center: {}", e);
            fallback
        }
    }
}
