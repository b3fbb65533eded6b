//! Plain data records shared by the search clients, the map and the viewer
//!
//! - `Coordinates`: a query center or a record's position
//! - `Photo`: a geotagged (usually 360°) street photo
//! - `House`: a house listing
//! - `StreetSegment`: a run of photos along one street

pub mod house;
pub mod photo;
pub mod segment;

pub use house::{House, HouseMetadata};
pub use photo::{PanoramaType, Photo, PhotoMetadata, PhotoQuality};
pub use segment::{CompassDirection, StreetSegment};

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// A geographic coordinate, optionally carrying a search radius in meters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
}

impl Coordinates {
    /// Create new coordinates without a radius
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            radius: None,
        }
    }

    /// Attach a search radius in meters
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = Some(radius);
        self
    }

    /// Same position, radius dropped
    pub fn position(&self) -> Self {
        Self::new(self.latitude, self.longitude)
    }

    /// Validate that coordinates are within valid ranges
    ///
    /// Latitude: -90 to 90
    /// Longitude: -180 to 180
    /// Radius: finite and non-negative
    pub fn validate(&self) -> Result<()> {
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(Error::InvalidCoordinates(format!(
                "Latitude {} is out of range [-90, 90]",
                self.latitude
            )));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(Error::InvalidCoordinates(format!(
                "Longitude {} is out of range [-180, 180]",
                self.longitude
            )));
        }
        if let Some(radius) = self.radius {
            if !radius.is_finite() || radius < 0.0 {
                return Err(Error::InvalidRadius(format!(
                    "Radius {} must be a non-negative number of meters",
                    radius
                )));
            }
        }
        Ok(())
    }
}
