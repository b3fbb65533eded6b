//! Street segment: the photos captured along one stretch of street

use crate::geo::distance::{haversine_distance, initial_bearing};
use crate::model::{Coordinates, Photo};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Eight-way compass heading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompassDirection {
    North,
    Northeast,
    East,
    Southeast,
    South,
    Southwest,
    West,
    Northwest,
}

impl CompassDirection {
    /// Nearest compass point for a bearing in degrees
    pub fn from_bearing(bearing: f64) -> Self {
        const POINTS: [CompassDirection; 8] = [
            CompassDirection::North,
            CompassDirection::Northeast,
            CompassDirection::East,
            CompassDirection::Southeast,
            CompassDirection::South,
            CompassDirection::Southwest,
            CompassDirection::West,
            CompassDirection::Northwest,
        ];
        let normalized = bearing.rem_euclid(360.0);
        let sector = (normalized / 45.0).round() as usize % POINTS.len();
        POINTS[sector]
    }
}

impl std::fmt::Display for CompassDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::North => "north",
            Self::Northeast => "northeast",
            Self::East => "east",
            Self::Southeast => "southeast",
            Self::South => "south",
            Self::Southwest => "southwest",
            Self::West => "west",
            Self::Northwest => "northwest",
        };
        write!(f, "{}", label)
    }
}

/// A stretch of street between two points with the photos taken along it
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreetSegment {
    pub id: String,
    pub start_point: Coordinates,
    pub end_point: Coordinates,
    pub photos: Vec<Photo>,
    pub street_name: String,
    pub direction: CompassDirection,
}

impl StreetSegment {
    /// Build a segment spanning a route, first photo to last
    ///
    /// Returns None for an empty route.
    pub fn from_route(id: impl Into<String>, photos: &[Arc<Photo>]) -> Option<Self> {
        let first = photos.first()?;
        let last = photos.last()?;

        let start_point = first.coordinates.position();
        let end_point = last.coordinates.position();
        let street_name = first
            .metadata
            .street_name
            .clone()
            .unwrap_or_else(|| "Unknown Location".to_string());

        Some(Self {
            id: id.into(),
            start_point,
            end_point,
            photos: photos.iter().map(|p| Photo::clone(p)).collect(),
            street_name,
            direction: CompassDirection::from_bearing(initial_bearing(start_point, end_point)),
        })
    }

    /// Straight-line length between the endpoints in meters
    pub fn length_meters(&self) -> f64 {
        haversine_distance(self.start_point, self.end_point)
    }

    /// Heading from the start point to the end point
    pub fn compass_direction(&self) -> CompassDirection {
        CompassDirection::from_bearing(initial_bearing(self.start_point, self.end_point))
    }
}
