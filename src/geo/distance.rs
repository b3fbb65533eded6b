//! Great-circle distance, bearing and distance formatting

use crate::constants::geo::{EARTH_RADIUS_METERS, METERS_PER_MILE};
use crate::model::Coordinates;
use std::f64::consts::PI;

/// Calculate the distance between two points in meters (Haversine formula)
///
/// Any radius carried by the coordinates is ignored.
pub fn haversine_distance(p1: Coordinates, p2: Coordinates) -> f64 {
    let lat1 = p1.latitude * PI / 180.0;
    let lat2 = p2.latitude * PI / 180.0;
    let delta_lat = (p2.latitude - p1.latitude) * PI / 180.0;
    let delta_lng = (p2.longitude - p1.longitude) * PI / 180.0;

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_METERS * c
}

/// Check if a point lies within `radius_meters` of `center` (inclusive)
pub fn is_within_radius(point: Coordinates, center: Coordinates, radius_meters: f64) -> bool {
    haversine_distance(point, center) <= radius_meters
}

/// Initial great-circle bearing from `from` to `to`, in degrees [0, 360)
pub fn initial_bearing(from: Coordinates, to: Coordinates) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let delta_lng = (to.longitude - from.longitude).to_radians();

    let y = delta_lng.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * delta_lng.cos();

    y.atan2(x).to_degrees().rem_euclid(360.0)
}

/// Unit for human-readable distances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DistanceUnit {
    Meters,
    #[default]
    Kilometers,
    Miles,
}

impl DistanceUnit {
    /// Parse a unit suffix ("m", "km", "mi"); anything else means kilometers
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "m" | "meters" => Self::Meters,
            "mi" | "miles" => Self::Miles,
            _ => Self::Kilometers,
        }
    }
}

/// Format a distance in meters for display
///
/// Negative or NaN inputs produce "Invalid distance".
pub fn format_distance(meters: f64, unit: DistanceUnit) -> String {
    if meters.is_nan() || meters < 0.0 {
        return "Invalid distance".to_string();
    }

    match unit {
        DistanceUnit::Meters => format!("{} meters", meters),
        DistanceUnit::Kilometers => format!("{:.2} kilometers", meters / 1000.0),
        DistanceUnit::Miles => format!("{:.2} miles", meters / METERS_PER_MILE),
    }
}
