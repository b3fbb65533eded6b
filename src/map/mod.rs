//! Map rendering
//!
//! The tile/map engine itself is external; this module only knows it through
//! the `MapSurface` trait. `RouteSynchronizer` keeps what is drawn on the
//! surface in step with the latest query result, and `GeoJsonMap` is a
//! surface that records everything as GeoJSON.

pub mod geojson;
pub mod sync;

pub use geojson::GeoJsonMap;
pub use sync::RouteSynchronizer;

use crate::model::Coordinates;
use serde::{Deserialize, Serialize};

/// Handle to something drawn on a map surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LayerId(pub u64);

/// Which icon a marker uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerKind {
    Photo,
    House,
}

/// A marker to place on the map
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerSpec {
    pub position: Coordinates,
    pub kind: MarkerKind,
    /// Popup headline
    pub label: String,
    /// Popup body text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// Link opened from the popup
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// Stroke style for a polyline
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolylineStyle {
    pub color: String,
    pub weight: f64,
    pub opacity: f64,
}

impl PolylineStyle {
    /// Style of the line joining a photo route
    pub fn route() -> Self {
        Self {
            color: "#3b82f6".to_string(),
            weight: 5.0,
            opacity: 0.7,
        }
    }
}

/// User-visible map-level notices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MapNotice {
    /// A query succeeded but found nothing
    NoResults,
    /// A query failed
    LoadError,
}

impl MapNotice {
    pub fn message(&self) -> &'static str {
        match self {
            Self::NoResults => "No images found at this location.",
            Self::LoadError => "Error loading images.",
        }
    }
}

impl std::fmt::Display for MapNotice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

/// The operations the synchronizer needs from a map engine
pub trait MapSurface {
    /// Place a marker and return its handle
    fn add_marker(&mut self, marker: MarkerSpec) -> LayerId;

    /// Draw a polyline through `points` in order
    fn add_polyline(&mut self, points: &[Coordinates], style: &PolylineStyle) -> LayerId;

    /// Remove a marker or polyline; unknown handles are ignored
    fn remove_layer(&mut self, layer: LayerId);

    /// Show a popup-style notice anchored at `at`, replacing any open one
    fn show_notice(&mut self, at: Coordinates, notice: MapNotice);

    /// Close the open notice, if any
    fn clear_notice(&mut self);

    /// Recenter the view
    fn set_view(&mut self, center: Coordinates, zoom: u8);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_messages() {
        assert_eq!(MapNotice::NoResults.to_string(), "No images found at this location.");
        assert_eq!(MapNotice::LoadError.to_string(), "Error loading images.");
    }

    #[test]
    fn test_route_style() {
        let style = PolylineStyle::route();
        assert_eq!(style.color, "#3b82f6");
        assert_eq!(style.weight, 5.0);
    }
}
