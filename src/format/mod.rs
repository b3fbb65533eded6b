//! Output formatters
//!
//! Provides trait-based output formatting for search reports.

pub mod geojson;
pub mod gpx;
pub mod json;
pub mod text;
pub mod url;

use crate::config::Config;
use crate::error::Result;
use crate::map::MapNotice;
use crate::model::{Coordinates, House, Photo, StreetSegment};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Information about an output format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatInfo {
    /// Format name
    pub name: String,
    /// Format description
    pub description: String,
}

/// Everything one search produced
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchReport {
    pub center: Coordinates,
    pub generated_at: DateTime<Utc>,
    /// Photos on the route, oldest first
    pub photos: Vec<Photo>,
    /// The route summarized as one segment, when there is a route
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<StreetSegment>,
    pub houses: Vec<House>,
    /// Notice shown on the map, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<MapNotice>,
    /// The rendered map as a GeoJSON FeatureCollection
    pub map: serde_json::Value,
}

impl SearchReport {
    pub fn new(
        center: Coordinates,
        route: &[Arc<Photo>],
        houses: Vec<House>,
        notice: Option<MapNotice>,
        map: serde_json::Value,
    ) -> Self {
        Self {
            center,
            generated_at: Utc::now(),
            photos: route.iter().map(|p| Photo::clone(p)).collect(),
            route: StreetSegment::from_route("route", route),
            houses,
            notice,
            map,
        }
    }

    /// The photo a viewer would open first
    pub fn selected(&self) -> Option<&Photo> {
        self.photos.first()
    }
}

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Get the format name
    fn name(&self) -> &str;

    /// Get the format description
    fn description(&self) -> &str;

    /// Format a search report
    ///
    /// # Arguments
    /// * `report` - The report to format
    /// * `config` - Application config (for url providers, etc.)
    fn format(&self, report: &SearchReport, config: &Config) -> Result<String>;
}

/// Get a formatter by name
pub fn get_formatter(name: &str) -> Option<Box<dyn OutputFormatter>> {
    match name.to_lowercase().as_str() {
        "json" => Some(Box::new(json::JsonFormatter)),
        "text" => Some(Box::new(text::TextFormatter)),
        "gpx" => Some(Box::new(gpx::GpxFormatter)),
        "geojson" => Some(Box::new(geojson::GeoJsonFormatter)),
        "url" => Some(Box::new(url::UrlFormatter)),
        _ => None,
    }
}

/// List all available formatters
pub fn available_formats() -> Vec<FormatInfo> {
    [
        ("json", "Full JSON report"),
        ("text", "Human-readable text"),
        ("gpx", "GPX track of the photo route"),
        ("geojson", "Rendered map as GeoJSON"),
        ("url", "Map URL for the selected photo"),
    ]
    .into_iter()
    .map(|(name, description)| FormatInfo {
        name: name.to_string(),
        description: description.to_string(),
    })
    .collect()
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_formatter() {
        assert!(get_formatter("json").is_some());
        assert!(get_formatter("text").is_some());
        assert!(get_formatter("gpx").is_some());
        assert!(get_formatter("geojson").is_some());
        assert!(get_formatter("url").is_some());
        assert!(get_formatter("unknown").is_none());
    }

    #[test]
    fn test_get_formatter_case_insensitive() {
        assert!(get_formatter("JSON").is_some());
        assert!(get_formatter("GeoJSON").is_some());
    }

    #[test]
    fn test_available_formats_match_registry() {
        let formats = available_formats();
        assert_eq!(formats.len(), 5);
        for format in formats {
            let formatter = get_formatter(&format.name).unwrap();
            assert_eq!(formatter.name(), format.name);
        }
    }

    #[test]
    fn test_report_route_summary() {
        let report = testing::sample_report();
        assert_eq!(report.selected().unwrap().id, "early");

        let route = report.route.as_ref().unwrap();
        assert_eq!(route.photos.len(), 2);
        assert!(route.length_meters() > 900.0);
    }
}
