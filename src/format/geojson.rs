//! GeoJSON output formatter

use crate::config::Config;
use crate::error::Result;
use crate::format::{OutputFormatter, SearchReport};

/// GeoJSON formatter - outputs the rendered map layers
pub struct GeoJsonFormatter;

impl OutputFormatter for GeoJsonFormatter {
    fn name(&self) -> &str {
        "geojson"
    }

    fn description(&self) -> &str {
        "Rendered map as GeoJSON"
    }

    fn format(&self, report: &SearchReport, _config: &Config) -> Result<String> {
        Ok(serde_json::to_string_pretty(&report.map)?)
    }
}
