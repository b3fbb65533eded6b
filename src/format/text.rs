//! Human-readable text output formatter

use crate::config::Config;
use crate::error::Result;
use crate::format::{OutputFormatter, SearchReport};
use crate::geo::distance::{format_distance, haversine_distance, DistanceUnit};

/// Text formatter - outputs human-readable summary
pub struct TextFormatter;

impl OutputFormatter for TextFormatter {
    fn name(&self) -> &str {
        "text"
    }

    fn description(&self) -> &str {
        "Human-readable text"
    }

    fn format(&self, report: &SearchReport, config: &Config) -> Result<String> {
        let mut output = String::new();
        let center = report.center;
        let unit = DistanceUnit::parse(&config.output.units);

        // Header
        output.push_str(&format!(
            "street-explorer search ({})\n",
            report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        output.push_str(&format!(
            "Center: ({:.6}, {:.6})\n",
            center.latitude, center.longitude
        ));
        if let Some(radius) = center.radius {
            output.push_str(&format!("Radius: {}\n", format_distance(radius, unit)));
        }
        output.push('\n');

        if let Some(notice) = report.notice {
            output.push_str(&format!("{}\n", notice));
        }

        // Photos
        if !report.photos.is_empty() {
            output.push_str(&format!("Photos ({}):\n", report.photos.len()));
            for (i, photo) in report.photos.iter().enumerate() {
                let away = haversine_distance(photo.coordinates, center);
                output.push_str(&format!(
                    "  {:>2}. {}  ({:.6}, {:.6})  {}  {} away\n",
                    i + 1,
                    photo.id,
                    photo.coordinates.latitude,
                    photo.coordinates.longitude,
                    photo.timestamp.format("%Y-%m-%d %H:%M"),
                    format_distance(away, unit)
                ));
            }
        }

        if let Some(route) = report.route.as_ref().filter(|r| r.photos.len() > 1) {
            output.push_str(&format!(
                "\nRoute: {} heading {}, {}\n",
                route.street_name,
                route.compass_direction(),
                format_distance(route.length_meters(), unit)
            ));
        }

        // Houses
        if !report.houses.is_empty() {
            output.push_str(&format!("\nHouses ({}):\n", report.houses.len()));
            for house in &report.houses {
                let price = house
                    .metadata
                    .as_ref()
                    .and_then(|m| m.price.as_deref())
                    .map(|p| format!("  ${}", p))
                    .unwrap_or_default();
                output.push_str(&format!(
                    "  {}{}  {}\n",
                    house.title().unwrap_or(&house.id),
                    price,
                    house.url
                ));
            }
        }

        if let Some(photo) = report.selected() {
            let link = config.format_url(
                None,
                photo.coordinates.latitude,
                photo.coordinates.longitude,
            )?;
            output.push_str(&format!("\nSelected: {}\nMap: {}\n", photo.id, link));
        }

        Ok(output)
    }
}
