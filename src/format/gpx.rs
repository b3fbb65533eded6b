//! GPX output formatter

use crate::config::Config;
use crate::error::Result;
use crate::format::{OutputFormatter, SearchReport};
use chrono::SecondsFormat;

/// GPX formatter - search center and houses as waypoints, photo route as a track
pub struct GpxFormatter;

impl OutputFormatter for GpxFormatter {
    fn name(&self) -> &str {
        "gpx"
    }

    fn description(&self) -> &str {
        "GPX track of the photo route"
    }

    fn format(&self, report: &SearchReport, _config: &Config) -> Result<String> {
        let mut gpx = String::new();

        // XML header
        gpx.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        gpx.push('\n');
        gpx.push_str(r#"<gpx version="1.1" creator="street-explorer">"#);
        gpx.push('\n');

        // Metadata
        gpx.push_str("  <metadata>\n");
        gpx.push_str("    <name>street-explorer search</name>\n");
        gpx.push_str(&format!(
            "    <time>{}</time>\n",
            report.generated_at.to_rfc3339_opts(SecondsFormat::Secs, true)
        ));
        gpx.push_str("  </metadata>\n");

        // Center waypoint
        gpx.push_str(&format!(
            r#"  <wpt lat="{}" lon="{}">"#,
            report.center.latitude, report.center.longitude
        ));
        gpx.push('\n');
        gpx.push_str("    <name>Center</name>\n");
        if let Some(radius) = report.center.radius {
            gpx.push_str(&format!("    <desc>Search center, radius: {}m</desc>\n", radius));
        }
        gpx.push_str("  </wpt>\n");

        // House waypoints
        for house in &report.houses {
            gpx.push_str(&format!(
                r#"  <wpt lat="{}" lon="{}">"#,
                house.latitude, house.longitude
            ));
            gpx.push('\n');
            gpx.push_str(&format!(
                "    <name>{}</name>\n",
                escape(house.title().unwrap_or(&house.id))
            ));
            if !house.url.is_empty() {
                gpx.push_str(&format!("    <link href=\"{}\"/>\n", escape(&house.url)));
            }
            gpx.push_str("    <sym>Residence</sym>\n");
            gpx.push_str("  </wpt>\n");
        }

        // Photo route
        if !report.photos.is_empty() {
            gpx.push_str("  <trk>\n");
            gpx.push_str("    <name>Photo route</name>\n");
            gpx.push_str("    <trkseg>\n");
            for photo in &report.photos {
                gpx.push_str(&format!(
                    r#"      <trkpt lat="{}" lon="{}">"#,
                    photo.coordinates.latitude, photo.coordinates.longitude
                ));
                gpx.push('\n');
                gpx.push_str(&format!(
                    "        <time>{}</time>\n",
                    photo.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
                ));
                gpx.push_str(&format!("        <name>{}</name>\n", escape(&photo.id)));
                gpx.push_str("      </trkpt>\n");
            }
            gpx.push_str("    </trkseg>\n");
            gpx.push_str("  </trk>\n");
        }

        gpx.push_str("</gpx>\n");
        Ok(gpx)
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::testing::sample_report;

    #[test]
    fn test_gpx_format() {
        let output = GpxFormatter
            .format(&sample_report(), &Config::default())
            .unwrap();

        assert!(output.contains(r#"<?xml version="1.0""#));
        assert!(output.contains(r#"<gpx version="1.1" creator="street-explorer">"#));
        assert!(output.contains(r#"<wpt lat="40.4406" lon="-79.9959">"#));
        assert!(output.contains("<desc>Search center, radius: 10000m</desc>"));
        assert!(output.contains("<name>Brick &amp; stone rowhouse</name>"));
        assert_eq!(output.matches("<trkpt").count(), 2);
        assert!(output.contains("<time>2024-06-01T08:00:00Z</time>"));
        assert!(output.ends_with("</gpx>\n"));
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"<a href="x">&</a>"#), "&lt;a href=&quot;x&quot;&gt;&amp;&lt;/a&gt;");
    }

    #[test]
    fn test_gpx_formatter_info() {
        assert_eq!(GpxFormatter.name(), "gpx");
        assert!(!GpxFormatter.description().is_empty());
    }
}
