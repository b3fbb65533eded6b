//! JSON output formatter

use crate::config::Config;
use crate::error::Result;
use crate::format::{OutputFormatter, SearchReport};

/// JSON formatter - outputs the full report as pretty-printed JSON
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Full JSON report"
    }

    fn format(&self, report: &SearchReport, _config: &Config) -> Result<String> {
        Ok(serde_json::to_string_pretty(report)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::testing::sample_report;

    #[test]
    fn test_json_format() {
        let output = JsonFormatter
            .format(&sample_report(), &Config::default())
            .unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["center"]["latitude"], 40.4406);
        assert_eq!(parsed["photos"][0]["id"], "early");
        assert_eq!(parsed["photos"][0]["is360"], true);
        assert_eq!(parsed["route"]["streetName"], "Unknown Location");
        assert_eq!(parsed["houses"][0]["metadata"]["price"], "245000");
        assert_eq!(parsed["map"]["type"], "FeatureCollection");
        assert!(parsed.get("notice").is_none());
    }
}
