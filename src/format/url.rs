//! URL output formatter

use crate::config::Config;
use crate::error::{Error, Result};
use crate::format::{OutputFormatter, SearchReport};

/// URL formatter - outputs a map link for the selected photo
pub struct UrlFormatter;

impl UrlFormatter {
    /// Format URL with optional provider override
    pub fn format_with_provider(
        &self,
        report: &SearchReport,
        config: &Config,
        provider: Option<&str>,
    ) -> Result<String> {
        let photo = report
            .selected()
            .ok_or_else(|| Error::Config("No photo selected: the search found nothing".to_string()))?;

        config.format_url(
            provider,
            photo.coordinates.latitude,
            photo.coordinates.longitude,
        )
    }
}

impl OutputFormatter for UrlFormatter {
    fn name(&self) -> &str {
        "url"
    }

    fn description(&self) -> &str {
        "Map URL for the selected photo"
    }

    fn format(&self, report: &SearchReport, config: &Config) -> Result<String> {
        self.format_with_provider(report, config, None)
    }
}
