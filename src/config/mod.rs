//! Configuration management
//!
//! Loads and saves configuration from XDG-compliant paths.
//! Config location: ~/.config/street-explorer/config.toml

pub mod defaults;

use crate::error::{Error, Result};
use crate::model::Coordinates;
use defaults::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Backend API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Search defaults
    #[serde(default)]
    pub search: SearchConfig,

    /// Map settings
    #[serde(default)]
    pub map: MapConfig,

    /// Panorama viewer settings
    #[serde(default)]
    pub viewer: ViewerConfig,

    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Map link generation settings
    #[serde(default)]
    pub url: UrlConfig,
}

/// Backend API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// API root; photo and house endpoints hang off it
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

/// Search defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Search radius in meters
    #[serde(default = "default_radius")]
    pub radius: f64,

    /// Fetch house listings alongside photos
    #[serde(default = "default_include_houses")]
    pub include_houses: bool,
}

/// Map settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    /// Fallback center latitude
    #[serde(default = "default_lat")]
    pub default_lat: f64,

    /// Fallback center longitude
    #[serde(default = "default_lng")]
    pub default_lng: f64,

    /// Initial zoom level
    #[serde(default = "default_zoom")]
    pub zoom: u8,

    /// Try to recenter on the user's location at startup
    #[serde(default = "default_use_geolocation")]
    pub use_geolocation: bool,
}

/// Panorama viewer settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewerConfig {
    /// Initial horizontal field of view in degrees
    #[serde(default = "default_hfov")]
    pub hfov: f64,
}

/// Output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default output format
    #[serde(default = "default_format")]
    pub format: String,

    /// Distance unit for text output: m, km or mi
    #[serde(default = "default_units")]
    pub units: String,
}

/// Map link generation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrlConfig {
    /// Default URL provider
    #[serde(default = "default_url_provider")]
    pub default: String,

    /// URL provider templates
    #[serde(default = "default_url_providers")]
    pub providers: HashMap<String, String>,
}

// Default value functions for serde
fn default_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}
fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}
fn default_radius() -> f64 {
    DEFAULT_RADIUS
}
fn default_include_houses() -> bool {
    DEFAULT_INCLUDE_HOUSES
}
fn default_lat() -> f64 {
    DEFAULT_LAT
}
fn default_lng() -> f64 {
    DEFAULT_LNG
}
fn default_zoom() -> u8 {
    DEFAULT_ZOOM
}
fn default_use_geolocation() -> bool {
    DEFAULT_USE_GEOLOCATION
}
fn default_hfov() -> f64 {
    DEFAULT_HFOV
}
fn default_format() -> String {
    DEFAULT_FORMAT.to_string()
}
fn default_units() -> String {
    DEFAULT_UNITS.to_string()
}
fn default_url_provider() -> String {
    DEFAULT_URL_PROVIDER.to_string()
}
fn default_url_providers() -> HashMap<String, String> {
    let mut providers = HashMap::new();
    providers.insert(
        "google".to_string(),
        "https://www.google.com/maps/@{lat},{lng},{zoom}z".to_string(),
    );
    providers.insert(
        "openstreetmap".to_string(),
        "https://www.openstreetmap.org/#map={zoom}/{lat}/{lng}".to_string(),
    );
    providers.insert(
        "apple".to_string(),
        "https://maps.apple.com/?ll={lat},{lng}&z={zoom}".to_string(),
    );
    providers
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            radius: default_radius(),
            include_houses: default_include_houses(),
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            default_lat: default_lat(),
            default_lng: default_lng(),
            zoom: default_zoom(),
            use_geolocation: default_use_geolocation(),
        }
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self { hfov: default_hfov() }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            units: default_units(),
        }
    }
}

impl Default for UrlConfig {
    fn default() -> Self {
        Self {
            default: default_url_provider(),
            providers: default_url_providers(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default path
    ///
    /// Creates default config if file doesn't exist
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if path.exists() {
            let content = fs::read_to_string(&path).map_err(|e| {
                Error::Config(format!("Failed to read config file: {}", e))
            })?;

            toml::from_str(&content).map_err(|e| {
                Error::Config(format!("Failed to parse config file: {}", e))
            })
        } else {
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            Error::Config(format!("Failed to serialize config: {}", e))
        })?;

        fs::write(&path, content).map_err(|e| {
            Error::Config(format!("Failed to write config file: {}", e))
        })?;

        Ok(())
    }

    /// Get a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns the value as a string, or None if not found
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["api", "base_url"] => Some(self.api.base_url.clone()),
            ["api", "timeout_secs"] => Some(self.api.timeout_secs.to_string()),

            ["search", "radius"] => Some(self.search.radius.to_string()),
            ["search", "include_houses"] => Some(self.search.include_houses.to_string()),

            ["map", "default_lat"] => Some(self.map.default_lat.to_string()),
            ["map", "default_lng"] => Some(self.map.default_lng.to_string()),
            ["map", "zoom"] => Some(self.map.zoom.to_string()),
            ["map", "use_geolocation"] => Some(self.map.use_geolocation.to_string()),

            ["viewer", "hfov"] => Some(self.viewer.hfov.to_string()),

            ["output", "format"] => Some(self.output.format.clone()),
            ["output", "units"] => Some(self.output.units.clone()),

            ["url", "default"] => Some(self.url.default.clone()),

            _ => None,
        }
    }

    /// Set a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns error if key is invalid or value type is wrong
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["api", "base_url"] => {
                self.api.base_url = value.trim_end_matches('/').to_string();
            }
            ["api", "timeout_secs"] => {
                self.api.timeout_secs = parse_value(value, "timeout")?;
            }

            ["search", "radius"] => {
                let radius: f64 = parse_value(value, "radius")?;
                if !radius.is_finite() || radius < 0.0 {
                    return Err(Error::InvalidRadius(format!(
                        "Radius must be a non-negative number, got {}",
                        value
                    )));
                }
                self.search.radius = radius;
            }
            ["search", "include_houses"] => {
                self.search.include_houses = parse_value(value, "boolean")?;
            }

            ["map", "default_lat"] => {
                let lat = parse_value(value, "latitude")?;
                Coordinates::new(lat, self.map.default_lng).validate()?;
                self.map.default_lat = lat;
            }
            ["map", "default_lng"] => {
                let lng = parse_value(value, "longitude")?;
                Coordinates::new(self.map.default_lat, lng).validate()?;
                self.map.default_lng = lng;
            }
            ["map", "zoom"] => {
                self.map.zoom = parse_value(value, "zoom")?;
            }
            ["map", "use_geolocation"] => {
                self.map.use_geolocation = parse_value(value, "boolean")?;
            }

            ["viewer", "hfov"] => {
                self.viewer.hfov = parse_value(value, "hfov")?;
            }

            ["output", "format"] => {
                self.output.format = value.to_string();
            }
            ["output", "units"] => {
                self.output.units = value.to_string();
            }

            ["url", "default"] => {
                self.url.default = value.to_string();
            }

            _ => {
                return Err(Error::Config(format!("Unknown config key: {}", key)));
            }
        }

        Ok(())
    }

    /// List all available config keys
    pub fn available_keys() -> Vec<&'static str> {
        vec![
            "api.base_url",
            "api.timeout_secs",
            "search.radius",
            "search.include_houses",
            "map.default_lat",
            "map.default_lng",
            "map.zoom",
            "map.use_geolocation",
            "viewer.hfov",
            "output.format",
            "output.units",
            "url.default",
        ]
    }

    /// Format a map link using the specified provider
    ///
    /// Replaces {lat}, {lng} and {zoom} placeholders with actual values
    pub fn format_url(&self, provider: Option<&str>, lat: f64, lng: f64) -> Result<String> {
        let provider_name = provider.unwrap_or(&self.url.default);

        let template = self.url.providers.get(provider_name).ok_or_else(|| {
            Error::Config(format!("Unknown URL provider: {}", provider_name))
        })?;

        Ok(template
            .replace("{lat}", &lat.to_string())
            .replace("{lng}", &lng.to_string())
            .replace("{zoom}", &self.map.zoom.to_string()))
    }

    /// Fallback map center used when geolocation is unavailable
    pub fn default_center(&self) -> Coordinates {
        Coordinates::new(self.map.default_lat, self.map.default_lng)
    }

    /// HTTP timeout for backend and image requests
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }
}

fn parse_value<T: std::str::FromStr>(value: &str, what: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| Error::Config(format!("Invalid {} value: {}", what, value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    fn with_temp_config<F: FnOnce()>(f: F) {
        let temp_dir = TempDir::new().unwrap();
        env::set_var("XDG_CONFIG_HOME", temp_dir.path());
        f();
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.api.base_url, "http://localhost:3000/api");
        assert_eq!(config.search.radius, 10_000.0);
        assert_eq!(config.map.default_lat, 40.4406);
        assert_eq!(config.map.default_lng, -79.9959);
        assert_eq!(config.viewer.hfov, 90.0);
    }

    #[test]
    fn test_get_set() {
        let mut config = Config::default();

        assert_eq!(config.get("output.format"), Some("text".to_string()));

        config.set("output.format", "geojson").unwrap();
        assert_eq!(config.get("output.format"), Some("geojson".to_string()));

        config.set("search.radius", "2500").unwrap();
        assert_eq!(config.get("search.radius"), Some("2500".to_string()));
        assert_eq!(config.search.radius, 2500.0);
    }

    #[test]
    fn test_set_base_url_strips_trailing_slash() {
        let mut config = Config::default();
        config.set("api.base_url", "https://example.test/api/").unwrap();
        assert_eq!(config.api.base_url, "https://example.test/api");
    }

    #[test]
    fn test_get_invalid_key() {
        let config = Config::default();
        assert_eq!(config.get("invalid.key"), None);
    }

    #[test]
    fn test_set_invalid_key() {
        let mut config = Config::default();
        assert!(config.set("invalid.key", "value").is_err());
    }

    #[test]
    fn test_set_invalid_value() {
        let mut config = Config::default();
        assert!(config.set("search.radius", "not_a_number").is_err());
        assert!(config.set("map.use_geolocation", "maybe").is_err());
    }

    #[test]
    fn test_set_negative_radius() {
        let mut config = Config::default();
        let result = config.set("search.radius", "-5");
        assert!(matches!(result, Err(Error::InvalidRadius(_))));
        assert_eq!(config.search.radius, 10_000.0);
    }

    #[test]
    fn test_set_out_of_range_center() {
        let mut config = Config::default();

        assert!(matches!(
            config.set("map.default_lat", "91"),
            Err(Error::InvalidCoordinates(_))
        ));
        assert!(matches!(
            config.set("map.default_lng", "-180.5"),
            Err(Error::InvalidCoordinates(_))
        ));
        assert!(config.set("map.default_lat", "NaN").is_err());
        assert_eq!(config.map.default_lat, DEFAULT_LAT);
        assert_eq!(config.map.default_lng, DEFAULT_LNG);

        config.set("map.default_lat", "-90").unwrap();
        config.set("map.default_lng", "180").unwrap();
        assert!(config.default_center().validate().is_ok());
    }

    #[test]
    fn test_format_url() {
        let config = Config::default();

        let url = config.format_url(Some("google"), 40.4406, -79.9959).unwrap();
        assert_eq!(url, "https://www.google.com/maps/@40.4406,-79.9959,13z");

        let url = config.format_url(None, 40.4406, -79.9959).unwrap();
        assert_eq!(url, "https://www.openstreetmap.org/#map=13/40.4406/-79.9959");
    }

    #[test]
    fn test_format_url_unknown_provider() {
        let config = Config::default();
        assert!(config.format_url(Some("unknown"), 0.0, 0.0).is_err());
    }

    #[test]
    fn test_default_center() {
        let center = Config::default().default_center();
        assert_eq!(center.latitude, 40.4406);
        assert_eq!(center.longitude, -79.9959);
        assert!(center.radius.is_none());
    }

    #[test]
    fn test_save_and_load() {
        with_temp_config(|| {
            let mut config = Config::default();
            config.search.radius = 5000.0;
            config.map.use_geolocation = false;
            config.save().unwrap();

            let loaded = Config::load().unwrap();
            assert_eq!(loaded.search.radius, 5000.0);
            assert!(!loaded.map.use_geolocation);
        });
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let loaded: Config = toml::from_str("[search]\nradius = 750.0\n").unwrap();
        assert_eq!(loaded.search.radius, 750.0);
        assert!(loaded.search.include_houses);
        assert_eq!(loaded.api.timeout_secs, 30);
    }

    #[test]
    fn test_serialization_format() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();

        assert!(toml.contains("[api]"));
        assert!(toml.contains("[search]"));
        assert!(toml.contains("[map]"));
        assert!(toml.contains("[url.providers]"));
    }

    #[test]
    fn test_available_keys() {
        let keys = Config::available_keys();
        let config = Config::default();
        for key in keys {
            assert!(config.get(key).is_some(), "key {} has no value", key);
        }
    }
}
