//! Default configuration values
//!
//! Named constants for all tunable parameters

/// Default backend API root (requests go to `{root}/photos`, `{root}/houses`)
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000/api";

/// Default HTTP timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default search radius in meters
pub const DEFAULT_RADIUS: f64 = 10_000.0;

/// Whether house listings are fetched alongside photos
pub const DEFAULT_INCLUDE_HOUSES: bool = true;

/// Default map center latitude (Pittsburgh)
pub const DEFAULT_LAT: f64 = 40.4406;

/// Default map center longitude (Pittsburgh)
pub const DEFAULT_LNG: f64 = -79.9959;

/// Default map zoom level
pub const DEFAULT_ZOOM: u8 = 13;

/// Recenter on the user's location at startup
pub const DEFAULT_USE_GEOLOCATION: bool = true;

/// Default panorama field of view in degrees
pub const DEFAULT_HFOV: f64 = crate::constants::view::DEFAULT_HFOV;

/// Default output format
pub const DEFAULT_FORMAT: &str = "text";

/// Default distance unit for text output
pub const DEFAULT_UNITS: &str = "km";

/// Default URL provider
pub const DEFAULT_URL_PROVIDER: &str = "openstreetmap";

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name (for XDG paths)
pub const APP_DIR_NAME: &str = "street-explorer";
