//! Centralized constants for the street-explorer crate
//!
//! This module consolidates constants that are used across multiple modules
//! to avoid duplication and ensure consistency.

/// Geographic constants
pub mod geo {
    /// Mean Earth radius in meters (WGS84 approximation)
    pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

    /// Meters per statute mile
    pub const METERS_PER_MILE: f64 = 1_609.34;
}

/// Backend API and proxy routing
pub mod api {
    /// Path of the photo search endpoint, relative to the API root
    pub const PHOTOS_PATH: &str = "/photos";

    /// Path of the house search endpoint, relative to the API root
    pub const HOUSES_PATH: &str = "/houses";

    /// Header that suppresses the tunnel's browser interstitial page
    pub const SKIP_BROWSER_WARNING_HEADER: &str = "ngrok-skip-browser-warning";

    /// Tunneling host whose URLs are routed through the API proxy
    pub const TUNNEL_HOST: &str = "ngrok-free.app";

    /// Object storage host whose URLs are routed through the S3 proxy
    pub const OBJECT_STORAGE_HOST: &str = "s3.us-east-2.amazonaws.com";

    /// Same-origin prefix forwarded to the backend API
    pub const API_PROXY_PREFIX: &str = "/api";

    /// Same-origin prefix forwarded to object storage
    pub const S3_PROXY_PREFIX: &str = "/s3-proxy";

    /// Static assets root, never rewritten
    pub const ASSETS_PREFIX: &str = "/assets";

    /// Image shown for photos that arrive without a url
    pub const PLACEHOLDER_IMAGE_URL: &str = "https://via.placeholder.com/800x400?text=No+Image";

    /// How much of a bad response body is kept for diagnosis
    pub const RESPONSE_PREVIEW_CHARS: usize = 500;

    /// IP geolocation API (free, no key required)
    pub const IP_API_URL: &str = "http://ip-api.com/json";
}

/// Panorama view limits
pub mod view {
    /// Initial horizontal field of view in degrees
    pub const DEFAULT_HFOV: f64 = 90.0;

    /// Yaw step for the turn buttons
    pub const TURN_STEP: f64 = 30.0;

    /// Yaw/pitch/hfov step for keyboard navigation and zoom buttons
    pub const KEY_STEP: f64 = 10.0;

    /// Narrowest field of view reachable with the zoom buttons
    pub const MIN_BUTTON_HFOV: f64 = 50.0;

    /// Narrowest field of view reachable with the keyboard
    pub const MIN_KEY_HFOV: f64 = 30.0;

    /// Widest field of view
    pub const MAX_HFOV: f64 = 120.0;

    /// Keyboard pitch limit (both directions)
    pub const MAX_KEY_PITCH: f64 = 30.0;
}
