//! IP-based geolocation
//!
//! Uses ip-api.com to approximate the user's position. Nothing is cached
//! between runs.

use crate::constants::api::IP_API_URL;
use crate::error::{Error, Result};
use crate::geo::{GeoLocation, Geolocator};
use serde::Deserialize;
use std::time::Duration;

/// IP location service
#[derive(Debug, Clone)]
pub struct IpLocator {
    client: reqwest::Client,
    endpoint: String,
}

/// ip-api.com response
#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    lat: Option<f64>,
    lon: Option<f64>,
    city: Option<String>,
    #[serde(rename = "regionName")]
    region_name: Option<String>,
    country: Option<String>,
}

impl IpLocator {
    /// Create a new IP locator against the public endpoint
    pub fn new() -> Self {
        Self::with_endpoint(IP_API_URL)
    }

    /// Create an IP locator against a different endpoint
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap_or_default();

        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    /// Turn an ip-api.com payload into a location
    fn parse_response(data: IpApiResponse) -> Result<GeoLocation> {
        if data.status != "success" {
            return Err(Error::Geolocation("IP location lookup failed".to_string()));
        }

        let lat = data
            .lat
            .ok_or_else(|| Error::Geolocation("No latitude in response".to_string()))?;
        let lng = data
            .lon
            .ok_or_else(|| Error::Geolocation("No longitude in response".to_string()))?;

        let display_name = [data.city, data.region_name, data.country]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(", ");

        Ok(GeoLocation {
            lat,
            lng,
            display_name: if display_name.is_empty() {
                "Unknown Location".to_string()
            } else {
                display_name
            },
        })
    }
}

impl Default for IpLocator {
    fn default() -> Self {
        Self::new()
    }
}

impl Geolocator for IpLocator {
    async fn current_location(&self) -> Result<GeoLocation> {
        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|e| Error::Geolocation(format!("IP location request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Geolocation(format!(
                "IP location API returned status: {}",
                response.status()
            )));
        }

        let data: IpApiResponse = response.json().await.map_err(|e| {
            Error::Geolocation(format!("Failed to parse IP location response: {}", e))
        })?;

        Self::parse_response(data)
    }
}
