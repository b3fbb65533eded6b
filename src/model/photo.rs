//! Street photo record

use crate::model::Coordinates;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Projection of a panoramic image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanoramaType {
    #[default]
    Equirectangular,
    Cubemap,
    Multires,
    Regular,
}

/// Image quality tier reported by the capture pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhotoQuality {
    Low,
    Medium,
    High,
    Ultra,
}

/// Descriptive photo metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoMetadata {
    pub resolution: String,
    pub camera: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<PhotoQuality>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size: Option<String>,
}

impl Default for PhotoMetadata {
    fn default() -> Self {
        Self {
            resolution: "unknown".to_string(),
            camera: "unknown".to_string(),
            street_name: Some("Unknown Location".to_string()),
            description: Some("Photo from API".to_string()),
            quality: None,
            file_size: None,
        }
    }
}

/// A geotagged street photo
///
/// Built from an API response at query time and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub id: String,
    /// Image URL, already rewritten to a same-origin proxy path where needed
    pub url: String,
    #[serde(rename = "is360")]
    pub is_360: bool,
    pub coordinates: Coordinates,
    pub timestamp: DateTime<Utc>,
    /// Camera heading in degrees, [0, 360)
    pub direction: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pitch: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yaw: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub panorama_type: Option<PanoramaType>,
    pub metadata: PhotoMetadata,
}

impl Photo {
    /// Create an equirectangular 360° photo with default metadata
    pub fn new(
        id: impl Into<String>,
        url: impl Into<String>,
        coordinates: Coordinates,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            is_360: true,
            coordinates,
            timestamp,
            direction: 0.0,
            pitch: Some(0.0),
            yaw: Some(0.0),
            panorama_type: Some(PanoramaType::Equirectangular),
            metadata: PhotoMetadata::default(),
        }
    }

    /// Initial viewer yaw, 0 when the photo does not specify one
    pub fn initial_yaw(&self) -> f64 {
        self.yaw.unwrap_or(0.0)
    }

    /// Initial viewer pitch, 0 when the photo does not specify one
    pub fn initial_pitch(&self) -> f64 {
        self.pitch.unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> Photo {
        Photo::new(
            "p-1",
            "/api/photos/p-1.jpg",
            Coordinates::new(40.4406, -79.9959),
            Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_new_defaults() {
        let photo = sample();
        assert!(photo.is_360);
        assert_eq!(photo.direction, 0.0);
        assert_eq!(photo.panorama_type, Some(PanoramaType::Equirectangular));
        assert_eq!(photo.metadata.resolution, "unknown");
        assert_eq!(photo.metadata.street_name.as_deref(), Some("Unknown Location"));
    }

    #[test]
    fn test_initial_angles_fall_back_to_zero() {
        let mut photo = sample();
        photo.yaw = None;
        photo.pitch = Some(-12.5);
        assert_eq!(photo.initial_yaw(), 0.0);
        assert_eq!(photo.initial_pitch(), -12.5);
    }

    #[test]
    fn test_json_field_names() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["is360"], true);
        assert_eq!(json["panoramaType"], "equirectangular");
        assert_eq!(json["metadata"]["streetName"], "Unknown Location");
        assert!(json["metadata"].get("fileSize").is_none());
    }
}
