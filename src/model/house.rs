//! House listing record

use crate::model::Coordinates;
use serde::{Deserialize, Serialize};

/// Listing details shown in the marker popup
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HouseMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl HouseMetadata {
    pub fn is_empty(&self) -> bool {
        self.price.is_none() && self.title.is_none() && self.description.is_none()
    }
}

/// A house listing near the query center
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct House {
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Link to the listing
    pub url: String,
    /// Thumbnail URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HouseMetadata>,
}

impl House {
    /// Position of the listing
    pub fn position(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }

    /// Listing title, if the backend sent one
    pub fn title(&self) -> Option<&str> {
        self.metadata.as_ref().and_then(|m| m.title.as_deref())
    }
}
