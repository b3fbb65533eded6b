//! Photo search client
//!
//! GET `/photos?latitude=&longitude=&radius=` and turn the answer into
//! proxied, radius-filtered, chronologically ordered `Photo`s.

use crate::config::defaults::DEFAULT_RADIUS;
use crate::constants::api::{PHOTOS_PATH, PLACEHOLDER_IMAGE_URL};
use crate::error::Result;
use crate::geo::distance::is_within_radius;
use crate::model::{Coordinates, Photo};
use crate::search::proxy::rewrite_image_url;
use crate::search::response::{check_shape, non_empty_string, parse_items, read_position, string_field};
use crate::search::{search_params, ApiTransport};
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;
use tracing::{debug, info, warn};

/// Photo search client
#[derive(Debug)]
pub struct PhotoSearch<T> {
    transport: T,
    default_radius: f64,
}

impl<T: ApiTransport> PhotoSearch<T> {
    /// Create a client with the standard 10 km request radius
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            default_radius: DEFAULT_RADIUS,
        }
    }

    /// Override the radius sent when the center carries none
    pub fn with_default_radius(mut self, radius: f64) -> Self {
        self.default_radius = radius;
        self
    }

    /// Fetch photos around `center`
    ///
    /// Results are filtered to `center.radius` when one is given and sorted
    /// by timestamp, oldest first.
    pub async fn search(&self, center: &Coordinates) -> Result<Vec<Photo>> {
        center.validate()?;

        let params = search_params(center, self.default_radius);
        info!(
            lat = center.latitude,
            lng = center.longitude,
            radius = center.radius.unwrap_or(self.default_radius),
            "Searching photos"
        );

        let body = self.transport.get_text(PHOTOS_PATH, &params).await?;
        let photos = photos_from_body(&body, center, Utc::now())?;

        info!(count = photos.len(), "Photos received");
        Ok(photos)
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}

/// Map a raw `/photos` body into photos
///
/// `fetched_at` stands in for items that carry no readable timestamp.
pub fn photos_from_body(
    body: &str,
    center: &Coordinates,
    fetched_at: DateTime<Utc>,
) -> Result<Vec<Photo>> {
    let items = parse_items(body)?;
    check_shape(&items, PHOTOS_PATH);

    let mut photos: Vec<Photo> = items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| photo_from_item(index, item, fetched_at))
        .collect();

    if let Some(radius) = center.radius {
        let before = photos.len();
        photos.retain(|photo| is_within_radius(photo.coordinates, *center, radius));
        debug!(kept = photos.len(), dropped = before - photos.len(), radius, "Radius filter applied");
    }

    // Stable: photos sharing a timestamp keep their response order
    photos.sort_by_key(|photo| photo.timestamp);
    Ok(photos)
}

fn photo_from_item(index: usize, item: &Value, fetched_at: DateTime<Utc>) -> Option<Photo> {
    let Some(coordinates) = read_position(item) else {
        warn!("Skipping photo #{} without usable coordinates: {}", index, item);
        return None;
    };

    let id = string_field(item, "id").unwrap_or_else(|| format!("photo-{}", index));
    let url = non_empty_string(item, "url")
        .map(|url| rewrite_image_url(&url))
        .unwrap_or_else(|| PLACEHOLDER_IMAGE_URL.to_string());

    let timestamp = item.get("timestamp").and_then(parse_timestamp).unwrap_or_else(|| {
        debug!("Photo {} has no readable timestamp, using fetch time", id);
        fetched_at
    });

    Some(Photo::new(id, url, coordinates, timestamp))
}

/// Parse an RFC 3339 string, a zone-less ISO datetime (read as UTC) or epoch milliseconds
pub fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            DateTime::parse_from_rfc3339(s)
                .map(|dt| dt.with_timezone(&Utc))
                .ok()
                .or_else(|| {
                    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
                        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f"))
                        .ok()
                        .map(|naive| naive.and_utc())
                })
                .or_else(|| s.parse::<f64>().ok().and_then(from_epoch_millis))
        }
        Value::Number(n) => n.as_f64().and_then(from_epoch_millis),
        _ => None,
    }
}

fn from_epoch_millis(millis: f64) -> Option<DateTime<Utc>> {
    if !millis.is_finite() {
        return None;
    }
    Utc.timestamp_millis_opt(millis.round() as i64).single()
}
