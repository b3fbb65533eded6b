//! House listing search client

use crate::config::defaults::DEFAULT_RADIUS;
use crate::constants::api::HOUSES_PATH;
use crate::error::Result;
use crate::geo::distance::is_within_radius;
use crate::model::{Coordinates, House, HouseMetadata};
use crate::search::response::{check_shape, non_empty_string, parse_items, read_position, string_field};
use crate::search::{search_params, ApiTransport};
use serde_json::Value;
use tracing::{info, warn};

/// House search client
#[derive(Debug)]
pub struct HouseSearch<T> {
    transport: T,
    default_radius: f64,
}

impl<T: ApiTransport> HouseSearch<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            default_radius: DEFAULT_RADIUS,
        }
    }

    pub fn with_default_radius(mut self, radius: f64) -> Self {
        self.default_radius = radius;
        self
    }

    /// Fetch house listings around `center`, in response order
    pub async fn search(&self, center: &Coordinates) -> Result<Vec<House>> {
        center.validate()?;

        let params = search_params(center, self.default_radius);
        let body = self.transport.get_text(HOUSES_PATH, &params).await?;
        let houses = houses_from_body(&body, center)?;

        info!(count = houses.len(), "Houses received");
        Ok(houses)
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}

/// Map a raw `/houses` body into listings, radius-filtered when the center has one
pub fn houses_from_body(body: &str, center: &Coordinates) -> Result<Vec<House>> {
    let items = parse_items(body)?;
    check_shape(&items, HOUSES_PATH);

    let mut houses: Vec<House> = items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| house_from_item(index, item))
        .collect();

    if let Some(radius) = center.radius {
        houses.retain(|house| is_within_radius(house.position(), *center, radius));
    }

    Ok(houses)
}

fn house_from_item(index: usize, item: &Value) -> Option<House> {
    let Some(position) = read_position(item) else {
        warn!("Skipping house #{} without usable coordinates: {}", index, item);
        return None;
    };

    let metadata = HouseMetadata {
        price: non_empty_string(item, "price"),
        title: non_empty_string(item, "title"),
        description: non_empty_string(item, "description"),
    };

    Some(House {
        id: string_field(item, "id").unwrap_or_else(|| format!("house-{}", index)),
        latitude: position.latitude,
        longitude: position.longitude,
        url: string_field(item, "url").unwrap_or_default(),
        image: non_empty_string(item, "image"),
        coordinates: Some(position),
        metadata: (!metadata.is_empty()).then_some(metadata),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::search::testing::StaticTransport;
    use serde_json::json;

    fn listings() -> String {
        json!([
            {"id": "h1", "latitude": 40.4420, "longitude": -79.9950,
             "url": "https://listings.example/h1", "image": "https://listings.example/h1.jpg",
             "title": "Brick rowhouse", "price": 245000},
            {"id": "h2", "latitude": 40.5485, "longitude": -79.9959,
             "url": "https://listings.example/h2", "title": "", "description": "Far away"}
        ])
        .to_string()
    }

    #[tokio::test]
    async fn test_search_maps_listing_fields() {
        let transport = StaticTransport::new().with_body("/houses", listings());
        let houses = HouseSearch::new(transport)
            .search(&Coordinates::new(40.4406, -79.9959))
            .await
            .unwrap();

        assert_eq!(houses.len(), 2);
        let h1 = &houses[0];
        assert_eq!(h1.title(), Some("Brick rowhouse"));
        assert_eq!(h1.metadata.as_ref().unwrap().price.as_deref(), Some("245000"));
        assert_eq!(h1.image.as_deref(), Some("https://listings.example/h1.jpg"));
        assert_eq!(h1.coordinates, Some(Coordinates::new(40.4420, -79.9950)));

        let h2 = &houses[1];
        assert_eq!(h2.title(), None);
        assert_eq!(
            h2.metadata.as_ref().unwrap().description.as_deref(),
            Some("Far away")
        );
    }

    #[tokio::test]
    async fn test_search_radius_filter() {
        let transport = StaticTransport::new().with_body("/houses", listings());
        let center = Coordinates::new(40.4406, -79.9959).with_radius(10_000.0);
        let houses = HouseSearch::new(transport).search(&center).await.unwrap();

        assert_eq!(houses.len(), 1);
        assert_eq!(houses[0].id, "h1");
    }

    #[tokio::test]
    async fn test_search_uses_configured_radius() {
        let transport = StaticTransport::new().with_body("/houses", "[]");
        let search = HouseSearch::new(transport).with_default_radius(500.0);
        search.search(&Coordinates::new(40.0, -80.0)).await.unwrap();

        let (path, params) = &search.transport().calls()[0];
        assert_eq!(path, "/houses");
        assert_eq!(params[2], ("radius", "500".to_string()));
    }

    #[test]
    fn test_bare_listing_has_no_metadata() {
        let body = json!([{"id": "h", "latitude": 1.0, "longitude": 2.0, "url": "u"}]).to_string();
        let houses = houses_from_body(&body, &Coordinates::new(1.0, 2.0)).unwrap();
        assert!(houses[0].metadata.is_none());
    }

    #[test]
    fn test_non_array_body() {
        let result = houses_from_body(r#"{"houses": []}"#, &Coordinates::new(0.0, 0.0));
        assert!(matches!(result, Err(Error::MalformedResponse { .. })));
    }
}
