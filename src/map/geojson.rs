//! A map surface that records its layers as GeoJSON
//!
//! Used by the CLI to hand the rendered route to other tools, and anywhere a
//! real map engine is not available.

use crate::map::{LayerId, MapNotice, MapSurface, MarkerKind, MarkerSpec, PolylineStyle};
use crate::model::Coordinates;
use serde_json::{json, Value};
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
enum Layer {
    Marker(MarkerSpec),
    Polyline {
        points: Vec<Coordinates>,
        style: PolylineStyle,
    },
}

/// In-memory map surface
#[derive(Debug, Clone, Default)]
pub struct GeoJsonMap {
    next_id: u64,
    layers: BTreeMap<LayerId, Layer>,
    notice: Option<(Coordinates, MapNotice)>,
    view: Option<(Coordinates, u8)>,
}

impl GeoJsonMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Layers currently on the map
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn marker_count(&self, kind: MarkerKind) -> usize {
        self.layers
            .values()
            .filter(|layer| matches!(layer, Layer::Marker(m) if m.kind == kind))
            .count()
    }

    pub fn polyline_count(&self) -> usize {
        self.layers
            .values()
            .filter(|layer| matches!(layer, Layer::Polyline { .. }))
            .count()
    }

    /// The notice currently open on the map
    pub fn notice(&self) -> Option<&(Coordinates, MapNotice)> {
        self.notice.as_ref()
    }

    /// Last view set with `set_view`
    pub fn view(&self) -> Option<(Coordinates, u8)> {
        self.view
    }

    /// Render the current layers and notice as a FeatureCollection
    ///
    /// Positions are written `[longitude, latitude]`. Polylines carry
    /// simplestyle stroke properties.
    pub fn to_feature_collection(&self) -> Value {
        let mut features: Vec<Value> = self
            .layers
            .iter()
            .map(|(id, layer)| match layer {
                Layer::Marker(marker) => json!({
                    "type": "Feature",
                    "id": id.0,
                    "geometry": point(&marker.position),
                    "properties": {
                        "kind": marker.kind,
                        "label": marker.label,
                        "detail": marker.detail,
                        "link": marker.link,
                    }
                }),
                Layer::Polyline { points, style } => json!({
                    "type": "Feature",
                    "id": id.0,
                    "geometry": {
                        "type": "LineString",
                        "coordinates": points
                            .iter()
                            .map(|p| json!([p.longitude, p.latitude]))
                            .collect::<Vec<_>>(),
                    },
                    "properties": {
                        "kind": "route",
                        "stroke": style.color,
                        "stroke-width": style.weight,
                        "stroke-opacity": style.opacity,
                    }
                }),
            })
            .collect();

        features.extend(self.notice.iter().map(|(at, notice)| {
            json!({
                "type": "Feature",
                "geometry": point(at),
                "properties": {
                    "kind": "notice",
                    "notice": notice,
                    "message": notice.message(),
                }
            })
        }));

        let mut collection = json!({
            "type": "FeatureCollection",
            "features": features,
        });
        if let Some((center, zoom)) = self.view {
            collection["view"] = json!({
                "center": [center.longitude, center.latitude],
                "zoom": zoom,
            });
        }
        collection
    }
}

fn point(at: &Coordinates) -> Value {
    json!({
        "type": "Point",
        "coordinates": [at.longitude, at.latitude],
    })
}

impl MapSurface for GeoJsonMap {
    fn add_marker(&mut self, marker: MarkerSpec) -> LayerId {
        self.next_id += 1;
        let id = LayerId(self.next_id);
        self.layers.insert(id, Layer::Marker(marker));
        id
    }

    fn add_polyline(&mut self, points: &[Coordinates], style: &PolylineStyle) -> LayerId {
        self.next_id += 1;
        let id = LayerId(self.next_id);
        self.layers.insert(
            id,
            Layer::Polyline {
                points: points.to_vec(),
                style: style.clone(),
            },
        );
        id
    }

    fn remove_layer(&mut self, layer: LayerId) {
        self.layers.remove(&layer);
    }

    fn show_notice(&mut self, at: Coordinates, notice: MapNotice) {
        self.notice = Some((at, notice));
    }

    fn clear_notice(&mut self) {
        self.notice = None;
    }

    fn set_view(&mut self, center: Coordinates, zoom: u8) {
        self.view = Some((center.position(), zoom));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marker(lat: f64, lng: f64) -> MarkerSpec {
        MarkerSpec {
            position: Coordinates::new(lat, lng),
            kind: MarkerKind::Photo,
            label: "Photo Available".to_string(),
            detail: None,
            link: None,
        }
    }

    #[test]
    fn test_layer_ids_are_unique() {
        let mut map = GeoJsonMap::new();
        let a = map.add_marker(marker(1.0, 2.0));
        let b = map.add_marker(marker(1.0, 2.0));
        assert_ne!(a, b);

        map.remove_layer(a);
        map.remove_layer(a);
        assert_eq!(map.layer_count(), 1);
    }

    #[test]
    fn test_feature_collection_shape() {
        let mut map = GeoJsonMap::new();
        map.add_marker(marker(40.44, -79.99));
        map.add_polyline(
            &[Coordinates::new(40.44, -79.99), Coordinates::new(40.45, -79.98)],
            &PolylineStyle::route(),
        );
        map.show_notice(Coordinates::new(40.0, -80.0), MapNotice::NoResults);
        map.set_view(Coordinates::new(40.0, -80.0).with_radius(10.0), 13);

        let fc = map.to_feature_collection();
        assert_eq!(fc["type"], "FeatureCollection");

        let features = fc["features"].as_array().unwrap();
        assert_eq!(features.len(), 3);
        assert_eq!(features[0]["geometry"]["coordinates"], json!([-79.99, 40.44]));
        assert_eq!(features[0]["properties"]["kind"], "photo");
        assert_eq!(features[1]["geometry"]["type"], "LineString");
        assert_eq!(features[1]["properties"]["stroke"], "#3b82f6");
        assert_eq!(features[2]["properties"]["message"], "No images found at this location.");
        assert_eq!(fc["view"]["zoom"], 13);
    }

    #[test]
    fn test_notice_replaces_open_notice() {
        let mut map = GeoJsonMap::new();
        map.show_notice(Coordinates::new(40.0, -80.0), MapNotice::LoadError);
        map.show_notice(Coordinates::new(41.0, -80.0), MapNotice::NoResults);

        let (at, notice) = map.notice().unwrap();
        assert_eq!(*notice, MapNotice::NoResults);
        assert_eq!(at.latitude, 41.0);
        assert_eq!(map.to_feature_collection()["features"].as_array().unwrap().len(), 1);

        map.clear_notice();
        assert!(map.notice().is_none());
        assert!(map.to_feature_collection()["features"].as_array().unwrap().is_empty());
    }
}
