//! Route synchronizer
//!
//! Owns the map surface and everything this crate drew on it: the photo
//! route (markers + one polyline) and, independently, the house markers.
//! Rendering a new result always tears the previous one down first.

use crate::map::{LayerId, MapNotice, MapSurface, MarkerKind, MarkerSpec, PolylineStyle};
use crate::model::{Coordinates, House, Photo};
use std::sync::Arc;
use tracing::{debug, warn};

/// Callback for a photo marker click
pub type PhotoClick = Arc<dyn Fn(Arc<Photo>) + Send + Sync>;

/// Callback for a house marker click
pub type HouseClick = Arc<dyn Fn(&House) + Send + Sync>;

/// Keeps on-screen markers and the route line consistent with the last query
pub struct RouteSynchronizer<M> {
    map: M,
    route_markers: Vec<(LayerId, Arc<Photo>)>,
    polyline: Option<LayerId>,
    house_markers: Vec<(LayerId, House)>,
    on_photo_click: Option<PhotoClick>,
    on_house_click: Option<HouseClick>,
}

impl<M: MapSurface> RouteSynchronizer<M> {
    pub fn new(map: M) -> Self {
        Self {
            map,
            route_markers: Vec::new(),
            polyline: None,
            house_markers: Vec::new(),
            on_photo_click: None,
            on_house_click: None,
        }
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn map_mut(&mut self) -> &mut M {
        &mut self.map
    }

    pub fn into_map(self) -> M {
        self.map
    }

    /// Remove every route marker, the route line and any open notice
    ///
    /// Safe to call when nothing is rendered. House markers are untouched.
    pub fn clear(&mut self) {
        self.map.clear_notice();
        for (layer, _) in self.route_markers.drain(..) {
            self.map.remove_layer(layer);
        }
        if let Some(line) = self.polyline.take() {
            self.map.remove_layer(line);
        }
        self.on_photo_click = None;
    }

    /// Remove every house marker
    pub fn clear_houses(&mut self) {
        for (layer, _) in self.house_markers.drain(..) {
            self.map.remove_layer(layer);
        }
        self.on_house_click = None;
    }

    /// Remove everything this synchronizer drew
    pub fn clear_all(&mut self) {
        self.clear();
        self.clear_houses();
    }

    /// Replace the photo route with `photos`
    ///
    /// One marker per photo in the given order, plus a line through them
    /// when there are at least two. Returns the number of markers placed.
    pub fn render_route<F>(&mut self, photos: &[Arc<Photo>], on_click: F) -> usize
    where
        F: Fn(Arc<Photo>) + Send + Sync + 'static,
    {
        self.clear();

        let mut points = Vec::with_capacity(photos.len());
        for photo in photos {
            if let Err(e) = photo.coordinates.validate() {
                warn!(photo = %photo.id, "Not placing marker: {}", e);
                continue;
            }

            let position = photo.coordinates.position();
            let layer = self.map.add_marker(MarkerSpec {
                position,
                kind: MarkerKind::Photo,
                label: "Photo Available".to_string(),
                detail: Some("Click to view".to_string()),
                link: None,
            });
            points.push(position);
            self.route_markers.push((layer, Arc::clone(photo)));
        }

        if points.len() > 1 {
            self.polyline = Some(self.map.add_polyline(&points, &PolylineStyle::route()));
            debug!("Route drawn through {} points", points.len());
        }

        self.on_photo_click = Some(Arc::new(on_click));
        self.route_markers.len()
    }

    /// Replace the house markers with `houses`
    ///
    /// Returns the number of markers placed.
    pub fn render_houses<F>(&mut self, houses: &[House], on_click: F) -> usize
    where
        F: Fn(&House) + Send + Sync + 'static,
    {
        self.clear_houses();

        for house in houses {
            let position = house.position();
            if let Err(e) = position.validate() {
                warn!(house = %house.id, "Not placing marker: {}", e);
                continue;
            }

            let layer = self.map.add_marker(MarkerSpec {
                position,
                kind: MarkerKind::House,
                label: house.title().unwrap_or("House").to_string(),
                detail: house.metadata.as_ref().and_then(|m| m.price.clone()),
                link: (!house.url.is_empty()).then(|| house.url.clone()),
            });
            self.house_markers.push((layer, house.clone()));
        }

        debug!("Placed {} house markers", self.house_markers.len());
        self.on_house_click = Some(Arc::new(on_click));
        self.house_markers.len()
    }

    /// Dispatch a marker click reported by the map engine
    ///
    /// Returns false when `layer` is not one of this synchronizer's markers.
    pub fn handle_click(&self, layer: LayerId) -> bool {
        if let Some((_, photo)) = self.route_markers.iter().find(|(id, _)| *id == layer) {
            if let Some(on_click) = &self.on_photo_click {
                on_click(Arc::clone(photo));
            }
            return true;
        }

        if let Some((_, house)) = self.house_markers.iter().find(|(id, _)| *id == layer) {
            if let Some(on_click) = &self.on_house_click {
                on_click(house);
            }
            return true;
        }

        false
    }

    /// Show a user-visible notice at `at`
    pub fn show_notice(&mut self, at: Coordinates, notice: MapNotice) {
        self.map.show_notice(at.position(), notice);
    }

    /// Photo markers currently on the map, in route order
    pub fn route_markers(&self) -> impl Iterator<Item = (LayerId, &Arc<Photo>)> {
        self.route_markers.iter().map(|(id, photo)| (*id, photo))
    }

    /// House markers currently on the map
    pub fn house_markers(&self) -> impl Iterator<Item = (LayerId, &House)> {
        self.house_markers.iter().map(|(id, house)| (*id, house))
    }

    pub fn has_polyline(&self) -> bool {
        self.polyline.is_some()
    }
}
