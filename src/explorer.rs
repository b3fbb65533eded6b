//! Explorer
//!
//! Wires the search clients, the map and the selected-photo cell together:
//! a query around a center ends with the route drawn and its first photo
//! selected, a notice on the map, or nothing at all when a newer query has
//! already been started.

use crate::config::Config;
use crate::error::Result;
use crate::geo::{resolve_center, Geolocator};
use crate::map::{MapNotice, MapSurface, RouteSynchronizer};
use crate::model::{Coordinates, Photo};
use crate::panorama::PanoramaState;
use crate::search::{ApiTransport, HouseSearch, PhotoSearch};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Identifies one photo query; only the newest may touch the map
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct QueryTicket(u64);

/// How a photo query ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryOutcome {
    /// The route was drawn and its first photo selected
    Rendered { photos: usize },
    /// The query succeeded with zero photos
    NoResults,
    /// A newer query was started before this one completed
    Superseded,
}

/// Search + map + selection
pub struct Explorer<T, M> {
    photos: PhotoSearch<Arc<T>>,
    houses: HouseSearch<Arc<T>>,
    map: RouteSynchronizer<M>,
    state: PanoramaState,
    zoom: Option<u8>,
    latest: AtomicU64,
}

impl<T: ApiTransport, M: MapSurface> Explorer<T, M> {
    pub fn new(transport: T, map: M, state: PanoramaState) -> Self {
        let transport = Arc::new(transport);
        Self {
            photos: PhotoSearch::new(Arc::clone(&transport)),
            houses: HouseSearch::new(transport),
            map: RouteSynchronizer::new(map),
            state,
            zoom: None,
            latest: AtomicU64::new(0),
        }
    }

    /// Apply the `[search]` radius and `[map]` zoom settings
    pub fn configured(mut self, config: &Config) -> Self {
        self.photos = self.photos.with_default_radius(config.search.radius);
        self.houses = self.houses.with_default_radius(config.search.radius);
        self.zoom = Some(config.map.zoom);
        self
    }

    pub fn state(&self) -> &PanoramaState {
        &self.state
    }

    pub fn map(&self) -> &RouteSynchronizer<M> {
        &self.map
    }

    pub fn map_mut(&mut self) -> &mut RouteSynchronizer<M> {
        &mut self.map
    }

    /// Photos on the current route, in route order
    pub fn route(&self) -> Vec<Arc<Photo>> {
        self.map.route_markers().map(|(_, photo)| Arc::clone(photo)).collect()
    }

    /// Start a photo query; earlier tickets become stale
    pub fn begin_query(&self) -> QueryTicket {
        QueryTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: QueryTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }

    /// Fetch photos without touching the map
    pub async fn fetch_photos(&self, center: &Coordinates) -> Result<Vec<Photo>> {
        self.photos.search(center).await
    }

    /// Query photos around `center` and show the result
    pub async fn load_photos(&mut self, center: &Coordinates) -> Result<QueryOutcome> {
        let ticket = self.begin_query();
        if let Some(zoom) = self.zoom {
            self.map.map_mut().set_view(*center, zoom);
        }
        let result = self.fetch_photos(center).await;
        self.apply_photos(ticket, center, result)
    }

    /// Show the result of the query holding `ticket`
    ///
    /// Stale completions are dropped, errors included. A failed query shows
    /// a load-error notice, a successful empty one a no-results notice; both
    /// clear the route and the selection.
    pub fn apply_photos(
        &mut self,
        ticket: QueryTicket,
        center: &Coordinates,
        result: Result<Vec<Photo>>,
    ) -> Result<QueryOutcome> {
        if !self.is_current(ticket) {
            debug!(?ticket, "Discarding superseded photo query");
            return Ok(QueryOutcome::Superseded);
        }

        let photos = match result {
            Ok(photos) => photos,
            Err(e) => {
                warn!("Photo query failed: {}", e);
                self.reset_route();
                self.map.show_notice(*center, MapNotice::LoadError);
                return Err(e);
            }
        };

        if photos.is_empty() {
            info!("No photos around ({}, {})", center.latitude, center.longitude);
            self.reset_route();
            self.map.show_notice(*center, MapNotice::NoResults);
            return Ok(QueryOutcome::NoResults);
        }

        let photos: Vec<Arc<Photo>> = photos.into_iter().map(Arc::new).collect();
        for photo in &photos {
            if self.state.photo_by_id(&photo.id).is_none() {
                self.state.add_photo(Arc::clone(photo));
            }
        }

        let state = self.state.clone();
        let placed = self.map.render_route(&photos, move |photo| state.show(photo));
        info!(placed, "Route rendered");

        self.state.show(Arc::clone(&photos[0]));
        Ok(QueryOutcome::Rendered {
            photos: photos.len(),
        })
    }

    fn reset_route(&mut self) {
        self.map.clear();
        if self.state.current().is_some() {
            self.state.clear();
        }
    }

    /// Query house listings around `center` and place their markers
    ///
    /// Failures are logged and leave the photo route and selection alone.
    /// Returns the number of markers placed.
    pub async fn load_houses(&mut self, center: &Coordinates) -> usize {
        match self.houses.search(center).await {
            Ok(houses) => self.map.render_houses(&houses, |house| {
                info!(house = %house.id, url = %house.url, "House listing selected");
            }),
            Err(e) => {
                warn!("Failed to load houses: {}", e);
                0
            }
        }
    }
}

/// Where the map starts
///
/// The user's position when geolocation is enabled and succeeds, otherwise
/// the configured default center.
pub async fn initial_center<G: Geolocator>(config: &Config, locator: &G) -> Coordinates {
    let fallback = config.default_center();
    if !config.map.use_geolocation {
        debug!("Geolocation disabled, using default center");
        return fallback;
    }
    resolve_center(locator, fallback).await
}
