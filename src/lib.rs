//! street-explorer: map-driven street photo explorer
//!
//! A library and CLI tool for finding geotagged street photos near a
//! location, laying them out as a route on a map and stepping through them
//! in a 360° panorama viewer.
//!
//! ## Features
//!
//! - Photo and house-listing search against a proxied backend
//! - Radius filtering and chronological ordering of results
//! - Route markers and polyline kept in sync with the latest query
//! - Observable "selected photo" state driving the panorama viewer
//! - JSON, text, GPX, GeoJSON and map-link output
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use street_explorer::explorer::Explorer;
//! use street_explorer::map::GeoJsonMap;
//! use street_explorer::panorama::PanoramaState;
//! use street_explorer::search::HttpTransport;
//! use street_explorer::Coordinates;
//! use std::time::Duration;
//!
//! # async fn demo() -> street_explorer::Result<()> {
//! let transport = HttpTransport::new("http://localhost:3000/api", Duration::from_secs(30))?;
//! let state = PanoramaState::new();
//! let mut explorer = Explorer::new(transport, GeoJsonMap::new(), state.clone());
//!
//! let center = Coordinates::new(40.4406, -79.9959).with_radius(10_000.0);
//! explorer.load_photos(&center).await?;
//!
//! if let Some(photo) = state.current() {
//!     println!("Selected {} taken at {}", photo.id, photo.timestamp);
//! }
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod explorer;
pub mod format;
pub mod geo;
pub mod map;
pub mod model;
pub mod panorama;
pub mod search;
pub mod viewer;

// Re-export commonly used types
pub use config::Config;
pub use error::{Error, Result};
pub use explorer::{Explorer, QueryOutcome};
pub use model::{Coordinates, House, Photo};
pub use panorama::PanoramaState;
