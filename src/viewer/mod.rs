//! Panorama viewer
//!
//! Follows the selected-photo cell and keeps exactly one live engine instance
//! for whatever is selected. The 360° engine is external and known only
//! through `PanoramaEngine`; image bytes come through an `ImageFetcher`.
//!
//! ## States
//! `Empty` → `Loading` → `Displaying` | `Error`, and back to `Empty` when the
//! selection is cleared. Keyboard navigation is bound only while
//! `Displaying`.

pub mod controls;
pub mod fetch;
pub mod headless;

pub use controls::{NavKey, ViewInfo, ViewParams};
pub use fetch::{HttpImageFetcher, ImageBlob, ImageFetcher};
pub use headless::HeadlessEngine;

use crate::constants::view::{DEFAULT_HFOV, KEY_STEP, TURN_STEP};
use crate::model::{PanoramaType, Photo};
use crate::panorama::{SelectedPhoto, Subscription};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Delay before the single retry when the engine is not loaded yet
const ENGINE_RETRY_DELAY: Duration = Duration::from_millis(100);

/// Where the engine draws
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerHandle(pub String);

impl Default for ContainerHandle {
    fn default() -> Self {
        Self("panorama-viewer".to_string())
    }
}

/// Why an engine could not build an instance
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("Panorama engine is not loaded yet")]
    NotLoaded,

    #[error("{0}")]
    Internal(String),
}

/// A live panorama drawn by an engine
pub trait PanoramaInstance: Send {
    fn view(&self) -> ViewParams;

    fn set_view(&mut self, view: ViewParams);

    /// Tear the instance down; consumes it so it cannot be destroyed twice
    fn destroy(self);
}

/// An external 360° panorama engine
pub trait PanoramaEngine: Send + Sync {
    type Instance: PanoramaInstance;

    fn create(
        &self,
        container: &ContainerHandle,
        image: &ImageBlob,
        panorama_type: PanoramaType,
        view: ViewParams,
    ) -> std::result::Result<Self::Instance, EngineError>;
}

/// Viewer lifecycle state
#[derive(Debug, Clone, PartialEq)]
pub enum ViewerState {
    Empty,
    Loading,
    Displaying,
    Error(String),
}

/// Panorama viewer bound to one container
pub struct PanoramaViewer<E: PanoramaEngine, F> {
    engine: E,
    fetcher: F,
    container: ContainerHandle,
    retry_delay: Duration,
    hfov: f64,
    state: ViewerState,
    photo: Option<Arc<Photo>>,
    instance: Option<E::Instance>,
    image: Option<ImageBlob>,
    keys_bound: bool,
}

impl<E: PanoramaEngine, F: ImageFetcher> PanoramaViewer<E, F> {
    pub fn new(engine: E, fetcher: F) -> Self {
        Self {
            engine,
            fetcher,
            container: ContainerHandle::default(),
            retry_delay: ENGINE_RETRY_DELAY,
            hfov: DEFAULT_HFOV,
            state: ViewerState::Empty,
            photo: None,
            instance: None,
            image: None,
            keys_bound: false,
        }
    }

    pub fn with_container(mut self, container: ContainerHandle) -> Self {
        self.container = container;
        self
    }

    /// Field of view each photo opens with
    pub fn with_hfov(mut self, hfov: f64) -> Self {
        self.hfov = hfov;
        self
    }

    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    pub fn state(&self) -> &ViewerState {
        &self.state
    }

    /// The photo being loaded or displayed
    pub fn photo(&self) -> Option<&Arc<Photo>> {
        self.photo.as_ref()
    }

    /// The image backing the displayed panorama
    pub fn image(&self) -> Option<&ImageBlob> {
        self.image.as_ref()
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn keyboard_bound(&self) -> bool {
        self.keys_bound
    }

    /// Follow `subscription` until the state holder goes away
    pub async fn run(&mut self, mut subscription: Subscription) {
        while let Some(selected) = subscription.next().await {
            self.apply(selected).await;
        }
        debug!("Selection closed, tearing down viewer");
        self.teardown();
        self.state = ViewerState::Empty;
    }

    /// React to one published selection
    pub async fn apply(&mut self, selected: SelectedPhoto) {
        match selected {
            Some(photo) => self.load(photo).await,
            None => {
                self.teardown();
                self.state = ViewerState::Empty;
            }
        }
    }

    async fn load(&mut self, photo: Arc<Photo>) {
        info!(photo = %photo.id, url = %photo.url, "Loading panorama");
        self.unbind_keys();
        self.state = ViewerState::Loading;
        self.photo = Some(Arc::clone(&photo));

        let fetched = self.fetcher.fetch(&photo.url).await;
        let image = match fetched {
            Ok(image) => image,
            Err(e) => return self.fail(photo, e.to_string()),
        };

        self.destroy_instance();
        let view = self.initial_view(&photo);
        let panorama_type = photo.panorama_type.unwrap_or_default();

        let created = self.create_instance(&image, panorama_type, view).await;
        match created {
            Ok(instance) => {
                self.instance = Some(instance);
                if let Some(old) = self.image.replace(image) {
                    debug!(source = %old.source, "Released superseded image");
                }
                self.state = ViewerState::Displaying;
                self.keys_bound = true;
            }
            Err(e) => self.fail(photo, e.to_string()),
        }
    }

    /// Create an instance, retrying once if the engine is still loading
    async fn create_instance(
        &self,
        image: &ImageBlob,
        panorama_type: PanoramaType,
        view: ViewParams,
    ) -> std::result::Result<E::Instance, EngineError> {
        match self.engine.create(&self.container, image, panorama_type, view) {
            Err(EngineError::NotLoaded) => {
                warn!("Panorama engine not loaded, retrying in {:?}", self.retry_delay);
                tokio::time::sleep(self.retry_delay).await;
                self.engine.create(&self.container, image, panorama_type, view)
            }
            other => other,
        }
    }

    fn fail(&mut self, photo: Arc<Photo>, message: String) {
        error!(photo = %photo.id, "Failed to display panorama: {}", message);
        self.teardown();
        self.photo = Some(photo);
        self.state = ViewerState::Error(message);
    }

    fn destroy_instance(&mut self) {
        if let Some(instance) = self.instance.take() {
            instance.destroy();
        }
    }

    fn unbind_keys(&mut self) {
        if self.keys_bound {
            debug!("Keyboard navigation unbound");
            self.keys_bound = false;
        }
    }

    fn teardown(&mut self) {
        self.unbind_keys();
        self.destroy_instance();
        self.image = None;
        self.photo = None;
    }

    fn update_view(&mut self, change: impl FnOnce(ViewParams) -> ViewParams) -> bool {
        if self.state != ViewerState::Displaying {
            return false;
        }
        let Some(instance) = self.instance.as_mut() else {
            return false;
        };
        let next = change(instance.view());
        instance.set_view(next);
        true
    }

    pub fn turn_left(&mut self) -> bool {
        self.update_view(|v| v.turned(-TURN_STEP))
    }

    pub fn turn_right(&mut self) -> bool {
        self.update_view(|v| v.turned(TURN_STEP))
    }

    pub fn zoom_in(&mut self) -> bool {
        self.update_view(|v| v.zoomed(-KEY_STEP))
    }

    pub fn zoom_out(&mut self) -> bool {
        self.update_view(|v| v.zoomed(KEY_STEP))
    }

    fn initial_view(&self, photo: &Photo) -> ViewParams {
        ViewParams {
            hfov: self.hfov,
            ..ViewParams::for_photo(photo)
        }
    }

    /// Back to the photo's initial yaw/pitch and field of view
    pub fn reset(&mut self) -> bool {
        let Some(photo) = self.photo.clone() else {
            return false;
        };
        let initial = self.initial_view(&photo);
        self.update_view(|_| initial)
    }

    /// Keyboard navigation; ignored unless bound
    pub fn handle_key(&mut self, key: NavKey) -> bool {
        if !self.keys_bound {
            return false;
        }
        self.update_view(|v| v.with_key(key))
    }

    /// Current view while displaying
    pub fn view_info(&self) -> Option<ViewInfo> {
        if self.state != ViewerState::Displaying {
            return None;
        }
        self.instance.as_ref().map(|instance| instance.view().into())
    }
}

impl<E: PanoramaEngine, F> Drop for PanoramaViewer<E, F> {
    fn drop(&mut self) {
        if let Some(instance) = self.instance.take() {
            instance.destroy();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Coordinates;
    use crate::panorama::PanoramaState;
    use crate::viewer::fetch::testing::StaticImages;
    use chrono::{TimeZone, Utc};

    fn photo(id: &str, yaw: f64) -> Arc<Photo> {
        let mut photo = Photo::new(
            id,
            format!("/api/photos/{}.jpg", id),
            Coordinates::new(40.4406, -79.9959),
            Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
        );
        photo.yaw = Some(yaw);
        Arc::new(photo)
    }

    fn new_viewer(engine: HeadlessEngine) -> PanoramaViewer<HeadlessEngine, StaticImages> {
        PanoramaViewer::new(engine, StaticImages::new()).with_retry_delay(Duration::ZERO)
    }

    #[tokio::test]
    async fn test_display_photo() {
        let mut viewer = new_viewer(HeadlessEngine::new());
        assert_eq!(viewer.state(), &ViewerState::Empty);
        assert!(!viewer.keyboard_bound());

        viewer.apply(Some(photo("a", 45.0))).await;

        assert_eq!(viewer.state(), &ViewerState::Displaying);
        assert!(viewer.keyboard_bound());
        assert_eq!(viewer.image().unwrap().source, "/api/photos/a.jpg");

        let info = viewer.view_info().unwrap();
        assert_eq!(info.yaw, 45.0);
        assert_eq!(info.pitch, 0.0);
        assert_eq!(info.zoom_percent, 83);
    }

    #[tokio::test]
    async fn test_each_instance_destroyed_exactly_once() {
        let engine = HeadlessEngine::new();
        let mut viewer = new_viewer(engine.clone());

        viewer.apply(Some(photo("a", 0.0))).await;
        viewer.apply(Some(photo("b", 0.0))).await;
        viewer.apply(None).await;
        viewer.apply(None).await;

        assert_eq!(viewer.state(), &ViewerState::Empty);
        assert!(!viewer.keyboard_bound());
        assert!(viewer.image().is_none());
        engine.with_log(|log| {
            assert_eq!(log.created, vec![1, 2]);
            assert_eq!(log.destroyed, vec![1, 2]);
        });
    }

    #[tokio::test]
    async fn test_fetch_failure_is_error_state() {
        let engine = HeadlessEngine::new();
        let fetcher = StaticImages::new().with_failure("/api/photos/broken.jpg");
        let mut viewer = PanoramaViewer::new(engine.clone(), fetcher);

        viewer.apply(Some(photo("a", 0.0))).await;
        viewer.apply(Some(photo("broken", 0.0))).await;

        assert!(matches!(viewer.state(), ViewerState::Error(msg) if msg.contains("404")));
        assert!(!viewer.keyboard_bound());
        assert!(viewer.view_info().is_none());
        assert_eq!(viewer.photo().unwrap().id, "broken");
        assert_eq!(engine.with_log(|log| log.live()), 0);
    }

    #[tokio::test]
    async fn test_engine_failure_is_error_state() {
        let mut viewer = new_viewer(HeadlessEngine::new().failing("WebGL unavailable"));
        viewer.apply(Some(photo("a", 0.0))).await;

        assert_eq!(viewer.state(), &ViewerState::Error("WebGL unavailable".to_string()));
        assert!(!viewer.turn_left());
    }

    #[tokio::test]
    async fn test_single_retry_when_engine_not_loaded() {
        let engine = HeadlessEngine::new().not_loaded_for(1);
        let mut viewer = new_viewer(engine.clone());
        viewer.apply(Some(photo("a", 0.0))).await;
        assert_eq!(viewer.state(), &ViewerState::Displaying);

        let engine = HeadlessEngine::new().not_loaded_for(2);
        let mut viewer = new_viewer(engine.clone());
        viewer.apply(Some(photo("a", 0.0))).await;
        assert!(matches!(viewer.state(), ViewerState::Error(_)));
        assert_eq!(engine.with_log(|log| log.not_loaded), 2);
    }

    #[tokio::test]
    async fn test_controls() {
        let mut viewer = new_viewer(HeadlessEngine::new());
        assert!(!viewer.zoom_in());

        viewer.apply(Some(photo("a", 170.0))).await;

        assert!(viewer.turn_right());
        assert_eq!(viewer.view_info().unwrap().yaw, -160.0);
        assert!(viewer.turn_left());
        assert!(viewer.turn_left());
        assert_eq!(viewer.view_info().unwrap().yaw, 140.0);

        for _ in 0..6 {
            viewer.zoom_in();
        }
        assert_eq!(viewer.view_info().unwrap().zoom_percent, 128);

        assert!(viewer.handle_key(NavKey::Up));
        assert!(viewer.reset());
        let info = viewer.view_info().unwrap();
        assert_eq!((info.yaw, info.pitch, info.zoom_percent), (170.0, 0.0, 83));
    }

    #[tokio::test]
    async fn test_configured_hfov() {
        let mut viewer = new_viewer(HeadlessEngine::new()).with_hfov(120.0);
        viewer.apply(Some(photo("a", 0.0))).await;
        assert_eq!(viewer.view_info().unwrap().zoom_percent, 50);

        viewer.zoom_in();
        viewer.reset();
        assert_eq!(viewer.view_info().unwrap().zoom_percent, 50);
    }

    #[tokio::test]
    async fn test_keys_ignored_after_clear() {
        let mut viewer = new_viewer(HeadlessEngine::new());
        viewer.apply(Some(photo("a", 0.0))).await;
        assert!(viewer.handle_key(NavKey::Left));

        viewer.apply(None).await;
        assert!(!viewer.handle_key(NavKey::Left));
        assert!(viewer.view_info().is_none());
    }

    #[tokio::test]
    async fn test_run_follows_subscription() {
        let engine = HeadlessEngine::new();
        let state = PanoramaState::new();
        let subscription = state.subscribe();

        state.show(photo("a", 0.0));
        state.show(photo("b", 0.0));
        drop(state);

        let mut viewer = new_viewer(engine.clone());
        viewer.run(subscription).await;

        assert_eq!(viewer.state(), &ViewerState::Empty);
        engine.with_log(|log| {
            assert_eq!(log.created.len(), 2);
            assert_eq!(log.live(), 0);
        });
    }

    #[tokio::test]
    async fn test_drop_destroys_instance() {
        let engine = HeadlessEngine::new();
        {
            let mut viewer = new_viewer(engine.clone());
            viewer.apply(Some(photo("a", 0.0))).await;
        }
        assert_eq!(engine.with_log(|log| log.destroyed.clone()), vec![1]);
    }
}
