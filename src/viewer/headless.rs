//! Panorama engine without a display
//!
//! Keeps the view parameters a real engine would hold and records instance
//! lifecycles. Drives the `view` command and the viewer tests.

use crate::model::PanoramaType;
use crate::viewer::{
    ContainerHandle, EngineError, ImageBlob, PanoramaEngine, PanoramaInstance, ViewParams,
};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

/// Lifecycle record shared by an engine and its instances
#[derive(Debug, Default)]
pub struct EngineLog {
    /// Instance ids in creation order
    pub created: Vec<u64>,
    /// Instance ids in destruction order
    pub destroyed: Vec<u64>,
    /// Attempts that failed with `NotLoaded`
    pub not_loaded: usize,
}

impl EngineLog {
    /// Instances created and not yet destroyed
    pub fn live(&self) -> usize {
        self.created.len() - self.destroyed.len()
    }
}

#[derive(Debug, Default)]
struct Shared {
    log: EngineLog,
    next_id: u64,
    pending_not_loaded: usize,
    failure: Option<String>,
}

/// Headless engine
#[derive(Debug, Clone, Default)]
pub struct HeadlessEngine {
    shared: Arc<Mutex<Shared>>,
}

impl HeadlessEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report `NotLoaded` for the next `attempts` creations
    pub fn not_loaded_for(self, attempts: usize) -> Self {
        self.lock().pending_not_loaded = attempts;
        self
    }

    /// Fail every creation with `message`
    pub fn failing(self, message: impl Into<String>) -> Self {
        self.lock().failure = Some(message.into());
        self
    }

    fn lock(&self) -> MutexGuard<'_, Shared> {
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` against the lifecycle record
    pub fn with_log<R>(&self, f: impl FnOnce(&EngineLog) -> R) -> R {
        f(&self.lock().log)
    }
}

impl PanoramaEngine for HeadlessEngine {
    type Instance = HeadlessInstance;

    fn create(
        &self,
        container: &ContainerHandle,
        image: &ImageBlob,
        panorama_type: PanoramaType,
        view: ViewParams,
    ) -> std::result::Result<HeadlessInstance, EngineError> {
        let mut shared = self.lock();

        if shared.pending_not_loaded > 0 {
            shared.pending_not_loaded -= 1;
            shared.log.not_loaded += 1;
            return Err(EngineError::NotLoaded);
        }
        if let Some(message) = &shared.failure {
            return Err(EngineError::Internal(message.clone()));
        }
        if image.is_empty() {
            return Err(EngineError::Internal(format!("{} is empty", image.source)));
        }

        shared.next_id += 1;
        let id = shared.next_id;
        shared.log.created.push(id);
        debug!(
            instance = id,
            container = %container.0,
            ?panorama_type,
            bytes = image.len(),
            "Panorama instance created"
        );

        Ok(HeadlessInstance {
            id,
            view,
            shared: Arc::clone(&self.shared),
        })
    }
}

/// One headless panorama
#[derive(Debug)]
pub struct HeadlessInstance {
    id: u64,
    view: ViewParams,
    shared: Arc<Mutex<Shared>>,
}

impl HeadlessInstance {
    pub fn id(&self) -> u64 {
        self.id
    }
}

impl PanoramaInstance for HeadlessInstance {
    fn view(&self) -> ViewParams {
        self.view
    }

    fn set_view(&mut self, view: ViewParams) {
        self.view = view;
    }

    fn destroy(self) {
        let mut shared = self.shared.lock().unwrap_or_else(PoisonError::into_inner);
        shared.log.destroyed.push(self.id);
        debug!(instance = self.id, "Panorama instance destroyed");
    }
}
