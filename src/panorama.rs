//! Panorama state holder
//!
//! A single "currently selected photo" cell that anyone can observe.
//! Subscribers get the current value as soon as they subscribe, then every
//! value the cell is set to, in order, including repeated clears.

use crate::model::{Coordinates, Photo};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::debug;

/// What the cell holds: a photo or nothing
pub type SelectedPhoto = Option<Arc<Photo>>;

/// Shared handle to the selected-photo cell
///
/// Clones refer to the same cell.
#[derive(Debug, Clone, Default)]
pub struct PanoramaState {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    current: SelectedPhoto,
    subscribers: Vec<UnboundedSender<SelectedPhoto>>,
    catalog: Vec<Arc<Photo>>,
}

/// Receiving end of a subscription
#[derive(Debug)]
pub struct Subscription {
    rx: UnboundedReceiver<SelectedPhoto>,
}

impl Subscription {
    /// Wait for the next published value
    ///
    /// Returns None once every handle to the cell has been dropped.
    pub async fn next(&mut self) -> Option<SelectedPhoto> {
        self.rx.recv().await
    }

    /// Next already-published value, if any
    pub fn try_next(&mut self) -> Option<SelectedPhoto> {
        self.rx.try_recv().ok()
    }
}

impl PanoramaState {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Select `photo` and notify subscribers
    pub fn show(&self, photo: impl Into<Arc<Photo>>) {
        let photo = photo.into();
        debug!(photo = %photo.id, "Showing photo");
        self.publish(Some(photo));
    }

    /// Drop the selection and notify subscribers
    pub fn clear(&self) {
        debug!("Clearing selected photo");
        self.publish(None);
    }

    /// Set the cell to `photo`, which may be empty
    pub fn set(&self, photo: SelectedPhoto) {
        match photo {
            Some(photo) => self.show(photo),
            None => self.clear(),
        }
    }

    fn publish(&self, value: SelectedPhoto) {
        let mut inner = self.lock();
        inner.current = value.clone();
        // Closed receivers are pruned here
        inner
            .subscribers
            .retain(|tx| tx.send(value.clone()).is_ok());
    }

    /// The current selection
    pub fn current(&self) -> SelectedPhoto {
        self.lock().current.clone()
    }

    /// Subscribe to selection changes, starting with the current value
    pub fn subscribe(&self) -> Subscription {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut inner = self.lock();
        // Cannot fail: rx is alive
        let _ = tx.send(inner.current.clone());
        inner.subscribers.push(tx);
        Subscription { rx }
    }

    /// Number of live subscribers (as of the last publish)
    pub fn subscriber_count(&self) -> usize {
        self.lock().subscribers.len()
    }

    /// Navigation intent: step forward along the street
    ///
    /// No target-selection rule exists yet, so the selection never changes.
    pub fn move_forward(&self) {
        self.log_intent("forward");
    }

    /// Navigation intent: step backward along the street
    pub fn move_backward(&self) {
        self.log_intent("backward");
    }

    /// Navigation intent: turn left outside of 360° viewing
    pub fn turn_left(&self) {
        self.log_intent("left");
    }

    /// Navigation intent: turn right outside of 360° viewing
    pub fn turn_right(&self) {
        self.log_intent("right");
    }

    fn log_intent(&self, intent: &str) {
        if let Some(photo) = self.current() {
            debug!(photo = %photo.id, intent, "Navigation intent ignored");
        }
    }

    /// Remember a photo so it can be looked up later
    pub fn add_photo(&self, photo: impl Into<Arc<Photo>>) {
        self.lock().catalog.push(photo.into());
    }

    /// Every remembered photo, in insertion order
    pub fn all_photos(&self) -> Vec<Arc<Photo>> {
        self.lock().catalog.clone()
    }

    /// Look up a remembered photo by id
    pub fn photo_by_id(&self, id: &str) -> Option<Arc<Photo>> {
        self.lock().catalog.iter().find(|p| p.id == id).cloned()
    }

    /// Remembered photos taken exactly at `position` (radius ignored)
    pub fn photos_at(&self, position: &Coordinates) -> Vec<Arc<Photo>> {
        self.lock()
            .catalog
            .iter()
            .filter(|p| {
                p.coordinates.latitude == position.latitude
                    && p.coordinates.longitude == position.longitude
            })
            .cloned()
            .collect()
    }
}
