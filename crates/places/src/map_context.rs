//! Read-only access to the map the search is scoped to.
//!
//! The map component owns its context; adapters only hold a shared handle and
//! ask for the current center when a search starts. A map that is still
//! initializing may not know its center yet, so reading it suspends until the
//! first center is published.

use geomap_types::LatLng;
use thiserror::Error;
use tokio::sync::watch;

/// Supplies the view center used to bias searches.
#[async_trait::async_trait]
pub trait MapContext: Send + Sync {
    /// Current view center, waiting for the map to publish one if needed.
    async fn center(&self) -> Result<LatLng, MapContextError>;
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum MapContextError {
    #[error("map was detached before a center became available")]
    Detached,
}

/// A map context whose center never changes.
#[derive(Debug, Clone, Copy)]
pub struct FixedCenter(pub LatLng);

#[async_trait::async_trait]
impl MapContext for FixedCenter {
    async fn center(&self) -> Result<LatLng, MapContextError> {
        Ok(self.0)
    }
}

/// Map context fed by a live map widget through a [`MapViewHandle`].
#[derive(Debug, Clone)]
pub struct MapView {
    receiver: watch::Receiver<Option<LatLng>>,
}

/// Publishing side of a [`MapView`], held by the map widget.
///
/// Dropping the handle before any center was published makes pending and
/// future `center` calls fail with [`MapContextError::Detached`].
#[derive(Debug)]
pub struct MapViewHandle {
    sender: watch::Sender<Option<LatLng>>,
}

impl MapView {
    /// Create a view, optionally with an already known center.
    pub fn new(initial: Option<LatLng>) -> (MapViewHandle, MapView) {
        let (sender, receiver) = watch::channel(initial);
        (MapViewHandle { sender }, MapView { receiver })
    }

    /// Center if one has been published, without waiting.
    pub fn current(&self) -> Option<LatLng> {
        *self.receiver.borrow()
    }
}

impl MapViewHandle {
    pub fn set_center(&self, center: LatLng) {
        self.sender.send_replace(Some(center));
    }
}

#[async_trait::async_trait]
impl MapContext for MapView {
    async fn center(&self) -> Result<LatLng, MapContextError> {
        let mut receiver = self.receiver.clone();
        let published = receiver
            .wait_for(Option::is_some)
            .await
            .map_err(|_| MapContextError::Detached)?;
        (*published).ok_or(MapContextError::Detached)
    }
}
