//! Device location as a cancellable subscription.
//!
//! The platform side holds a [`LocationPublisher`] and pushes fixes or errors into it; the
//! engine holds the matching [`LocationWatch`]. The channel only keeps the latest event, so
//! a slow consumer simply sees the most recent position. Dropping or cancelling the watch
//! tears the subscription down and the publisher observes it through
//! [`LocationPublisher::is_closed`].

use futures::Stream;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::watch;
use urbain_data::Coordinates;

/// Why a position could not be obtained.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeoError {
    #[error("Permission de localisation refusée")]
    PermissionDenied,
    #[error("Position indisponible")]
    PositionUnavailable,
    #[error("Délai de localisation dépassé")]
    Timeout,
}

impl GeoError {
    /// Map a browser `GeolocationPositionError.code`.
    #[must_use]
    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            1 => Some(Self::PermissionDenied),
            2 => Some(Self::PositionUnavailable),
            3 => Some(Self::Timeout),
            _ => None,
        }
    }

    #[must_use]
    pub fn code(self) -> u16 {
        match self {
            Self::PermissionDenied => 1,
            Self::PositionUnavailable => 2,
            Self::Timeout => 3,
        }
    }
}

pub type LocationEvent = Result<Coordinates, GeoError>;

/// What the UI shows about the device position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub enum LocationStatus {
    #[default]
    Idle,
    Locating,
    Located(Coordinates),
    Failed(GeoError),
}

impl LocationStatus {
    #[must_use]
    pub fn coords(&self) -> Option<Coordinates> {
        match self {
            Self::Located(coords) => Some(*coords),
            _ => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<GeoError> {
        match self {
            Self::Failed(error) => Some(*error),
            _ => None,
        }
    }
}

impl From<LocationEvent> for LocationStatus {
    fn from(event: LocationEvent) -> Self {
        match event {
            Ok(coords) => Self::Located(coords),
            Err(error) => Self::Failed(error),
        }
    }
}

/// Create a connected publisher/watch pair.
#[must_use]
pub fn location_channel() -> (LocationPublisher, LocationWatch) {
    let (tx, rx) = watch::channel(None);
    (LocationPublisher { tx }, LocationWatch { rx })
}

/// Producer half, owned by whatever reads the device position.
#[derive(Debug)]
pub struct LocationPublisher {
    tx: watch::Sender<Option<LocationEvent>>,
}

impl LocationPublisher {
    /// Replace the current event. Returns `false` once the watch is gone.
    pub fn publish(&self, event: LocationEvent) -> bool {
        self.tx.send(Some(event)).is_ok()
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }

    /// Resolves when the subscriber cancels or is dropped.
    pub async fn closed(&self) {
        self.tx.closed().await;
    }
}

/// Consumer half, owned by the engine.
#[derive(Debug)]
pub struct LocationWatch {
    rx: watch::Receiver<Option<LocationEvent>>,
}

impl LocationWatch {
    /// Wait for the next event not yet seen. `None` once the publisher is gone.
    pub async fn next(&mut self) -> Option<LocationEvent> {
        loop {
            if self.rx.changed().await.is_err() {
                return None;
            }
            if let Some(event) = *self.rx.borrow_and_update() {
                return Some(event);
            }
        }
    }

    /// The most recent event, seen or not.
    #[must_use]
    pub fn latest(&self) -> Option<LocationEvent> {
        *self.rx.borrow()
    }

    /// End the subscription.
    pub fn cancel(self) {
        drop(self);
    }

    pub fn into_stream(self) -> impl Stream<Item = LocationEvent> {
        futures::stream::unfold(self, |mut watch| async move {
            watch.next().await.map(|event| (event, watch))
        })
    }
}
