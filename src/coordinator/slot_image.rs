//! Artwork fetch for one visible result row

use std::fmt;

use url::Url;

use crate::error::FetchError;
use crate::fetch::{FetchHandle, FetchId, FetchOutcome, FetchRequest, Fetcher};
use crate::model::Thumbnail;

use super::{Delivery, DeliveryTx};

/// Artwork fetch result. Decoding happens in the fetch task, so the
/// consumer only ever receives a finished thumbnail.
#[derive(Debug)]
pub enum ArtworkOutcome {
    Ready(Thumbnail),
    /// The bytes arrived but are not a supported image
    Undecodable(image::ImageError),
    Failed(FetchError),
    Cancelled,
}

impl ArtworkOutcome {
    pub fn decode(outcome: FetchOutcome) -> Self {
        match outcome {
            FetchOutcome::Payload(bytes) => match Thumbnail::decode(&bytes) {
                Ok(image) => ArtworkOutcome::Ready(image),
                Err(e) => ArtworkOutcome::Undecodable(e),
            },
            FetchOutcome::Failed(e) => ArtworkOutcome::Failed(e),
            FetchOutcome::Cancelled => ArtworkOutcome::Cancelled,
        }
    }
}

/// Position of a row slot in the visible part of the results list
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId(pub usize);

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Receives artwork events on the consumer task
pub trait SlotImageView {
    fn on_image_ready(&mut self, slot: SlotId, image: Thumbnail);
    /// The slot lost its data; show the placeholder again
    fn on_placeholder(&mut self, slot: SlotId);
}

pub struct SlotImageCoordinator {
    slot: SlotId,
    fetcher: Fetcher,
    deliveries: DeliveryTx,
    uri: Option<String>,
    in_flight: Option<FetchHandle>,
}

impl SlotImageCoordinator {
    pub fn new(slot: SlotId, fetcher: Fetcher, deliveries: DeliveryTx) -> Self {
        Self {
            slot,
            fetcher,
            deliveries,
            uri: None,
            in_flight: None,
        }
    }

    #[cfg(test)]
    pub fn uri(&self) -> Option<&str> {
        self.uri.as_deref()
    }

    pub fn current_fetch(&self) -> Option<FetchId> {
        self.in_flight.as_ref().map(FetchHandle::id)
    }

    /// Bind the slot to new artwork. Re-assigning the URI the slot already
    /// shows or is fetching does nothing.
    pub fn assign(&mut self, uri: &str, view: &mut impl SlotImageView) {
        if self.uri.as_deref() == Some(uri) {
            return;
        }
        self.release(view);
        self.uri = Some(uri.to_string());

        let url = match Url::parse(uri) {
            Ok(url) => url,
            Err(e) => {
                tracing::debug!(slot = %self.slot, uri, error = %e, "Unusable artwork URI, keeping placeholder");
                return;
            }
        };

        let slot = self.slot;
        let deliveries = self.deliveries.clone();
        let handle = self.fetcher.start(FetchRequest::get(url), move |fetch_id, outcome| {
            let _ = deliveries.send(Delivery::Image {
                slot,
                fetch_id,
                outcome: ArtworkOutcome::decode(outcome),
            });
        });
        tracing::trace!(slot = %self.slot, fetch_id = %handle.id(), uri, "Artwork fetch started");
        self.in_flight = Some(handle);
    }

    /// Drop the slot's data. Cancels any pending fetch.
    pub fn release(&mut self, view: &mut impl SlotImageView) {
        if let Some(handle) = self.in_flight.take() {
            handle.cancel();
        }
        if self.uri.take().is_some() {
            view.on_placeholder(self.slot);
        }
    }

    /// Apply a finished artwork fetch. A failed fetch forgets its URI so the
    /// next assignment of the same row retries it; undecodable bytes keep
    /// the URI since refetching would not change them.
    pub fn deliver(&mut self, fetch_id: FetchId, outcome: ArtworkOutcome, view: &mut impl SlotImageView) {
        if self.current_fetch() != Some(fetch_id) {
            tracing::trace!(slot = %self.slot, fetch_id = %fetch_id, "Discarding stale artwork");
            return;
        }
        self.in_flight = None;

        match outcome {
            ArtworkOutcome::Ready(image) => view.on_image_ready(self.slot, image),
            ArtworkOutcome::Undecodable(e) => {
                tracing::debug!(slot = %self.slot, error = %e, "Artwork is not a usable image");
            }
            ArtworkOutcome::Failed(e) => {
                tracing::debug!(slot = %self.slot, cause = e.kind(), error = %e, "Artwork fetch failed");
                self.uri = None;
            }
            ArtworkOutcome::Cancelled => {}
        }
    }
}
