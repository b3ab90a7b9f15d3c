//! Coordinator module - one live fetch per logical slot
//!
//! - `search`: the current search request and its result state
//! - `slot_image`: artwork fetch for a single visible result row
//!
//! Network tasks never touch coordinator state. They send a [`Delivery`]
//! over an unbounded channel, and the consumer loop hands it back to the
//! coordinator that started the fetch.

mod search;
mod slot_image;

use tokio::sync::mpsc;

use crate::fetch::{FetchId, FetchOutcome};

pub use search::{SearchCoordinator, SearchView};
pub use slot_image::{ArtworkOutcome, SlotId, SlotImageCoordinator, SlotImageView};
#[cfg(test)]
pub(crate) use search::SEARCH_FAILED_MESSAGE;

/// A resolved fetch waiting to be applied on the consumer task
#[derive(Debug)]
pub enum Delivery {
    Search {
        fetch_id: FetchId,
        outcome: FetchOutcome,
    },
    /// Artwork arrives already decoded
    Image {
        slot: SlotId,
        fetch_id: FetchId,
        outcome: ArtworkOutcome,
    },
}

pub type DeliveryTx = mpsc::UnboundedSender<Delivery>;
pub type DeliveryRx = mpsc::UnboundedReceiver<Delivery>;

pub fn delivery_channel() -> (DeliveryTx, DeliveryRx) {
    mpsc::unbounded_channel()
}
