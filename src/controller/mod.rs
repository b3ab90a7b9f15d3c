//! Controller module - Application logic and event handling
//!
//! This module contains the application controller that handles user input,
//! routes fetch deliveries back to their coordinators, and keeps the row
//! slots bound to what is on screen. It is organized into submodules by
//! responsibility:
//!
//! - `input`: Key event handling
//! - `slots`: Binding visible result rows to artwork slots

mod input;
mod slots;

use crate::config::AppConfig;
use crate::coordinator::{Delivery, DeliveryTx, SearchCoordinator, SlotImageCoordinator};
use crate::fetch::Fetcher;
use crate::model::AppModel;

pub struct AppController {
    model: AppModel,
    search: SearchCoordinator,
    slots: Vec<SlotImageCoordinator>,
    fetcher: Fetcher,
    deliveries: DeliveryTx,
}

impl AppController {
    pub fn new(fetcher: Fetcher, config: &AppConfig, deliveries: DeliveryTx) -> Self {
        Self {
            model: AppModel::new(),
            search: SearchCoordinator::new(fetcher.clone(), config, deliveries.clone()),
            slots: Vec::new(),
            fetcher,
            deliveries,
        }
    }

    pub fn model(&self) -> &AppModel {
        &self.model
    }

    pub fn should_quit(&self) -> bool {
        self.model.should_quit()
    }

    /// Submit the search bar contents with the selected category
    pub fn perform_search(&mut self) {
        let query = self.model.current_query();
        tracing::debug!(query = query.free_text(), category = %query.category(), "Performing search");
        if self.search.submit(query, &mut self.model) {
            self.model.mark_searched();
        }
        self.sync_slots();
    }

    /// Apply a fetch outcome handed over by a network task
    pub fn handle_delivery(&mut self, delivery: Delivery) {
        match delivery {
            Delivery::Search { fetch_id, outcome } => {
                self.search.deliver(fetch_id, outcome, &mut self.model);
                self.sync_slots();
            }
            Delivery::Image {
                slot,
                fetch_id,
                outcome,
            } => match self.slots.get_mut(slot.0) {
                Some(coordinator) => coordinator.deliver(fetch_id, outcome, &mut self.model),
                None => tracing::trace!(slot = %slot, "Artwork for a slot that no longer exists"),
            },
        }
    }

    /// Cancel everything in flight before exit
    pub fn shutdown(&mut self) {
        self.search.cancel();
        for slot in &mut self.slots {
            slot.release(&mut self.model);
        }
        tracing::debug!("Controller shut down");
    }
}
