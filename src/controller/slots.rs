//! Binding visible result rows to artwork slots
//!
//! Slot `i` always shows record `scroll_offset + i`. Only visible rows own a
//! slot, so the number of artwork fetches in flight never exceeds the number
//! of rows on screen.

use crate::coordinator::{SlotId, SlotImageCoordinator};

use super::AppController;

impl AppController {
    /// Resize the slot pool to the number of rows that fit on screen
    pub fn set_visible_rows(&mut self, rows: usize) {
        if rows == self.slots.len() && rows == self.model.ui_state().visible_rows {
            return;
        }
        tracing::debug!(rows, "Visible result rows changed");

        while self.slots.len() > rows {
            if let Some(mut slot) = self.slots.pop() {
                slot.release(&mut self.model);
            }
        }
        while self.slots.len() < rows {
            let slot = SlotId(self.slots.len());
            self.slots.push(SlotImageCoordinator::new(
                slot,
                self.fetcher.clone(),
                self.deliveries.clone(),
            ));
        }

        self.model.set_visible_rows(rows);
        self.sync_slots();
    }

    /// Re-bind every slot to the record currently shown in its row
    pub(crate) fn sync_slots(&mut self) {
        let uris: Vec<String> = self
            .model
            .visible_records()
            .iter()
            .map(|r| r.thumbnail_ref.clone())
            .collect();

        for (index, slot) in self.slots.iter_mut().enumerate() {
            match uris.get(index) {
                Some(uri) => slot.assign(uri, &mut self.model),
                None => slot.release(&mut self.model),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::controller::tests::{controller, drain, PAGE};
    use crate::coordinator::SlotId;
    use crate::fetch::testing::{Reply, ScriptedTransport};
    use crate::model::{png_bytes, SearchState};

    fn image_requests(transport: &ScriptedTransport) -> Vec<String> {
        transport
            .requests()
            .into_iter()
            .filter(|u| u.contains("img.test"))
            .collect()
    }

    #[tokio::test(start_paused = true)]
    async fn fetches_are_bounded_by_visible_rows() {
        let transport = ScriptedTransport::new();
        transport.respond("term=", Duration::ZERO, Reply::json(PAGE));
        transport.respond("img.test", Duration::from_secs(60), Reply::Body(png_bytes([0, 0, 0])));
        let (mut controller, mut rx) = controller(transport.clone());
        controller.set_visible_rows(1);

        controller.model.append_to_search('x');
        controller.perform_search();
        drain(&mut controller, &mut rx).await;

        assert_eq!(image_requests(&transport), vec!["http://img.test/a.png".to_string()]);
        assert!(controller.slots[0].current_fetch().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn scrolling_reassigns_slots() {
        let transport = ScriptedTransport::new();
        transport.respond("term=", Duration::ZERO, Reply::json(PAGE));
        transport.respond("img.test", Duration::from_secs(60), Reply::Body(png_bytes([0, 0, 0])));
        let (mut controller, mut rx) = controller(transport.clone());
        controller.set_visible_rows(2);

        controller.model.append_to_search('x');
        controller.perform_search();
        drain(&mut controller, &mut rx).await;
        let first = controller.slots[0].current_fetch();

        controller.model.move_selection(2);
        controller.sync_slots();

        assert_eq!(controller.slots[0].uri(), Some("http://img.test/b.png"));
        assert_eq!(controller.slots[1].uri(), Some("http://img.test/c.png"));
        assert_ne!(controller.slots[0].current_fetch(), first);
    }

    #[tokio::test(start_paused = true)]
    async fn new_search_releases_all_slots() {
        let transport = ScriptedTransport::new();
        transport.respond("term=", Duration::ZERO, Reply::json(PAGE));
        transport.respond("img.test", Duration::ZERO, Reply::Body(png_bytes([0, 0, 0])));
        let (mut controller, mut rx) = controller(transport);
        controller.set_visible_rows(3);

        controller.model.append_to_search('x');
        controller.perform_search();
        drain(&mut controller, &mut rx).await;
        drain(&mut controller, &mut rx).await;
        assert!(controller.model().thumbnail(SlotId(2)).is_some());

        controller.perform_search();
        assert_eq!(controller.model().search_state(), &SearchState::Loading);
        assert!(controller.slots.iter().all(|s| s.uri().is_none()));
        assert!(controller.model().thumbnail(SlotId(0)).is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn shrinking_drops_slots() {
        let transport = ScriptedTransport::new();
        transport.respond("term=", Duration::ZERO, Reply::json(PAGE));
        transport.respond("img.test", Duration::from_secs(60), Reply::Body(png_bytes([0, 0, 0])));
        let (mut controller, mut rx) = controller(transport);
        controller.set_visible_rows(3);
        controller.model.append_to_search('x');
        controller.perform_search();
        drain(&mut controller, &mut rx).await;

        controller.set_visible_rows(1);
        assert_eq!(controller.slots.len(), 1);
        assert_eq!(controller.model().ui_state().visible_rows, 1);
        assert_eq!(controller.slots[0].uri(), Some("http://img.test/a.png"));
    }
}
