//! Main application model with state management
//!
//! Owned by the consumer loop. Coordinators publish into it through the
//! [`SearchView`] and [`SlotImageView`] traits, the view only reads it.

use std::collections::HashMap;

use crate::coordinator::{SearchView, SlotId, SlotImageView};

use super::record::ResultRecord;
use super::state::SearchState;
use super::thumbnail::Thumbnail;
use super::types::{ActiveSection, Category, SearchQuery, UiState};

/// Main application model containing all state
#[derive(Default)]
pub struct AppModel {
    ui_state: UiState,
    search_state: SearchState,
    thumbnails: HashMap<SlotId, Thumbnail>,
    should_quit: bool,
}

impl AppModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ui_state(&self) -> &UiState {
        &self.ui_state
    }

    pub fn search_state(&self) -> &SearchState {
        &self.search_state
    }

    pub fn thumbnail(&self, slot: SlotId) -> Option<&Thumbnail> {
        self.thumbnails.get(&slot)
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn set_should_quit(&mut self, quit: bool) {
        self.should_quit = quit;
    }

    // ========================================================================
    // Search input
    // ========================================================================

    pub fn append_to_search(&mut self, c: char) {
        self.ui_state.search_input.push(c);
    }

    pub fn backspace_search(&mut self) {
        self.ui_state.search_input.pop();
    }

    pub fn clear_search(&mut self) {
        self.ui_state.search_input.clear();
    }

    /// Query built from the current input and category
    pub fn current_query(&self) -> SearchQuery {
        SearchQuery::new(self.ui_state.search_input.clone(), self.ui_state.category)
    }

    pub fn mark_searched(&mut self) {
        self.ui_state.has_searched = true;
    }

    pub fn category(&self) -> Category {
        self.ui_state.category
    }

    pub fn set_category(&mut self, category: Category) {
        self.ui_state.category = category;
    }

    // ========================================================================
    // Focus & selection
    // ========================================================================

    pub fn active_section(&self) -> ActiveSection {
        self.ui_state.active_section
    }

    pub fn set_active_section(&mut self, section: ActiveSection) {
        self.ui_state.active_section = section;
    }

    pub fn toggle_section(&mut self) {
        self.ui_state.active_section = self.ui_state.active_section.toggle();
    }

    /// Move the highlighted row. Only loaded results are selectable.
    pub fn move_selection(&mut self, delta: isize) {
        let len = self.search_state.records().len();
        if len == 0 {
            return;
        }
        let target = self.ui_state.selected.saturating_add_signed(delta);
        self.ui_state.selected = target.min(len - 1);
        self.keep_selection_visible();
    }

    pub fn select_first(&mut self) {
        self.ui_state.selected = 0;
        self.keep_selection_visible();
    }

    pub fn select_last(&mut self) {
        self.ui_state.selected = self.search_state.records().len().saturating_sub(1);
        self.keep_selection_visible();
    }

    pub fn selected_record(&self) -> Option<&ResultRecord> {
        self.search_state.records().get(self.ui_state.selected)
    }

    pub fn set_visible_rows(&mut self, rows: usize) {
        self.ui_state.visible_rows = rows;
        self.keep_selection_visible();
    }

    /// Records currently on screen, in slot order
    pub fn visible_records(&self) -> &[ResultRecord] {
        let records = self.search_state.records();
        let start = self.ui_state.scroll_offset.min(records.len());
        let end = (start + self.ui_state.visible_rows).min(records.len());
        &records[start..end]
    }

    fn keep_selection_visible(&mut self) {
        let rows = self.ui_state.visible_rows.max(1);
        let state = &mut self.ui_state;
        if state.selected < state.scroll_offset {
            state.scroll_offset = state.selected;
        } else if state.selected >= state.scroll_offset + rows {
            state.scroll_offset = state.selected + 1 - rows;
        }
    }

    // ========================================================================
    // Error notification
    // ========================================================================

    pub fn set_error(&mut self, message: String) {
        self.ui_state.error_message = Some(message);
    }

    pub fn clear_error(&mut self) {
        self.ui_state.error_message = None;
    }

    pub fn has_error(&self) -> bool {
        self.ui_state.error_message.is_some()
    }
}

impl SearchView for AppModel {
    fn on_state_changed(&mut self, state: &SearchState) {
        self.search_state = state.clone();
        self.ui_state.selected = 0;
        self.ui_state.scroll_offset = 0;

        if matches!(state, SearchState::Loaded(_)) {
            // Switch to the results list once there is something to browse
            self.ui_state.active_section = ActiveSection::Results;
        }
    }

    fn on_error(&mut self, message: &str) {
        self.set_error(message.to_string());
    }
}

impl SlotImageView for AppModel {
    fn on_image_ready(&mut self, slot: SlotId, image: Thumbnail) {
        self.thumbnails.insert(slot, image);
    }

    fn on_placeholder(&mut self, slot: SlotId) {
        self.thumbnails.remove(&slot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::record;

    fn loaded(count: usize) -> AppModel {
        let mut model = AppModel::new();
        let records = (0..count).map(|i| record(&format!("item {:02}", i), "artist")).collect();
        model.on_state_changed(&SearchState::Loaded(records));
        model
    }

    #[test]
    fn results_take_focus_and_reset_selection() {
        let mut model = loaded(5);
        assert_eq!(model.active_section(), ActiveSection::Results);
        model.move_selection(3);
        assert_eq!(model.ui_state().selected, 3);

        model.on_state_changed(&SearchState::Loading);
        assert_eq!(model.ui_state().selected, 0);
        assert!(model.visible_records().is_empty());
    }

    #[test]
    fn selection_is_clamped() {
        let mut model = loaded(3);
        model.set_visible_rows(10);
        model.move_selection(-4);
        assert_eq!(model.ui_state().selected, 0);
        model.move_selection(40);
        assert_eq!(model.ui_state().selected, 2);
        assert_eq!(model.selected_record().unwrap().name, "item 02");
    }

    #[test]
    fn scrolling_follows_selection() {
        let mut model = loaded(20);
        model.set_visible_rows(4);
        model.move_selection(6);
        assert_eq!(model.ui_state().scroll_offset, 3);
        assert_eq!(model.visible_records().len(), 4);
        assert_eq!(model.visible_records()[0].name, "item 03");

        model.move_selection(-5);
        assert_eq!(model.ui_state().scroll_offset, 1);

        model.select_last();
        assert_eq!(model.ui_state().scroll_offset, 16);
        model.select_first();
        assert_eq!(model.ui_state().scroll_offset, 0);
    }

    #[test]
    fn no_selection_without_results() {
        let mut model = AppModel::new();
        model.on_state_changed(&SearchState::Empty);
        model.move_selection(1);
        assert_eq!(model.ui_state().selected, 0);
        assert!(model.selected_record().is_none());
        assert_eq!(model.active_section(), ActiveSection::Search);
    }

    #[test]
    fn errors_are_sticky_until_cleared() {
        let mut model = AppModel::new();
        model.on_error("first");
        assert!(model.has_error());
        model.on_error("second");
        assert_eq!(model.ui_state().error_message.as_deref(), Some("second"));
        model.clear_error();
        assert!(!model.has_error());
    }

    #[test]
    fn thumbnails_follow_slot_events() {
        let mut model = AppModel::new();
        let image = Thumbnail::decode(&crate::model::png_bytes([0, 0, 255])).unwrap();
        model.on_image_ready(SlotId(1), image);
        assert!(model.thumbnail(SlotId(1)).is_some());
        model.on_placeholder(SlotId(1));
        assert!(model.thumbnail(SlotId(1)).is_none());
    }
}
