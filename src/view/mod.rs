//! View module - UI rendering
//!
//! This module handles all UI rendering for the application using ratatui.
//! It is organized into submodules by component type:
//!
//! - `utils`: Shared utility functions (string fitting, artwork cells)
//! - `layout`: Top bar (search input, category tabs) and status line
//! - `content`: Results area rendering
//! - `overlays`: Modal overlays (error notification)

mod utils;
mod layout;
mod content;
mod overlays;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

use crate::model::AppModel;

/// Terminal lines used by one result row
pub const ROW_HEIGHT: u16 = 2;

pub struct AppView;

impl AppView {
    pub fn render(frame: &mut Frame, model: &AppModel) {
        let chunks = Self::split(frame.area());

        // Top bar: Search + Category
        layout::render_top_bar(frame, chunks[0], model.ui_state());

        // Middle: results
        content::render_results(frame, chunks[1], model);

        // Bottom: key hints
        layout::render_status_bar(frame, chunks[2], model);

        // Error notification overlay (if there's an error)
        if model.has_error() {
            overlays::render_error_notification(frame, model.ui_state());
        }
    }

    /// Number of result rows that fit in a terminal of the given size
    pub fn visible_rows(area: Rect) -> usize {
        let results = Self::split(area)[1];
        (results.height.saturating_sub(2) / ROW_HEIGHT) as usize
    }

    fn split(area: Rect) -> [Rect; 3] {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Search bar + category
                Constraint::Min(0),    // Results
                Constraint::Length(1), // Key hints
            ])
            .split(area);
        [chunks[0], chunks[1], chunks[2]]
    }
}
