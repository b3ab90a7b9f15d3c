//! Key event handling

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::model::{ActiveSection, Category};
use super::AppController;

const PAGE_STEP: isize = 10;

impl AppController {
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        // Ctrl+C / Ctrl+Q quit from anywhere
        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q'))
        {
            self.model.set_should_quit(true);
            return;
        }

        // Handle error message first (blocks all other interactions)
        if self.model.has_error() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                self.model.clear_error();
            }
            return;
        }

        match self.model.active_section() {
            ActiveSection::Search => self.handle_search_key(key),
            ActiveSection::Results => self.handle_results_key(key),
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.perform_search(),
            KeyCode::Tab | KeyCode::BackTab => self.model.toggle_section(),
            KeyCode::Down => self.model.set_active_section(ActiveSection::Results),
            KeyCode::Esc => self.model.clear_search(),
            KeyCode::Backspace => self.model.backspace_search(),
            KeyCode::Left => self.change_category(self.model.category().prev()),
            KeyCode::Right => self.change_category(self.model.category().next()),
            KeyCode::Char(c) if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
                self.model.append_to_search(c);
            }
            _ => {}
        }
    }

    fn handle_results_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up => self.move_selection(-1),
            KeyCode::Down => self.move_selection(1),
            KeyCode::PageUp => self.move_selection(-PAGE_STEP),
            KeyCode::PageDown => self.move_selection(PAGE_STEP),
            KeyCode::Home => {
                self.model.select_first();
                self.sync_slots();
            }
            KeyCode::End => {
                self.model.select_last();
                self.sync_slots();
            }
            KeyCode::Left => self.change_category(self.model.category().prev()),
            KeyCode::Right => self.change_category(self.model.category().next()),
            KeyCode::Char(c @ '1'..='4') => {
                let index = c as usize - '1' as usize;
                self.change_category(Category::ALL[index]);
            }
            KeyCode::Tab | KeyCode::BackTab => self.model.toggle_section(),
            KeyCode::Esc | KeyCode::Char('/') => {
                self.model.set_active_section(ActiveSection::Search);
            }
            KeyCode::Enter => {
                if let Some(record) = self.model.selected_record() {
                    tracing::debug!(
                        name = %record.name,
                        url = %record.store_url,
                        artwork = %record.artwork_large,
                        "Result selected"
                    );
                }
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => self.model.set_should_quit(true),
            _ => {}
        }
    }

    fn move_selection(&mut self, delta: isize) {
        self.model.move_selection(delta);
        self.sync_slots();
    }

    /// Switch the category filter. A search that already ran is repeated
    /// with the new filter.
    fn change_category(&mut self, category: Category) {
        if category == self.model.category() {
            return;
        }
        self.model.set_category(category);
        if self.model.ui_state().has_searched {
            self.perform_search();
        }
    }
}
