//! Core type definitions for the application

use std::fmt;

/// Server-side filter applied to a search
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Category {
    #[default]
    All,
    Music,
    Software,
    EBooks,
}

impl Category {
    pub const ALL: [Category; 4] = [Category::All, Category::Music, Category::Software, Category::EBooks];

    /// Value of the `entity` query parameter. `All` sends an empty filter.
    pub fn entity_token(self) -> &'static str {
        match self {
            Category::All => "",
            Category::Music => "musicTrack",
            Category::Software => "software",
            Category::EBooks => "ebook",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::All => "All",
            Category::Music => "Music",
            Category::Software => "Software",
            Category::EBooks => "E-books",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Category::All => Category::Music,
            Category::Music => Category::Software,
            Category::Software => Category::EBooks,
            Category::EBooks => Category::All,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Category::All => Category::EBooks,
            Category::Music => Category::All,
            Category::Software => Category::Music,
            Category::EBooks => Category::Software,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One user-initiated search. Built fresh for every submit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchQuery {
    free_text: String,
    category: Category,
}

impl SearchQuery {
    pub fn new(free_text: impl Into<String>, category: Category) -> Self {
        Self {
            free_text: free_text.into(),
            category,
        }
    }

    /// Blank queries are ignored by the search coordinator.
    pub fn is_blank(&self) -> bool {
        self.free_text.trim().is_empty()
    }

    pub fn free_text(&self) -> &str {
        &self.free_text
    }

    pub fn category(&self) -> Category {
        self.category
    }
}

/// Which part of the UI has keyboard focus
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ActiveSection {
    #[default]
    Search,
    Results,
}

impl ActiveSection {
    pub fn toggle(self) -> Self {
        match self {
            ActiveSection::Search => ActiveSection::Results,
            ActiveSection::Results => ActiveSection::Search,
        }
    }
}

/// UI state for the application
#[derive(Clone, Debug, Default)]
pub struct UiState {
    pub active_section: ActiveSection,
    pub search_input: String,
    pub category: Category,
    /// Set once the first search was submitted
    pub has_searched: bool,
    pub selected: usize,
    /// Index of the first record shown in the results list
    pub scroll_offset: usize,
    /// How many result rows fit on screen
    pub visible_rows: usize,
    pub error_message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_detection() {
        assert!(SearchQuery::new("", Category::All).is_blank());
        assert!(SearchQuery::new("   ", Category::Music).is_blank());

        let query = SearchQuery::new("metallica", Category::Music);
        assert!(!query.is_blank());
        assert_eq!(query.free_text(), "metallica");
        assert_eq!(query.category(), Category::Music);
    }

    #[test]
    fn entity_tokens() {
        assert_eq!(Category::All.entity_token(), "");
        assert_eq!(Category::Music.entity_token(), "musicTrack");
        assert_eq!(Category::Software.entity_token(), "software");
        assert_eq!(Category::EBooks.entity_token(), "ebook");
    }

    #[test]
    fn category_cycles_both_ways() {
        for category in Category::ALL {
            assert_eq!(category.next().prev(), category);
        }
        assert_eq!(Category::EBooks.next(), Category::All);
    }
}
