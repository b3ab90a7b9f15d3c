//! Search lifecycle state

use super::record::ResultRecord;

/// The current search, as seen by the presentation layer
#[derive(Clone, Debug, Default, PartialEq)]
pub enum SearchState {
    /// Nothing searched yet
    #[default]
    Idle,
    Loading,
    /// Non-empty, sorted result page
    Loaded(Vec<ResultRecord>),
    /// The search succeeded but matched nothing
    Empty,
    /// The last search failed; kept distinct from `Idle`
    Failed(String),
}

impl SearchState {
    pub fn records(&self) -> &[ResultRecord] {
        match self {
            SearchState::Loaded(records) => records,
            _ => &[],
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, SearchState::Loading)
    }

    pub fn name(&self) -> &'static str {
        match self {
            SearchState::Idle => "idle",
            SearchState::Loading => "loading",
            SearchState::Loaded(_) => "loaded",
            SearchState::Empty => "empty",
            SearchState::Failed(_) => "failed",
        }
    }
}
