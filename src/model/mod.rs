//! Model module - Application state and data types
//!
//! This module contains the data structures the coordinators publish into
//! and the view reads from:
//!
//! - `types`: Core type definitions (queries, categories, UI state)
//! - `record`: Result records, payload decoding and ordering
//! - `state`: The search lifecycle state
//! - `thumbnail`: Decoded row artwork
//! - `app_model`: Main application model receiving coordinator events

mod types;
mod record;
mod state;
mod thumbnail;
mod app_model;

pub use types::{ActiveSection, Category, SearchQuery, UiState};

pub use record::{decode_sorted, ResultRecord};

pub use state::SearchState;

pub use thumbnail::{Thumbnail, THUMB_COLUMNS};

pub use app_model::AppModel;

#[cfg(test)]
pub(crate) use record::record;
#[cfg(test)]
pub(crate) use thumbnail::png_bytes;
