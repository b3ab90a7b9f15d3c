//! The current search request
//!
//! Every submit supersedes the previous one: the old fetch is cancelled and
//! its id forgotten. Outcomes are applied only if their fetch id is still
//! the one held here, so a slow reply to an older search can never replace
//! the state produced by a newer one, even if cancellation lost the race.

use std::time::Instant;

use url::Url;

use crate::config::AppConfig;
use crate::error::FetchError;
use crate::fetch::{FetchHandle, FetchId, FetchOutcome, FetchRequest, Fetcher};
use crate::model::{decode_sorted, ResultRecord, SearchQuery, SearchState};
use crate::{log_fetch_request, log_fetch_result};

use super::{Delivery, DeliveryTx};

pub const SEARCH_FAILED_MESSAGE: &str =
    "There was an error accessing the iTunes Store. Please try again.";

/// Receives search events on the consumer task
pub trait SearchView {
    fn on_state_changed(&mut self, state: &SearchState);
    /// One-shot notification, sent for every failed search
    fn on_error(&mut self, message: &str);
}

struct InFlight {
    handle: FetchHandle,
    query: SearchQuery,
    started_at: Instant,
}

pub struct SearchCoordinator {
    fetcher: Fetcher,
    endpoint: Url,
    page_limit: u32,
    deliveries: DeliveryTx,
    state: SearchState,
    in_flight: Option<InFlight>,
}

impl SearchCoordinator {
    pub fn new(fetcher: Fetcher, config: &AppConfig, deliveries: DeliveryTx) -> Self {
        Self {
            fetcher,
            endpoint: config.endpoint.clone(),
            page_limit: config.page_limit,
            deliveries,
            state: SearchState::Idle,
            in_flight: None,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> &SearchState {
        &self.state
    }

    #[cfg(test)]
    pub fn current_fetch(&self) -> Option<FetchId> {
        self.in_flight.as_ref().map(|f| f.handle.id())
    }

    /// Start a new search. Blank queries are ignored and return `false`.
    ///
    /// `Loading` is published before this returns.
    pub fn submit(&mut self, query: SearchQuery, view: &mut impl SearchView) -> bool {
        if query.is_blank() {
            tracing::trace!("Ignoring blank search");
            return false;
        }

        if let Some(previous) = self.in_flight.take() {
            previous.handle.cancel();
            tracing::debug!(
                fetch_id = %previous.handle.id(),
                query = previous.query.free_text(),
                "Search superseded"
            );
        }

        self.set_state(SearchState::Loading, view);

        let request = build_request(&self.endpoint, &query, self.page_limit);
        let url = request.url.clone();
        let deliveries = self.deliveries.clone();
        let handle = self.fetcher.start(request, move |fetch_id, outcome| {
            // The receiver is gone only while shutting down.
            let _ = deliveries.send(Delivery::Search { fetch_id, outcome });
        });

        log_fetch_request!(
            "search",
            fetch_id = %handle.id(),
            query = query.free_text(),
            category = %query.category(),
            url = %url
        );

        self.in_flight = Some(InFlight {
            handle,
            query,
            started_at: Instant::now(),
        });
        true
    }

    /// Apply a resolved fetch. Anything that is not the current fetch is
    /// dropped without touching state.
    pub fn deliver(&mut self, fetch_id: FetchId, outcome: FetchOutcome, view: &mut impl SearchView) {
        let is_current = self
            .in_flight
            .as_ref()
            .is_some_and(|f| f.handle.id() == fetch_id);

        if !is_current {
            tracing::debug!(fetch_id = %fetch_id, "Discarding stale search outcome");
            return;
        }
        if matches!(outcome, FetchOutcome::Cancelled) {
            tracing::debug!(fetch_id = %fetch_id, "Search cancelled");
            return;
        }
        let Some(finished) = self.in_flight.take() else {
            return;
        };

        let result: Result<Vec<ResultRecord>, FetchError> = match outcome {
            FetchOutcome::Payload(bytes) => decode_sorted(&bytes),
            FetchOutcome::Failed(e) => Err(e),
            FetchOutcome::Cancelled => return,
        };
        log_fetch_result!("search", fetch_id, result);

        match result {
            Ok(records) => {
                tracing::info!(
                    query = finished.query.free_text(),
                    category = %finished.query.category(),
                    results = records.len(),
                    elapsed_ms = finished.started_at.elapsed().as_millis() as u64,
                    "Search completed successfully"
                );
                let state = if records.is_empty() {
                    SearchState::Empty
                } else {
                    SearchState::Loaded(records)
                };
                self.set_state(state, view);
            }
            Err(e) => {
                tracing::error!(
                    query = finished.query.free_text(),
                    cause = e.kind(),
                    error = %e,
                    "Search failed"
                );
                self.set_state(SearchState::Failed(e.to_string()), view);
                view.on_error(SEARCH_FAILED_MESSAGE);
            }
        }
    }

    /// Cancel whatever is in flight. State is left as is.
    pub fn cancel(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            in_flight.handle.cancel();
        }
    }

    fn set_state(&mut self, state: SearchState, view: &mut impl SearchView) {
        tracing::trace!(from = self.state.name(), to = state.name(), "Search state change");
        self.state = state;
        view.on_state_changed(&self.state);
    }
}

/// `GET {endpoint}?term=..&limit=..&entity=..`
///
/// The term is percent-encoded (spaces become `%20`). `All` sends an empty
/// `entity`.
pub fn build_request(endpoint: &Url, query: &SearchQuery, page_limit: u32) -> FetchRequest {
    let mut url = endpoint.clone();
    url.set_query(Some(&format!(
        "term={}&limit={}&entity={}",
        urlencoding::encode(query.free_text()),
        page_limit,
        query.category().entity_token()
    )));
    FetchRequest::get(url)
}
