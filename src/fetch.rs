//! Cancellable network fetches
//!
//! A fetch runs as its own tokio task. The caller gets a [`FetchHandle`] that
//! can cancel it, and hands in a `deliver` callback which the task invokes
//! exactly once with the outcome, unless the task was aborted first. The
//! callback must only enqueue the outcome for the consumer, never touch
//! consumer state directly.
//!
//! Aborting the task stops delivery in most cases. When the transport has
//! already finished by the time `cancel` runs, the outcome is tagged
//! [`FetchOutcome::Cancelled`] instead, so callers still see the cancel.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use futures::FutureExt;
use futures::future::BoxFuture;
use tokio::task::AbortHandle;
use url::Url;

use crate::error::FetchError;

/// Upper bound for any response body. A full search page is well below it.
pub const MAX_BODY_BYTES: usize = 8 * 1024 * 1024;

/// Identity of one started fetch. Never reused within a [`Fetcher`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FetchId(u64);

impl fmt::Display for FetchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchRequest {
    pub url: Url,
}

impl FetchRequest {
    pub fn get(url: Url) -> Self {
        Self { url }
    }
}

#[derive(Debug)]
pub enum FetchOutcome {
    Payload(Vec<u8>),
    /// The fetch was cancelled before its outcome was handed over
    Cancelled,
    Failed(FetchError),
}

/// Raw byte transport for GET requests
pub trait Transport: Send + Sync {
    fn get(&self, url: Url) -> BoxFuture<'static, Result<Vec<u8>, FetchError>>;
}

/// reqwest-backed transport shared by every fetch in the app
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("store-search/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: Url) -> BoxFuture<'static, Result<Vec<u8>, FetchError>> {
        let client = self.client.clone();
        async move {
            let mut response = client
                .get(url.clone())
                .send()
                .await
                .map_err(|e| FetchError::transport(url.as_str(), e))?;

            let status = response.status();
            if !status.is_success() {
                return Err(FetchError::HttpStatus {
                    url: url.to_string(),
                    status: status.as_u16(),
                });
            }

            let too_large = || FetchError::TooLarge {
                url: url.to_string(),
                limit: MAX_BODY_BYTES,
            };
            if response.content_length().is_some_and(|len| len > MAX_BODY_BYTES as u64) {
                return Err(too_large());
            }

            let mut body = Vec::new();
            while let Some(chunk) = response
                .chunk()
                .await
                .map_err(|e| FetchError::transport(url.as_str(), e))?
            {
                if !fits_body_limit(body.len(), chunk.len()) {
                    return Err(too_large());
                }
                body.extend_from_slice(&chunk);
            }
            Ok(body)
        }
        .boxed()
    }
}

/// Whether `incoming` more bytes still fit under [`MAX_BODY_BYTES`]
fn fits_body_limit(current: usize, incoming: usize) -> bool {
    current
        .checked_add(incoming)
        .is_some_and(|total| total <= MAX_BODY_BYTES)
}

/// Cancellation token for a single started fetch
#[derive(Debug)]
pub struct FetchHandle {
    id: FetchId,
    cancelled: Arc<AtomicBool>,
    task: AbortHandle,
}

impl FetchHandle {
    pub fn id(&self) -> FetchId {
        self.id
    }

    /// Cancel the fetch. Safe to call any number of times, also after the
    /// fetch resolved.
    pub fn cancel(&self) {
        if !self.cancelled.swap(true, Ordering::SeqCst) {
            tracing::trace!(fetch_id = %self.id, "Fetch cancelled");
        }
        self.task.abort();
    }

    #[cfg(test)]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Starts fetches over a shared transport and hands out unique ids
#[derive(Clone)]
pub struct Fetcher {
    transport: Arc<dyn Transport>,
    next_id: Arc<AtomicU64>,
}

impl Fetcher {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Start a fetch. Must be called from within a tokio runtime.
    pub fn start<F>(&self, request: FetchRequest, deliver: F) -> FetchHandle
    where
        F: FnOnce(FetchId, FetchOutcome) + Send + 'static,
    {
        let id = FetchId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let cancelled = Arc::new(AtomicBool::new(false));
        let cancelled_flag = cancelled.clone();

        tracing::trace!(fetch_id = %id, url = %request.url, "Fetch started");
        let pending = self.transport.get(request.url);

        let task = tokio::spawn(async move {
            let result = pending.await;
            let outcome = if cancelled_flag.load(Ordering::SeqCst) {
                FetchOutcome::Cancelled
            } else {
                match result {
                    Ok(bytes) => FetchOutcome::Payload(bytes),
                    Err(e) => FetchOutcome::Failed(e),
                }
            };
            deliver(id, outcome);
        });

        FetchHandle {
            id,
            cancelled,
            task: task.abort_handle(),
        }
    }
}
