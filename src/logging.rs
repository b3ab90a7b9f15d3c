//! File-based logging
//!
//! Sets up tracing-based logging that writes to a file instead of stdout,
//! since the TUI occupies the terminal.

use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

const LOG_DIR: &str = ".logs";
const LOG_FILE_PREFIX: &str = "store-search";
const DEFAULT_FILTER: &str = "store_search=debug,reqwest=info,warn";

/// Initialize the logging system.
///
/// Logs are written to `.logs/store-search.YYYY-MM-DD` with daily rotation.
/// The log level can be controlled via the `RUST_LOG` environment variable.
///
/// Default log levels:
/// - `store_search` modules: DEBUG
/// - `reqwest`: INFO
/// - Other crates: WARN
pub fn init_logging() -> anyhow::Result<()> {
    let log_dir = Path::new(LOG_DIR);
    if !log_dir.exists() {
        std::fs::create_dir_all(log_dir)?;
    }

    let file_appender = RollingFileAppender::new(Rotation::DAILY, LOG_DIR, LOG_FILE_PREFIX);

    // Non-blocking so log writes never stall the runtime
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // The guard flushes on drop; it has to outlive the app
    Box::leak(Box::new(guard));

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let fmt_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()?;

    tracing::info!("Logging initialized - logs written to {}/", LOG_DIR);

    Ok(())
}

/// Log the outcome of a fetch once its payload has been interpreted
#[macro_export]
macro_rules! log_fetch_result {
    ($operation:expr, $fetch_id:expr, $result:expr) => {
        match &$result {
            Ok(_) => tracing::info!(operation = $operation, fetch_id = %$fetch_id, "Fetch successful"),
            Err(e) => tracing::error!(
                operation = $operation,
                fetch_id = %$fetch_id,
                cause = e.kind(),
                error = %e,
                "Fetch failed"
            ),
        }
    };
}

/// Log a fetch being started with additional context
#[macro_export]
macro_rules! log_fetch_request {
    ($operation:expr, $($field:tt)*) => {
        tracing::debug!(operation = $operation, $($field)*, "Fetch request started");
    };
}
