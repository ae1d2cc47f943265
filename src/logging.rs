//! Diagnostics go to a log file; the terminal belongs to the browser UI.
//!
//! Catalog loads, skipped documents, media probes and modal transitions are
//! the main things recorded. Tail the newest file under `.logs/` while
//! browsing to watch them.

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

const LOG_DIR: &str = ".logs";
const LOG_FILE_PREFIX: &str = "archive-browser";

/// Start writing `.logs/archive-browser.<date>` files, one per day.
///
/// `RUST_LOG` overrides the filter. Without it the browser's own targets log
/// at debug, `reqwest` at info (one line per request against a remote root)
/// and everything else only from warn up.
pub fn init_logging() -> anyhow::Result<()> {
    std::fs::create_dir_all(LOG_DIR)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, LOG_DIR, LOG_FILE_PREFIX);

    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    // Dropping the guard stops the writer thread; keep it for the whole run
    Box::leak(Box::new(guard));

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("archive_browser=debug,reqwest=info,warn"));

    let fmt_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();

    tracing::info!(dir = LOG_DIR, "Log file opened");

    Ok(())
}

/// Debug line for a document that arrived, warning for one that did not
#[macro_export]
macro_rules! log_fetch_result {
    ($path:expr, $result:expr) => {
        match &$result {
            Ok(_) => tracing::debug!(path = %$path, "Fetch successful"),
            Err(e) => tracing::warn!(path = %$path, error = %e, "Fetch failed"),
        }
    };
}
