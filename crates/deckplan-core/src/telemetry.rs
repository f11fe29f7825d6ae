//! Tracing initialisation for deckplan binaries.

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialise the global tracing subscriber.
///
/// Log lines go to stderr: inside a workflow job, stdout belongs to the
/// workflow-command protocol. `json` switches to newline-delimited JSON
/// lines; `level` is the default verbosity when `RUST_LOG` is unset.
/// Calling this more than once is a no-op.
pub fn init_tracing(json: bool, level: Level) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));
    let base = tracing_subscriber::registry().with(filter);

    if json {
        base.with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .json()
                .flatten_event(true),
        )
        .try_init()
        .ok();
    } else {
        base.with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init()
        .ok();
    }
}
