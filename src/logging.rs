//! Tracing setup for the command-line client.

use std::io::{self, IsTerminal};

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log level used when neither `RUST_LOG` nor `--log-level` says otherwise.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Builds the filter: `RUST_LOG` wins, then `level`, then the default.
///
/// `level` accepts a bare level ("info") or any EnvFilter directive.
pub fn make_filter(level: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level.unwrap_or(DEFAULT_LOG_LEVEL)))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
}

/// Installs the global subscriber. Call once at startup.
///
/// Output goes to stderr so stdout stays free for the rendered statement;
/// colors only when stderr is a terminal. A second call is a no-op.
pub fn init_logging(level: Option<&str>) {
    let stderr_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false);

    let _ = tracing_subscriber::registry()
        .with(make_filter(level))
        .with(stderr_layer)
        .try_init();
}
