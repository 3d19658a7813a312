//! Tracing setup for the reaper process.

use tracing_subscriber::EnvFilter;

/// Component name attached to every log line of the process.
pub const COMPONENT: &str = "reaper";

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Json,
    Text,
}

/// Install the process-wide subscriber.
///
/// `RUST_LOG` is respected; `info` otherwise. Does nothing if a subscriber is
/// already installed.
pub fn init_tracing(format: LogFormat) {
    if tracing::dispatcher::has_been_set() {
        return;
    }
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let _ = match format {
        LogFormat::Json => builder
            .json()
            .with_current_span(true)
            .with_span_list(false)
            .try_init(),
        LogFormat::Text => builder.try_init(),
    };
}
