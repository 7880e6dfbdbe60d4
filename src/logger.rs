use tracing_subscriber::prelude::*;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, fmt::{self, format::FmtSpan}};

/// Level used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_LEVEL: &str = "info";

/// Span events to report for a filter: closing spans (with their busy/idle
/// times) once debug output is on, nothing otherwise.
fn span_events(filter: &str) -> FmtSpan {
    if filter.contains("debug") || filter.contains("trace") {
        FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    }
}

/// Installs the global subscriber; fails if one is already set.
pub fn try_init() -> Result<(), TryInitError> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL));
    let spans = span_events(&env_filter.to_string());

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_timer(fmt::time::uptime())
        .with_span_events(spans);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
}

/// Installs the global subscriber, keeping an existing one.
pub fn init() {
    if let Err(e) = try_init() {
        tracing::debug!("Logger already initialized: {}", e);
    }
}
