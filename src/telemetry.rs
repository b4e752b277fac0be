use std::sync::OnceLock;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::Layer;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::error::TelemetryError;

static TRACING_INITIALISED: OnceLock<Result<(), TelemetryError>> = OnceLock::new();

/// Installs the global log subscriber once; later calls return the first outcome.
///
/// `RUST_LOG` applies unless `level` overrides it; the default is `warn`.
pub(crate) fn initialise_tracing(
    interactive_terminal: bool,
    level: Option<LevelFilter>,
) -> Result<(), &'static TelemetryError> {
    TRACING_INITIALISED
        .get_or_init(|| initialise_tracing_once(interactive_terminal, level))
        .as_ref()
        .copied()
}

fn initialise_tracing_once(
    interactive_terminal: bool,
    level: Option<LevelFilter>,
) -> Result<(), TelemetryError> {
    let log_filter = match level {
        Some(level) => EnvFilter::new(level.to_string()),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    if interactive_terminal {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .pretty()
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .with_filter(log_filter),
            )
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .json()
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .with_filter(log_filter),
            )
            .try_init()?;
    }

    Ok(())
}
