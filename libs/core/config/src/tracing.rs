use crate::Environment;
use tracing_subscriber::{prelude::*, EnvFilter};

/// Install the color-eyre panic and error report hooks.
///
/// Call this first in main(), before anything fallible. Repeat calls are
/// ignored, which keeps tests happy.
pub fn install_color_eyre() {
    let _ = color_eyre::config::HookBuilder::default()
        .display_location_section(true)
        .display_env_section(false)
        .install();
}

/// Set up the global tracing subscriber.
///
/// Development gets a human-readable pretty format; production
/// (`APP_ENV=production`) gets flattened JSON for log aggregation. Both
/// carry `tracing_error::ErrorLayer` so error reports include span traces.
///
/// The filter honors `RUST_LOG` when set; otherwise production defaults to
/// `info` and development to `debug`.
///
/// Calling this twice is harmless: the second call leaves the existing
/// subscriber in place.
pub fn init_tracing(environment: &Environment) {
    let default_filter = if environment.is_production() {
        "info,tower_http=info"
    } else {
        "debug"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let registry = tracing_subscriber::registry().with(tracing_error::ErrorLayer::default());

    let initialized = if environment.is_production() {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .flatten_event(true)
                    .with_target(false),
            )
            .with(filter)
            .try_init()
            .is_ok()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .pretty()
                    .with_target(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(filter)
            .try_init()
            .is_ok()
    };

    if initialized {
        tracing::info!(?environment, "Tracing initialized");
    } else {
        tracing::debug!("Tracing already initialized, keeping existing subscriber");
    }
}
