//! Telemetry helpers for structured logging and tracing.

use tracing_subscriber::EnvFilter;

/// Fallback directive when `RUST_LOG` is unset: loop-edge events from this
/// crate only, nothing from dependencies.
const DEFAULT_FILTER: &str = "pulse_scheduler=info";

/// Initialize tracing for hosts that have not installed their own
/// subscriber.
///
/// Firmware hosts usually wire a subscriber to their own log transport
/// before the loop starts, which makes this a no-op. Otherwise an fmt
/// subscriber is installed, filtered by `RUST_LOG` when set and by
/// `DEFAULT_FILTER` when not. Targets are suppressed; every event comes from
/// the scheduling core.
pub fn init_tracing() {
    if tracing::dispatcher::has_been_set() {
        return;
    }
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
