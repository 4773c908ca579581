// crates.io
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter applied when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_LOG_FILTER: &str = "flight_relay=info,tower_http=info";

/// Installs the global `tracing` subscriber, honoring `RUST_LOG`.
///
/// Calling it more than once is harmless; later calls leave the first subscriber in place.
pub fn init_subscriber() {
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
	let _ = tracing_subscriber::registry()
		.with(filter)
		.with(tracing_subscriber::fmt::layer())
		.try_init();
}
