//! Flight-search relay server.

// std
use std::sync::Arc;
// crates.io
use color_eyre::eyre::WrapErr;
use tokio::net::TcpListener;
// self
use flight_relay::{api, config::RelayConfig, obs, relay::SearchRelay};

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;
	obs::init_subscriber();

	let config = RelayConfig::from_env().wrap_err("Failed to load the relay configuration.")?;

	tracing::info!(
		client_id = %config.client_id,
		token_endpoint = %config.endpoints.token,
		flight_offers_endpoint = %config.endpoints.flight_offers,
		outbound_timeout_secs = config.outbound_timeout.as_secs(),
		"Configuration loaded."
	);

	let relay = SearchRelay::from_config(&config).wrap_err("Failed to build the search relay.")?;
	let listener = TcpListener::bind(config.listen_addr)
		.await
		.wrap_err_with(|| format!("Failed to bind {}.", config.listen_addr))?;

	tracing::info!(address = %listener.local_addr()?, "Listening for flight searches.");

	api::serve(listener, api::router(Arc::new(relay))).await?;

	tracing::info!("Shutdown complete.");

	Ok(())
}
