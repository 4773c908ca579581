//! Startup configuration for the relay process.

// std
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	error::ConfigError,
	provider::{DEFAULT_BASE_URL, ProviderEndpoints},
};

/// Environment variable holding the provider client identifier.
pub const CLIENT_ID_VAR: &str = "AMADEUS_CLIENT_ID";
/// Environment variable holding the provider client secret.
pub const CLIENT_SECRET_VAR: &str = "AMADEUS_CLIENT_SECRET";
/// Environment variable overriding the provider base URL.
pub const BASE_URL_VAR: &str = "AMADEUS_BASE_URL";
/// Environment variable overriding the listen address.
pub const LISTEN_ADDR_VAR: &str = "FLIGHT_RELAY_ADDR";
/// Environment variable overriding the outbound timeout, in whole seconds.
pub const TIMEOUT_SECS_VAR: &str = "FLIGHT_RELAY_TIMEOUT_SECS";

/// Address the relay listens on unless overridden.
pub const DEFAULT_LISTEN_ADDR: SocketAddr =
	SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, 5001));
/// Upper bound applied to every outbound call unless overridden.
pub const DEFAULT_OUTBOUND_TIMEOUT: StdDuration = StdDuration::from_secs(10);

/// Validated relay configuration.
#[derive(Clone, Debug)]
pub struct RelayConfig {
	/// Provider client identifier.
	pub client_id: String,
	/// Provider client secret.
	pub client_secret: TokenSecret,
	/// Provider endpoints derived from the base URL.
	pub endpoints: ProviderEndpoints,
	/// Inbound listen address.
	pub listen_addr: SocketAddr,
	/// Timeout applied to token and search calls.
	pub outbound_timeout: StdDuration,
}
impl RelayConfig {
	/// Starts a builder for the given client credentials.
	pub fn builder(client_id: impl Into<String>, client_secret: impl Into<String>) -> RelayConfigBuilder {
		RelayConfigBuilder::new(client_id, client_secret)
	}

	/// Loads `.env` (when present) and reads the configuration from the process environment.
	pub fn from_env() -> Result<Self, ConfigError> {
		match dotenvy::dotenv() {
			Ok(path) => tracing::debug!(path = %path.display(), "Loaded environment file."),
			Err(e) if e.not_found() => {},
			Err(source) => return Err(ConfigError::EnvFile { source }),
		}

		Self::from_lookup(|name| std::env::var(name).ok())
	}

	/// Reads the configuration through `lookup`, treating empty values as unset.
	pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
		let client_id = read(CLIENT_ID_VAR).ok_or(ConfigError::MissingVar { name: CLIENT_ID_VAR })?;
		let client_secret =
			read(CLIENT_SECRET_VAR).ok_or(ConfigError::MissingVar { name: CLIENT_SECRET_VAR })?;
		let mut builder = Self::builder(client_id, client_secret);

		if let Some(raw) = read(BASE_URL_VAR) {
			let base = Url::parse(raw.trim()).map_err(|source| ConfigError::InvalidBaseUrl { source })?;

			builder = builder.base_url(base);
		}
		if let Some(raw) = read(LISTEN_ADDR_VAR) {
			let addr = raw.trim().parse::<SocketAddr>().map_err(|e| ConfigError::InvalidVar {
				name: LISTEN_ADDR_VAR,
				reason: e.to_string(),
			})?;

			builder = builder.listen_addr(addr);
		}
		if let Some(raw) = read(TIMEOUT_SECS_VAR) {
			let secs = raw.trim().parse::<u64>().map_err(|e| ConfigError::InvalidVar {
				name: TIMEOUT_SECS_VAR,
				reason: e.to_string(),
			})?;

			builder = builder.outbound_timeout(StdDuration::from_secs(secs));
		}

		builder.build()
	}
}

/// Builder for [`RelayConfig`] values.
#[derive(Debug)]
pub struct RelayConfigBuilder {
	client_id: String,
	client_secret: TokenSecret,
	base_url: Option<Url>,
	listen_addr: SocketAddr,
	outbound_timeout: StdDuration,
}
impl RelayConfigBuilder {
	/// Creates a builder seeded with the client credentials and the defaults.
	pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
		Self {
			client_id: client_id.into(),
			client_secret: TokenSecret::new(client_secret),
			base_url: None,
			listen_addr: DEFAULT_LISTEN_ADDR,
			outbound_timeout: DEFAULT_OUTBOUND_TIMEOUT,
		}
	}

	/// Overrides the provider base URL.
	pub fn base_url(mut self, url: Url) -> Self {
		self.base_url = Some(url);

		self
	}

	/// Overrides the listen address.
	pub fn listen_addr(mut self, addr: SocketAddr) -> Self {
		self.listen_addr = addr;

		self
	}

	/// Overrides the outbound timeout.
	pub fn outbound_timeout(mut self, timeout: StdDuration) -> Self {
		self.outbound_timeout = timeout;

		self
	}

	/// Consumes the builder and validates the resulting configuration.
	pub fn build(self) -> Result<RelayConfig, ConfigError> {
		if self.client_id.trim().is_empty() || self.client_secret.is_empty() {
			return Err(ConfigError::EmptyCredentials);
		}
		if self.outbound_timeout.is_zero() {
			return Err(ConfigError::ZeroTimeout);
		}

		let base = match self.base_url {
			Some(url) => url,
			None => Url::parse(DEFAULT_BASE_URL).map_err(|source| ConfigError::InvalidBaseUrl { source })?,
		};
		let endpoints = ProviderEndpoints::from_base(&base)?;

		Ok(RelayConfig {
			client_id: self.client_id,
			client_secret: self.client_secret,
			endpoints,
			listen_addr: self.listen_addr,
			outbound_timeout: self.outbound_timeout,
		})
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::collections::HashMap;
	// self
	use super::*;

	fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
		let vars = pairs
			.iter()
			.map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
			.collect::<HashMap<_, _>>();

		move |name| vars.get(name).cloned()
	}

	#[test]
	fn defaults_apply_when_only_credentials_are_set() {
		let config = RelayConfig::from_lookup(lookup(&[
			(CLIENT_ID_VAR, "client-id"),
			(CLIENT_SECRET_VAR, "client-secret"),
		]))
		.expect("Credentials alone should be a valid configuration.");

		assert_eq!(config.client_id, "client-id");
		assert_eq!(config.client_secret.expose(), "client-secret");
		assert_eq!(config.listen_addr, DEFAULT_LISTEN_ADDR);
		assert_eq!(config.listen_addr.to_string(), "0.0.0.0:5001");
		assert_eq!(config.outbound_timeout, StdDuration::from_secs(10));
		assert_eq!(
			config.endpoints.token.as_str(),
			"https://test.api.amadeus.com/v1/security/oauth2/token"
		);
	}

	#[test]
	fn overrides_are_honored() {
		let config = RelayConfig::from_lookup(lookup(&[
			(CLIENT_ID_VAR, "client-id"),
			(CLIENT_SECRET_VAR, "client-secret"),
			(BASE_URL_VAR, "http://127.0.0.1:9000"),
			(LISTEN_ADDR_VAR, "127.0.0.1:8080"),
			(TIMEOUT_SECS_VAR, "3"),
		]))
		.expect("Overrides should produce a valid configuration.");

		assert_eq!(config.listen_addr.to_string(), "127.0.0.1:8080");
		assert_eq!(config.outbound_timeout, StdDuration::from_secs(3));
		assert_eq!(
			config.endpoints.flight_offers.as_str(),
			"http://127.0.0.1:9000/v2/shopping/flight-offers"
		);
	}

	#[test]
	fn missing_or_blank_credentials_are_reported() {
		let err = RelayConfig::from_lookup(lookup(&[(CLIENT_SECRET_VAR, "client-secret")]))
			.expect_err("A missing client id should be rejected.");

		assert!(matches!(err, ConfigError::MissingVar { name: CLIENT_ID_VAR }));

		let err = RelayConfig::from_lookup(lookup(&[
			(CLIENT_ID_VAR, "client-id"),
			(CLIENT_SECRET_VAR, "   "),
		]))
		.expect_err("A blank client secret should be rejected.");

		assert!(matches!(err, ConfigError::MissingVar { name: CLIENT_SECRET_VAR }));
	}

	#[test]
	fn invalid_values_are_rejected() {
		let base = [(CLIENT_ID_VAR, "client-id"), (CLIENT_SECRET_VAR, "client-secret")];
		let with = |extra: (&'static str, &'static str)| {
			let mut pairs = base.to_vec();

			pairs.push(extra);

			RelayConfig::from_lookup(lookup(&pairs))
		};

		assert!(matches!(
			with((TIMEOUT_SECS_VAR, "0")),
			Err(ConfigError::ZeroTimeout)
		));
		assert!(matches!(
			with((TIMEOUT_SECS_VAR, "soon")),
			Err(ConfigError::InvalidVar { name: TIMEOUT_SECS_VAR, .. })
		));
		assert!(matches!(
			with((LISTEN_ADDR_VAR, "localhost")),
			Err(ConfigError::InvalidVar { name: LISTEN_ADDR_VAR, .. })
		));
		assert!(matches!(
			with((BASE_URL_VAR, "not a url")),
			Err(ConfigError::InvalidBaseUrl { .. })
		));
	}

	#[test]
	fn debug_output_redacts_secret() {
		let config = RelayConfig::builder("client-id", "hunter2")
			.build()
			.expect("Builder defaults should be valid.");

		assert!(!format!("{config:?}").contains("hunter2"));
	}
}
