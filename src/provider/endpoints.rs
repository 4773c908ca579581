//! Provider endpoint layout derived from a single base URL.

// self
use crate::{_prelude::*, error::ConfigError};

/// Base URL of the provider's self-service test environment.
pub const DEFAULT_BASE_URL: &str = "https://test.api.amadeus.com";

const TOKEN_PATH: &str = "v1/security/oauth2/token";
const FLIGHT_OFFERS_PATH: &str = "v2/shopping/flight-offers";

/// Endpoint set used by the relay.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderEndpoints {
	/// Client-credentials token endpoint.
	pub token: Url,
	/// Flight-offers search endpoint.
	pub flight_offers: Url,
}
impl ProviderEndpoints {
	/// Derives both endpoints from the provider base URL.
	///
	/// Any path on `base` is kept as a prefix, so `https://proxy/amadeus` yields
	/// `https://proxy/amadeus/v1/security/oauth2/token`.
	pub fn from_base(base: &Url) -> Result<Self, ConfigError> {
		if base.cannot_be_a_base() {
			return Err(ConfigError::InvalidBaseUrl {
				source: url::ParseError::RelativeUrlWithCannotBeABaseBase,
			});
		}

		let mut base = base.clone();

		if !base.path().ends_with('/') {
			let path = format!("{}/", base.path());

			base.set_path(&path);
		}

		let join =
			|path: &str| base.join(path).map_err(|source| ConfigError::InvalidBaseUrl { source });

		Ok(Self { token: join(TOKEN_PATH)?, flight_offers: join(FLIGHT_OFFERS_PATH)? })
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn url(value: &str) -> Url {
		Url::parse(value).expect("Failed to parse test base URL.")
	}

	#[test]
	fn default_base_derives_provider_paths() {
		let endpoints = ProviderEndpoints::from_base(&url(DEFAULT_BASE_URL))
			.expect("Default base URL should derive endpoints.");

		assert_eq!(
			endpoints.token.as_str(),
			"https://test.api.amadeus.com/v1/security/oauth2/token"
		);
		assert_eq!(
			endpoints.flight_offers.as_str(),
			"https://test.api.amadeus.com/v2/shopping/flight-offers"
		);
	}

	#[test]
	fn base_path_is_kept_as_prefix() {
		let endpoints = ProviderEndpoints::from_base(&url("http://127.0.0.1:9000/amadeus"))
			.expect("Prefixed base URL should derive endpoints.");

		assert_eq!(
			endpoints.token.as_str(),
			"http://127.0.0.1:9000/amadeus/v1/security/oauth2/token"
		);
		assert_eq!(
			endpoints.flight_offers.as_str(),
			"http://127.0.0.1:9000/amadeus/v2/shopping/flight-offers"
		);
	}

	#[test]
	fn opaque_base_is_rejected() {
		let err = ProviderEndpoints::from_base(&url("mailto:ops@example.com"))
			.expect_err("Non-hierarchical URLs should be rejected.");

		assert!(matches!(err, ConfigError::InvalidBaseUrl { .. }));
	}
}
