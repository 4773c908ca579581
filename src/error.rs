//! Relay-level error types shared across the credential cache, provider calls, and the API.

// self
use crate::_prelude::*;

/// Relay-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

pub(crate) type BoxError = Box<dyn std::error::Error + Send + Sync>;

type JsonPathError = serde_path_to_error::Error<serde_json::Error>;

/// Canonical relay error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Inbound parameters are missing or invalid.
	#[error(transparent)]
	Validation(#[from] ValidationError),
	/// Token acquisition failed.
	#[error("Upstream authentication failed.")]
	UpstreamAuth(
		#[from]
		#[source]
		AuthError,
	),
	/// Provider search call failed.
	#[error("Upstream flight search failed.")]
	UpstreamSearch(
		#[from]
		#[source]
		SearchError,
	),
	/// Provider returned offers that cannot be summarized.
	#[error(transparent)]
	Mapping(#[from] MappingError),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
}
impl Error {
	/// Returns `true` when the failure was caused by the caller rather than the relay.
	pub fn is_client_error(&self) -> bool {
		matches!(self, Error::Validation(_))
	}
}

/// Inbound query validation failures.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum ValidationError {
	/// One or more mandatory parameters are absent or empty.
	#[error("Missing required parameters: {}.", .missing.join(", "))]
	MissingParameters {
		/// Names of the missing parameters, in declaration order.
		missing: Vec<&'static str>,
	},
}

/// Token endpoint failures raised while acquiring a bearer credential.
#[derive(Debug, ThisError)]
pub enum AuthError {
	/// Provider answered with an OAuth error body (bad client, bad grant, ...).
	#[error("Token endpoint rejected the client credentials: {reason}.")]
	Rejected {
		/// Provider-supplied reason string.
		reason: String,
		/// HTTP status code, when available.
		status: Option<u16>,
	},
	/// Token endpoint responded with JSON that could not be parsed.
	#[error("Token endpoint returned malformed JSON.")]
	MalformedResponse {
		/// Structured parsing failure.
		#[source]
		source: JsonPathError,
		/// HTTP status code, when available.
		status: Option<u16>,
	},
	/// Token endpoint returned something the OAuth client could not classify.
	#[error("Token endpoint returned an unexpected response: {message}.")]
	UnexpectedResponse {
		/// Summary of the failure.
		message: String,
		/// HTTP status code, when available.
		status: Option<u16>,
	},
	/// Token endpoint response omitted `expires_in`.
	#[error("Token endpoint response is missing expires_in.")]
	MissingExpiresIn,
	/// Token endpoint returned a zero duration.
	#[error("The expires_in value must be positive.")]
	NonPositiveExpiresIn,
	/// Token endpoint returned an excessively large `expires_in`.
	#[error("The expires_in value exceeds the supported range.")]
	ExpiresInOutOfRange,
	/// The token request could not be constructed.
	#[error("Token request could not be constructed.")]
	Request(#[from] oauth2::http::Error),
	/// Network, TLS, timeout, or I/O failure while calling the token endpoint.
	#[error("Network error occurred while calling the token endpoint.")]
	Transport {
		/// Transport-specific failure.
		#[source]
		source: BoxError,
	},
}
impl AuthError {
	/// Wraps a transport-specific failure.
	pub fn transport(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Transport { source: Box::new(src) }
	}

	/// HTTP status reported by the token endpoint, if one was received.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Rejected { status, .. }
			| Self::MalformedResponse { status, .. }
			| Self::UnexpectedResponse { status, .. } => *status,
			_ => None,
		}
	}
}

/// Flight-offers endpoint failures.
#[derive(Debug, ThisError)]
pub enum SearchError {
	/// Provider answered with a non-success status.
	#[error("Flight search endpoint returned HTTP {status}: {body_preview}")]
	Status {
		/// HTTP status code.
		status: u16,
		/// Truncated response body for diagnostics.
		body_preview: String,
	},
	/// Provider body could not be parsed as a flight-offers document.
	#[error("Flight search endpoint returned malformed JSON.")]
	MalformedResponse {
		/// Structured parsing failure.
		#[source]
		source: JsonPathError,
	},
	/// Network, TLS, or timeout failure while calling the search endpoint.
	#[error("Network error occurred while calling the flight search endpoint.")]
	Transport {
		/// Transport-specific failure.
		#[source]
		source: BoxError,
	},
}
impl From<ReqwestError> for SearchError {
	fn from(e: ReqwestError) -> Self {
		Self::Transport { source: Box::new(e) }
	}
}

/// Offers whose shape does not allow a summary to be derived.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum MappingError {
	/// Offer carries no itineraries.
	#[error("Offer `{offer}` has no itineraries.")]
	MissingItinerary {
		/// Offer identifier.
		offer: String,
	},
	/// First itinerary carries no segments.
	#[error("Offer `{offer}` has an itinerary without segments.")]
	MissingSegment {
		/// Offer identifier.
		offer: String,
	},
	/// Total price is not a finite, non-negative number.
	#[error("Offer `{offer}` has an invalid total price `{total}`.")]
	InvalidPrice {
		/// Offer identifier.
		offer: String,
		/// Raw price string.
		total: String,
	},
	/// Departure timestamp is too short to carry an `HH:MM` component.
	#[error("Offer `{offer}` has a malformed departure timestamp `{at}`.")]
	InvalidDeparture {
		/// Offer identifier.
		offer: String,
		/// Raw timestamp string.
		at: String,
	},
}

/// Configuration and validation failures raised at startup.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// The `.env` file exists but could not be loaded.
	#[error("The .env file could not be loaded.")]
	EnvFile {
		/// Underlying loader failure.
		#[source]
		source: dotenvy::Error,
	},
	/// A required environment variable is missing or empty.
	#[error("Environment variable `{name}` is required.")]
	MissingVar {
		/// Variable name.
		name: &'static str,
	},
	/// An environment variable holds a value that cannot be used.
	#[error("Environment variable `{name}` has an invalid value: {reason}.")]
	InvalidVar {
		/// Variable name.
		name: &'static str,
		/// Why the value was rejected.
		reason: String,
	},
	/// Client identifier or secret is empty.
	#[error("Client credentials must not be empty.")]
	EmptyCredentials,
	/// Outbound timeout is zero.
	#[error("Outbound timeout must be positive.")]
	ZeroTimeout,
	/// Provider base URL cannot be used to derive endpoints.
	#[error("Provider base URL is invalid.")]
	InvalidBaseUrl {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Token endpoint cannot be handed to the OAuth client.
	#[error("Token endpoint URL is invalid.")]
	InvalidTokenEndpoint {
		/// Underlying parsing failure.
		#[source]
		source: oauth2::url::ParseError,
	},
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}
