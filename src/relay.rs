//! Search relay: validate, authenticate, search, summarize.
//!
//! [`SearchRelay`] owns the [`CredentialCache`] and an [`OfferSource`]. Validation happens
//! before any network call; a token failure surfaces as [`Error::UpstreamAuth`], a search
//! failure as [`Error::UpstreamSearch`], and an offer that cannot be summarized fails the whole
//! request with [`Error::Mapping`]. Nothing is retried and no partial results are returned.

pub mod query;
pub mod summary;

pub use query::*;
pub use summary::*;

// self
use crate::{
	_prelude::*,
	auth::CredentialCache,
	config::RelayConfig,
	error::ConfigError,
	http::ReqwestHttpClient,
	oauth::ClientCredentialsSource,
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
	provider::{FlightOffersClient, OfferSource},
};

/// Inbound request handler shared by every API call.
#[derive(Clone)]
pub struct SearchRelay {
	credentials: Arc<CredentialCache>,
	offers: Arc<dyn OfferSource>,
}
impl SearchRelay {
	/// Creates a relay from explicitly constructed collaborators.
	pub fn new(credentials: Arc<CredentialCache>, offers: Arc<dyn OfferSource>) -> Self {
		Self { credentials, offers }
	}

	/// Wires the production collaborators described by `config`.
	///
	/// One reqwest client, bounded by the configured timeout, is shared by the token source
	/// and the flight-offers client.
	pub fn from_config(config: &RelayConfig) -> Result<Self, ConfigError> {
		let http_client = ReqwestHttpClient::with_timeout(config.outbound_timeout)?;
		let token_source = ClientCredentialsSource::new(
			&config.endpoints.token,
			&config.client_id,
			&config.client_secret,
			http_client.clone(),
		)?;
		let credentials = CredentialCache::new(Arc::new(token_source));
		let offers = FlightOffersClient::new(config.endpoints.flight_offers.clone(), http_client);

		Ok(Self::new(Arc::new(credentials), Arc::new(offers)))
	}

	/// Credential cache used by this relay.
	pub fn credentials(&self) -> &CredentialCache {
		&self.credentials
	}

	/// Parses the raw query string and runs the search.
	pub async fn handle(&self, raw_query: Option<&str>) -> Result<Vec<FlightSummary>> {
		let query = SearchQuery::from_query_str(raw_query.unwrap_or_default())?;

		self.search(&query).await
	}

	/// Runs an already validated search.
	pub async fn search(&self, query: &SearchQuery) -> Result<Vec<FlightSummary>> {
		const KIND: FlowKind = FlowKind::FlightSearch;

		let span = FlowSpan::new(KIND, "search");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span
			.instrument(async {
				let token = self.credentials.acquire().await?;

				tracing::info!(
					origin = %query.origin,
					destination = %query.destination,
					date = %query.date,
					adults = query.adults,
					"Fetching flights."
				);

				let offers = self.offers.search(query, &token).await?;
				let summaries = summarize(&offers)?;

				tracing::debug!(offers = offers.len(), "Summarized flight offers.");

				Ok(summaries)
			})
			.await;

		match &result {
			Ok(_) => obs::record_flow_outcome(KIND, FlowOutcome::Success),
			Err(_) => obs::record_flow_outcome(KIND, FlowOutcome::Failure),
		}

		result
	}
}
impl Debug for SearchRelay {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("SearchRelay").field("credentials", &self.credentials).finish_non_exhaustive()
	}
}
