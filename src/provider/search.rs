//! Bearer-authenticated flight-offers search.

// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	error::SearchError,
	http::ReqwestHttpClient,
	provider::{FlightOffer, FlightOffersResponse},
	relay::SearchQuery,
};

/// Boxed future returned by [`OfferSource::search`].
pub type OfferFuture<'a> =
	Pin<Box<dyn Future<Output = Result<Vec<FlightOffer>, SearchError>> + 'a + Send>>;

/// Anything able to run a flight-offers search with a bearer token.
pub trait OfferSource
where
	Self: Send + Sync,
{
	/// Searches offers matching `query`, authenticating with `token`.
	fn search<'a>(&'a self, query: &'a SearchQuery, token: &'a TokenSecret) -> OfferFuture<'a>;
}

/// [`OfferSource`] calling the provider's flight-offers endpoint over reqwest.
#[derive(Clone, Debug)]
pub struct FlightOffersClient {
	http_client: ReqwestHttpClient,
	endpoint: Url,
	max_results: u8,
}
impl FlightOffersClient {
	/// Upper bound on offers requested per search.
	pub const DEFAULT_MAX_RESULTS: u8 = 20;

	const BODY_PREVIEW_LIMIT: usize = 256;

	/// Creates a client for the provided flight-offers endpoint.
	pub fn new(endpoint: Url, http_client: ReqwestHttpClient) -> Self {
		Self { http_client, endpoint, max_results: Self::DEFAULT_MAX_RESULTS }
	}

	/// Builds the provider query string for a validated search.
	pub fn query_params(&self, query: &SearchQuery) -> Vec<(&'static str, String)> {
		vec![
			("originLocationCode", query.origin.clone()),
			("destinationLocationCode", query.destination.clone()),
			("departureDate", query.date.clone()),
			("adults", query.adults.to_string()),
			("max", self.max_results.to_string()),
		]
	}

	async fn execute(
		&self,
		query: &SearchQuery,
		token: &TokenSecret,
	) -> Result<Vec<FlightOffer>, SearchError> {
		let response = self
			.http_client
			.get(self.endpoint.clone())
			.bearer_auth(token.expose())
			.query(&self.query_params(query))
			.send()
			.await?;
		let status = response.status();

		if !status.is_success() {
			let body = response.text().await.unwrap_or_default();

			return Err(SearchError::Status {
				status: status.as_u16(),
				body_preview: truncate_preview(body),
			});
		}

		let body = response.bytes().await?;
		let mut deserializer = serde_json::Deserializer::from_slice(&body);
		let document: FlightOffersResponse = serde_path_to_error::deserialize(&mut deserializer)
			.map_err(|source| SearchError::MalformedResponse { source })?;

		Ok(document.data)
	}
}
impl OfferSource for FlightOffersClient {
	fn search<'a>(&'a self, query: &'a SearchQuery, token: &'a TokenSecret) -> OfferFuture<'a> {
		Box::pin(self.execute(query, token))
	}
}

fn truncate_preview(mut body: String) -> String {
	if body.len() > FlightOffersClient::BODY_PREVIEW_LIMIT {
		let mut cut = FlightOffersClient::BODY_PREVIEW_LIMIT;

		while !body.is_char_boundary(cut) {
			cut -= 1;
		}

		body.truncate(cut);
		body.push('…');
	}

	body
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn query() -> SearchQuery {
		SearchQuery::new("JFK", "LAX", "2024-05-01", Some("2"))
			.expect("Test query should be valid.")
	}

	#[test]
	fn query_params_follow_provider_names() {
		let client = FlightOffersClient::new(
			Url::parse("https://example.com/v2/shopping/flight-offers")
				.expect("Failed to parse test endpoint."),
			ReqwestHttpClient::default(),
		);
		let params = client.query_params(&query());

		assert_eq!(
			params,
			vec![
				("originLocationCode", "JFK".to_owned()),
				("destinationLocationCode", "LAX".to_owned()),
				("departureDate", "2024-05-01".to_owned()),
				("adults", "2".to_owned()),
				("max", "20".to_owned()),
			]
		);
	}

	#[test]
	fn previews_are_truncated_on_char_boundaries() {
		let long = "é".repeat(200);
		let preview = truncate_preview(long);

		assert!(preview.ends_with('…'));
		assert!(preview.len() <= FlightOffersClient::BODY_PREVIEW_LIMIT + '…'.len_utf8());
		assert_eq!(truncate_preview("short".into()), "short");
	}
}
