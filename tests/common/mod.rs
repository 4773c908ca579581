//! Helpers shared by the relay integration tests.

#![allow(dead_code)]

// std
use std::{sync::Arc, time::Duration};
// crates.io
use axum::{
	Router,
	body::{self, Body},
	http::{Request, StatusCode},
};
use httpmock::prelude::*;
use tower::ServiceExt;
// self
use flight_relay::{api, config::RelayConfig, relay::SearchRelay, url::Url};

pub const CLIENT_ID: &str = "relay-client";
pub const CLIENT_SECRET: &str = "relay-secret";
pub const ACCESS_TOKEN: &str = "it-token";
pub const TOKEN_PATH: &str = "/v1/security/oauth2/token";
pub const FLIGHT_OFFERS_PATH: &str = "/v2/shopping/flight-offers";

/// Builds a relay whose provider endpoints point at `server`.
pub fn build_relay(server: &MockServer) -> (Router, Arc<SearchRelay>) {
	build_relay_with_timeout(server, Duration::from_secs(5))
}

/// Same as [`build_relay`], bounding every outbound call by `timeout`.
pub fn build_relay_with_timeout(server: &MockServer, timeout: Duration) -> (Router, Arc<SearchRelay>) {
	let base = Url::parse(&server.base_url()).expect("Mock base URL should parse successfully.");
	let config = RelayConfig::builder(CLIENT_ID, CLIENT_SECRET)
		.base_url(base)
		.outbound_timeout(timeout)
		.build()
		.expect("Relay configuration should build successfully.");
	let relay = Arc::new(
		SearchRelay::from_config(&config).expect("Search relay should build successfully."),
	);

	(api::router(relay.clone()), relay)
}

/// Sends a GET request through the router and returns the status and the body text.
pub async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
	let request = Request::builder()
		.uri(uri)
		.body(Body::empty())
		.expect("Test request should build successfully.");
	let response = app.clone().oneshot(request).await.expect("Router should always respond.");
	let status = response.status();
	let bytes = body::to_bytes(response.into_body(), usize::MAX)
		.await
		.expect("Response body should be readable.");

	(status, String::from_utf8(bytes.to_vec()).expect("Response body should be UTF-8."))
}

/// Mocks a successful client-credentials exchange issuing [`ACCESS_TOKEN`].
pub async fn mock_token(server: &MockServer, expires_in: u64) -> httpmock::Mock<'_> {
	server
		.mock_async(|when, then| {
			when.method(POST)
				.path(TOKEN_PATH)
				.form_urlencoded_tuple("grant_type", "client_credentials")
				.form_urlencoded_tuple("client_id", CLIENT_ID)
				.form_urlencoded_tuple("client_secret", CLIENT_SECRET);
			then.status(200).header("content-type", "application/json").body(format!(
				"{{\"access_token\":\"{ACCESS_TOKEN}\",\"token_type\":\"bearer\",\"expires_in\":{expires_in}}}"
			));
		})
		.await
}
