//! Inbound HTTP surface: `GET /api/flights` on an axum router.
//!
//! Every [`Error`] is turned into a response exactly once, here. Callers only ever see one of
//! two fixed bodies; the full error chain goes to the log.

// std
use std::io;
// crates.io
use axum::{
	Json, Router,
	extract::{RawQuery, State},
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::get,
};
use tokio::net::TcpListener;
use tower_http::{
	cors::{Any, CorsLayer},
	trace::TraceLayer,
};
// self
use crate::{
	_prelude::*,
	relay::{FlightSummary, SearchRelay},
};

/// Path of the flight-search endpoint.
pub const FLIGHTS_PATH: &str = "/api/flights";

const MISSING_PARAMETERS: &str = "Missing required parameters";
const FETCH_FAILED: &str = "Failed to fetch flights";

/// Builds the relay router with permissive CORS and request tracing.
pub fn router(relay: Arc<SearchRelay>) -> Router {
	let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

	Router::new()
		.route(FLIGHTS_PATH, get(search_flights))
		.layer(TraceLayer::new_for_http())
		.layer(cors)
		.with_state(relay)
}

/// Serves `router` on `listener` until Ctrl-C is received.
pub async fn serve(listener: TcpListener, router: Router) -> io::Result<()> {
	axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await
}

async fn search_flights(
	State(relay): State<Arc<SearchRelay>>,
	RawQuery(query): RawQuery,
) -> Result<Json<Vec<FlightSummary>>> {
	let summaries = relay.handle(query.as_deref()).await?;

	Ok(Json(summaries))
}

async fn shutdown_signal() {
	match tokio::signal::ctrl_c().await {
		Ok(()) => tracing::info!("Shutdown signal received."),
		Err(e) => {
			tracing::error!(error = %e, "Failed to listen for the shutdown signal.");

			std::future::pending::<()>().await;
		},
	}
}

fn error_chain(e: &dyn StdError) -> String {
	let mut rendered = e.to_string();
	let mut source = e.source();

	while let Some(inner) = source {
		rendered.push_str(": ");
		rendered.push_str(&inner.to_string());

		source = inner.source();
	}

	rendered
}

impl IntoResponse for Error {
	fn into_response(self) -> Response {
		let (status, message) = if self.is_client_error() {
			tracing::warn!(error = %self, "Rejected flight search.");

			(StatusCode::BAD_REQUEST, MISSING_PARAMETERS)
		} else {
			tracing::error!(error = %error_chain(&self), "Flight search failed.");

			(StatusCode::INTERNAL_SERVER_ERROR, FETCH_FAILED)
		};

		(status, Json(serde_json::json!({ "error": message }))).into_response()
	}
}
