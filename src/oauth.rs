//! Client-credentials grant against the provider token endpoint.
//!
//! [`ClientCredentialsSource`] drives the `oauth2` crate's client-credentials exchange over the
//! relay's [`ReqwestHttpClient`], posting the client identifier and secret in the form body, and
//! translates every failure shape into an [`AuthError`].

pub use oauth2;

// crates.io
use oauth2::{
	AuthType, ClientId, ClientSecret, EndpointNotSet, EndpointSet, HttpClientError,
	RequestTokenError, TokenResponse, TokenUrl,
	basic::{BasicClient, BasicRequestTokenError, BasicTokenResponse},
};
// self
use crate::{
	_prelude::*,
	auth::{IssuedToken, TokenFuture, TokenSecret, TokenSource},
	error::{AuthError, ConfigError},
	http::{ReqwestHttpClient, ResponseMetadata, ResponseMetadataSlot},
};

type ConfiguredBasicClient =
	BasicClient<EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointSet>;

/// [`TokenSource`] performing the OAuth 2.0 client-credentials grant.
pub struct ClientCredentialsSource {
	oauth_client: ConfiguredBasicClient,
	http_client: ReqwestHttpClient,
	token_endpoint: Url,
}
impl ClientCredentialsSource {
	/// Creates a source for the given token endpoint and confidential client.
	pub fn new(
		token_endpoint: &Url,
		client_id: &str,
		client_secret: &TokenSecret,
		http_client: ReqwestHttpClient,
	) -> Result<Self, ConfigError> {
		if client_id.is_empty() || client_secret.is_empty() {
			return Err(ConfigError::EmptyCredentials);
		}

		let token_url = TokenUrl::new(token_endpoint.to_string())
			.map_err(|source| ConfigError::InvalidTokenEndpoint { source })?;
		let oauth_client = BasicClient::new(ClientId::new(client_id.to_owned()))
			.set_client_secret(ClientSecret::new(client_secret.expose().to_owned()))
			.set_token_uri(token_url)
			.set_auth_type(AuthType::RequestBody);

		Ok(Self { oauth_client, http_client, token_endpoint: token_endpoint.clone() })
	}
}
impl TokenSource for ClientCredentialsSource {
	fn fetch(&self) -> TokenFuture<'_> {
		let meta = ResponseMetadataSlot::default();

		Box::pin(async move {
			let instrumented = self.http_client.instrumented(meta.clone());
			let response = self
				.oauth_client
				.exchange_client_credentials()
				.request_async(&instrumented)
				.await
				.map_err(|err| map_request_error(meta.take(), err))?;

			map_token_response(response)
		})
	}
}
impl Debug for ClientCredentialsSource {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ClientCredentialsSource")
			.field("token_endpoint", &self.token_endpoint.as_str())
			.field("client_id", &self.oauth_client.client_id().as_str())
			.finish()
	}
}

fn map_token_response(response: BasicTokenResponse) -> Result<IssuedToken, AuthError> {
	let expires_in = response.expires_in().ok_or(AuthError::MissingExpiresIn)?.as_secs();
	let expires_in = i64::try_from(expires_in).map_err(|_| AuthError::ExpiresInOutOfRange)?;

	if expires_in <= 0 {
		return Err(AuthError::NonPositiveExpiresIn);
	}

	Ok(IssuedToken {
		access_token: TokenSecret::new(response.access_token().secret().to_owned()),
		expires_in: Duration::seconds(expires_in),
	})
}

fn map_request_error(
	meta: Option<ResponseMetadata>,
	err: BasicRequestTokenError<HttpClientError<ReqwestError>>,
) -> AuthError {
	let status = meta.and_then(|value| value.status);

	match err {
		RequestTokenError::ServerResponse(response) => {
			let reason = match response.error_description() {
				Some(description) => format!("{}: {description}", response.error().as_ref()),
				None => response.error().as_ref().to_owned(),
			};

			AuthError::Rejected { reason, status }
		},
		RequestTokenError::Request(error) => map_transport_error(status, error),
		RequestTokenError::Parse(source, _body) => AuthError::MalformedResponse { source, status },
		RequestTokenError::Other(message) => AuthError::UnexpectedResponse { message, status },
	}
}

fn map_transport_error(status: Option<u16>, err: HttpClientError<ReqwestError>) -> AuthError {
	match err {
		HttpClientError::Reqwest(inner) => AuthError::transport(*inner),
		HttpClientError::Http(inner) => AuthError::Request(inner),
		HttpClientError::Io(inner) => AuthError::transport(inner),
		HttpClientError::Other(message) => AuthError::UnexpectedResponse {
			message: format!("HTTP client error occurred while calling the token endpoint: {message}"),
			status,
		},
		_ => AuthError::UnexpectedResponse {
			message: "HTTP client error occurred while calling the token endpoint".into(),
			status,
		},
	}
}
