//! Token source contract implemented by credential-grant clients and test doubles.

// self
use crate::{_prelude::*, auth::IssuedToken, error::AuthError};

/// Boxed future returned by [`TokenSource::fetch`].
pub type TokenFuture<'a> = Pin<Box<dyn Future<Output = Result<IssuedToken, AuthError>> + 'a + Send>>;

/// Anything able to mint a fresh bearer token.
///
/// The production implementation is [`ClientCredentialsSource`](crate::oauth::ClientCredentialsSource);
/// tests substitute counting doubles so cache behavior can be asserted without a network.
pub trait TokenSource
where
	Self: Send + Sync,
{
	/// Requests a new token from the provider.
	fn fetch(&self) -> TokenFuture<'_>;
}
