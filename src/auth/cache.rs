//! Single-credential cache with a single-flight refresh guard.
//!
//! [`CredentialCache::acquire`] returns the cached bearer token while it is still usable and
//! only calls the [`TokenSource`] once the token is absent or stale. Concurrent callers that
//! miss the cache queue on one async guard; whoever gets it first performs the refresh and the
//! rest pick up the new credential on re-check, so at most one token request is in flight.
//! A failed refresh leaves the previous credential (if any) untouched.

// self
use crate::{
	_prelude::*,
	auth::{CachedCredential, TokenSecret, TokenSource},
	error::AuthError,
	obs::{self, CacheMetrics, FlowKind, FlowOutcome, FlowSpan},
};

/// Owns the relay's single bearer credential.
pub struct CredentialCache {
	source: Arc<dyn TokenSource>,
	current: RwLock<Option<CachedCredential>>,
	refresh_guard: AsyncMutex<()>,
	refresh_leeway: Duration,
	metrics: CacheMetrics,
}
impl CredentialCache {
	/// Creates an empty cache backed by the provided token source.
	pub fn new(source: Arc<dyn TokenSource>) -> Self {
		Self {
			source,
			current: RwLock::new(None),
			refresh_guard: AsyncMutex::new(()),
			refresh_leeway: Duration::ZERO,
			metrics: CacheMetrics::default(),
		}
	}

	/// Treats the credential as stale `leeway` before its recorded expiry (defaults to zero).
	pub fn with_refresh_leeway(mut self, leeway: Duration) -> Self {
		self.refresh_leeway = if leeway.is_negative() { Duration::ZERO } else { leeway };

		self
	}

	/// Returns a usable bearer token, refreshing it through the token source when needed.
	pub async fn acquire(&self) -> Result<TokenSecret, AuthError> {
		if let Some(token) = self.usable_token(OffsetDateTime::now_utc()) {
			self.metrics.record_hit();

			return Ok(token);
		}

		let _singleflight = self.refresh_guard.lock().await;

		if let Some(token) = self.usable_token(OffsetDateTime::now_utc()) {
			self.metrics.record_hit();

			return Ok(token);
		}

		self.refresh().await
	}

	/// Returns a copy of the cached credential, if one has been issued.
	pub fn snapshot(&self) -> Option<CachedCredential> {
		self.current.read().clone()
	}

	/// Counters describing cache effectiveness.
	pub fn metrics(&self) -> &CacheMetrics {
		&self.metrics
	}

	fn usable_token(&self, now: OffsetDateTime) -> Option<TokenSecret> {
		self.current
			.read()
			.as_ref()
			.filter(|credential| credential.is_usable_at(now, self.refresh_leeway))
			.map(|credential| credential.token.clone())
	}

	async fn refresh(&self) -> Result<TokenSecret, AuthError> {
		const KIND: FlowKind = FlowKind::TokenRefresh;

		let span = FlowSpan::new(KIND, "refresh");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result: Result<TokenSecret, AuthError> = span
			.instrument(async {
				let issued = self.source.fetch().await?;
				let credential = CachedCredential::from_issued(issued, OffsetDateTime::now_utc())
					.ok_or(AuthError::ExpiresInOutOfRange)?;
				let token = credential.token.clone();

				tracing::debug!(expires_at = %credential.expires_at, "Cached a new bearer token.");

				*self.current.write() = Some(credential);

				Ok::<_, AuthError>(token)
			})
			.await;

		match &result {
			Ok(_) => {
				self.metrics.record_refresh();
				obs::record_flow_outcome(KIND, FlowOutcome::Success);
			},
			Err(e) => {
				self.metrics.record_failure();
				obs::record_flow_outcome(KIND, FlowOutcome::Failure);

				tracing::warn!(error = %e, status = ?e.status(), "Token refresh failed.");
			},
		}

		result
	}
}
impl Debug for CredentialCache {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("CredentialCache")
			.field("current", &*self.current.read())
			.field("refresh_leeway", &self.refresh_leeway)
			.field("metrics", &self.metrics)
			.finish()
	}
}
