//! Issued and cached bearer credentials.

// self
use crate::{_prelude::*, auth::TokenSecret};

/// Token freshly returned by a [`TokenSource`](crate::auth::TokenSource).
#[derive(Clone, Debug)]
pub struct IssuedToken {
	/// Opaque bearer token.
	pub access_token: TokenSecret,
	/// Validity window reported by the provider.
	pub expires_in: Duration,
}

/// Bearer credential held by the [`CredentialCache`](crate::auth::CredentialCache).
///
/// Replaced wholesale on every refresh; never partially updated.
#[derive(Clone, Debug)]
pub struct CachedCredential {
	/// Opaque bearer token.
	pub token: TokenSecret,
	/// Instant the token response was received.
	pub issued_at: OffsetDateTime,
	/// First instant at which the token is no longer usable.
	pub expires_at: OffsetDateTime,
}
impl CachedCredential {
	/// Stamps an issued token with its absolute expiry relative to `received_at`.
	///
	/// Returns `None` when the expiry falls outside the representable date range.
	pub fn from_issued(issued: IssuedToken, received_at: OffsetDateTime) -> Option<Self> {
		let expires_at = received_at.checked_add(issued.expires_in)?;

		Some(Self { token: issued.access_token, issued_at: received_at, expires_at })
	}

	/// Returns `true` while `instant` is strictly before `expires_at - leeway`.
	pub fn is_usable_at(&self, instant: OffsetDateTime, leeway: Duration) -> bool {
		instant < self.expires_at - leeway
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros;
	// self
	use super::*;

	fn credential() -> CachedCredential {
		CachedCredential::from_issued(
			IssuedToken {
				access_token: TokenSecret::new("token"),
				expires_in: Duration::seconds(1800),
			},
			macros::datetime!(2025-01-01 00:00 UTC),
		)
		.expect("Test credential expiry should be representable.")
	}

	#[test]
	fn expiry_is_relative_to_receipt() {
		let credential = credential();

		assert_eq!(credential.issued_at, macros::datetime!(2025-01-01 00:00 UTC));
		assert_eq!(credential.expires_at, macros::datetime!(2025-01-01 00:30 UTC));
	}

	#[test]
	fn usable_strictly_before_expiry() {
		let credential = credential();

		assert!(credential.is_usable_at(macros::datetime!(2025-01-01 00:29:59 UTC), Duration::ZERO));
		assert!(!credential.is_usable_at(macros::datetime!(2025-01-01 00:30 UTC), Duration::ZERO));
		assert!(!credential.is_usable_at(macros::datetime!(2025-01-01 00:31 UTC), Duration::ZERO));
	}

	#[test]
	fn leeway_shortens_the_usable_window() {
		let credential = credential();
		let leeway = Duration::minutes(5);

		assert!(credential.is_usable_at(macros::datetime!(2025-01-01 00:24 UTC), leeway));
		assert!(!credential.is_usable_at(macros::datetime!(2025-01-01 00:25 UTC), leeway));
	}

	#[test]
	fn unrepresentable_expiry_is_rejected() {
		let issued = |expires_in| IssuedToken {
			access_token: TokenSecret::new("token"),
			expires_in,
		};
		let received_at = macros::datetime!(2025-01-01 00:00 UTC);

		assert!(CachedCredential::from_issued(issued(Duration::seconds(400_000_000_000)), received_at)
			.is_none());
		assert!(CachedCredential::from_issued(issued(Duration::seconds(i64::MAX)), received_at)
			.is_none());
	}
}
