//! Observability helpers for relay flows.
//!
//! - Token refreshes and flight searches run inside `flight_relay.flow` spans carrying the
//!   `flow` and `stage` fields.
//! - Enable the `metrics` feature to increment the `flight_relay_flow_total` counter for every
//!   attempt/success/failure, labeled by `flow` + `outcome`.
//! - [`init_subscriber`] installs the process-wide `tracing` subscriber used by the binary.

mod counter;
mod span;
mod subscriber;

pub use counter::*;
pub use span::*;
pub use subscriber::*;

// self
use crate::_prelude::*;

/// Relay flow kinds observed by spans and metrics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowKind {
	/// Client-credentials token refresh against the provider.
	TokenRefresh,
	/// Flight-offers search against the provider.
	FlightSearch,
}
impl FlowKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowKind::TokenRefresh => "token_refresh",
			FlowKind::FlightSearch => "flight_search",
		}
	}
}
impl Display for FlowKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowOutcome {
	/// Entry to a relay flow.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl FlowOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowOutcome::Attempt => "attempt",
			FlowOutcome::Success => "success",
			FlowOutcome::Failure => "failure",
		}
	}
}
impl Display for FlowOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
