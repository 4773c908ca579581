// std
use std::sync::atomic::{AtomicU64, Ordering};
// self
use crate::obs::{FlowKind, FlowOutcome};

/// Records a flow outcome via the global metrics recorder (when enabled).
pub fn record_flow_outcome(kind: FlowKind, outcome: FlowOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"flight_relay_flow_total",
			"flow" => kind.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, outcome);
	}
}

/// Thread-safe counters kept by the credential cache.
#[derive(Debug, Default)]
pub struct CacheMetrics {
	hits: AtomicU64,
	refreshes: AtomicU64,
	failures: AtomicU64,
}
impl CacheMetrics {
	/// Returns how many acquisitions were served from the cached credential.
	pub fn hits(&self) -> u64 {
		self.hits.load(Ordering::Relaxed)
	}

	/// Returns how many token requests completed successfully.
	pub fn refreshes(&self) -> u64 {
		self.refreshes.load(Ordering::Relaxed)
	}

	/// Returns how many token requests failed.
	pub fn failures(&self) -> u64 {
		self.failures.load(Ordering::Relaxed)
	}

	pub(crate) fn record_hit(&self) {
		self.hits.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_refresh(&self) {
		self.refreshes.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_failure(&self) {
		self.failures.fetch_add(1, Ordering::Relaxed);
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn record_flow_outcome_noop_without_metrics() {
		record_flow_outcome(FlowKind::TokenRefresh, FlowOutcome::Failure);
	}

	#[test]
	fn cache_metrics_count_independently() {
		let metrics = CacheMetrics::default();

		metrics.record_hit();
		metrics.record_hit();
		metrics.record_refresh();

		assert_eq!(metrics.hits(), 2);
		assert_eq!(metrics.refreshes(), 1);
		assert_eq!(metrics.failures(), 0);
	}
}
