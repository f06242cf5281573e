// self
use crate::{
	client::ApiMode,
	obs::{Operation, Outcome},
};

/// Records an operation outcome via the global metrics recorder (when enabled).
///
/// Token issuance has no API mode, so it is counted separately from API calls.
pub fn record_outcome(operation: Operation, mode: Option<ApiMode>, outcome: Outcome) {
	#[cfg(feature = "metrics")]
	{
		match (operation, mode) {
			(Operation::IssueToken, _) | (_, None) => {
				metrics::counter!(
					"qyro_token_total",
					"operation" => operation.as_str(),
					"outcome" => outcome.as_str()
				)
				.increment(1);
			},
			(_, Some(mode)) => {
				metrics::counter!(
					"qyro_request_total",
					"operation" => operation.as_str(),
					"mode" => mode.as_str(),
					"outcome" => outcome.as_str()
				)
				.increment(1);
			},
		}
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (operation, mode, outcome);
	}
}

/// Counts a received response by status class (`2xx`, `4xx`, ...).
pub fn record_status(operation: Operation, mode: ApiMode, status: u16) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"qyro_response_total",
			"operation" => operation.as_str(),
			"mode" => mode.as_str(),
			"class" => status_class(status)
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (operation, mode, status);
	}
}

/// Buckets an HTTP status into its class label.
pub const fn status_class(status: u16) -> &'static str {
	match status {
		100..=199 => "1xx",
		200..=299 => "2xx",
		300..=399 => "3xx",
		400..=499 => "4xx",
		500..=599 => "5xx",
		_ => "other",
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn status_classes_cover_boundaries() {
		assert_eq!(status_class(200), "2xx");
		assert_eq!(status_class(299), "2xx");
		assert_eq!(status_class(300), "3xx");
		assert_eq!(status_class(404), "4xx");
		assert_eq!(status_class(503), "5xx");
		assert_eq!(status_class(99), "other");
		assert_eq!(status_class(600), "other");
	}

	#[test]
	fn recording_is_noop_without_metrics() {
		record_outcome(Operation::IssueToken, None, Outcome::Attempt);
		record_outcome(Operation::CreateSession, Some(ApiMode::Server), Outcome::Failure);
		record_status(Operation::Chat, ApiMode::Client, 500);
	}
}
