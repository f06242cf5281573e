//! Optional observability helpers for token issuance and API requests.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to wrap every API call in a `qyro.request` span (`operation`, `mode`,
//!   and the response `status` once known) and every token issuance in a `qyro.token` span
//!   (`kid`).
//! - Enable `metrics` to count outcomes: `qyro_request_total{operation, mode, outcome}` for API
//!   calls, `qyro_token_total{outcome}` for issuance, and
//!   `qyro_response_total{operation, mode, class}` per response status class.
//!
//! Secrets, tokens, and request bodies are never attached to spans or metrics.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Operations observed by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
	/// Client-token issuance.
	IssueToken,
	/// `POST .../sessions`.
	CreateSession,
	/// `GET .../sessions/{id}/messages`.
	FetchSessionMessages,
	/// `POST .../sessions/{id}/chat`.
	Chat,
}
impl Operation {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Operation::IssueToken => "issue_token",
			Operation::CreateSession => "create_session",
			Operation::FetchSessionMessages => "fetch_session_messages",
			Operation::Chat => "chat",
		}
	}

	/// Name of the tracing span the operation runs in.
	pub const fn span_name(self) -> &'static str {
		match self {
			Operation::IssueToken => "qyro.token",
			_ => "qyro.request",
		}
	}
}
impl Display for Operation {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
	/// Entry to an operation.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl Outcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Outcome::Attempt => "attempt",
			Outcome::Success => "success",
			Outcome::Failure => "failure",
		}
	}

	/// Terminal outcome of a finished operation.
	pub fn of<T, E>(result: &Result<T, E>) -> Self {
		if result.is_ok() { Outcome::Success } else { Outcome::Failure }
	}
}
impl Display for Outcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::error::ConfigError;

	#[test]
	fn only_issuance_uses_the_token_span() {
		assert_eq!(Operation::IssueToken.span_name(), "qyro.token");

		for operation in
			[Operation::CreateSession, Operation::FetchSessionMessages, Operation::Chat]
		{
			assert_eq!(operation.span_name(), "qyro.request", "{operation}");
		}
	}

	#[test]
	fn outcome_follows_result() {
		assert_eq!(Outcome::of(&Ok::<_, Error>(())), Outcome::Success);
		assert_eq!(
			Outcome::of(&Err::<(), _>(Error::from(ConfigError::MissingBaseUrl))),
			Outcome::Failure
		);
	}
}
