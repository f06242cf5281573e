// self
use crate::{_prelude::*, client::ApiMode, obs::Operation};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedRequest<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedRequest<F> = F;

/// Span wrapping one token issuance or one API call.
///
/// The span name comes from [`Operation::span_name`]; API calls additionally carry the
/// [`ApiMode`] and, once a response arrives, its HTTP status.
#[derive(Clone, Debug)]
pub struct RequestSpan {
	name: &'static str,
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl RequestSpan {
	/// Opens the `qyro.token` span for a token signed under `key_id`.
	pub fn token(key_id: &str) -> Self {
		const OPERATION: Operation = Operation::IssueToken;

		#[cfg(feature = "tracing")]
		let span = tracing::info_span!("qyro.token", operation = OPERATION.as_str(), kid = key_id);
		#[cfg(not(feature = "tracing"))]
		let _ = key_id;

		Self {
			name: OPERATION.span_name(),
			#[cfg(feature = "tracing")]
			span,
		}
	}

	/// Opens the span for an API call made in `mode`.
	pub fn request(operation: Operation, mode: ApiMode) -> Self {
		#[cfg(feature = "tracing")]
		let span = match operation {
			Operation::IssueToken => tracing::info_span!(
				"qyro.token",
				operation = operation.as_str(),
				mode = mode.as_str()
			),
			_ => tracing::info_span!(
				"qyro.request",
				operation = operation.as_str(),
				mode = mode.as_str(),
				status = tracing::field::Empty
			),
		};
		#[cfg(not(feature = "tracing"))]
		let _ = mode;

		Self {
			name: operation.span_name(),
			#[cfg(feature = "tracing")]
			span,
		}
	}

	/// Name the span was opened under.
	pub fn name(&self) -> &'static str {
		self.name
	}

	/// Attaches the response status to an API-call span.
	pub fn record_status(&self, status: u16) {
		#[cfg(feature = "tracing")]
		self.span.record("status", status);
		#[cfg(not(feature = "tracing"))]
		let _ = status;
	}

	/// Enters the span for synchronous sections.
	pub fn entered(self) -> RequestSpanGuard {
		#[cfg(feature = "tracing")]
		{
			RequestSpanGuard { guard: self.span.entered() }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = self;

			RequestSpanGuard {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedRequest<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// RAII guard returned by [`RequestSpan::entered`].
pub struct RequestSpanGuard {
	#[cfg(feature = "tracing")]
	#[allow(dead_code)]
	guard: tracing::span::EnteredSpan,
}
impl Debug for RequestSpanGuard {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("RequestSpanGuard(..)")
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn issuance_span_is_named_after_tokens() {
		let span = RequestSpan::token("key_abc");

		assert_eq!(span.name(), "qyro.token");

		let _guard = span.entered();
	}

	#[test]
	fn request_spans_take_their_name_from_the_operation() {
		for mode in [ApiMode::Client, ApiMode::Server] {
			assert_eq!(RequestSpan::request(Operation::Chat, mode).name(), "qyro.request");
			assert_eq!(RequestSpan::request(Operation::CreateSession, mode).name(), "qyro.request");
			assert_eq!(RequestSpan::request(Operation::IssueToken, mode).name(), "qyro.token");
		}
	}

	#[cfg(feature = "tracing")]
	#[test]
	fn tracing_metadata_matches_span_name() {
		for span in [
			RequestSpan::token("key_abc"),
			RequestSpan::request(Operation::IssueToken, ApiMode::Client),
			RequestSpan::request(Operation::FetchSessionMessages, ApiMode::Server),
		] {
			assert_eq!(span.span.metadata().map(|meta| meta.name()), Some(span.name()));
		}
	}

	#[tokio::test]
	async fn instrument_wraps_future_and_accepts_status() {
		let span = RequestSpan::request(Operation::Chat, ApiMode::Server);
		let value = span.instrument(async { 42 }).await;

		span.record_status(201);

		assert_eq!(value, 42);
	}
}
