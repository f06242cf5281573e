//! Client configuration shared by client-mode and server-mode clients.
//!
//! A [`ClientConfig`] is validated once at construction, so a client never exists in a
//! partially configured state and configuration problems surface before any network
//! activity.

/// Consuming builder that validates a [`ClientConfig`].
pub mod builder;

pub use builder::*;

// std
use std::time::Duration as StdDuration;
// self
use crate::_prelude::*;

/// Immutable, validated client configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
	base_url: Url,
	timeout: StdDuration,
	user_agent: String,
}
impl ClientConfig {
	/// Timeout applied when none is configured.
	pub const DEFAULT_TIMEOUT: StdDuration = StdDuration::from_secs(30);
	/// `User-Agent` applied when none is configured.
	pub const DEFAULT_USER_AGENT: &'static str = concat!("qyro-rust/", env!("CARGO_PKG_VERSION"));

	/// Validates `base_url` and applies default timeout + user agent.
	pub fn new(base_url: impl Into<String>) -> Result<Self> {
		Self::builder(base_url).build()
	}

	/// Creates a new builder seeded with the provided base URL.
	pub fn builder(base_url: impl Into<String>) -> ClientConfigBuilder {
		ClientConfigBuilder::new(base_url)
	}

	/// Base URL every API path is appended to (query and fragment stripped).
	pub fn base_url(&self) -> &Url {
		&self.base_url
	}

	/// Deadline applied uniformly to every request.
	pub fn timeout(&self) -> StdDuration {
		self.timeout
	}

	/// `User-Agent` header sent with every request.
	pub fn user_agent(&self) -> &str {
		&self.user_agent
	}

	/// Resolves `segments` against the base URL, percent-encoding each segment and keeping any
	/// path prefix already present on the base.
	pub fn endpoint<I>(&self, segments: I) -> Url
	where
		I: IntoIterator,
		I::Item: AsRef<str>,
	{
		let mut url = self.base_url.clone();

		// Only `build` constructs a config and it rejects cannot-be-a-base URLs.
		if let Ok(mut path) = url.path_segments_mut() {
			path.pop_if_empty().extend(segments);
		}

		url
	}
}
