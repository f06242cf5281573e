//! Consuming builder that validates base URL, timeout, and user agent in one step.

// std
use std::time::Duration as StdDuration;
// self
use crate::{_prelude::*, config::ClientConfig, error::ConfigError};

/// Builder for [`ClientConfig`] values.
#[derive(Clone, Debug)]
pub struct ClientConfigBuilder {
	/// Raw base URL supplied by the caller.
	pub base_url: String,
	/// Deadline applied to every request.
	pub timeout: StdDuration,
	/// `User-Agent` header value.
	pub user_agent: String,
}
impl ClientConfigBuilder {
	/// Creates a new builder seeded with the provided base URL and defaults.
	pub fn new(base_url: impl Into<String>) -> Self {
		Self {
			base_url: base_url.into(),
			timeout: ClientConfig::DEFAULT_TIMEOUT,
			user_agent: ClientConfig::DEFAULT_USER_AGENT.into(),
		}
	}

	/// Overrides the per-request timeout (defaults to 30 seconds).
	pub fn timeout(mut self, timeout: StdDuration) -> Self {
		self.timeout = timeout;

		self
	}

	/// Overrides the `User-Agent` header.
	pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
		self.user_agent = user_agent.into();

		self
	}

	/// Consumes the builder and validates the resulting configuration.
	pub fn build(self) -> Result<ClientConfig> {
		let raw = self.base_url.trim();

		if raw.is_empty() {
			return Err(ConfigError::MissingBaseUrl.into());
		}
		if self.timeout.is_zero() {
			return Err(ConfigError::ZeroTimeout.into());
		}

		let mut base_url = Url::parse(raw)
			.map_err(|source| ConfigError::InvalidBaseUrl { url: raw.to_owned(), source })?;

		if base_url.cannot_be_a_base() {
			return Err(ConfigError::CannotBeABase { url: raw.to_owned() }.into());
		}

		base_url.set_query(None);
		base_url.set_fragment(None);

		Ok(ClientConfig { base_url, timeout: self.timeout, user_agent: self.user_agent })
	}
}
