//! Client-level error types shared by token issuance, configuration, and requests.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem; raised before any network activity.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Caller-supplied context or request body cannot be encoded as JSON.
	#[error("Payload could not be serialized to JSON.")]
	Serialization(#[source] serde_json::Error),
	/// Token claims could not be signed.
	#[error("Client token could not be signed.")]
	Signing(#[from] jsonwebtoken::errors::Error),
	/// Transport failure (DNS, TCP, TLS, timeout).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Remote service answered with a non-2xx status.
	#[error(transparent)]
	Http(#[from] HttpError),
	/// Remote service answered 2xx but the body did not match the expected shape.
	#[error(transparent)]
	Decode(#[from] DecodeError),
}
impl From<crate::auth::IdentifierError> for Error {
	fn from(e: crate::auth::IdentifierError) -> Self {
		ConfigError::from(e).into()
	}
}
impl Error {
	/// Returns the HTTP status attached to the failure, when the remote service answered.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Http(e) => Some(e.status),
			Self::Decode(e) => Some(e.status),
			_ => None,
		}
	}
}

/// Configuration and validation failures raised before a request is sent.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Base URL was empty.
	#[error("The base_url is required.")]
	MissingBaseUrl,
	/// Base URL cannot be parsed.
	#[error("The base_url `{url}` is invalid.")]
	InvalidBaseUrl {
		/// Raw value supplied by the caller.
		url: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Base URL cannot carry path segments (e.g. `mailto:` or `data:` URLs).
	#[error("The base_url `{url}` cannot be used as a base for API paths.")]
	CannotBeABase {
		/// Raw value supplied by the caller.
		url: String,
	},
	/// Request timeout must be non-zero.
	#[error("The request timeout must be greater than zero.")]
	ZeroTimeout,
	/// Token lifetime must be strictly positive.
	#[error("The client token lifetime must be positive.")]
	NonPositiveTokenTtl,
	/// Resource identifier failed validation.
	#[error("Resource identifier is invalid.")]
	InvalidIdentifier(#[from] crate::auth::IdentifierError),
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO, timeout).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the Qyro API.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the Qyro API.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

/// Non-2xx response carrying the literal status and raw body.
///
/// The body is passed through untouched so callers can interpret the service's own error
/// payloads.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("HTTP {status}: {body}")]
pub struct HttpError {
	/// HTTP status code returned by the service.
	pub status: u16,
	/// Raw response body.
	pub body: String,
}

/// 2xx response whose body could not be decoded into the requested type.
#[derive(Debug, ThisError)]
#[error("Response body (HTTP {status}) did not match the expected shape.")]
pub struct DecodeError {
	/// HTTP status code of the response.
	pub status: u16,
	/// Structured parsing failure, including the JSON path that failed.
	#[source]
	pub source: serde_path_to_error::Error<serde_json::Error>,
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn http_error_display_includes_status_and_body() {
		let err = HttpError { status: 404, body: "{\"error\":\"not found\"}".into() };

		assert_eq!(err.to_string(), "HTTP 404: {\"error\":\"not found\"}");
		assert_eq!(Error::from(err).status(), Some(404));
	}

	#[test]
	fn status_is_absent_for_local_failures() {
		assert_eq!(Error::from(ConfigError::MissingBaseUrl).status(), None);
		assert_eq!(
			Error::from(TransportError::Io(std::io::Error::other("reset"))).status(),
			None
		);
	}
}
