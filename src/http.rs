//! Transport primitives for Qyro API calls.
//!
//! The module exposes [`ApiTransport`], the client's only dependency on an HTTP stack,
//! together with the owned [`ApiRequest`] / [`ApiResponse`] values exchanged across it and the
//! status [`classify`] step applied to every response. Transports perform exactly one
//! exchange per call with no retries, and read the response body to completion before the
//! future resolves so the underlying connection is released on every exit path.

mod classify;

pub use classify::*;

// std
use std::time::Duration as StdDuration;
// self
use crate::_prelude::*;
#[cfg(feature = "reqwest")] use crate::{config::ClientConfig, error::ConfigError};

/// Boxed future returned by [`ApiTransport::execute`].
pub type TransportFuture<'a, E> =
	Pin<Box<dyn Future<Output = Result<ApiResponse, E>> + 'a + Send>>;

/// Abstraction over HTTP transports capable of executing Qyro API requests.
///
/// Implementations must be `Send + Sync + 'static` so clients can share them behind an
/// `Arc` and hop executors freely. The returned future must apply [`ApiRequest::timeout`]
/// and resolve only after the whole response body has been read.
pub trait ApiTransport
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// Sends `request` and returns the raw status + body.
	fn execute(&self, request: ApiRequest) -> TransportFuture<'_, Self::TransportError>;
}

/// HTTP methods used by the Qyro API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
	/// `GET`
	Get,
	/// `POST`
	Post,
}
impl Method {
	/// Returns the method token as sent on the wire.
	pub const fn as_str(self) -> &'static str {
		match self {
			Method::Get => "GET",
			Method::Post => "POST",
		}
	}
}
impl Display for Method {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Fully prepared request handed to an [`ApiTransport`].
#[derive(Clone)]
pub struct ApiRequest {
	/// HTTP method.
	pub method: Method,
	/// Absolute request URL.
	pub url: Url,
	/// `Authorization` header value. Callers must avoid logging it.
	pub authorization: String,
	/// `User-Agent` header value.
	pub user_agent: String,
	/// Encoded JSON body, if any.
	pub body: Option<Vec<u8>>,
	/// Deadline for the whole exchange.
	pub timeout: StdDuration,
}
impl ApiRequest {
	/// Media type used for request and response bodies.
	pub const JSON: &'static str = "application/json";

	/// Header name/value pairs for this request.
	///
	/// `Content-Type: application/json` is only present when a body is attached.
	pub fn headers(&self) -> Vec<(&'static str, &str)> {
		let mut headers = vec![
			("authorization", self.authorization.as_str()),
			("accept", Self::JSON),
			("user-agent", self.user_agent.as_str()),
		];

		if self.body.is_some() {
			headers.push(("content-type", Self::JSON));
		}

		headers
	}

	/// Returns the value of `name` (case-insensitive), if set.
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers()
			.into_iter()
			.find(|(key, _)| key.eq_ignore_ascii_case(name))
			.map(|(_, value)| value)
	}
}
impl Debug for ApiRequest {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ApiRequest")
			.field("method", &self.method)
			.field("url", &self.url.as_str())
			.field("authorization", &"<redacted>")
			.field("body_len", &self.body.as_ref().map(Vec::len))
			.field("timeout", &self.timeout)
			.finish()
	}
}

/// Raw response returned by an [`ApiTransport`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiResponse {
	/// HTTP status code.
	pub status: u16,
	/// Full response body.
	pub body: Vec<u8>,
}
impl ApiResponse {
	/// Creates a response from a status and body.
	pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
		Self { status, body: body.into() }
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Builds a reqwest client honoring the timeout + user agent in `config`.
	pub fn from_config(config: &ClientConfig) -> Result<Self> {
		let client = ReqwestClient::builder()
			.timeout(config.timeout())
			.user_agent(config.user_agent())
			.build()
			.map_err(ConfigError::from)?;

		Ok(Self(client))
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl ApiTransport for ReqwestHttpClient {
	type TransportError = ReqwestError;

	fn execute(&self, request: ApiRequest) -> TransportFuture<'_, Self::TransportError> {
		let client = self.0.clone();

		Box::pin(async move {
			let method = match request.method {
				Method::Get => reqwest::Method::GET,
				Method::Post => reqwest::Method::POST,
			};
			let mut builder =
				client.request(method, request.url.clone()).timeout(request.timeout);

			for (name, value) in request.headers() {
				builder = builder.header(name, value);
			}
			if let Some(body) = request.body {
				builder = builder.body(body);
			}

			let response = builder.send().await?;
			let status = response.status().as_u16();
			let body = response.bytes().await?.to_vec();

			Ok(ApiResponse { status, body })
		})
	}
}
