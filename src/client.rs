//! Request execution shared by client-mode and server-mode API clients.
//!
//! Both client families funnel through [`RequestExecutor`]: it resolves the path under the
//! mode's prefix, attaches the `Authorization` header chosen by [`Authorization`], sends
//! exactly one request through the [`ApiTransport`], classifies the status, and only then
//! decodes the body. Every call ends in either a decoded value or a typed [`Error`]; nothing
//! is retried or swallowed.

mod end_user;
mod server;

pub use end_user::*;
pub use server::*;

// crates.io
use serde::de::DeserializeOwned;
// self
use crate::{
	_prelude::*,
	auth::{ApiKeyAuth, AssistantId, Context, SessionId, Secret},
	config::ClientConfig,
	error::{DecodeError, TransportError},
	http::{ApiRequest, ApiResponse, ApiTransport, Method},
	model::{ChatRequest, CreateSessionRequest, Message, Session},
	obs::{self, Operation, Outcome, RequestSpan},
};

/// API families exposed by the service.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ApiMode {
	/// End-user API under `/client/api/v1`, authenticated with bearer tokens.
	Client,
	/// Backend API under `/server/api/v1`, authenticated with API keys.
	Server,
}
impl ApiMode {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			ApiMode::Client => "client",
			ApiMode::Server => "server",
		}
	}

	/// Path segments every endpoint of this family lives under.
	pub const fn prefix(self) -> [&'static str; 3] {
		[self.as_str(), "api", "v1"]
	}
}
impl Display for ApiMode {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Authorization strategy attached to every request.
#[derive(Clone)]
pub enum Authorization {
	/// `Authorization: Bearer <token>` for client-mode requests.
	Bearer(Secret),
	/// `Authorization: ApiKey <secret>` for server-mode requests.
	ApiKey(ApiKeyAuth),
}
impl Authorization {
	/// API family this strategy authenticates against.
	pub fn mode(&self) -> ApiMode {
		match self {
			Self::Bearer(_) => ApiMode::Client,
			Self::ApiKey(_) => ApiMode::Server,
		}
	}

	/// Value for the `Authorization` header. Callers must avoid logging it.
	pub fn header_value(&self) -> Cow<'_, str> {
		match self {
			Self::Bearer(token) => Cow::Owned(format!("Bearer {}", token.expose())),
			Self::ApiKey(auth) => Cow::Borrowed(auth.header_value()),
		}
	}
}
impl Debug for Authorization {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Self::Bearer(token) => f.debug_tuple("Bearer").field(token).finish(),
			Self::ApiKey(auth) => f.debug_tuple("ApiKey").field(auth).finish(),
		}
	}
}

/// Performs single-shot request/response cycles against the configured base URL.
pub struct RequestExecutor<T>
where
	T: ?Sized + ApiTransport,
{
	config: ClientConfig,
	transport: Arc<T>,
}
impl<T> RequestExecutor<T>
where
	T: ?Sized + ApiTransport,
{
	/// Creates an executor over a validated configuration and a transport.
	pub fn new(config: ClientConfig, transport: impl Into<Arc<T>>) -> Self {
		Self { config, transport: transport.into() }
	}

	/// Configuration applied to every request.
	pub fn config(&self) -> &ClientConfig {
		&self.config
	}

	/// Transport shared by every request.
	pub fn transport(&self) -> &Arc<T> {
		&self.transport
	}

	/// Sends one request to `segments` (relative to the mode prefix) and decodes the 2xx body
	/// into `R`.
	///
	/// `Content-Type: application/json` is set only when `body` is present. Non-2xx responses
	/// become [`Error::Http`]; a 2xx body of the wrong shape becomes [`Error::Decode`].
	pub async fn execute<B, R>(
		&self,
		operation: Operation,
		authorization: &Authorization,
		method: Method,
		segments: &[&str],
		body: Option<&B>,
	) -> Result<R>
	where
		B: ?Sized + Serialize,
		R: DeserializeOwned,
	{
		let mode = authorization.mode();
		let span = RequestSpan::request(operation, mode);

		obs::record_outcome(operation, Some(mode), Outcome::Attempt);

		let result = match self.prepare(authorization, method, segments, body) {
			Ok(request) => span.instrument(self.send(operation, mode, &span, request)).await,
			Err(e) => Err(e),
		};

		obs::record_outcome(operation, Some(mode), Outcome::of(&result));

		result
	}

	/// `POST {prefix}/assistants/{assistant_id}/sessions`.
	pub async fn create_session(
		&self,
		authorization: &Authorization,
		assistant_id: &AssistantId,
		context: &Context,
	) -> Result<Session> {
		self.execute(
			Operation::CreateSession,
			authorization,
			Method::Post,
			&["assistants", assistant_id.as_ref(), "sessions"],
			Some(&CreateSessionRequest { context }),
		)
		.await
	}

	/// `GET {prefix}/assistants/{assistant_id}/sessions/{session_id}/messages`.
	pub async fn fetch_session_messages(
		&self,
		authorization: &Authorization,
		assistant_id: &AssistantId,
		session_id: &SessionId,
	) -> Result<Vec<Message>> {
		self.execute(
			Operation::FetchSessionMessages,
			authorization,
			Method::Get,
			&["assistants", assistant_id.as_ref(), "sessions", session_id.as_ref(), "messages"],
			None::<&()>,
		)
		.await
	}

	/// `POST {prefix}/assistants/{assistant_id}/sessions/{session_id}/chat`.
	pub async fn chat(
		&self,
		authorization: &Authorization,
		assistant_id: &AssistantId,
		session_id: &SessionId,
		message: &str,
	) -> Result<Vec<Message>> {
		self.execute(
			Operation::Chat,
			authorization,
			Method::Post,
			&["assistants", assistant_id.as_ref(), "sessions", session_id.as_ref(), "chat"],
			Some(&ChatRequest { message }),
		)
		.await
	}

	fn prepare<B>(
		&self,
		authorization: &Authorization,
		method: Method,
		segments: &[&str],
		body: Option<&B>,
	) -> Result<ApiRequest>
	where
		B: ?Sized + Serialize,
	{
		let body = body.map(serde_json::to_vec).transpose().map_err(Error::Serialization)?;
		let mut path: Vec<&str> = authorization.mode().prefix().to_vec();

		path.extend_from_slice(segments);

		Ok(ApiRequest {
			method,
			url: self.config.endpoint(path),
			authorization: authorization.header_value().into_owned(),
			user_agent: self.config.user_agent().to_owned(),
			body,
			timeout: self.config.timeout(),
		})
	}

	async fn send<R>(
		&self,
		operation: Operation,
		mode: ApiMode,
		span: &RequestSpan,
		request: ApiRequest,
	) -> Result<R>
	where
		R: DeserializeOwned,
	{
		let response = self.transport.execute(request).await.map_err(TransportError::network)?;

		span.record_status(response.status);
		obs::record_status(operation, mode, response.status);

		if let Some(e) = response.error_for_status() {
			return Err(e.into());
		}

		decode(&response)
	}
}
impl<T> Clone for RequestExecutor<T>
where
	T: ?Sized + ApiTransport,
{
	fn clone(&self) -> Self {
		Self { config: self.config.clone(), transport: Arc::clone(&self.transport) }
	}
}
impl<T> Debug for RequestExecutor<T>
where
	T: ?Sized + ApiTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("RequestExecutor").field("config", &self.config).finish()
	}
}

fn decode<R>(response: &ApiResponse) -> Result<R>
where
	R: DeserializeOwned,
{
	let mut deserializer = serde_json::Deserializer::from_slice(&response.body);

	serde_path_to_error::deserialize(&mut deserializer)
		.map_err(|source| DecodeError { status: response.status, source }.into())
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::_preludet::*;

	#[test]
	fn authorization_selects_mode_and_header() {
		let bearer = Authorization::Bearer(Secret::new("tok"));
		let api_key = Authorization::ApiKey(test_api_key_auth());

		assert_eq!(bearer.mode(), ApiMode::Client);
		assert_eq!(bearer.header_value(), "Bearer tok");
		assert_eq!(api_key.mode(), ApiMode::Server);
		assert_eq!(api_key.header_value(), "ApiKey s3cr3t");
		assert!(!format!("{bearer:?}{api_key:?}").contains("s3cr3t"));
		assert!(!format!("{bearer:?}").contains("tok"));
	}

	#[test]
	fn prefixes_differ_only_by_mode() {
		assert_eq!(ApiMode::Client.prefix(), ["client", "api", "v1"]);
		assert_eq!(ApiMode::Server.prefix(), ["server", "api", "v1"]);
	}

	#[test]
	fn decode_reports_path_and_status() {
		let err = decode::<Session>(&ApiResponse::new(200, "{\"id\":7}"))
			.expect_err("Numeric id must not decode into a string.");

		match err {
			Error::Decode(DecodeError { status, source }) => {
				assert_eq!(status, 200);
				assert_eq!(source.path().to_string(), "id");
			},
			other => panic!("Unexpected error variant: {other:?}."),
		}
	}

	#[test]
	fn created_session_decodes() {
		let response = ApiResponse::new(201, "{\"id\":\"sess_1\"}");

		assert_eq!(response.error_for_status(), None);

		let session: Session = decode(&response).expect("Session should decode.");

		assert_eq!(session.id, "sess_1");
	}
}
