//! Server-mode API client authenticated with a static API key.

// self
use crate::{
	_prelude::*,
	auth::{ApiKeyAuth, AssistantId, Context, SessionId},
	client::{ApiMode, Authorization, RequestExecutor},
	config::ClientConfig,
	http::ApiTransport,
	model::{Message, Session},
};
#[cfg(feature = "reqwest")] use crate::{auth::Secret, http::ReqwestHttpClient};

#[cfg(feature = "reqwest")]
/// Server-mode client specialized for the crate's default reqwest transport.
pub type ReqwestQyroServerClient = QyroServerClient<ReqwestHttpClient>;

/// Calls the `/server/api/v1` endpoints with `Authorization: ApiKey <secret>`.
///
/// Intended for trusted backends only; the API-key secret must never reach end users.
pub struct QyroServerClient<T>
where
	T: ?Sized + ApiTransport,
{
	executor: RequestExecutor<T>,
	authorization: Authorization,
}
impl<T> QyroServerClient<T>
where
	T: ?Sized + ApiTransport,
{
	/// Creates a client that reuses the caller-provided transport.
	pub fn with_transport(
		config: ClientConfig,
		auth: ApiKeyAuth,
		transport: impl Into<Arc<T>>,
	) -> Self {
		Self {
			executor: RequestExecutor::new(config, transport),
			authorization: Authorization::ApiKey(auth),
		}
	}

	/// Configuration applied to every request.
	pub fn config(&self) -> &ClientConfig {
		self.executor.config()
	}

	/// API family this client talks to; always [`ApiMode::Server`].
	pub fn mode(&self) -> ApiMode {
		ApiMode::Server
	}

	/// Creates a session with `assistant_id`, forwarding `context`.
	pub async fn create_session(
		&self,
		assistant_id: &AssistantId,
		context: &Context,
	) -> Result<Session> {
		self.executor.create_session(&self.authorization, assistant_id, context).await
	}

	/// Lists the messages of a session.
	pub async fn fetch_session_messages(
		&self,
		assistant_id: &AssistantId,
		session_id: &SessionId,
	) -> Result<Vec<Message>> {
		self.executor.fetch_session_messages(&self.authorization, assistant_id, session_id).await
	}

	/// Sends a chat turn and returns the messages produced by it.
	pub async fn chat(
		&self,
		assistant_id: &AssistantId,
		session_id: &SessionId,
		message: &str,
	) -> Result<Vec<Message>> {
		self.executor.chat(&self.authorization, assistant_id, session_id, message).await
	}
}
#[cfg(feature = "reqwest")]
impl QyroServerClient<ReqwestHttpClient> {
	/// Creates a client backed by its own reqwest transport.
	pub fn new(
		config: ClientConfig,
		api_key_id: impl Into<String>,
		api_key_secret: impl Into<Secret>,
	) -> Result<Self> {
		let transport = ReqwestHttpClient::from_config(&config)?;

		Ok(Self::with_transport(config, ApiKeyAuth::new(api_key_id, api_key_secret), transport))
	}

	/// Validates `base_url`, applies default settings, and creates a reqwest-backed client.
	pub fn from_base_url(
		base_url: impl Into<String>,
		api_key_id: impl Into<String>,
		api_key_secret: impl Into<Secret>,
	) -> Result<Self> {
		Self::new(ClientConfig::new(base_url)?, api_key_id, api_key_secret)
	}
}
impl<T> Clone for QyroServerClient<T>
where
	T: ?Sized + ApiTransport,
{
	fn clone(&self) -> Self {
		Self { executor: self.executor.clone(), authorization: self.authorization.clone() }
	}
}
impl<T> Debug for QyroServerClient<T>
where
	T: ?Sized + ApiTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("QyroServerClient")
			.field("config", self.config())
			.field("authorization", &self.authorization)
			.finish()
	}
}
