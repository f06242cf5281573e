//! Client-mode API client authenticated with end-user bearer tokens.

// self
use crate::{
	_prelude::*,
	auth::{AssistantId, Context, SessionId, Secret},
	client::{ApiMode, Authorization, RequestExecutor},
	config::ClientConfig,
	http::ApiTransport,
	model::{Message, Session},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

#[cfg(feature = "reqwest")]
/// Client-mode client specialized for the crate's default reqwest transport.
pub type ReqwestQyroClient = QyroClient<ReqwestHttpClient>;

/// Calls the `/client/api/v1` endpoints with `Authorization: Bearer <token>`.
///
/// The token is normally minted by a backend through
/// [`ClientTokenIssuer`](crate::auth::ClientTokenIssuer) and handed to the end user; this
/// client only forwards it.
pub struct QyroClient<T>
where
	T: ?Sized + ApiTransport,
{
	executor: RequestExecutor<T>,
	authorization: Authorization,
}
impl<T> QyroClient<T>
where
	T: ?Sized + ApiTransport,
{
	/// Creates a client that reuses the caller-provided transport.
	pub fn with_transport(
		config: ClientConfig,
		token: impl Into<Secret>,
		transport: impl Into<Arc<T>>,
	) -> Self {
		Self {
			executor: RequestExecutor::new(config, transport),
			authorization: Authorization::Bearer(token.into()),
		}
	}

	/// Configuration applied to every request.
	pub fn config(&self) -> &ClientConfig {
		self.executor.config()
	}

	/// API family this client talks to; always [`ApiMode::Client`].
	pub fn mode(&self) -> ApiMode {
		ApiMode::Client
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
impl QyroClient<ReqwestHttpClient> {
	/// Creates a client backed by its own reqwest transport.
	pub fn new(config: ClientConfig, token: impl Into<Secret>) -> Result<Self> {
		let transport = ReqwestHttpClient::from_config(&config)?;

		Ok(Self::with_transport(config, token, transport))
	}

	/// Validates `base_url`, applies default settings, and creates a reqwest-backed client.
	pub fn from_base_url(base_url: impl Into<String>, token: impl Into<Secret>) -> Result<Self> {
		Self::new(ClientConfig::new(base_url)?, token)
	}
}
impl<T> Clone for QyroClient<T>
where
	T: ?Sized + ApiTransport,
{
	fn clone(&self) -> Self {
		Self { executor: self.executor.clone(), authorization: self.authorization.clone() }
	}
}
impl<T> Debug for QyroClient<T>
where
	T: ?Sized + ApiTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("QyroClient")
			.field("config", self.config())
			.field("authorization", &self.authorization)
			.finish()
	}
}
