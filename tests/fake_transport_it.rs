// std
use std::{
	fmt::{Display, Formatter, Result as FmtResult},
	sync::{
		Arc,
		atomic::{AtomicUsize, Ordering},
	},
};
// crates.io
use parking_lot::Mutex;
// self
use qyro::{
	auth::{ApiKeyAuth, AssistantId, Context, IdentifierError, SessionId},
	client::{QyroClient, QyroServerClient},
	config::ClientConfig,
	error::{ConfigError, Error, HttpError, TransportError},
	http::{ApiRequest, ApiResponse, ApiTransport, Method, TransportFuture},
};

#[derive(Debug)]
enum FakeTransportError {
	ConnectionReset,
}
impl Display for FakeTransportError {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Self::ConnectionReset => write!(f, "Connection reset by peer."),
		}
	}
}
impl std::error::Error for FakeTransportError {}

/// Replays a canned outcome and records every request it receives.
#[derive(Default)]
struct RecordingTransport {
	response: Option<ApiResponse>,
	calls: AtomicUsize,
	requests: Mutex<Vec<ApiRequest>>,
}
impl RecordingTransport {
	fn replying(status: u16, body: &str) -> Self {
		Self { response: Some(ApiResponse::new(status, body)), ..Default::default() }
	}

	fn failing() -> Self {
		Self::default()
	}

	fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}

	fn last_request(&self) -> ApiRequest {
		self.requests.lock().last().cloned().expect("A request should have been recorded.")
	}
}
impl ApiTransport for RecordingTransport {
	type TransportError = FakeTransportError;

	fn execute(&self, request: ApiRequest) -> TransportFuture<'_, Self::TransportError> {
		Box::pin(async move {
			self.calls.fetch_add(1, Ordering::SeqCst);
			self.requests.lock().push(request);

			self.response.clone().ok_or(FakeTransportError::ConnectionReset)
		})
	}
}

fn config() -> ClientConfig {
	ClientConfig::new("https://api.qyro.test").expect("Fixture base URL should be valid.")
}

fn assistant() -> AssistantId {
	AssistantId::new("asst_1").expect("Assistant fixture should be valid.")
}

fn session() -> SessionId {
	SessionId::new("sess_1").expect("Session fixture should be valid.")
}

#[tokio::test]
async fn created_session_decodes_without_error() {
	let transport = Arc::new(RecordingTransport::replying(201, "{\"id\":\"sess_1\"}"));
	let client: QyroClient<RecordingTransport> =
		QyroClient::with_transport(config(), "tok", transport.clone());
	let session = client
		.create_session(&assistant(), &Context::new())
		.await
		.expect("201 with a valid body should decode.");

	assert_eq!(session.id, "sess_1");
	assert_eq!(transport.calls(), 1);

	let request = transport.last_request();

	assert_eq!(request.method, Method::Post);
	assert_eq!(
		request.url.as_str(),
		"https://api.qyro.test/client/api/v1/assistants/asst_1/sessions"
	);
	assert_eq!(request.header("authorization"), Some("Bearer tok"));
	assert_eq!(request.header("content-type"), Some("application/json"));
	assert_eq!(request.body.as_deref(), Some(b"{\"context\":{}}".as_slice()));
	assert_eq!(request.timeout, ClientConfig::DEFAULT_TIMEOUT);
}

#[tokio::test]
async fn not_found_is_classified_with_verbatim_body() {
	let transport = Arc::new(RecordingTransport::replying(404, "{\"error\":\"not found\"}"));
	let client: QyroServerClient<RecordingTransport> = QyroServerClient::with_transport(
		config(),
		ApiKeyAuth::new("key_abc", "s3cr3t"),
		transport.clone(),
	);
	let err = client
		.fetch_session_messages(&assistant(), &session())
		.await
		.expect_err("404 must be classified as an HTTP error.");

	match err {
		Error::Http(e) => assert_eq!(e, HttpError {
			status: 404,
			body: "{\"error\":\"not found\"}".into()
		}),
		other => panic!("Unexpected error variant: {other:?}."),
	}

	let request = transport.last_request();

	assert_eq!(request.method, Method::Get);
	assert_eq!(request.header("authorization"), Some("ApiKey s3cr3t"));
	assert_eq!(request.header("content-type"), None);
	assert!(request.body.is_none());
}

#[tokio::test]
async fn transport_failures_are_wrapped_not_retried() {
	let transport = Arc::new(RecordingTransport::failing());
	let client: QyroClient<RecordingTransport> =
		QyroClient::with_transport(config(), "tok", transport.clone());
	let err = client
		.chat(&assistant(), &session(), "hello")
		.await
		.expect_err("Transport failure must propagate.");

	match err {
		Error::Transport(TransportError::Network { source }) => {
			assert_eq!(source.to_string(), "Connection reset by peer.");
		},
		other => panic!("Unexpected error variant: {other:?}."),
	}

	assert_eq!(transport.calls(), 1, "Failed requests must not be retried.");
}

#[tokio::test]
async fn server_errors_are_not_retried() {
	let transport = Arc::new(RecordingTransport::replying(503, "upstream unavailable"));
	let client: QyroServerClient<RecordingTransport> = QyroServerClient::with_transport(
		config(),
		ApiKeyAuth::new("key_abc", "s3cr3t"),
		transport.clone(),
	);
	let err = client
		.chat(&assistant(), &session(), "hello")
		.await
		.expect_err("503 must propagate.");

	assert_eq!(err.status(), Some(503));
	assert_eq!(transport.calls(), 1);
}

async fn create_session_at(
	base_url: &str,
	transport: Arc<RecordingTransport>,
) -> Result<qyro::model::Session, Error> {
	let config = ClientConfig::new(base_url)?;
	let client: QyroServerClient<RecordingTransport> =
		QyroServerClient::with_transport(config, ApiKeyAuth::new("key_abc", "s3cr3t"), transport);

	client.create_session(&assistant(), &Context::new()).await
}

#[tokio::test]
async fn empty_base_url_fails_before_any_request() {
	let transport = Arc::new(RecordingTransport::replying(201, "{\"id\":\"sess_1\"}"));

	for base_url in ["", "  "] {
		let err = create_session_at(base_url, transport.clone())
			.await
			.expect_err("Empty base URL must be rejected.");

		assert!(matches!(err, Error::Config(ConfigError::MissingBaseUrl)), "{err:?}");
	}

	assert_eq!(transport.calls(), 0, "No request may be sent without a base URL.");

	create_session_at("https://api.qyro.test", transport.clone())
		.await
		.expect("A valid base URL should reach the transport.");

	assert_eq!(transport.calls(), 1);
}

#[test]
fn invalid_identifiers_convert_into_config_errors() {
	fn parse(raw: &str) -> Result<AssistantId, Error> {
		Ok(AssistantId::new(raw)?)
	}

	assert!(matches!(parse("a b"), Err(Error::Config(ConfigError::InvalidIdentifier(_)))));
	assert!(matches!(
		parse(".."),
		Err(Error::Config(ConfigError::InvalidIdentifier(IdentifierError::DotSegment { .. })))
	));
	assert!(parse("asst_1").is_ok());
}
