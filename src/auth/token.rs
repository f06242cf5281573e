//! End-user token issuance for client-mode requests.
//!
//! [`ClientTokenIssuer`] binds an arbitrary JSON context to an API-key identity and signs the
//! result as a compact HS256 JWT. The JOSE header carries `kid = <api key id>` so the
//! verifying service can pick the matching secret without trial and error. Tokens are handed
//! to the caller and never cached, stored, or refreshed here.

mod canonical;

// crates.io
use jsonwebtoken::{Algorithm, EncodingKey, Header};
// self
use crate::{
	_prelude::*,
	auth::{Credential, Secret, token::canonical::canonical_json},
	error::ConfigError,
	obs::{self, Operation, Outcome, RequestSpan},
};

/// Caller-supplied context embedded in the `sub` claim.
pub type Context = serde_json::Map<String, serde_json::Value>;

/// Value of the `type` claim on every client token.
pub const CLIENT_TOKEN_TYPE: &str = "client";
/// Value of the `aud` claim on every client token.
pub const CLIENT_TOKEN_AUDIENCE: &str = "qyro";
/// Lifetime applied when no explicit TTL is configured (30 days).
pub const DEFAULT_CLIENT_TOKEN_TTL: Duration = Duration::days(30);

/// Claims carried by a client token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientTokenClaims {
	/// Canonical JSON encoding of the caller context.
	pub sub: String,
	/// Issued-at, seconds since the Unix epoch.
	pub iat: i64,
	/// Expiry, seconds since the Unix epoch.
	pub exp: i64,
	/// Token kind; always [`CLIENT_TOKEN_TYPE`].
	#[serde(rename = "type")]
	pub token_type: String,
	/// API-key identifier that issued the token.
	pub iss: String,
	/// Intended audience; always [`CLIENT_TOKEN_AUDIENCE`].
	pub aud: String,
	/// Unique token identifier (UUID v4).
	pub jti: String,
}
impl ClientTokenClaims {
	/// Assembles claims for `subject`, issued by `issuer` at `issued_at` and valid for `ttl`.
	///
	/// The issued-at instant is truncated to whole seconds and a fresh `jti` is generated on
	/// every call.
	pub fn new(issuer: &str, subject: String, issued_at: OffsetDateTime, ttl: Duration) -> Self {
		let iat = issued_at.unix_timestamp();

		Self {
			sub: subject,
			iat,
			exp: iat.saturating_add(ttl.whole_seconds()),
			token_type: CLIENT_TOKEN_TYPE.into(),
			iss: issuer.into(),
			aud: CLIENT_TOKEN_AUDIENCE.into(),
			jti: uuid::Uuid::new_v4().to_string(),
		}
	}
}

/// Issues signed client tokens for a single API-key credential.
///
/// The issuer holds only immutable configuration, so one instance can be shared across
/// threads and tasks.
#[derive(Clone)]
pub struct ClientTokenIssuer {
	credential: Credential,
	ttl: Duration,
}
impl ClientTokenIssuer {
	/// Creates an issuer for the given API-key identifier + secret with the default TTL.
	pub fn new(api_key_id: impl Into<String>, api_key_secret: impl Into<Secret>) -> Self {
		Self::from_credential(Credential::new(api_key_id, api_key_secret))
	}

	/// Wraps an existing credential with the default TTL.
	pub fn from_credential(credential: Credential) -> Self {
		Self { credential, ttl: DEFAULT_CLIENT_TOKEN_TTL }
	}

	/// Overrides the token lifetime (defaults to [`DEFAULT_CLIENT_TOKEN_TTL`]).
	pub fn with_ttl(mut self, ttl: Duration) -> Result<Self> {
		if !ttl.is_positive() || ttl.whole_seconds() == 0 {
			return Err(ConfigError::NonPositiveTokenTtl.into());
		}

		self.ttl = ttl;

		Ok(self)
	}

	/// Token lifetime applied to every issued token.
	pub fn ttl(&self) -> Duration {
		self.ttl
	}

	/// API-key identifier used as `iss` and `kid`.
	pub fn api_key_id(&self) -> &str {
		self.credential.identifier()
	}

	/// Issues a token for `context` using the current wall clock.
	pub fn issue<T>(&self, context: &T) -> Result<Secret>
	where
		T: ?Sized + Serialize,
	{
		self.issue_at(context, OffsetDateTime::now_utc())
	}

	/// Issues a token for `context` as if the current time were `now`.
	pub fn issue_at<T>(&self, context: &T, now: OffsetDateTime) -> Result<Secret>
	where
		T: ?Sized + Serialize,
	{
		const OPERATION: Operation = Operation::IssueToken;

		let _span = RequestSpan::token(self.api_key_id()).entered();

		obs::record_outcome(OPERATION, None, Outcome::Attempt);

		let result = self
			.claims_at(context, now)
			.and_then(|claims| sign_claims(&claims, &self.credential));

		obs::record_outcome(OPERATION, None, Outcome::of(&result));

		result
	}

	/// Builds the claims [`issue_at`](Self::issue_at) would sign, without signing them.
	pub fn claims_at<T>(&self, context: &T, now: OffsetDateTime) -> Result<ClientTokenClaims>
	where
		T: ?Sized + Serialize,
	{
		let subject = canonical_json(context)?;

		Ok(ClientTokenClaims::new(self.credential.identifier(), subject, now, self.ttl))
	}
}
impl Debug for ClientTokenIssuer {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ClientTokenIssuer")
			.field("api_key_id", &self.api_key_id())
			.field("ttl", &self.ttl)
			.finish()
	}
}

/// Signs `claims` with HS256 keyed by the credential secret, tagging the header with
/// `kid = credential.identifier()`.
pub fn sign_claims(claims: &ClientTokenClaims, credential: &Credential) -> Result<Secret> {
	let header = Header {
		kid: Some(credential.identifier().to_owned()),
		..Header::new(Algorithm::HS256)
	};
	let key = EncodingKey::from_secret(credential.secret().expose().as_bytes());

	Ok(Secret::new(jsonwebtoken::encode(&header, claims, &key)?))
}
