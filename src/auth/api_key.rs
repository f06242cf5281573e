//! Static `ApiKey` authorization used by server-mode clients.

// self
use crate::{
	_prelude::*,
	auth::{Credential, Secret},
};

/// Authorization scheme prefix for API-key requests.
pub const API_KEY_SCHEME: &str = "ApiKey";

/// Produces the fixed `Authorization: ApiKey <secret>` header value.
///
/// The header is computed once at construction, so [`ApiKeyAuth::header_value`] returns the
/// same bytes for the lifetime of the value.
#[derive(Clone)]
pub struct ApiKeyAuth {
	credential: Credential,
	header: Secret,
}
impl ApiKeyAuth {
	/// Creates an authorizer for the given API-key identifier + secret.
	pub fn new(api_key_id: impl Into<String>, api_key_secret: impl Into<Secret>) -> Self {
		Self::from_credential(Credential::new(api_key_id, api_key_secret))
	}

	/// Wraps an existing credential.
	pub fn from_credential(credential: Credential) -> Self {
		let header = Secret::new(format!("{API_KEY_SCHEME} {}", credential.secret().expose()));

		Self { credential, header }
	}

	/// API-key identifier this authorizer was built from.
	pub fn api_key_id(&self) -> &str {
		self.credential.identifier()
	}

	/// Value for the `Authorization` header. Callers must avoid logging it.
	pub fn header_value(&self) -> &str {
		self.header.expose()
	}
}
impl Debug for ApiKeyAuth {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ApiKeyAuth").field("api_key_id", &self.api_key_id()).finish()
	}
}
