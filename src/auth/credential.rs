//! API-key credential pair shared by token issuance and static authorization.

// self
use crate::{_prelude::*, auth::Secret};

/// API-key identifier + secret pair.
///
/// Both halves are stored verbatim; no format validation is applied. The secret is only
/// reachable through [`Credential::secret`] and is redacted by the `Debug` implementation.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
	identifier: String,
	secret: Secret,
}
impl Credential {
	/// Creates a credential from the API-key identifier and secret.
	pub fn new(identifier: impl Into<String>, secret: impl Into<Secret>) -> Self {
		Self { identifier: identifier.into(), secret: secret.into() }
	}

	/// API-key identifier, used as `iss` and `kid` of issued tokens.
	pub fn identifier(&self) -> &str {
		&self.identifier
	}

	/// API-key secret used as signing material or header value.
	pub fn secret(&self) -> &Secret {
		&self.secret
	}
}
impl Debug for Credential {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Credential")
			.field("identifier", &self.identifier)
			.field("secret", &self.secret)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn credential_keeps_values_verbatim_and_redacts_secret() {
		let credential = Credential::new(" key with spaces ", "s3cr3t");

		assert_eq!(credential.identifier(), " key with spaces ");
		assert_eq!(credential.secret().expose(), "s3cr3t");

		let debug = format!("{credential:?}");

		assert!(debug.contains("key with spaces"));
		assert!(!debug.contains("s3cr3t"));
	}
}
