//! Strongly typed resource identifiers interpolated into API paths.

// std
use std::{borrow::Borrow, ops::Deref};
// self
use crate::_prelude::*;

macro_rules! def_id {
	($name:ident, $doc:literal, $kind:literal) => {
		#[doc = $doc]
		#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
		#[serde(try_from = "String", into = "String")]
		pub struct $name(String);
		impl $name {
			/// Creates a new identifier after validation.
			pub fn new(value: impl AsRef<str>) -> Result<Self, IdentifierError> {
				let view = value.as_ref();

				validate_view($kind, view)?;

				Ok(Self(view.to_owned()))
			}
		}
		impl Deref for $name {
			type Target = str;

			fn deref(&self) -> &Self::Target {
				&self.0
			}
		}
		impl AsRef<str> for $name {
			fn as_ref(&self) -> &str {
				&self.0
			}
		}
		impl From<$name> for String {
			fn from(value: $name) -> Self {
				value.0
			}
		}
		impl TryFrom<String> for $name {
			type Error = IdentifierError;

			fn try_from(value: String) -> Result<Self, Self::Error> {
				validate_view($kind, &value)?;

				Ok(Self(value))
			}
		}
		impl TryFrom<&str> for $name {
			type Error = IdentifierError;

			fn try_from(value: &str) -> Result<Self, Self::Error> {
				Self::new(value)
			}
		}
		impl Borrow<str> for $name {
			fn borrow(&self) -> &str {
				&self.0
			}
		}
		impl Debug for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				write!(f, concat!($kind, "({})"), self.0)
			}
		}
		impl Display for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.write_str(&self.0)
			}
		}
		impl FromStr for $name {
			type Err = IdentifierError;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				Self::new(s)
			}
		}
	};
}

const IDENTIFIER_MAX_LEN: usize = 128;

/// Error returned when identifier validation fails.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum IdentifierError {
	/// The identifier was empty.
	#[error("{kind} identifier cannot be empty.")]
	Empty {
		/// Kind of identifier (assistant, session).
		kind: &'static str,
	},
	/// The identifier contains whitespace characters.
	#[error("{kind} identifier contains whitespace.")]
	ContainsWhitespace {
		/// Kind of identifier (assistant, session).
		kind: &'static str,
	},
	/// The identifier contains a path separator and would escape its path segment.
	#[error("{kind} identifier contains a path separator.")]
	ContainsPathSeparator {
		/// Kind of identifier (assistant, session).
		kind: &'static str,
	},
	/// The identifier is a `.` or `..` segment, which URL path normalization would collapse.
	#[error("{kind} identifier cannot be a `.` or `..` path segment.")]
	DotSegment {
		/// Kind of identifier (assistant, session).
		kind: &'static str,
	},
	/// The identifier exceeded the allowed character count.
	#[error("{kind} identifier exceeds {max} characters.")]
	TooLong {
		/// Kind of identifier (assistant, session).
		kind: &'static str,
		/// Maximum permitted character count.
		max: usize,
	},
}

def_id! { AssistantId, "Identifier of a Qyro assistant.", "Assistant" }
def_id! { SessionId, "Identifier of a conversation session with an assistant.", "Session" }

fn validate_view(kind: &'static str, view: &str) -> Result<(), IdentifierError> {
	if view.is_empty() {
		return Err(IdentifierError::Empty { kind });
	}
	if view.chars().any(char::is_whitespace) {
		return Err(IdentifierError::ContainsWhitespace { kind });
	}
	if view.contains(['/', '\\']) {
		return Err(IdentifierError::ContainsPathSeparator { kind });
	}
	if matches!(view, "." | "..") {
		return Err(IdentifierError::DotSegment { kind });
	}
	if view.len() > IDENTIFIER_MAX_LEN {
		return Err(IdentifierError::TooLong { kind, max: IDENTIFIER_MAX_LEN });
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	// std
	use std::collections::HashMap;
	// self
	use super::*;

	#[test]
	fn identifiers_validate() {
		assert!(AssistantId::new(" asst-123").is_err(), "Leading whitespace must be rejected.");
		assert!(AssistantId::new("asst-123 ").is_err(), "Trailing whitespace must be rejected.");
		assert_eq!(
			SessionId::new("sess/../admin"),
			Err(IdentifierError::ContainsPathSeparator { kind: "Session" })
		);
		assert_eq!(SessionId::new(""), Err(IdentifierError::Empty { kind: "Session" }));

		let assistant =
			AssistantId::new("asst-123").expect("Assistant fixture should be considered valid.");

		assert_eq!(assistant.as_ref(), "asst-123");
		assert_eq!(format!("{assistant:?}"), "Assistant(asst-123)");
	}

	#[test]
	fn dot_segments_are_rejected() {
		assert_eq!(AssistantId::new(".."), Err(IdentifierError::DotSegment { kind: "Assistant" }));
		assert_eq!(SessionId::new("."), Err(IdentifierError::DotSegment { kind: "Session" }));
		assert!(serde_json::from_str::<SessionId>("\"..\"").is_err());

		for view in ["...", "a..b", ".hidden", "v1."] {
			SessionId::new(view).expect("Dots inside a longer identifier should be accepted.");
		}
	}

	#[test]
	fn serde_round_trip_enforces_validation() {
		let session: SessionId =
			serde_json::from_str("\"sess_1\"").expect("Session should deserialize successfully.");

		assert_eq!(session.as_ref(), "sess_1");
		assert!(serde_json::from_str::<SessionId>("\"with space\"").is_err());
		assert!(serde_json::from_str::<SessionId>("\"a/b\"").is_err());
	}

	#[test]
	fn unicode_whitespace_and_length_limits() {
		let nbsp = format!("asst{}id", '\u{00A0}');

		assert!(AssistantId::new(&nbsp).is_err());

		let exact = "a".repeat(IDENTIFIER_MAX_LEN);

		AssistantId::new(&exact).expect("Exact length should succeed.");

		let too_long = "a".repeat(IDENTIFIER_MAX_LEN + 1);

		assert!(AssistantId::new(&too_long).is_err());
	}

	#[test]
	fn borrow_supports_fast_lookup() {
		let map: HashMap<SessionId, u8> = HashMap::from_iter([(
			SessionId::new("sess-123").expect("Session used for lookup should be valid."),
			7_u8,
		)]);

		assert_eq!(map.get("sess-123"), Some(&7));
	}
}
