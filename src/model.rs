//! Wire DTOs exchanged with the Qyro assistant API.

// self
use crate::{_prelude::*, auth::Context};

/// Conversation session returned by `POST .../sessions`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
	/// Session identifier assigned by the service.
	pub id: String,
}

/// Single conversation message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
	/// Message identifier assigned by the service.
	pub id: String,
	/// Author role (e.g. `user` or `assistant`).
	pub role: String,
	/// Message text.
	pub content: String,
}

/// Body of `POST .../sessions`.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct CreateSessionRequest<'a> {
	/// Context forwarded to the assistant for this session.
	pub context: &'a Context,
}

/// Body of `POST .../sessions/{id}/chat`.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct ChatRequest<'a> {
	/// User message text.
	pub message: &'a str,
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn request_bodies_match_wire_shape() {
		let mut context = Context::new();

		context.insert("user_id".into(), "u1".into());

		assert_eq!(
			serde_json::to_string(&CreateSessionRequest { context: &context })
				.expect("Session body should serialize."),
			"{\"context\":{\"user_id\":\"u1\"}}"
		);
		assert_eq!(
			serde_json::to_string(&ChatRequest { message: "hi" })
				.expect("Chat body should serialize."),
			"{\"message\":\"hi\"}"
		);
	}

	#[test]
	fn messages_ignore_unknown_fields() {
		let messages: Vec<Message> = serde_json::from_str(
			"[{\"id\":\"m1\",\"role\":\"assistant\",\"content\":\"Hello\",\"created_at\":1}]",
		)
		.expect("Message list should deserialize.");

		assert_eq!(messages, vec![Message {
			id: "m1".into(),
			role: "assistant".into(),
			content: "Hello".into(),
		}]);
	}
}
