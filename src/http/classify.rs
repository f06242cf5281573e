// self
use crate::{error::HttpError, http::ApiResponse};

/// Maps a status + raw body to an [`HttpError`], or `None` for any 2xx status.
///
/// The body is carried through verbatim; non-UTF-8 bytes are replaced lossily.
pub fn classify(status: u16, body: &[u8]) -> Option<HttpError> {
	if (200..300).contains(&status) {
		return None;
	}

	Some(HttpError { status, body: String::from_utf8_lossy(body).into_owned() })
}

impl ApiResponse {
	/// Classifies this response, see [`classify`].
	pub fn error_for_status(&self) -> Option<HttpError> {
		classify(self.status, &self.body)
	}
}
