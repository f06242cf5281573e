//! Rust client for the Qyro assistant API: signed end-user tokens, API-key server access,
//! and typed HTTP error classification in one small crate.
//!
//! Two client families share one request pipeline:
//!
//! - [`client::QyroClient`] talks to `/client/api/v1` with a bearer token minted by
//!   [`auth::ClientTokenIssuer`].
//! - [`client::QyroServerClient`] talks to `/server/api/v1` with a static
//!   [`auth::ApiKeyAuth`] header.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod model;
pub mod obs;
#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for tests; enabled via `cfg(test)` or the `test`
	//! crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::auth::{ApiKeyAuth, Credential};

	/// Identifier used by token and API-key fixtures.
	pub const TEST_KEY_ID: &str = "key_abc";
	/// Secret used by token and API-key fixtures.
	pub const TEST_KEY_SECRET: &str = "s3cr3t";

	/// Credential fixture built from [`TEST_KEY_ID`] and [`TEST_KEY_SECRET`].
	pub fn test_credential() -> Credential {
		Credential::new(TEST_KEY_ID, TEST_KEY_SECRET)
	}

	/// API-key authorizer fixture built from [`test_credential`].
	pub fn test_api_key_auth() -> ApiKeyAuth {
		ApiKeyAuth::from_credential(test_credential())
	}
}

mod _prelude {
	pub use std::{
		borrow::Cow,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use jsonwebtoken;
#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {base64 as _, color_eyre as _, httpmock as _, parking_lot as _, tokio as _};
