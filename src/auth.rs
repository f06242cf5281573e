//! Credentials, typed resource identifiers, and the two authorization strategies.

pub mod api_key;
pub mod credential;
pub mod id;
pub mod secret;
pub mod token;

pub use api_key::*;
pub use credential::*;
pub use id::*;
pub use secret::*;
pub use token::*;
