//! HTTP Basic authentication.

pub mod authenticator;
pub mod credentials;
pub mod header;

pub use authenticator::BasicAuthenticator;
pub use credentials::{Credentials, decode_token, split_credentials};
pub use header::{authorization_header, extract_token};
