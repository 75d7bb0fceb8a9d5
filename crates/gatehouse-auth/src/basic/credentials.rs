//! Basic credential decoding.

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// An email and password pair taken from a decoded Basic token.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Credentials<'a> {
    /// Everything before the first `:`.
    pub email: &'a str,
    /// Everything after the first `:`, possibly empty.
    pub password: &'a str,
}

impl fmt::Debug for Credentials<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Decodes a padded standard base64 token into UTF-8 text.
pub fn decode_token(token: Option<&str>) -> Option<String> {
    let bytes = STANDARD.decode(token?).ok()?;
    String::from_utf8(bytes).ok()
}

/// Splits decoded text at its first `:`.
///
/// No trimming is done and the email is not checked for shape.
pub fn split_credentials(decoded: Option<&str>) -> Option<Credentials<'_>> {
    let (email, password) = decoded?.split_once(':')?;
    Some(Credentials { email, password })
}
