//! Authorization header parsing.

use http::HeaderMap;
use http::header::AUTHORIZATION;

/// Scheme prefix of a Basic authorization value, including the separating space.
pub const BASIC_PREFIX: &str = "Basic ";

/// Returns the encoded token from a Basic authorization value.
///
/// The prefix is matched case-sensitively and the remainder is returned
/// untrimmed, so `"Basic "` yields an empty token.
pub fn extract_token(header: Option<&str>) -> Option<&str> {
    header?.strip_prefix(BASIC_PREFIX)
}

/// Reads the `Authorization` header as text.
///
/// Values that are not visible ASCII are treated as absent.
pub fn authorization_header(headers: &HeaderMap) -> Option<&str> {
    headers.get(AUTHORIZATION)?.to_str().ok()
}
