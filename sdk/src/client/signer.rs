//! Request signing utilities.
//!
//! Every call is authenticated with an HMAC-SHA256 signature over a canonical
//! message:
//!
//! ```text
//! {timestamp_ms}\r\n{METHOD}\r\n{path}\r\n\r\n{body}
//! ```
//!
//! where `{body}` is present only for non-GET requests.

use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use hmac::{Hmac, Mac};
use md5::{Digest, Md5};
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Sha256;

use super::request::HttpMethod;

type HmacSha256 = Hmac<Sha256>;

/// Number of random bytes behind each request id.
const REQUEST_ID_ENTROPY: usize = 48;

/// Signs `message` with `secret` and returns the lowercase hex digest.
#[must_use]
pub fn sign(secret: &str, message: impl AsRef<[u8]>) -> String {
    // HMAC accepts keys of any length.
    let Ok(mut mac) = HmacSha256::new_from_slice(secret.as_bytes()) else {
        return String::new();
    };
    mac.update(message.as_ref());
    hex::encode(mac.finalize().into_bytes())
}

/// Builds the canonical message that is signed for a request.
#[must_use]
pub fn canonical_message(timestamp_ms: i64, method: HttpMethod, path: &str, body: &[u8]) -> Vec<u8> {
    let mut message = format!("{timestamp_ms}\r\n{method}\r\n{path}\r\n\r\n").into_bytes();
    if method != HttpMethod::Get {
        message.extend_from_slice(body);
    }
    message
}

/// Generates a request id: 32 lowercase hex characters.
///
/// Returns an empty string if the OS random source fails.
#[must_use]
pub fn new_request_id() -> String {
    let mut entropy = [0u8; REQUEST_ID_ENTROPY];
    if let Err(e) = OsRng.try_fill_bytes(&mut entropy) {
        tracing::warn!("failed to read random bytes for request id: {}", e);
        return String::new();
    }

    let encoded = URL_SAFE.encode(entropy);
    hex::encode(Md5::digest(encoded.as_bytes()))
}
