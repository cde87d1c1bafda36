//! HMAC-SHA256 request signatures.
//!
//! Every Seller Center call is authenticated by a `Signature` query parameter:
//! the lowercase hex HMAC-SHA256 of the canonical query string, keyed by the
//! user's API key.
//!
//! # Example
//!
//! ```rust
//! use seller_center::auth::{sign, verify};
//!
//! let signature = sign("Action=GetBrands&Format=JSON", "my-api-key");
//! assert_eq!(signature.len(), 64);
//! assert!(verify("Action=GetBrands&Format=JSON", "my-api-key", &signature));
//! ```

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Computes the signature of a canonical query string.
///
/// The result is the HMAC-SHA256 of the UTF-8 bytes of `canonical_query`,
/// keyed by `secret`, rendered as 64 lowercase hex characters. The function
/// is pure: identical inputs always yield identical output.
///
/// # Note
///
/// This function uses `expect()` internally but this will never panic because
/// HMAC-SHA256 accepts keys of any length.
#[must_use]
#[allow(clippy::missing_panics_doc)] // HMAC accepts any key size, so this never panics
pub fn sign(canonical_query: &str, secret: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(canonical_query.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Checks a signature against a canonical query string.
///
/// The comparison runs in constant time. Hex digits are compared as given,
/// so an uppercase signature does not match.
#[must_use]
pub fn verify(canonical_query: &str, secret: &str, signature: &str) -> bool {
    let expected = sign(canonical_query, secret);
    expected.as_bytes().ct_eq(signature.as_bytes()).into()
}

mod hex {
    const HEX_CHARS: &[u8; 16] = b"0123456789abcdef";

    pub fn encode(bytes: impl AsRef<[u8]>) -> String {
        let bytes = bytes.as_ref();
        let mut result = String::with_capacity(bytes.len() * 2);
        for &byte in bytes {
            result.push(HEX_CHARS[(byte >> 4) as usize] as char);
            result.push(HEX_CHARS[(byte & 0x0f) as usize] as char);
        }
        result
    }
}
