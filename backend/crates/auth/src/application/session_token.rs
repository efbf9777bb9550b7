//! Session token codec
//!
//! Cookie value `<session uuid>.<base64url HMAC-SHA256(session uuid)>`.
//! A token that fails the signature check is treated like a missing one.

use platform::crypto::{constant_time_eq, from_base64url, hmac_sha256, to_base64url};
use uuid::Uuid;

pub fn sign(secret: &[u8; 32], session_id: Uuid) -> String {
    let id = session_id.to_string();
    let signature = hmac_sha256(secret, id.as_bytes());
    format!("{}.{}", id, to_base64url(&signature))
}

/// Session id carried by a correctly signed token
pub fn verify(secret: &[u8; 32], token: &str) -> Option<Uuid> {
    let (id, signature_b64) = token.split_once('.')?;
    let signature = from_base64url(signature_b64).ok()?;

    let expected = hmac_sha256(secret, id.as_bytes());
    if !constant_time_eq(&signature, &expected) {
        return None;
    }

    Uuid::parse_str(id).ok()
}
