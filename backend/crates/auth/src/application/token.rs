//! Session Token Signing
//!
//! Session tokens are `<session_id>.<signature>` where the signature is an
//! HMAC-SHA256 over the session id, base64url-encoded without padding. The
//! cookie value alone proves nothing; the database row is the session.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

/// Produce a signed session token for the cookie
pub fn sign_session_token(secret: &[u8; 32], session_id: Uuid) -> String {
    let session_id = session_id.to_string();

    let mut mac =
        HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(session_id.as_bytes());
    let signature = mac.finalize().into_bytes();

    format!("{}.{}", session_id, URL_SAFE_NO_PAD.encode(signature))
}

/// Verify a token's signature and extract the session id
///
/// Returns `None` for malformed tokens, bad signatures, and non-UUID ids.
pub fn verify_session_token(secret: &[u8; 32], token: &str) -> Option<Uuid> {
    let (session_id_str, signature_b64) = token.split_once('.')?;
    if signature_b64.contains('.') {
        return None;
    }

    let mut mac =
        HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(session_id_str.as_bytes());

    let signature = URL_SAFE_NO_PAD.decode(signature_b64).ok()?;
    mac.verify_slice(&signature).ok()?;

    session_id_str.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: [u8; 32] = [7u8; 32];

    #[test]
    fn test_roundtrip() {
        let session_id = Uuid::new_v4();
        let token = sign_session_token(&SECRET, session_id);
        assert_eq!(verify_session_token(&SECRET, &token), Some(session_id));
    }

    #[test]
    fn test_rejects_wrong_secret() {
        let token = sign_session_token(&SECRET, Uuid::new_v4());
        let other_secret = [8u8; 32];
        assert_eq!(verify_session_token(&other_secret, &token), None);
    }

    #[test]
    fn test_rejects_tampered_id() {
        let token = sign_session_token(&SECRET, Uuid::new_v4());
        let (_, signature) = token.split_once('.').unwrap();
        let forged = format!("{}.{}", Uuid::new_v4(), signature);
        assert_eq!(verify_session_token(&SECRET, &forged), None);
    }

    #[test]
    fn test_rejects_malformed_tokens() {
        assert_eq!(verify_session_token(&SECRET, ""), None);
        assert_eq!(verify_session_token(&SECRET, "no-dot"), None);
        assert_eq!(verify_session_token(&SECRET, "a.b.c"), None);
        assert_eq!(verify_session_token(&SECRET, "id.!!!invalid-b64"), None);
    }
}
