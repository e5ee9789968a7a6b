//! Signed cookie helpers for session continuity.
//!
//! Uses HMAC-SHA256 to sign session tokens, making cookies tamper-proof.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::SecretString;

type HmacSha256 = Hmac<Sha256>;

/// Signs a session token with HMAC-SHA256.
///
/// Returns a string in the format `{token}.{signature}`.
pub fn sign_session_token(token: &str, key: &SecretString) -> String {
    let signature = compute_hmac(token.as_bytes(), key.expose_secret().as_bytes());
    format!("{}.{}", token, hex::encode(signature))
}

/// Verifies a signed cookie value and extracts the session token.
///
/// Returns `None` if the signature is invalid (tampered).
pub fn verify_signed_cookie(cookie_value: &str, key: &SecretString) -> Option<String> {
    let (token, signature_hex) = cookie_value.rsplit_once('.')?;

    let actual_sig = hex::decode(signature_hex).ok()?;
    let expected_sig = compute_hmac(token.as_bytes(), key.expose_secret().as_bytes());

    if constant_time_eq(&expected_sig, &actual_sig) {
        Some(token.to_owned())
    } else {
        log::warn!(target: "doorman::cookie", "msg=\"session cookie tampered\" cookie_prefix=\"{}...\"", &cookie_value.chars().take(8).collect::<String>());
        None
    }
}

/// Computes HMAC-SHA256.
///
/// # Panics
///
/// This function cannot panic as HMAC accepts keys of any size.
fn compute_hmac(message: &[u8], key: &[u8]) -> Vec<u8> {
    // SAFETY: HmacSha256::new_from_slice only fails if the key is invalid,
    // but HMAC-SHA256 accepts keys of any length, so this cannot fail.
    #[allow(clippy::expect_used)]
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC accepts keys of any size");
    mac.update(message);
    mac.finalize().into_bytes().to_vec()
}

/// Constant-time comparison to prevent timing attacks.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_and_verify() {
        let key = SecretString::new("test-signing-key-that-is-long-enough");
        let token = "abc123sessiontoken";

        let signed = sign_session_token(token, &key);
        let verified = verify_signed_cookie(&signed, &key);

        assert_eq!(verified, Some(token.to_owned()));
    }

    #[test]
    fn test_tampered_signature() {
        let key = SecretString::new("test-signing-key-that-is-long-enough");
        let token = "abc123sessiontoken";

        let signed = sign_session_token(token, &key);
        assert!(verify_signed_cookie(&signed, &key).is_some());

        let tampered = format!("{}.{}", token, "0".repeat(64));
        assert!(verify_signed_cookie(&tampered, &key).is_none());
    }

    #[test]
    fn test_tampered_token() {
        let key = SecretString::new("test-signing-key-that-is-long-enough");
        let token = "abc123sessiontoken";

        let signed = sign_session_token(token, &key);
        // Replace the token but keep the signature
        let signature = signed.rsplit_once('.').unwrap().1;
        let tampered = format!("different_token.{signature}");

        assert!(verify_signed_cookie(&tampered, &key).is_none());
    }

    #[test]
    fn test_wrong_key() {
        let key1 = SecretString::new("signing-key-one-that-is-long-enough");
        let key2 = SecretString::new("signing-key-two-that-is-long-enough");
        let token = "abc123sessiontoken";

        let signed = sign_session_token(token, &key1);
        assert!(verify_signed_cookie(&signed, &key2).is_none());
    }

    #[test]
    fn test_malformed_cookie() {
        let key = SecretString::new("test-signing-key-that-is-long-enough");

        // No separator
        assert!(verify_signed_cookie("noseparator", &key).is_none());

        // Invalid hex
        assert!(verify_signed_cookie("token.notahexsignature", &key).is_none());
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"hello", b"hello"));
        assert!(!constant_time_eq(b"hello", b"world"));
        assert!(!constant_time_eq(b"hello", b"hello!"));
        assert!(!constant_time_eq(b"", b"x"));
        assert!(constant_time_eq(b"", b""));
    }
}
