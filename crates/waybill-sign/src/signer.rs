use std::fmt;

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::{Method, Params, Result, SignError, string_to_sign};

type HmacSha256 = Hmac<Sha256>;

/// Compute the lowercase hex HMAC-SHA256 of `message` keyed with `secret`.
pub fn hmac_sha256_hex(secret: &[u8], message: &[u8]) -> Result<String> {
    let mut mac = HmacSha256::new_from_slice(secret).map_err(|_| SignError::InvalidKey)?;
    mac.update(message);
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Signs requests with the shared application secret.
#[derive(Clone)]
pub struct Signer {
    mac: HmacSha256,
}

impl fmt::Debug for Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signer").field("secret", &"<redacted>").finish()
    }
}

impl Signer {
    pub fn new(secret: impl AsRef<[u8]>) -> Result<Self> {
        let secret = secret.as_ref();
        if secret.is_empty() {
            return Err(SignError::EmptySecret);
        }
        let mac = HmacSha256::new_from_slice(secret).map_err(|_| SignError::InvalidKey)?;
        Ok(Self { mac })
    }

    /// Sign a request. Same inputs always yield the same hex digest.
    pub fn sign(&self, method: Method, path: &str, params: &Params) -> String {
        self.sign_message(&string_to_sign(method, path, params))
    }

    pub fn sign_message(&self, message: &str) -> String {
        let mut mac = self.mac.clone();
        mac.update(message.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// Constant-time check of a hex signature against the request.
    pub fn verify(&self, method: Method, path: &str, params: &Params, signature: &str) -> bool {
        let Ok(expected) = hex::decode(signature) else {
            return false;
        };
        let mut mac = self.mac.clone();
        mac.update(string_to_sign(method, path, params).as_bytes());
        mac.verify_slice(&expected).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn signer() -> Signer { Signer::new("driver-app-secret").unwrap() }

    #[test]
    fn test_hmac_known_vector() {
        let out = hmac_sha256_hex(b"key", b"The quick brown fox jumps over the lazy dog").unwrap();
        assert_eq!(out, "f7bc83f430538424b13298e6aa6fb143ef4d59a14946175997479dbc2d1a3cd8");
    }

    #[test]
    fn test_sign_matches_raw_hmac_of_message() {
        let s = signer();
        let mut p = Params::new();
        p.insert("waybillId".into(), json!("W-1001"));
        let expected =
            hmac_sha256_hex(b"driver-app-secret", b"waybillId=W-1001@/app_driver/waybill/detail")
                .unwrap();
        assert_eq!(s.sign(Method::Get, "/app_driver/waybill/detail", &p), expected);
    }

    #[test]
    fn test_sign_is_deterministic() {
        let s = signer();
        let mut p = Params::new();
        p.insert("a".into(), json!(1));
        let first = s.sign(Method::Post, "/x", &p);
        let second = s.sign(Method::Post, "/x", &p);
        assert_eq!(first, second);
        assert_eq!(first, first.to_lowercase());
    }

    #[test]
    fn test_get_signature_ignores_insertion_order() {
        let s = signer();
        let mut forward = Params::new();
        forward.insert("a".into(), json!("1"));
        forward.insert("b".into(), json!("2"));
        forward.insert("c".into(), json!("3"));
        let mut reversed = Params::new();
        reversed.insert("c".into(), json!("3"));
        reversed.insert("b".into(), json!("2"));
        reversed.insert("a".into(), json!("1"));

        assert_eq!(
            s.sign(Method::Get, "/app_driver/waybill/list", &forward),
            s.sign(Method::Get, "/app_driver/waybill/list", &reversed)
        );
    }

    #[test]
    fn test_post_signature_depends_on_insertion_order() {
        let s = signer();
        let mut forward = Params::new();
        forward.insert("a".into(), json!(1));
        forward.insert("b".into(), json!(2));
        let mut reversed = Params::new();
        reversed.insert("b".into(), json!(2));
        reversed.insert("a".into(), json!(1));

        assert_ne!(
            s.sign(Method::Post, "/app_driver/waybill/arrive", &forward),
            s.sign(Method::Post, "/app_driver/waybill/arrive", &reversed)
        );
    }

    #[test]
    fn test_verify_roundtrip_and_tamper() {
        let s = signer();
        let p = Params::new();
        let sig = s.sign(Method::Get, "/a", &p);
        assert!(s.verify(Method::Get, "/a", &p, &sig));
        assert!(!s.verify(Method::Get, "/b", &p, &sig));
        assert!(!s.verify(Method::Get, "/a", &p, "not-hex"));
    }

    #[test]
    fn test_empty_secret_rejected() {
        assert!(matches!(Signer::new(""), Err(SignError::EmptySecret)));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let rendered = format!("{:?}", signer());
        assert!(!rendered.contains("driver-app-secret"));
    }
}
