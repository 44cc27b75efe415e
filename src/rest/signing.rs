//! HMAC-SHA256 request signing
//!
//! Signed exchanges expect `HMAC(secret, timestamp + method + path)`. FTX wants the
//! digest hex-encoded, KuCoin wants it base64-encoded.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::time::{SystemTime, UNIX_EPOCH};

type HmacSha256 = Hmac<Sha256>;

/// Signs request prehashes with a shared secret
#[derive(Clone)]
pub struct RequestSigner {
    secret: String,
}

impl RequestSigner {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// `timestamp + method + path`, the string both signed exchanges hash
    pub fn prehash(timestamp_ms: u64, method: &str, path: &str) -> String {
        format!("{}{}{}", timestamp_ms, method, path)
    }

    fn digest(&self, payload: &str) -> Vec<u8> {
        let mut mac = match HmacSha256::new_from_slice(self.secret.as_bytes()) {
            Ok(mac) => mac,
            Err(_) => unreachable!("HMAC-SHA256 accepts any key length"),
        };
        mac.update(payload.as_bytes());
        mac.finalize().into_bytes().to_vec()
    }

    /// Lowercase hex signature
    pub fn sign_hex(&self, timestamp_ms: u64, method: &str, path: &str) -> String {
        hex::encode(self.digest(&Self::prehash(timestamp_ms, method, path)))
    }

    /// Standard base64 signature
    pub fn sign_base64(&self, timestamp_ms: u64, method: &str, path: &str) -> String {
        BASE64.encode(self.digest(&Self::prehash(timestamp_ms, method, path)))
    }
}

impl std::fmt::Debug for RequestSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestSigner").field("secret", &"<redacted>").finish()
    }
}

/// Current Unix time in milliseconds
pub fn timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
