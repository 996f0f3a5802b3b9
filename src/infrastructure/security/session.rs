// src/infrastructure/security/session.rs
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use uuid::Uuid;

use crate::application::error::{ApplicationError, ApplicationResult};

type HmacSha256 = Hmac<Sha256>;

pub const ADMIN_SESSION_COOKIE: &str = "admin_session";

/// Stateless admin sessions: the cookie value is an HMAC-signed token, so no
/// session storage is needed and restarts do not log anyone out. Revocation
/// before expiry requires rotating the secret.
pub struct AdminSessionManager {
    secret: Vec<u8>,
    username: String,
    password: String,
    ttl: Duration,
}

impl AdminSessionManager {
    pub fn new(
        secret: impl Into<Vec<u8>>,
        username: impl Into<String>,
        password: impl Into<String>,
        ttl_seconds: i64,
    ) -> Self {
        Self {
            secret: secret.into(),
            username: username.into(),
            password: password.into(),
            ttl: Duration::seconds(ttl_seconds),
        }
    }

    pub fn ttl_seconds(&self) -> i64 {
        self.ttl.num_seconds()
    }

    pub fn credentials_valid(&self, username: &str, password: &str) -> bool {
        // Single back-office account; both halves checked to keep timing
        // independent of which one mismatched.
        let user_ok = constant_time_eq(username.as_bytes(), self.username.as_bytes());
        let pass_ok = constant_time_eq(password.as_bytes(), self.password.as_bytes());
        user_ok && pass_ok
    }

    /// Token layout: `b64(username).expiry_unix.nonce.b64(signature)` where
    /// the signature covers the first three segments.
    pub fn issue(&self, username: &str, now: DateTime<Utc>) -> ApplicationResult<String> {
        let expiry = (now + self.ttl).timestamp();
        let nonce = Uuid::new_v4().simple().to_string();
        let payload = format!(
            "{}.{}.{}",
            URL_SAFE_NO_PAD.encode(username.as_bytes()),
            expiry,
            nonce
        );
        let signature = self.sign(payload.as_bytes())?;
        Ok(format!("{payload}.{}", URL_SAFE_NO_PAD.encode(signature)))
    }

    /// Returns the username carried by a valid, unexpired token.
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Option<String> {
        let (payload, signature_b64) = token.rsplit_once('.')?;
        let mut parts = payload.split('.');
        let username_b64 = parts.next()?;
        let expiry: i64 = parts.next()?.parse().ok()?;
        parts.next()?;
        if parts.next().is_some() {
            return None;
        }

        let presented = URL_SAFE_NO_PAD.decode(signature_b64).ok()?;
        let expected = self.sign(payload.as_bytes()).ok()?;
        if !constant_time_eq(&presented, &expected) {
            return None;
        }
        if now.timestamp() >= expiry {
            return None;
        }

        let username = URL_SAFE_NO_PAD.decode(username_b64).ok()?;
        String::from_utf8(username).ok()
    }

    fn sign(&self, data: &[u8]) -> ApplicationResult<Vec<u8>> {
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .map_err(|err| ApplicationError::infrastructure(format!("hmac key error: {err}")))?;
        mac.update(data);
        Ok(mac.finalize().into_bytes().to_vec())
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> AdminSessionManager {
        AdminSessionManager::new(b"test-secret".to_vec(), "admin", "hunter2", 3600)
    }

    #[test]
    fn issued_token_verifies_until_expiry() {
        let manager = manager();
        let now = Utc::now();
        let token = manager.issue("admin", now).unwrap();

        assert_eq!(manager.verify(&token, now).as_deref(), Some("admin"));

        let after_expiry = now + Duration::seconds(3601);
        assert!(manager.verify(&token, after_expiry).is_none());
    }

    #[test]
    fn tampered_token_is_rejected() {
        let manager = manager();
        let now = Utc::now();
        let token = manager.issue("admin", now).unwrap();

        let mut forged = token.clone();
        forged.replace_range(0..1, if token.starts_with('A') { "B" } else { "A" });
        assert!(manager.verify(&forged, now).is_none());

        assert!(manager.verify("not-a-token", now).is_none());
        assert!(manager.verify("", now).is_none());
    }

    #[test]
    fn token_from_other_secret_is_rejected() {
        let now = Utc::now();
        let other = AdminSessionManager::new(b"other-secret".to_vec(), "admin", "hunter2", 3600);
        let token = other.issue("admin", now).unwrap();
        assert!(manager().verify(&token, now).is_none());
    }

    #[test]
    fn credentials_check_matches_both_halves() {
        let manager = manager();
        assert!(manager.credentials_valid("admin", "hunter2"));
        assert!(!manager.credentials_valid("admin", "wrong"));
        assert!(!manager.credentials_valid("root", "hunter2"));
    }
}
