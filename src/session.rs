//! Operator sessions: credential verification, bearer tokens and the
//! per-session context (store handle + cart).

use base64::Engine;
use chrono::{DateTime, Utc};
use pbkdf2::pbkdf2_hmac;
use serde::Serialize;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use uuid::Uuid;
use zeroize::Zeroize;

use crate::checkout::Cart;
use crate::db::DataStore;

pub const PBKDF2_ITERATIONS: u32 = 600_000;
pub const HASH_LENGTH: usize = 32;
pub const SALT_LENGTH: usize = 16;

// ═══════════════════════════════════════════════════════════
// Credential verification
// ═══════════════════════════════════════════════════════════

/// Pluggable login check.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, username: &str, password: &str) -> bool;
}

/// Derived password hash — zeroed on drop
#[derive(Zeroize)]
#[zeroize(drop)]
struct PasswordHash {
    bytes: [u8; HASH_LENGTH],
}

/// A single operator account held as a salted PBKDF2-SHA256 hash.
pub struct StaticCredentials {
    username: String,
    salt: [u8; SALT_LENGTH],
    iterations: u32,
    hash: PasswordHash,
}

impl StaticCredentials {
    pub fn new(username: &str, password: &str) -> Self {
        Self::with_iterations(username, password, PBKDF2_ITERATIONS)
    }

    pub fn with_iterations(username: &str, password: &str, iterations: u32) -> Self {
        let salt: [u8; SALT_LENGTH] = rand::random();
        let hash = derive_hash(password, &salt, iterations);
        Self {
            username: username.to_string(),
            salt,
            iterations,
            hash,
        }
    }
}

impl CredentialVerifier for StaticCredentials {
    fn verify(&self, username: &str, password: &str) -> bool {
        let candidate = derive_hash(password, &self.salt, self.iterations);
        let user_ok = self.username.as_bytes().ct_eq(username.as_bytes());
        let pass_ok = self.hash.bytes[..].ct_eq(&candidate.bytes[..]);
        (user_ok & pass_ok).into()
    }
}

fn derive_hash(password: &str, salt: &[u8; SALT_LENGTH], iterations: u32) -> PasswordHash {
    let mut bytes = [0u8; HASH_LENGTH];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, iterations, &mut bytes);
    PasswordHash { bytes }
}

// ═══════════════════════════════════════════════════════════
// Bearer tokens
// ═══════════════════════════════════════════════════════════

/// Hash a bearer token string using SHA-256.
pub fn hash_token(token: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hasher.finalize().into()
}

/// Generate a random bearer token (URL-safe base64, 32 bytes of entropy).
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::random();
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

// ═══════════════════════════════════════════════════════════
// SessionContext
// ═══════════════════════════════════════════════════════════

/// Everything one logged-in operator owns. Dropped at logout.
#[derive(Debug)]
pub struct SessionContext {
    pub id: Uuid,
    pub operator: String,
    pub started_at: DateTime<Utc>,
    pub store: DataStore,
    pub cart: Cart,
}

impl SessionContext {
    pub fn new(operator: &str, store: DataStore) -> Self {
        Self {
            id: Uuid::new_v4(),
            operator: operator.to_string(),
            started_at: Utc::now(),
            store,
            cart: Cart::new(),
        }
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            session_id: self.id,
            operator: self.operator.clone(),
            started_at: self.started_at,
            cart_items: self.cart.len(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub session_id: Uuid,
    pub operator: String,
    pub started_at: DateTime<Utc>,
    pub cart_items: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds() -> StaticCredentials {
        StaticCredentials::with_iterations("admin", "correct horse", 1_000)
    }

    #[test]
    fn accepts_matching_credentials() {
        assert!(creds().verify("admin", "correct horse"));
    }

    #[test]
    fn rejects_wrong_password_or_user() {
        let c = creds();
        assert!(!c.verify("admin", "battery staple"));
        assert!(!c.verify("root", "correct horse"));
        assert!(!c.verify("", ""));
    }

    #[test]
    fn salts_differ_between_instances() {
        let a = creds();
        let b = creds();
        assert_ne!(a.salt, b.salt);
        assert_ne!(a.hash.bytes, b.hash.bytes);
    }

    #[test]
    fn token_hash_is_stable() {
        let token = generate_token();
        assert_eq!(hash_token(&token), hash_token(&token));
        assert_ne!(hash_token(&token), hash_token(&generate_token()));
        // 32 bytes → 43 chars without padding
        assert_eq!(token.len(), 43);
    }

    #[test]
    fn new_session_starts_with_empty_cart() {
        let session = SessionContext::new("admin", DataStore::open_in_memory().unwrap());
        let summary = session.summary();
        assert_eq!(summary.operator, "admin");
        assert_eq!(summary.cart_items, 0);
    }
}
