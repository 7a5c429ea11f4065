//! Shared types for the API layer.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::core_state::{CoreState, SessionHandle};

/// Login attempts allowed per client per minute.
pub const LOGIN_ATTEMPTS_PER_MINUTE: u32 = 10;
/// Login attempts allowed per client per hour.
pub const LOGIN_ATTEMPTS_PER_HOUR: u32 = 100;

/// Shared context for all API routes and middleware.
#[derive(Clone)]
pub struct ApiContext {
    pub core: Arc<CoreState>,
    pub rate_limiter: Arc<Mutex<RateLimiter>>,
}

impl ApiContext {
    pub fn new(core: Arc<CoreState>) -> Self {
        Self::with_rate_limiter(core, RateLimiter::default())
    }

    pub fn with_rate_limiter(core: Arc<CoreState>, limiter: RateLimiter) -> Self {
        Self {
            core,
            rate_limiter: Arc::new(Mutex::new(limiter)),
        }
    }
}

/// Authenticated session, injected into request extensions by the auth
/// middleware after successful token lookup.
#[derive(Clone)]
pub struct AuthedSession {
    pub token_hash: [u8; 32],
    pub session_id: uuid::Uuid,
    pub handle: SessionHandle,
}

// ═══════════════════════════════════════════════════════════
// Rate limiter — sliding windows per client key
// ═══════════════════════════════════════════════════════════

pub struct RateLimiter {
    windows: HashMap<String, Vec<Instant>>,
    per_minute: u32,
    per_hour: u32,
}

impl RateLimiter {
    pub fn new(per_minute: u32, per_hour: u32) -> Self {
        Self {
            windows: HashMap::new(),
            per_minute,
            per_hour,
        }
    }

    /// Record one attempt for `key`. Returns `Err(retry_after_secs)` when
    /// the key is over either window.
    pub fn check(&mut self, key: &str) -> Result<(), u64> {
        let now = Instant::now();

        // Forget attempts older than an hour, and clients with none left.
        self.windows.retain(|_, entries| {
            entries.retain(|ts| now.duration_since(*ts) < Duration::from_secs(3600));
            !entries.is_empty()
        });

        let entries = self.windows.entry(key.to_string()).or_default();

        let last_minute = entries
            .iter()
            .filter(|ts| now.duration_since(**ts) < Duration::from_secs(60))
            .count() as u32;
        if last_minute >= self.per_minute {
            return Err(60);
        }

        if entries.len() as u32 >= self.per_hour {
            return Err(3600);
        }

        entries.push(now);
        Ok(())
    }

    pub fn tracked_clients(&self) -> usize {
        self.windows.len()
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(LOGIN_ATTEMPTS_PER_MINUTE, LOGIN_ATTEMPTS_PER_HOUR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limiter_allows_under_limit() {
        let mut limiter = RateLimiter::default();
        for _ in 0..LOGIN_ATTEMPTS_PER_MINUTE {
            assert!(limiter.check("10.0.0.1").is_ok());
        }
    }

    #[test]
    fn rate_limiter_rejects_over_per_minute() {
        let mut limiter = RateLimiter::new(3, 100);
        for _ in 0..3 {
            limiter.check("10.0.0.1").unwrap();
        }
        assert_eq!(limiter.check("10.0.0.1"), Err(60));
    }

    #[test]
    fn rate_limiter_rejects_over_per_hour() {
        let mut limiter = RateLimiter::new(100, 2);
        limiter.check("10.0.0.1").unwrap();
        limiter.check("10.0.0.1").unwrap();
        assert_eq!(limiter.check("10.0.0.1"), Err(3600));
    }

    #[test]
    fn rate_limiter_isolates_clients() {
        let mut limiter = RateLimiter::new(1, 100);
        limiter.check("10.0.0.1").unwrap();
        assert!(limiter.check("10.0.0.1").is_err());
        assert!(limiter.check("10.0.0.2").is_ok());
        assert_eq!(limiter.tracked_clients(), 2);
    }

    #[test]
    fn rejected_attempts_are_not_counted() {
        let mut limiter = RateLimiter::new(1, 2);
        limiter.check("10.0.0.1").unwrap();
        for _ in 0..5 {
            assert_eq!(limiter.check("10.0.0.1"), Err(60));
        }
        // Only the accepted attempt sits in the hourly window.
        assert_eq!(limiter.windows["10.0.0.1"].len(), 1);
    }
}
