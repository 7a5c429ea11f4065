//! Transport-agnostic application state.
//!
//! `CoreState` owns the session registry and the credential verifier.
//! Sessions are keyed by the SHA-256 hash of their bearer token; each one
//! holds its own store connection behind a `Mutex`, so requests of one
//! session run one at a time while sessions stay independent.
//!
//! A session idle for longer than the inactivity timeout is dropped, along
//! with its connection and cart, the next time the registry is touched.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, RwLock};
use std::time::{Duration, Instant};

use thiserror::Error;

use crate::db::{DataStore, DatabaseError, GatewayError};
use crate::recommendation;
use crate::session::{generate_token, hash_token, CredentialVerifier, SessionContext, SessionSummary};

pub type SessionHandle = Arc<Mutex<SessionContext>>;

/// Default inactivity timeout: 15 minutes.
pub const DEFAULT_INACTIVITY_TIMEOUT_SECS: u64 = 900;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("No active session")]
    NoActiveSession,

    #[error("Lock poisoned")]
    LockPoisoned,

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
}

/// A freshly opened session and the bearer token that unlocks it.
#[derive(Debug)]
pub struct LoginGrant {
    pub token: String,
    pub summary: SessionSummary,
}

/// Registry entry: the session plus the time of its last request.
struct SessionSlot {
    handle: SessionHandle,
    last_activity: Instant,
}

type SessionMap = HashMap<[u8; 32], SessionSlot>;

pub struct CoreState {
    store_path: PathBuf,
    verifier: Box<dyn CredentialVerifier>,
    sessions: RwLock<SessionMap>,
    inactivity_timeout: Duration,
}

impl CoreState {
    pub fn new(store_path: PathBuf, verifier: Box<dyn CredentialVerifier>) -> Self {
        Self {
            store_path,
            verifier,
            sessions: RwLock::new(HashMap::new()),
            inactivity_timeout: Duration::from_secs(DEFAULT_INACTIVITY_TIMEOUT_SECS),
        }
    }

    pub fn with_inactivity_timeout(mut self, timeout: Duration) -> Self {
        self.inactivity_timeout = timeout;
        self
    }

    pub fn store_path(&self) -> &Path {
        &self.store_path
    }

    pub fn inactivity_timeout(&self) -> Duration {
        self.inactivity_timeout
    }

    // ── Session lifecycle (write path) ──────────────────────

    /// Verify credentials, connect the store and reload the diagnosis table.
    pub fn login(&self, username: &str, password: &str) -> Result<LoginGrant, CoreError> {
        if !self.verifier.verify(username, password) {
            tracing::warn!(operator = username, "Login rejected");
            return Err(CoreError::InvalidCredentials);
        }

        let mut store = DataStore::connect(&self.store_path).map_err(|e| {
            tracing::error!(error = %e, "Store unavailable at session start");
            e
        })?;
        recommendation::replace_diagnosis_mapping(&mut store)?;

        let session = SessionContext::new(username, store);
        let summary = session.summary();
        let token = generate_token();

        let mut sessions = self.sessions.write().map_err(|_| CoreError::LockPoisoned)?;
        let now = Instant::now();
        evict_idle(&mut sessions, now, self.inactivity_timeout);
        sessions.insert(
            hash_token(&token),
            SessionSlot {
                handle: Arc::new(Mutex::new(session)),
                last_activity: now,
            },
        );
        drop(sessions);

        tracing::info!(session_id = %summary.session_id, operator = username, "Session started");
        Ok(LoginGrant { token, summary })
    }

    /// Drop a session. Its cart and store connection go with it.
    pub fn logout(&self, token_hash: &[u8; 32]) -> Result<(), CoreError> {
        let removed = self
            .sessions
            .write()
            .map_err(|_| CoreError::LockPoisoned)?
            .remove(token_hash)
            .ok_or(CoreError::NoActiveSession)?;

        if let Ok(session) = removed.handle.lock() {
            tracing::info!(
                session_id = %session.id,
                cart_items = session.cart.len(),
                "Session ended"
            );
        }
        Ok(())
    }

    // ── Session access ──────────────────────────────────────

    /// Resolve a session and stamp its activity. Idle sessions are expired
    /// first, so a stale token yields `NoActiveSession`.
    pub fn session(&self, token_hash: &[u8; 32]) -> Result<SessionHandle, CoreError> {
        let mut sessions = self.sessions.write().map_err(|_| CoreError::LockPoisoned)?;
        let now = Instant::now();
        evict_idle(&mut sessions, now, self.inactivity_timeout);

        let slot = sessions
            .get_mut(token_hash)
            .ok_or(CoreError::NoActiveSession)?;
        slot.last_activity = now;
        Ok(slot.handle.clone())
    }

    /// Drop every session idle past the timeout. Returns how many went.
    pub fn expire_idle_sessions(&self) -> Result<usize, CoreError> {
        let mut sessions = self.sessions.write().map_err(|_| CoreError::LockPoisoned)?;
        Ok(evict_idle(&mut sessions, Instant::now(), self.inactivity_timeout))
    }

    pub fn session_count(&self) -> usize {
        self.sessions.read().map(|s| s.len()).unwrap_or(0)
    }
}

fn evict_idle(sessions: &mut SessionMap, now: Instant, timeout: Duration) -> usize {
    let before = sessions.len();
    sessions.retain(|_, slot| now.saturating_duration_since(slot.last_activity) <= timeout);
    let evicted = before - sessions.len();
    if evicted > 0 {
        tracing::info!(evicted, remaining = sessions.len(), "Idle sessions expired");
    }
    evicted
}

/// Lock a session handle, mapping poisoning to `CoreError`.
pub fn lock_session(handle: &SessionHandle) -> Result<MutexGuard<'_, SessionContext>, CoreError> {
    handle.lock().map_err(|_| CoreError::LockPoisoned)
}
