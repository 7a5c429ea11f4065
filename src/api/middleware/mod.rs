//! API middleware stack.
//!
//! Execution order (outermost → innermost):
//! 1. Rate limiter — login route only, per client address
//! 2. Auth validator — bearer token → session lookup
//! 3. Audit logger — logs after auth, has session_id

pub mod audit;
pub mod auth;
pub mod rate;
