//! API endpoint handlers.
//!
//! Each module corresponds to one panel or table of the front end.
//! Handlers lock the caller's session, run the synchronous service call
//! and release the lock before returning.

pub mod auth;
pub mod dashboard;
pub mod health;
pub mod medicines;
pub mod patients;
pub mod purchases;
pub mod recommendations;
