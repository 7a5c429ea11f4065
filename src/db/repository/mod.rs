//! Repository layer — collection-scoped database operations.
//!
//! One sub-module per collection. Functions take a borrowed
//! `Connection` so they run equally inside or outside a transaction.

mod diagnosis_mapping;
mod medicine;
mod patient;
mod purchase;

pub use diagnosis_mapping::*;
pub use medicine::*;
pub use patient::*;
pub use purchase::*;

use chrono::{DateTime, Utc};

use super::DatabaseError;

pub(crate) fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, DatabaseError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| DatabaseError::ConstraintViolation(format!("bad timestamp {raw}: {e}")))
}
