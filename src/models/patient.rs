use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::Problem;

pub const MAX_PATIENT_AGE: u8 = 150;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub id: Uuid,
    pub name: String,
    pub age: u8,
    pub problem: Problem,
    pub registered_at: DateTime<Utc>,
}
