//! Patient registry. Registration is advisory: the returned recommendation
//! is not linked to any purchase.

use chrono::Utc;
use rusqlite::Connection;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::db::{self, DatabaseError};
use crate::models::{Patient, Problem, MAX_PATIENT_AGE};
use crate::recommendation;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Invalid age {0}: must be between 0 and 150")]
    InvalidAge(u32),

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
}

/// Result of a registration: the stored patient plus the suggestion shown
/// to the operator.
#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub patient: Patient,
    pub recommendation: String,
}

pub fn add_patient(
    conn: &Connection,
    name: &str,
    age: u32,
    problem: Problem,
) -> Result<Registration, RegistryError> {
    let age = u8::try_from(age)
        .ok()
        .filter(|a| *a <= MAX_PATIENT_AGE)
        .ok_or(RegistryError::InvalidAge(age))?;

    let patient = Patient {
        id: Uuid::new_v4(),
        name: name.to_string(),
        age,
        problem,
        registered_at: Utc::now(),
    };
    db::insert_patient(conn, &patient)?;

    let recommendation = recommendation::recommend(conn, problem.as_str())?;
    tracing::info!(patient_id = %patient.id, %problem, "Patient registered");

    Ok(Registration {
        patient,
        recommendation,
    })
}

pub fn list_patients(conn: &Connection) -> Result<Vec<Patient>, RegistryError> {
    Ok(db::list_patients(conn)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DataStore;
    use crate::recommendation::{replace_diagnosis_mapping, NO_RECOMMENDATION};

    fn seeded_store() -> DataStore {
        let mut store = DataStore::open_in_memory().unwrap();
        replace_diagnosis_mapping(&mut store).unwrap();
        store
    }

    #[test]
    fn registration_returns_recommendation() {
        let store = seeded_store();
        let reg = add_patient(store.conn(), "Grace", 36, Problem::Heartburn).unwrap();
        assert_eq!(reg.recommendation, "Antacids");
        assert_eq!(reg.patient.age, 36);

        let all = list_patients(store.conn()).unwrap();
        assert_eq!(all, vec![reg.patient]);
    }

    #[test]
    fn registration_without_table_uses_fallback() {
        let store = DataStore::open_in_memory().unwrap();
        let reg = add_patient(store.conn(), "Grace", 36, Problem::Cold).unwrap();
        assert_eq!(reg.recommendation, NO_RECOMMENDATION);
    }

    #[test]
    fn same_patient_twice_creates_two_records() {
        let store = seeded_store();
        add_patient(store.conn(), "Linus", 50, Problem::Flu).unwrap();
        add_patient(store.conn(), "Linus", 50, Problem::Flu).unwrap();
        assert_eq!(list_patients(store.conn()).unwrap().len(), 2);
    }

    #[test]
    fn age_bounds() {
        let store = seeded_store();
        assert!(add_patient(store.conn(), "Newborn", 0, Problem::Nausea).is_ok());
        assert!(add_patient(store.conn(), "Elder", 150, Problem::Insomnia).is_ok());
        let err = add_patient(store.conn(), "Myth", 151, Problem::Cold).unwrap_err();
        assert!(matches!(err, RegistryError::InvalidAge(151)));
        let err = add_patient(store.conn(), "Myth", 4_000, Problem::Cold).unwrap_err();
        assert!(matches!(err, RegistryError::InvalidAge(4_000)));
        assert_eq!(list_patients(store.conn()).unwrap().len(), 2);
    }

    #[test]
    fn registration_does_not_touch_purchases() {
        let store = seeded_store();
        add_patient(store.conn(), "Grace", 36, Problem::Headache).unwrap();
        assert!(db::list_purchases(store.conn()).unwrap().is_empty());
    }
}
