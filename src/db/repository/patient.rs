use std::str::FromStr;

use rusqlite::{params, Connection};
use uuid::Uuid;

use super::parse_timestamp;
use crate::db::{classify, DatabaseError};
use crate::models::*;

pub fn insert_patient(conn: &Connection, patient: &Patient) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO patients (id, name, age, problem, registered_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            patient.id.to_string(),
            patient.name,
            patient.age,
            patient.problem.as_str(),
            patient.registered_at.to_rfc3339(),
        ],
    )
    .map_err(classify)?;
    Ok(())
}

/// Registry table in registration order.
pub fn list_patients(conn: &Connection) -> Result<Vec<Patient>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, name, age, problem, registered_at FROM patients ORDER BY rowid",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, u8>(2)?,
            row.get::<_, String>(3)?,
            row.get::<_, String>(4)?,
        ))
    })?;

    let mut patients = Vec::new();
    for row in rows {
        let (id, name, age, problem, registered_at) = row?;
        patients.push(Patient {
            id: Uuid::parse_str(&id)
                .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
            name,
            age,
            problem: Problem::from_str(&problem)?,
            registered_at: parse_timestamp(&registered_at)?,
        });
    }
    Ok(patients)
}
