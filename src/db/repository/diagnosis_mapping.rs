use rusqlite::{params, Connection, OptionalExtension};

use crate::db::{classify, DatabaseError};
use crate::models::DiagnosisMapping;

/// Delete every mapping row. Returns the number removed.
pub fn delete_all_mappings(conn: &Connection) -> Result<usize, DatabaseError> {
    Ok(conn.execute("DELETE FROM diagnosis_medicine", [])?)
}

/// Bulk insert through one prepared statement.
pub fn insert_mappings(conn: &Connection, mappings: &[DiagnosisMapping]) -> Result<(), DatabaseError> {
    let mut stmt =
        conn.prepare("INSERT INTO diagnosis_medicine (problem, medicine) VALUES (?1, ?2)")?;
    for mapping in mappings {
        stmt.execute(params![mapping.problem, mapping.medicine])
            .map_err(classify)?;
    }
    Ok(())
}

pub fn find_mapping(conn: &Connection, problem: &str) -> Result<Option<String>, DatabaseError> {
    let medicine = conn
        .query_row(
            "SELECT medicine FROM diagnosis_medicine WHERE problem = ?1 LIMIT 1",
            params![problem],
            |row| row.get::<_, String>(0),
        )
        .optional()?;
    Ok(medicine)
}

pub fn list_mappings(conn: &Connection) -> Result<Vec<DiagnosisMapping>, DatabaseError> {
    let mut stmt =
        conn.prepare("SELECT problem, medicine FROM diagnosis_medicine ORDER BY rowid")?;
    let rows = stmt.query_map([], |row| {
        Ok(DiagnosisMapping {
            problem: row.get(0)?,
            medicine: row.get(1)?,
        })
    })?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::open_memory_database;

    fn mapping(problem: &str, medicine: &str) -> DiagnosisMapping {
        DiagnosisMapping {
            problem: problem.into(),
            medicine: medicine.into(),
        }
    }

    #[test]
    fn insert_find_and_clear() {
        let conn = open_memory_database().unwrap();
        insert_mappings(&conn, &[mapping("Cold", "Antihistamines"), mapping("Flu", "Rest")]).unwrap();

        assert_eq!(find_mapping(&conn, "Flu").unwrap().as_deref(), Some("Rest"));
        assert!(find_mapping(&conn, "Gout").unwrap().is_none());

        assert_eq!(delete_all_mappings(&conn).unwrap(), 2);
        assert!(list_mappings(&conn).unwrap().is_empty());
    }

    #[test]
    fn duplicate_problem_rejected() {
        let conn = open_memory_database().unwrap();
        let err = insert_mappings(&conn, &[mapping("Cold", "A"), mapping("Cold", "B")]).unwrap_err();
        assert!(matches!(err, DatabaseError::ConstraintViolation(_)));
    }
}
