//! Diagnosis → medicine recommendation table.

use rusqlite::Connection;

use crate::db::{self, DataStore, DatabaseError};
use crate::models::{default_diagnosis_mappings, DiagnosisMapping};

pub const NO_RECOMMENDATION: &str = "No specific recommendation available for this problem";

/// Recommended medicine for `problem`, or the fallback text.
pub fn recommend(conn: &Connection, problem: &str) -> Result<String, DatabaseError> {
    Ok(db::find_mapping(conn, problem)?.unwrap_or_else(|| NO_RECOMMENDATION.to_string()))
}

/// Replace the stored table with the built-in one.
///
/// Delete-all and bulk insert share one transaction, so readers on other
/// connections see either the old table or the new one. Returns the row count.
pub fn replace_diagnosis_mapping(store: &mut DataStore) -> Result<usize, DatabaseError> {
    let mappings = default_diagnosis_mappings();
    let tx = store.conn_mut().transaction()?;
    let removed = db::delete_all_mappings(&tx)?;
    db::insert_mappings(&tx, &mappings)?;
    tx.commit()?;
    tracing::debug!(removed, inserted = mappings.len(), "Diagnosis mapping replaced");
    Ok(mappings.len())
}

pub fn mapping_table(conn: &Connection) -> Result<Vec<DiagnosisMapping>, DatabaseError> {
    db::list_mappings(conn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Problem;

    fn seeded_store() -> DataStore {
        let mut store = DataStore::open_in_memory().unwrap();
        replace_diagnosis_mapping(&mut store).unwrap();
        store
    }

    #[test]
    fn headache_maps_to_ibuprofen() {
        let store = seeded_store();
        assert_eq!(recommend(store.conn(), "Headache").unwrap(), "Ibuprofen");
        assert_eq!(
            recommend(store.conn(), "Minor Burns").unwrap(),
            "Antiseptic Cream"
        );
    }

    #[test]
    fn unknown_problem_gets_fallback() {
        let store = seeded_store();
        assert_eq!(recommend(store.conn(), "Unknown").unwrap(), NO_RECOMMENDATION);
    }

    #[test]
    fn empty_table_gets_fallback() {
        let store = DataStore::open_in_memory().unwrap();
        assert_eq!(recommend(store.conn(), "Headache").unwrap(), NO_RECOMMENDATION);
    }

    #[test]
    fn replacing_twice_keeps_exactly_ten_rows() {
        let mut store = DataStore::open_in_memory().unwrap();
        for _ in 0..2 {
            assert_eq!(replace_diagnosis_mapping(&mut store).unwrap(), 10);
            let table = mapping_table(store.conn()).unwrap();
            assert_eq!(table.len(), 10);
            for problem in Problem::ALL {
                let hits = table.iter().filter(|m| m.problem == problem.as_str()).count();
                assert_eq!(hits, 1, "{problem}");
            }
        }
    }

    #[test]
    fn replace_discards_foreign_rows() {
        let mut store = DataStore::open_in_memory().unwrap();
        db::insert_mappings(
            store.conn(),
            &[DiagnosisMapping {
                problem: "Gout".into(),
                medicine: "Colchicine".into(),
            }],
        )
        .unwrap();
        replace_diagnosis_mapping(&mut store).unwrap();
        assert_eq!(recommend(store.conn(), "Gout").unwrap(), NO_RECOMMENDATION);
    }
}
