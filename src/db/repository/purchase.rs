use rusqlite::{params, Connection};
use uuid::Uuid;

use super::parse_timestamp;
use crate::db::{classify, DatabaseError};
use crate::models::Purchase;

pub fn insert_purchase(conn: &Connection, purchase: &Purchase) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO purchases (id, medicine_name, price, quantity, total_price, timestamp)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            purchase.id.to_string(),
            purchase.medicine_name,
            purchase.price,
            purchase.quantity,
            purchase.total_price,
            purchase.timestamp.to_rfc3339(),
        ],
    )
    .map_err(classify)?;
    Ok(())
}

/// Purchase ledger, oldest first.
pub fn list_purchases(conn: &Connection) -> Result<Vec<Purchase>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, medicine_name, price, quantity, total_price, timestamp
         FROM purchases ORDER BY rowid",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, f64>(2)?,
            row.get::<_, u32>(3)?,
            row.get::<_, f64>(4)?,
            row.get::<_, String>(5)?,
        ))
    })?;

    let mut purchases = Vec::new();
    for row in rows {
        let (id, medicine_name, price, quantity, total_price, timestamp) = row?;
        purchases.push(Purchase {
            id: Uuid::parse_str(&id)
                .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
            medicine_name,
            price,
            quantity,
            total_price,
            timestamp: parse_timestamp(&timestamp)?,
        });
    }
    Ok(purchases)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::open_memory_database;

    #[test]
    fn insert_and_list_purchases() {
        let conn = open_memory_database().unwrap();
        let first = Purchase::new("Paracetamol", 5.0, 3);
        let second = Purchase::new("Ibuprofen", 2.5, 2);
        insert_purchase(&conn, &first).unwrap();
        insert_purchase(&conn, &second).unwrap();

        let ledger = list_purchases(&conn).unwrap();
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger[0].id, first.id);
        assert_eq!(ledger[0].total_price, 15.0);
        assert_eq!(ledger[1].medicine_name, "Ibuprofen");
    }

    #[test]
    fn zero_quantity_purchase_rejected_by_schema() {
        let conn = open_memory_database().unwrap();
        let err = insert_purchase(&conn, &Purchase::new("Paracetamol", 5.0, 0)).unwrap_err();
        assert!(matches!(err, DatabaseError::ConstraintViolation(_)));
    }
}
