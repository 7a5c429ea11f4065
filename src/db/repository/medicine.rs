use rusqlite::{params, Connection, OptionalExtension};

use crate::db::{classify, DatabaseError};
use crate::models::Medicine;

pub fn insert_medicine(conn: &Connection, med: &Medicine) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO medicines (name, price, quantity) VALUES (?1, ?2, ?3)",
        params![med.name, med.price, med.quantity],
    )
    .map_err(classify)?;
    Ok(())
}

/// First medicine whose name matches exactly.
pub fn find_medicine(conn: &Connection, name: &str) -> Result<Option<Medicine>, DatabaseError> {
    let med = conn
        .query_row(
            "SELECT name, price, quantity FROM medicines WHERE name = ?1 ORDER BY rowid LIMIT 1",
            params![name],
            medicine_from_row,
        )
        .optional()?;
    Ok(med)
}

/// Overwrite price and quantity. Returns `false` when no row matched.
pub fn update_medicine(
    conn: &Connection,
    name: &str,
    price: f64,
    quantity: u32,
) -> Result<bool, DatabaseError> {
    let changed = conn
        .execute(
            "UPDATE medicines SET price = ?2, quantity = ?3 WHERE name = ?1",
            params![name, price, quantity],
        )
        .map_err(classify)?;
    Ok(changed > 0)
}

/// Conditional decrement: only applies while stock covers `quantity`.
/// Returns `false` when the row is missing or stock is short.
pub fn decrement_stock(conn: &Connection, name: &str, quantity: u32) -> Result<bool, DatabaseError> {
    let changed = conn.execute(
        "UPDATE medicines SET quantity = quantity - ?2 WHERE name = ?1 AND quantity >= ?2",
        params![name, quantity],
    )?;
    Ok(changed > 0)
}

/// Delete by name. Returns `false` when no row matched.
pub fn delete_medicine(conn: &Connection, name: &str) -> Result<bool, DatabaseError> {
    let changed = conn.execute("DELETE FROM medicines WHERE name = ?1", params![name])?;
    Ok(changed > 0)
}

/// All medicines in store order.
pub fn list_medicines(conn: &Connection) -> Result<Vec<Medicine>, DatabaseError> {
    let mut stmt = conn.prepare("SELECT name, price, quantity FROM medicines ORDER BY rowid")?;
    let rows = stmt.query_map([], medicine_from_row)?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

fn medicine_from_row(row: &rusqlite::Row<'_>) -> Result<Medicine, rusqlite::Error> {
    Ok(Medicine {
        name: row.get(0)?,
        price: row.get(1)?,
        quantity: row.get(2)?,
    })
}
