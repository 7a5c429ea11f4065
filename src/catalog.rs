//! Medicine catalog — add, update, delete and list over the `medicines`
//! collection. Names are unique; missing targets are reported, not swallowed.

use rusqlite::Connection;
use thiserror::Error;

use crate::db::{self, DatabaseError};
use crate::models::Medicine;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Medicine already in catalog: {0}")]
    Duplicate(String),

    #[error("Medicine not found: {0}")]
    NotFound(String),

    #[error("Invalid price {0}: must be a non-negative number")]
    InvalidPrice(f64),

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
}

fn check_price(price: f64) -> Result<(), CatalogError> {
    if price.is_finite() && price >= 0.0 {
        Ok(())
    } else {
        Err(CatalogError::InvalidPrice(price))
    }
}

pub fn add(conn: &Connection, name: &str, price: f64, quantity: u32) -> Result<Medicine, CatalogError> {
    check_price(price)?;
    let medicine = Medicine {
        name: name.to_string(),
        price,
        quantity,
    };
    db::insert_medicine(conn, &medicine).map_err(|e| match e {
        DatabaseError::ConstraintViolation(_) => CatalogError::Duplicate(name.to_string()),
        other => CatalogError::Database(other),
    })?;
    tracing::info!(medicine = name, quantity, "Medicine added");
    Ok(medicine)
}

pub fn update(conn: &Connection, name: &str, price: f64, quantity: u32) -> Result<Medicine, CatalogError> {
    check_price(price)?;
    if !db::update_medicine(conn, name, price, quantity)? {
        return Err(CatalogError::NotFound(name.to_string()));
    }
    tracing::info!(medicine = name, quantity, "Medicine updated");
    Ok(Medicine {
        name: name.to_string(),
        price,
        quantity,
    })
}

pub fn delete(conn: &Connection, name: &str) -> Result<(), CatalogError> {
    if !db::delete_medicine(conn, name)? {
        return Err(CatalogError::NotFound(name.to_string()));
    }
    tracing::info!(medicine = name, "Medicine deleted");
    Ok(())
}

pub fn list(conn: &Connection) -> Result<Vec<Medicine>, CatalogError> {
    Ok(db::list_medicines(conn)?)
}
