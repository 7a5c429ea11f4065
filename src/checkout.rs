//! Purchase checkout and the per-session cart.
//!
//! `buy` checks stock, decrements it and records the sale inside one
//! IMMEDIATE transaction. The decrement is conditional on the stock still
//! covering the request, so a concurrent buyer on another connection can
//! never drive the quantity below zero.

use rusqlite::{Connection, TransactionBehavior};
use thiserror::Error;

use crate::db::{self, DataStore, DatabaseError};
use crate::models::Purchase;

#[derive(Error, Debug)]
pub enum CheckoutError {
    #[error("{medicine} not available in sufficient quantity (requested {requested}, available {available})")]
    InsufficientStock {
        medicine: String,
        requested: u32,
        available: u32,
    },

    #[error("Purchase quantity must be positive")]
    InvalidQuantity,

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
}

/// Completed purchases of one session. Never persisted.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    items: Vec<Purchase>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, purchase: Purchase) {
        self.items.push(purchase);
    }

    pub fn items(&self) -> &[Purchase] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of `total_price` over the cart.
    pub fn total(&self) -> f64 {
        self.items.iter().map(|p| p.total_price).sum()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

pub fn buy(
    store: &mut DataStore,
    cart: &mut Cart,
    medicine_name: &str,
    quantity: u32,
) -> Result<Purchase, CheckoutError> {
    if quantity == 0 {
        return Err(CheckoutError::InvalidQuantity);
    }

    let tx = store
        .conn_mut()
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(DatabaseError::from)?;

    let insufficient = |available: u32| {
        tracing::warn!(medicine = medicine_name, requested = quantity, available, "Purchase rejected");
        CheckoutError::InsufficientStock {
            medicine: medicine_name.to_string(),
            requested: quantity,
            available,
        }
    };

    // Dropping `tx` on any early return rolls back.
    let medicine = match db::find_medicine(&tx, medicine_name)? {
        Some(med) if med.quantity >= quantity => med,
        Some(med) => return Err(insufficient(med.quantity)),
        None => return Err(insufficient(0)),
    };

    let purchase = Purchase::new(&medicine.name, medicine.price, quantity);

    if !db::decrement_stock(&tx, medicine_name, quantity)? {
        return Err(insufficient(medicine.quantity));
    }
    db::insert_purchase(&tx, &purchase)?;
    tx.commit().map_err(DatabaseError::from)?;

    tracing::info!(
        medicine = medicine_name,
        quantity,
        total = purchase.total_price,
        "Purchase recorded"
    );
    cart.push(purchase.clone());
    Ok(purchase)
}

/// Full purchase ledger, oldest first.
pub fn purchase_history(conn: &Connection) -> Result<Vec<Purchase>, CheckoutError> {
    Ok(db::list_purchases(conn)?)
}
