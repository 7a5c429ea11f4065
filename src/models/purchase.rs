use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A completed sale. Immutable once written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Purchase {
    pub id: Uuid,
    pub medicine_name: String,
    /// Unit price captured at sale time.
    pub price: f64,
    pub quantity: u32,
    pub total_price: f64,
    pub timestamp: DateTime<Utc>,
}

impl Purchase {
    /// Build a purchase stamped with the current time.
    pub fn new(medicine_name: &str, price: f64, quantity: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            medicine_name: medicine_name.to_string(),
            price,
            quantity,
            total_price: price * f64::from(quantity),
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_is_price_times_quantity() {
        let purchase = Purchase::new("Paracetamol", 5.0, 3);
        assert_eq!(purchase.total_price, 15.0);
        assert_eq!(purchase.medicine_name, "Paracetamol");
    }
}
