use serde::{Deserialize, Serialize};

/// A catalog entry. `name` is the catalog key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Medicine {
    pub name: String,
    pub price: f64,
    pub quantity: u32,
}
