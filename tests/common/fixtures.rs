//! Test fixtures

use serde::{Deserialize, Serialize};

/// A small JSON-serializable value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: u64,
    pub customer: String,
    pub items: Vec<String>,
    pub total_cents: i64,
}

impl Order {
    pub fn sample(id: u64) -> Self {
        Self {
            id,
            customer: format!("customer-{}", id),
            items: vec!["widget".to_string(), "gadget".to_string()],
            total_cents: 1299 * id as i64,
        }
    }
}
