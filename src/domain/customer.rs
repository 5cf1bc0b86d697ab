use serde::{Deserialize, Serialize};

pub type CustomerId = String;

/// Prefix of system-assigned customer identifiers ("CUS1", "CUS2", ...).
pub const CUSTOMER_ID_PREFIX: &str = "CUS";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
}

impl Customer {
    /// Create the customer holding the given 1-based position in the directory.
    pub fn with_sequence(sequence: usize, name: impl Into<String>) -> Self {
        Self {
            id: format!("{}{}", CUSTOMER_ID_PREFIX, sequence),
            name: name.into(),
        }
    }
}
