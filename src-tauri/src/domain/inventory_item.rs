//! Inventory Item Entity
//!
//! A named pantry entry with a positive counter. The name is the key.

use serde::{Deserialize, Serialize};
use super::entity::{DomainError, DomainResult, Entity};

/// A pantry item; `quantity` is never zero for a stored item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    /// Unique key, stored case-sensitively
    pub name: String,
    pub quantity: u32,
}

impl InventoryItem {
    pub fn new(name: impl Into<String>, quantity: u32) -> Self {
        Self {
            name: name.into(),
            quantity,
        }
    }
}

impl Entity for InventoryItem {
    type Id = String;

    fn id(&self) -> Self::Id {
        self.name.clone()
    }
}

/// Result of a decrement-or-delete
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DecrementOutcome {
    /// Quantity went down by one
    Decremented { item: InventoryItem },
    /// Quantity was 1, so the item is gone
    Deleted { name: String },
    /// No item with that name
    Missing { name: String },
}

/// Trim and validate a user-supplied item name
pub fn normalize_name(raw: &str) -> DomainResult<String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(DomainError::InvalidInput("item name must not be empty".to_string()));
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trims_and_keeps_case() {
        assert_eq!(normalize_name("  Apple ").unwrap(), "Apple");
    }

    #[test]
    fn test_normalize_rejects_blank() {
        assert!(matches!(normalize_name("   "), Err(DomainError::InvalidInput(_))));
    }

    #[test]
    fn test_outcome_wire_format() {
        let outcome = DecrementOutcome::Deleted { name: "apple".to_string() };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json, serde_json::json!({ "kind": "deleted", "name": "apple" }));
    }
}
