//! Frontend Models
//!
//! Data structures matching backend entities, plus the pure list logic the
//! inventory screen derives from them.

use serde::{Deserialize, Serialize};

/// Items above this quantity are shown as well stocked
pub const LOW_STOCK_THRESHOLD: u32 = 5;

/// Inventory item (matches backend)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub name: String,
    pub quantity: u32,
}

/// Row highlight, purely visual
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockLevel {
    Stocked,
    Low,
}

impl StockLevel {
    pub fn css_class(self) -> &'static str {
        match self {
            StockLevel::Stocked => "stock-ok",
            StockLevel::Low => "stock-low",
        }
    }
}

impl InventoryItem {
    /// Name with its first letter capitalized; storage keeps the original case
    pub fn display_name(&self) -> String {
        let mut chars = self.name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    pub fn stock_level(&self) -> StockLevel {
        if self.quantity > LOW_STOCK_THRESHOLD {
            StockLevel::Stocked
        } else {
            StockLevel::Low
        }
    }
}

/// Result of a decrement (matches backend)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DecrementOutcome {
    Decremented { item: InventoryItem },
    Deleted { name: String },
    Missing { name: String },
}

/// Signed-in user (matches backend)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub uid: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
}

impl User {
    /// Best human-readable name available
    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or(&self.uid)
    }
}

/// Case-insensitive substring match on the item name
pub fn filter_inventory(items: &[InventoryItem], query: &str) -> Vec<InventoryItem> {
    let needle = query.to_lowercase();
    items
        .iter()
        .filter(|item| item.name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

// ========================
// Local patches (applied before the full refresh lands)
// ========================

pub fn apply_upsert(items: &mut Vec<InventoryItem>, item: InventoryItem) {
    match items.iter_mut().find(|existing| existing.name == item.name) {
        Some(existing) => *existing = item,
        None => items.push(item),
    }
}

pub fn apply_decrement(items: &mut Vec<InventoryItem>, outcome: &DecrementOutcome) {
    match outcome {
        DecrementOutcome::Decremented { item } => apply_upsert(items, item.clone()),
        DecrementOutcome::Deleted { name } | DecrementOutcome::Missing { name } => {
            apply_remove(items, name)
        }
    }
}

pub fn apply_remove(items: &mut Vec<InventoryItem>, name: &str) {
    items.retain(|item| item.name != name);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, quantity: u32) -> InventoryItem {
        InventoryItem {
            name: name.to_string(),
            quantity,
        }
    }

    #[test]
    fn test_filter_is_case_insensitive_substring() {
        let items = vec![item("Banana", 1), item("Mango", 2), item("Peach", 3)];
        let names: Vec<String> = filter_inventory(&items, "an")
            .into_iter()
            .map(|i| i.name)
            .collect();
        assert_eq!(names, vec!["Banana", "Mango"]);

        assert_eq!(filter_inventory(&items, "PEA"), vec![item("Peach", 3)]);
    }

    #[test]
    fn test_filter_search_app() {
        let items = vec![item("apple", 1), item("grape", 2)];
        assert_eq!(filter_inventory(&items, "app"), vec![item("apple", 1)]);
    }

    #[test]
    fn test_empty_query_keeps_everything() {
        let items = vec![item("apple", 1), item("grape", 2)];
        assert_eq!(filter_inventory(&items, ""), items);
    }

    #[test]
    fn test_display_name_capitalizes_first_letter() {
        assert_eq!(item("apple", 1).display_name(), "Apple");
        assert_eq!(item("ñame", 1).display_name(), "Ñame");
        assert_eq!(item("", 1).display_name(), "");
    }

    #[test]
    fn test_stock_level_threshold() {
        assert_eq!(item("a", 5).stock_level(), StockLevel::Low);
        assert_eq!(item("a", 6).stock_level(), StockLevel::Stocked);
    }

    #[test]
    fn test_patches() {
        let mut items = vec![item("apple", 1)];

        apply_upsert(&mut items, item("apple", 2));
        apply_upsert(&mut items, item("grape", 1));
        assert_eq!(items, vec![item("apple", 2), item("grape", 1)]);

        apply_decrement(&mut items, &DecrementOutcome::Decremented { item: item("apple", 1) });
        apply_decrement(&mut items, &DecrementOutcome::Deleted { name: "grape".to_string() });
        assert_eq!(items, vec![item("apple", 1)]);

        apply_remove(&mut items, "apple");
        assert!(items.is_empty());
    }

    #[test]
    fn test_user_label_fallbacks() {
        let mut user = User {
            uid: "u1".to_string(),
            email: Some("a@b.c".to_string()),
            display_name: None,
        };
        assert_eq!(user.label(), "a@b.c");
        user.display_name = Some("Ada".to_string());
        assert_eq!(user.label(), "Ada");
        user.display_name = None;
        user.email = None;
        assert_eq!(user.label(), "u1");
    }
}
