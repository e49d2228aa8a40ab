//! Inventory Store
//!
//! Server-sourced inventory list with field-level reactivity.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::models::{apply_decrement, apply_remove, apply_upsert, DecrementOutcome, InventoryItem};

#[derive(Clone, Debug, Default, Store)]
pub struct PantryState {
    /// Full list as last fetched, with local patches applied on top
    pub inventory: Vec<InventoryItem>,
}

/// Type alias for the store
pub type PantryStore = Store<PantryState>;

// ========================
// Store Helper Functions
// ========================

/// Tracked read of the whole list
pub fn store_inventory(store: &PantryStore) -> Vec<InventoryItem> {
    store.inventory().get()
}

/// Replace the list with a fresh fetch
pub fn store_set_inventory(store: &PantryStore, items: Vec<InventoryItem>) {
    *store.inventory().write() = items;
}

/// Insert or update one item by name
pub fn store_upsert_item(store: &PantryStore, item: InventoryItem) {
    apply_upsert(&mut store.inventory().write(), item);
}

pub fn store_apply_decrement(store: &PantryStore, outcome: &DecrementOutcome) {
    apply_decrement(&mut store.inventory().write(), outcome);
}

/// Remove an item from the store by name
pub fn store_remove_item(store: &PantryStore, name: &str) {
    apply_remove(&mut store.inventory().write(), name);
}
