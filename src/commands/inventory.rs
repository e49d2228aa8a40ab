//! Inventory Commands
//!
//! Frontend bindings for inventory-related backend commands.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::models::{DecrementOutcome, InventoryItem};
use super::call;

#[derive(Serialize)]
struct NameArgs<'a> {
    name: &'a str,
}

fn name_args(name: &str) -> Result<JsValue, String> {
    serde_wasm_bindgen::to_value(&NameArgs { name }).map_err(|e| e.to_string())
}

pub async fn list_inventory() -> Result<Vec<InventoryItem>, String> {
    call("list_inventory", JsValue::NULL).await
}

/// Create with quantity 1, or add one to an existing item
pub async fn add_inventory_item(name: &str) -> Result<InventoryItem, String> {
    call("add_inventory_item", name_args(name)?).await
}

pub async fn decrement_inventory_item(name: &str) -> Result<DecrementOutcome, String> {
    call("decrement_inventory_item", name_args(name)?).await
}

pub async fn remove_inventory_item(name: &str) -> Result<(), String> {
    call("remove_inventory_item", name_args(name)?).await
}
