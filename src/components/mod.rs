//! UI Components
//!
//! Reusable Leptos components.

mod add_item_modal;
mod identity_gate;
mod inventory_row;
mod inventory_screen;
mod sign_in_screen;

pub use add_item_modal::AddItemModal;
pub use identity_gate::IdentityGate;
pub use inventory_row::InventoryRow;
pub use inventory_screen::InventoryScreen;
pub use sign_in_screen::SignInScreen;
