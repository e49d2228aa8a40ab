//! Domain Layer
//!
//! Contains all domain entities and core abstractions.
//! This layer has NO external dependencies (except serde/thiserror/chrono).

mod entity;
mod inventory_item;
mod user;

pub use entity::{Entity, DomainError, DomainResult};
pub use inventory_item::{InventoryItem, DecrementOutcome, normalize_name};
pub use user::{User, SignInMethod};
