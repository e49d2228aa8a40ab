//! Repository Layer
//!
//! Data access abstractions and implementations.

mod traits;
mod db;
mod inventory_repo;

#[cfg(test)]
mod tests;

pub use traits::{Repository, CounterRepository};
pub use db::{init_db, DbState};
pub use inventory_repo::InventoryRepository;
