//! Repository Layer - Core Traits
//!
//! Defines the abstract interfaces for data access.
//! Implementations can use SQLite, a remote document store, etc.

use async_trait::async_trait;
use crate::domain::{DecrementOutcome, DomainResult, Entity, InventoryItem};

/// Core repository trait for keyed collections
///
/// Generic over any Entity type.
/// All operations are async to support various backends.
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// Find entity by key
    async fn find_by_id(&self, id: &T::Id) -> DomainResult<Option<T>>;

    /// List all entities
    async fn list(&self) -> DomainResult<Vec<T>>;

    /// Delete entity by key (absent keys are not an error)
    async fn delete(&self, id: &T::Id) -> DomainResult<()>;
}

/// Extension for collections of positive counters
///
/// Both operations are single atomic steps at the storage boundary,
/// so concurrent callers cannot lose updates.
#[async_trait]
pub trait CounterRepository: Repository<InventoryItem> {
    /// Create with quantity 1, or add one to an existing item
    async fn increment(&self, name: &str) -> DomainResult<InventoryItem>;

    /// Subtract one, deleting the item instead of storing zero
    async fn decrement_or_delete(&self, name: &str) -> DomainResult<DecrementOutcome>;
}
