//! Repository Integration Tests
//!
//! Tests for InventoryRepository with in-memory SQLite database.

#[cfg(test)]
mod tests {
    use crate::domain::{DecrementOutcome, DomainError, InventoryItem};
    use crate::repository::{init_db, CounterRepository, InventoryRepository, Repository};
    use std::path::Path;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    async fn setup_test_db() -> InventoryRepository {
        // Use in-memory database for tests
        let conn = init_db(Path::new(":memory:")).await.expect("Failed to init test DB");
        InventoryRepository::new(Arc::new(Mutex::new(Some(conn))))
    }

    async fn quantity_of(repo: &InventoryRepository, name: &str) -> Option<u32> {
        repo.find_by_id(&name.to_string())
            .await
            .expect("Find failed")
            .map(|item| item.quantity)
    }

    #[tokio::test]
    async fn test_increment_creates_with_one() {
        let repo = setup_test_db().await;

        let created = repo.increment("apple").await.expect("Increment failed");
        assert_eq!(created, InventoryItem::new("apple", 1));

        let items = repo.list().await.expect("List failed");
        assert_eq!(items, vec![InventoryItem::new("apple", 1)]);
    }

    #[tokio::test]
    async fn test_increment_existing_adds_one() {
        let repo = setup_test_db().await;

        repo.increment("rice").await.unwrap();
        repo.increment("rice").await.unwrap();
        let updated = repo.increment("rice").await.unwrap();

        assert_eq!(updated.quantity, 3);
        assert_eq!(quantity_of(&repo, "rice").await, Some(3));
    }

    #[tokio::test]
    async fn test_decrement_above_one() {
        let repo = setup_test_db().await;
        repo.increment("beans").await.unwrap();
        repo.increment("beans").await.unwrap();

        let outcome = repo.decrement_or_delete("beans").await.unwrap();
        assert_eq!(
            outcome,
            DecrementOutcome::Decremented { item: InventoryItem::new("beans", 1) }
        );
    }

    #[tokio::test]
    async fn test_decrement_at_one_deletes() {
        let repo = setup_test_db().await;
        repo.increment("salt").await.unwrap();

        let outcome = repo.decrement_or_delete("salt").await.unwrap();
        assert_eq!(outcome, DecrementOutcome::Deleted { name: "salt".to_string() });
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_decrement_missing_is_noop() {
        let repo = setup_test_db().await;
        repo.increment("flour").await.unwrap();

        let outcome = repo.decrement_or_delete("sugar").await.unwrap();
        assert_eq!(outcome, DecrementOutcome::Missing { name: "sugar".to_string() });
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_ignores_quantity() {
        let repo = setup_test_db().await;
        for _ in 0..7 {
            repo.increment("oats").await.unwrap();
        }

        repo.delete(&"oats".to_string()).await.expect("Delete failed");
        assert_eq!(quantity_of(&repo, "oats").await, None);

        // Deleting again is fine
        repo.delete(&"oats".to_string()).await.expect("Second delete failed");
    }

    #[tokio::test]
    async fn test_add_increment_decrement_scenario() {
        let repo = setup_test_db().await;

        repo.increment("apple").await.unwrap();
        assert_eq!(repo.list().await.unwrap(), vec![InventoryItem::new("apple", 1)]);

        repo.increment("apple").await.unwrap();
        assert_eq!(repo.list().await.unwrap(), vec![InventoryItem::new("apple", 2)]);

        repo.decrement_or_delete("apple").await.unwrap();
        assert_eq!(repo.list().await.unwrap(), vec![InventoryItem::new("apple", 1)]);

        repo.decrement_or_delete("apple").await.unwrap();
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_names_are_case_sensitive_and_trimmed() {
        let repo = setup_test_db().await;

        repo.increment("Apple").await.unwrap();
        repo.increment("apple ").await.unwrap();

        let items = repo.list().await.unwrap();
        assert_eq!(
            items,
            vec![InventoryItem::new("Apple", 1), InventoryItem::new("apple", 1)]
        );
    }

    #[tokio::test]
    async fn test_blank_name_rejected() {
        let repo = setup_test_db().await;

        let err = repo.increment("  ").await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_increments_are_not_lost() {
        let repo = Arc::new(setup_test_db().await);

        let handles: Vec<_> = (0..20)
            .map(|_| {
                let repo = repo.clone();
                tokio::spawn(async move { repo.increment("tea").await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(quantity_of(&repo, "tea").await, Some(20));
    }

    #[tokio::test]
    async fn test_uninitialized_db_errors() {
        let repo = InventoryRepository::new(Arc::new(Mutex::new(None)));
        assert!(matches!(repo.list().await, Err(DomainError::Internal(_))));
    }
}
