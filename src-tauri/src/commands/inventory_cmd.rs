//! Tauri Commands for the Inventory
//!
//! Exposes the inventory collection to the frontend via Tauri IPC.
//! Every command requires a signed-in session.

use tauri::State;
use crate::auth::SessionState;
use crate::domain::{DecrementOutcome, InventoryItem};
use crate::repository::{CounterRepository, DbState, InventoryRepository, Repository};
use crate::AppState;

/// Repository for the signed-in user, or "Not signed in"
fn authorized(session: &SessionState, db_state: &DbState) -> Result<InventoryRepository, String> {
    session.require_user().map_err(|e| e.to_string())?;
    Ok(InventoryRepository::new(db_state.conn.clone()))
}

/// List every item
#[tauri::command]
pub async fn list_inventory(state: State<'_, AppState>) -> Result<Vec<InventoryItem>, String> {
    let repo = authorized(&state.session, &state.db_state)?;
    repo.list().await.map_err(|e| {
        log::error!("list_inventory failed: {}", e);
        e.to_string()
    })
}

/// Read one item by name
#[tauri::command]
pub async fn get_inventory_item(
    state: State<'_, AppState>,
    name: String,
) -> Result<Option<InventoryItem>, String> {
    let repo = authorized(&state.session, &state.db_state)?;
    repo.find_by_id(&name).await.map_err(|e| e.to_string())
}

/// Add one unit, creating the item if needed
#[tauri::command]
pub async fn add_inventory_item(
    state: State<'_, AppState>,
    name: String,
) -> Result<InventoryItem, String> {
    let repo = authorized(&state.session, &state.db_state)?;
    repo.increment(&name).await.map_err(|e| {
        log::error!("add_inventory_item({:?}) failed: {}", name, e);
        e.to_string()
    })
}

/// Remove one unit; the item disappears when the last unit goes
#[tauri::command]
pub async fn decrement_inventory_item(
    state: State<'_, AppState>,
    name: String,
) -> Result<DecrementOutcome, String> {
    let repo = authorized(&state.session, &state.db_state)?;
    repo.decrement_or_delete(&name).await.map_err(|e| {
        log::error!("decrement_inventory_item({:?}) failed: {}", name, e);
        e.to_string()
    })
}

/// Delete an item whatever its quantity
#[tauri::command]
pub async fn remove_inventory_item(
    state: State<'_, AppState>,
    name: String,
) -> Result<(), String> {
    let repo = authorized(&state.session, &state.db_state)?;
    repo.delete(&name).await.map_err(|e| {
        log::error!("remove_inventory_item({:?}) failed: {}", name, e);
        e.to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{SignInMethod, User};
    use crate::repository::init_db;
    use std::path::{Path, PathBuf};

    #[test]
    fn test_rejected_without_session() {
        let session = SessionState::new();
        let db_state = DbState::new(PathBuf::from(":memory:"));

        let err = authorized(&session, &db_state).err();
        assert_eq!(err.as_deref(), Some("Not signed in"));
    }

    #[tokio::test]
    async fn test_signed_in_user_reaches_inventory() {
        let session = SessionState::new();
        let db_state = DbState::new(PathBuf::from(":memory:"));
        db_state.install(init_db(Path::new(":memory:")).await.unwrap()).await;

        session.sign_in(User::new("uid-1", None, SignInMethod::Password));
        let repo = authorized(&session, &db_state).unwrap();
        repo.increment("apple").await.unwrap();
        assert_eq!(repo.list().await.unwrap(), vec![InventoryItem::new("apple", 1)]);

        session.sign_out();
        assert!(authorized(&session, &db_state).is_err());
    }
}
