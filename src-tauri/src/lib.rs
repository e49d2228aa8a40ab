//! Pantry Tracker Backend
//!
//! Layered architecture:
//! - domain: Core entities and business rules
//! - repository: Data access abstractions and implementations
//! - auth: Identity provider and session
//! - commands: Tauri command handlers

use std::sync::{Arc, Mutex};
use tauri::{Emitter, Manager};

mod auth;
mod commands;
mod config;
mod domain;
mod repository;

use auth::{forward_changes, FirebaseAuth, IdentityProvider, SessionState};
use config::PantryConfig;
use repository::{init_db, DbState};

/// Emitted with `Option<User>` whenever the session changes
pub const AUTH_STATE_EVENT: &str = "auth-state-changed";
/// Emitted once the database is open and migrated
pub const DB_READY_EVENT: &str = "db-initialized";

/// Application state shared across commands
pub struct AppState {
    pub db_state: DbState,
    pub session: SessionState,
    pub identity: Arc<dyn IdentityProvider>,
    pub config: PantryConfig,
    auth_forwarder: Mutex<Option<tauri::async_runtime::JoinHandle<()>>>,
}

impl AppState {
    /// Drop the session subscription taken at startup
    fn stop_auth_forwarder(&self) {
        let handle = match self.auth_forwarder.lock() {
            Ok(mut slot) => slot.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        if let Some(handle) = handle {
            handle.abort();
            log::info!("Auth state forwarder stopped");
        }
    }
}

/// Load `pantry.json` plus env overrides, falling back to defaults
fn load_config(app_handle: &tauri::AppHandle) -> PantryConfig {
    let config_dir = match app_handle.path().app_config_dir() {
        Ok(dir) => Some(dir),
        Err(e) => {
            log::warn!("No app config dir ({}), using defaults and env", e);
            None
        }
    };

    match PantryConfig::load(config_dir.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("{}; using defaults", e);
            PantryConfig::default()
        }
    }
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    let app = tauri::Builder::default()
        .setup(|app| {
            // Single instance check - must be first!
            #[cfg(desktop)]
            app.handle().plugin(tauri_plugin_single_instance::init(|app, _args, _cwd| {
                // Focus the existing window when a new instance tries to start
                if let Some(window) = app.get_webview_window("main") {
                    let _ = window.set_focus();
                }
            }))?;

            let app_handle = app.handle().clone();

            // Initialize logging
            rolling_logger::init_logger(app_handle.path().app_log_dir()?, "Pantry")?;
            if let Some(path) = rolling_logger::log_path() {
                log::info!("Logging to {}", path.display());
            }

            let config = load_config(&app_handle);
            let db_path = app_handle.path().app_data_dir()?.join(&config.store.file_name);
            log::info!("App setup starting");

            let session = SessionState::new();
            let identity: Arc<dyn IdentityProvider> = Arc::new(FirebaseAuth::new(&config.auth));

            // Subscribe for the lifetime of the app; aborted on exit
            let forwarder = {
                let emitter = app_handle.clone();
                tauri::async_runtime::spawn(forward_changes(session.subscribe(), move |user| {
                    if let Err(e) = emitter.emit(AUTH_STATE_EVENT, user) {
                        log::warn!("Failed to emit {}: {}", AUTH_STATE_EVENT, e);
                    }
                }))
            };

            // Create initial empty DbState (managed)
            let db_state = DbState::new(db_path.clone());

            // Manage state IMMEDIATELY
            app.manage(AppState {
                db_state: db_state.clone(),
                session,
                identity,
                config,
                auth_forwarder: Mutex::new(Some(forwarder)),
            });

            // Initialize database asynchronously in background
            tauri::async_runtime::spawn(async move {
                match init_db(&db_path).await {
                    Ok(conn) => {
                        db_state.install(conn).await;
                        let _ = rolling_logger::info(&format!(
                            "Database ready at {}",
                            db_state.db_path.display()
                        ));

                        // Emit event to notify frontend
                        if let Err(e) = app_handle.emit(DB_READY_EVENT, ()) {
                            log::warn!("Failed to emit {}: {}", DB_READY_EVENT, e);
                        }
                    }
                    Err(e) => {
                        let _ = rolling_logger::error(&format!("DB init failed: {}", e));
                    }
                }
            });

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            // Sign-in
            commands::current_user,
            commands::sign_in_with_credentials,
            commands::sign_in_with_federated_provider,
            commands::sign_out,
            // Inventory
            commands::list_inventory,
            commands::get_inventory_item,
            commands::add_inventory_item,
            commands::decrement_inventory_item,
            commands::remove_inventory_item,
        ])
        .build(tauri::generate_context!())
        .expect("error while building tauri application");

    app.run(|app_handle, event| {
        if let tauri::RunEvent::Exit = event {
            if let Some(state) = app_handle.try_state::<AppState>() {
                state.stop_auth_forwarder();
            }
        }
    });
}
