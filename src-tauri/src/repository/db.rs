//! Database Connection and Setup
//!
//! Manages the SQLite connection and schema.

use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

/// Connection slot shared by every repository; `None` until init finishes
pub type SharedConnection = Arc<Mutex<Option<Connection>>>;

/// Database state wrapper
#[derive(Clone)]
pub struct DbState {
    pub conn: SharedConnection,
    pub db_path: PathBuf,
}

impl DbState {
    /// Empty state; the connection is installed once `init_db` completes
    pub fn new(db_path: PathBuf) -> Self {
        Self {
            conn: Arc::new(Mutex::new(None)),
            db_path,
        }
    }

    pub async fn install(&self, conn: Connection) {
        *self.conn.lock().await = Some(conn);
    }
}

/// Open the database off the async runtime and run migrations
///
/// `:memory:` opens a private in-memory database (used by tests).
pub async fn init_db(db_path: &Path) -> Result<Connection, String> {
    let path = db_path.to_path_buf();
    tokio::task::spawn_blocking(move || open_db(&path))
        .await
        .map_err(|e| format!("DB init task failed: {}", e))?
}

fn open_db(db_path: &Path) -> Result<Connection, String> {
    let conn = if db_path == Path::new(":memory:") {
        Connection::open_in_memory()
    } else {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {}", parent.display(), e))?;
        }
        Connection::open(db_path)
    }
    .map_err(|e| format!("Failed to open db: {}", e))?;

    conn.busy_timeout(Duration::from_secs(5))
        .map_err(|e| e.to_string())?;

    run_migrations(&conn)?;
    Ok(conn)
}

/// Run database migrations
fn run_migrations(conn: &Connection) -> Result<(), String> {
    // Item name is the document key; zero quantities are never stored
    conn.execute(
        "CREATE TABLE IF NOT EXISTS inventory (
            name TEXT PRIMARY KEY NOT NULL,
            quantity INTEGER NOT NULL CHECK (quantity >= 1)
        )",
        [],
    )
    .map_err(|e| format!("Failed to create inventory table: {}", e))?;

    Ok(())
}
