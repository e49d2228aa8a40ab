//! Commands Layer
//!
//! Tauri command handlers that bridge frontend to backend services.

mod auth_cmd;
mod inventory_cmd;

pub use auth_cmd::*;
pub use inventory_cmd::*;
