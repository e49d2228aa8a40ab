//! Authentication
//!
//! Identity provider access plus the process-wide session.

mod provider;
mod firebase;
mod loopback;
mod federated;
mod session;

pub use provider::{AuthError, IdentityProvider};
pub use firebase::FirebaseAuth;
pub use federated::run_federated_sign_in;
pub use session::{forward_changes, SessionState};
