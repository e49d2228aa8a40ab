//! Identity Provider Abstraction
//!
//! The backend only needs two sign-in paths: email/password and a federated
//! redirect flow. Implementations talk to a concrete identity service.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::User;

pub type AuthResult<T> = Result<T, AuthError>;

/// Why a sign-in failed
///
/// Only ever logged; the frontend gets one generic message per sign-in method.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials ({0})")]
    InvalidCredentials(String),
    #[error("Identity provider rejected the request: {0}")]
    Provider(String),
    #[error("Identity provider unreachable: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Sign-in callback failed: {0}")]
    Callback(String),
    #[error("Timed out waiting for the sign-in callback")]
    Timeout,
    #[error("Could not open the browser: {0}")]
    Browser(String),
    #[error("Identity provider is not configured: {0}")]
    NotConfigured(String),
}

/// A federated sign-in that has been started but not completed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FederatedChallenge {
    /// Page the user must visit to authenticate with the provider
    pub auth_uri: String,
    /// Opaque provider session, echoed back on completion
    pub session_id: String,
    /// Where the provider redirects once the user is done
    pub continue_uri: String,
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_in_with_password(&self, email: &str, password: &str) -> AuthResult<User>;

    /// Ask the provider for an auth page that redirects to `continue_uri`
    async fn begin_federated(&self, continue_uri: &str) -> AuthResult<FederatedChallenge>;

    /// Exchange the redirect the browser landed on for a user
    async fn complete_federated(
        &self,
        challenge: &FederatedChallenge,
        callback_uri: &str,
    ) -> AuthResult<User>;
}
