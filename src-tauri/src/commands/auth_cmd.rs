//! Tauri Commands for Sign-In
//!
//! Failures are logged with their cause; the frontend only ever receives one
//! generic message per sign-in method.

use std::time::Duration;

use tauri::State;
use crate::auth::{run_federated_sign_in, AuthError};
use crate::domain::{SignInMethod, User};
use crate::AppState;

pub const CREDENTIALS_FAILED: &str = "Failed to sign in. Please check your credentials.";
pub const FEDERATED_FAILED: &str = "Failed to sign in with Google.";

/// Log the cause and collapse it into the one message shown for `method`
fn sign_in_failure(method: SignInMethod, err: &AuthError) -> String {
    log::warn!("{:?} sign-in failed: {}", method, err);
    match method {
        SignInMethod::Password => CREDENTIALS_FAILED,
        SignInMethod::Federated => FEDERATED_FAILED,
    }
    .to_string()
}

/// Who is signed in right now (None = nobody)
#[tauri::command]
pub async fn current_user(state: State<'_, AppState>) -> Result<Option<User>, String> {
    Ok(state.session.current())
}

/// Email + password sign-in
#[tauri::command]
pub async fn sign_in_with_credentials(
    state: State<'_, AppState>,
    email: String,
    password: String,
) -> Result<User, String> {
    match state.identity.sign_in_with_password(email.trim(), &password).await {
        Ok(user) => {
            log::info!("Signed in {} with password", user.uid);
            state.session.sign_in(user.clone());
            Ok(user)
        }
        Err(e) => Err(sign_in_failure(SignInMethod::Password, &e)),
    }
}

/// Federated sign-in through the system browser
#[tauri::command]
pub async fn sign_in_with_federated_provider(state: State<'_, AppState>) -> Result<User, String> {
    let timeout = Duration::from_secs(state.config.auth.callback_timeout_secs);

    match run_federated_sign_in(state.identity.as_ref(), |uri| open::that(uri), timeout).await {
        Ok(user) => {
            log::info!("Signed in {} via {}", user.uid, state.config.auth.federated_provider);
            state.session.sign_in(user.clone());
            Ok(user)
        }
        Err(e) => Err(sign_in_failure(SignInMethod::Federated, &e)),
    }
}

#[tauri::command]
pub async fn sign_out(state: State<'_, AppState>) -> Result<(), String> {
    if let Some(user) = state.session.sign_out() {
        log::info!("Signed out {}", user.uid);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn every_failure() -> Vec<AuthError> {
        let transport = reqwest::Client::new()
            .get("not a url")
            .build()
            .unwrap_err();
        vec![
            AuthError::InvalidCredentials("INVALID_PASSWORD".to_string()),
            AuthError::InvalidCredentials("EMAIL_NOT_FOUND".to_string()),
            AuthError::Provider("TOO_MANY_ATTEMPTS_TRY_LATER".to_string()),
            AuthError::Transport(transport),
            AuthError::Callback("provider returned error: access_denied".to_string()),
            AuthError::Timeout,
            AuthError::Browser("no browser".to_string()),
            AuthError::NotConfigured("auth.api_key is empty".to_string()),
        ]
    }

    #[test]
    fn test_password_failures_share_one_message() {
        for err in every_failure() {
            assert_eq!(sign_in_failure(SignInMethod::Password, &err), CREDENTIALS_FAILED);
        }
    }

    #[test]
    fn test_federated_failures_share_one_message() {
        for err in every_failure() {
            assert_eq!(sign_in_failure(SignInMethod::Federated, &err), FEDERATED_FAILED);
        }
    }
}
