//! Auth Commands
//!
//! Frontend bindings for sign-in and session commands.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::models::User;
use super::call;

#[derive(Serialize)]
struct CredentialsArgs<'a> {
    email: &'a str,
    password: &'a str,
}

pub async fn current_user() -> Result<Option<User>, String> {
    call("current_user", JsValue::NULL).await
}

pub async fn sign_in_with_credentials(email: &str, password: &str) -> Result<User, String> {
    let args = serde_wasm_bindgen::to_value(&CredentialsArgs { email, password })
        .map_err(|e| e.to_string())?;
    call("sign_in_with_credentials", args).await
}

/// Opens the system browser; resolves once the provider redirects back
pub async fn sign_in_with_federated_provider() -> Result<User, String> {
    call("sign_in_with_federated_provider", JsValue::NULL).await
}

pub async fn sign_out() -> Result<(), String> {
    call("sign_out", JsValue::NULL).await
}
