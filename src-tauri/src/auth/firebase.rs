//! Firebase Identity Toolkit Provider
//!
//! REST client for `accounts:signInWithPassword`, `accounts:createAuthUri`
//! and `accounts:signInWithIdp`.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::AuthConfig;
use crate::domain::{SignInMethod, User};
use super::provider::{AuthError, AuthResult, FederatedChallenge, IdentityProvider};

/// Error codes that mean "wrong email or password" rather than a service fault
const CREDENTIAL_ERRORS: &[&str] = &[
    "EMAIL_NOT_FOUND",
    "INVALID_PASSWORD",
    "INVALID_LOGIN_CREDENTIALS",
    "INVALID_EMAIL",
    "MISSING_PASSWORD",
    "USER_DISABLED",
];

pub struct FirebaseAuth {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    provider_id: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateAuthUriRequest<'a> {
    provider_id: &'a str,
    continue_uri: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateAuthUriResponse {
    auth_uri: Option<String>,
    session_id: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct IdpRequest<'a> {
    request_uri: &'a str,
    session_id: &'a str,
    return_secure_token: bool,
    return_idp_credential: bool,
}

/// Fields shared by every sign-in response
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignInResponse {
    local_id: String,
    email: Option<String>,
    display_name: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl FirebaseAuth {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            provider_id: config.federated_provider.clone(),
        }
    }

    fn url(&self, method: &str) -> String {
        format!("{}/v1/accounts:{}?key={}", self.endpoint, method, self.api_key)
    }

    async fn post<B, R>(&self, method: &str, body: &B) -> AuthResult<R>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        if self.api_key.is_empty() {
            return Err(AuthError::NotConfigured("auth.apiKey is empty".to_string()));
        }

        let resp = self.http.post(self.url(method)).json(body).send().await?;
        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            return Err(classify_error(&text));
        }

        serde_json::from_str(&text)
            .map_err(|e| AuthError::Provider(format!("unexpected {} response: {}", method, e)))
    }
}

#[async_trait]
impl IdentityProvider for FirebaseAuth {
    async fn sign_in_with_password(&self, email: &str, password: &str) -> AuthResult<User> {
        let resp: SignInResponse = self
            .post(
                "signInWithPassword",
                &PasswordRequest {
                    email,
                    password,
                    return_secure_token: true,
                },
            )
            .await?;
        Ok(to_user(resp, SignInMethod::Password))
    }

    async fn begin_federated(&self, continue_uri: &str) -> AuthResult<FederatedChallenge> {
        let resp: CreateAuthUriResponse = self
            .post(
                "createAuthUri",
                &CreateAuthUriRequest {
                    provider_id: &self.provider_id,
                    continue_uri,
                },
            )
            .await?;

        match (resp.auth_uri, resp.session_id) {
            (Some(auth_uri), Some(session_id)) => Ok(FederatedChallenge {
                auth_uri,
                session_id,
                continue_uri: continue_uri.to_string(),
            }),
            _ => Err(AuthError::Provider(format!(
                "provider {} is not enabled for redirect sign-in",
                self.provider_id
            ))),
        }
    }

    async fn complete_federated(
        &self,
        challenge: &FederatedChallenge,
        callback_uri: &str,
    ) -> AuthResult<User> {
        let resp: SignInResponse = self
            .post(
                "signInWithIdp",
                &IdpRequest {
                    request_uri: callback_uri,
                    session_id: &challenge.session_id,
                    return_secure_token: true,
                    return_idp_credential: true,
                },
            )
            .await?;
        Ok(to_user(resp, SignInMethod::Federated))
    }
}

fn to_user(resp: SignInResponse, method: SignInMethod) -> User {
    let mut user = User::new(resp.local_id, resp.email, method);
    user.display_name = resp.display_name.filter(|name| !name.is_empty());
    user
}

/// Map an error body like `{"error":{"message":"INVALID_PASSWORD"}}`
///
/// Messages may carry detail after the code (`"CODE : detail"`).
fn classify_error(body: &str) -> AuthError {
    let message = match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => envelope.error.message,
        Err(_) => return AuthError::Provider(body.chars().take(200).collect()),
    };

    let code = message.split(" : ").next().unwrap_or(&message).trim().to_string();
    if CREDENTIAL_ERRORS.contains(&code.as_str()) {
        AuthError::InvalidCredentials(code)
    } else {
        AuthError::Provider(message)
    }
}
