//! Federated Sign-In Flow
//!
//! Listener first, then the provider challenge, then the browser, then wait.

use std::time::Duration;

use crate::domain::User;
use super::loopback::CallbackListener;
use super::provider::{AuthError, AuthResult, IdentityProvider};

/// Run a complete redirect sign-in
///
/// `open_browser` receives the provider's auth page; the desktop app passes
/// `open::that`, tests pass a fake browser.
pub async fn run_federated_sign_in<P, O>(
    provider: &P,
    open_browser: O,
    timeout: Duration,
) -> AuthResult<User>
where
    P: IdentityProvider + ?Sized,
    O: FnOnce(&str) -> std::io::Result<()>,
{
    let listener = CallbackListener::bind().await?;
    let challenge = provider.begin_federated(&listener.continue_uri()).await?;

    log::info!("Opening browser for federated sign-in (port {})", listener.port());
    open_browser(&challenge.auth_uri).map_err(|e| AuthError::Browser(e.to_string()))?;

    let callback = tokio::time::timeout(timeout, listener.accept())
        .await
        .map_err(|_| AuthError::Timeout)??;

    provider.complete_federated(&challenge, &callback).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::loopback::tests::browse;
    use crate::auth::provider::FederatedChallenge;
    use crate::domain::SignInMethod;
    use async_trait::async_trait;

    /// Provider whose "auth page" redirects straight back with a code
    struct InstantProvider;

    #[async_trait]
    impl IdentityProvider for InstantProvider {
        async fn sign_in_with_password(&self, _email: &str, _password: &str) -> AuthResult<User> {
            Err(AuthError::InvalidCredentials("unused".to_string()))
        }

        async fn begin_federated(&self, continue_uri: &str) -> AuthResult<FederatedChallenge> {
            Ok(FederatedChallenge {
                auth_uri: format!("{}?code=granted", continue_uri),
                session_id: "session-1".to_string(),
                continue_uri: continue_uri.to_string(),
            })
        }

        async fn complete_federated(
            &self,
            challenge: &FederatedChallenge,
            callback_uri: &str,
        ) -> AuthResult<User> {
            if !callback_uri.starts_with(&challenge.continue_uri) || !callback_uri.ends_with("code=granted") {
                return Err(AuthError::Callback(callback_uri.to_string()));
            }
            Ok(User::new(challenge.session_id.clone(), None, SignInMethod::Federated))
        }
    }

    #[tokio::test]
    async fn test_round_trip_through_browser() {
        let user = run_federated_sign_in(
            &InstantProvider,
            |uri| {
                let uri = uri.to_string();
                tokio::spawn(async move { browse(&uri).await });
                Ok(())
            },
            Duration::from_secs(5),
        )
        .await
        .unwrap();

        assert_eq!(user.uid, "session-1");
        assert_eq!(user.method, SignInMethod::Federated);
    }

    #[tokio::test]
    async fn test_times_out_when_browser_never_returns() {
        let err = run_federated_sign_in(&InstantProvider, |_| Ok(()), Duration::from_millis(50))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Timeout));
    }

    #[tokio::test]
    async fn test_browser_failure_is_reported() {
        let err = run_federated_sign_in(
            &InstantProvider,
            |_| Err(std::io::Error::new(std::io::ErrorKind::NotFound, "no browser")),
            Duration::from_secs(1),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AuthError::Browser(_)));
    }
}
