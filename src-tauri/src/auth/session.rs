//! Session State
//!
//! Process-wide record of who is signed in. Changes are broadcast through a
//! `watch` channel so the app shell can subscribe at start and drop the
//! subscription at exit.

use tokio::sync::watch;

use crate::domain::{DomainError, DomainResult, User};

pub struct SessionState {
    tx: watch::Sender<Option<User>>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx }
    }

    pub fn current(&self) -> Option<User> {
        self.tx.borrow().clone()
    }

    pub fn sign_in(&self, user: User) {
        self.tx.send_replace(Some(user));
    }

    /// Clear the session, returning whoever was signed in
    pub fn sign_out(&self) -> Option<User> {
        self.tx.send_replace(None)
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<User>> {
        self.tx.subscribe()
    }

    pub fn require_user(&self) -> DomainResult<User> {
        self.current().ok_or(DomainError::Unauthenticated)
    }
}

/// Call `emit` for every session change until the session is dropped
pub async fn forward_changes<F>(mut rx: watch::Receiver<Option<User>>, emit: F)
where
    F: Fn(Option<User>) + Send,
{
    while rx.changed().await.is_ok() {
        let user = rx.borrow_and_update().clone();
        emit(user);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SignInMethod;
    use std::sync::{Arc, Mutex};

    fn alice() -> User {
        User::new("uid-alice", Some("alice@example.com".to_string()), SignInMethod::Password)
    }

    #[test]
    fn test_require_user_when_signed_out() {
        let session = SessionState::new();
        assert_eq!(session.require_user(), Err(DomainError::Unauthenticated));
    }

    #[test]
    fn test_sign_in_and_out() {
        let session = SessionState::new();
        session.sign_in(alice());
        assert_eq!(session.require_user().unwrap().uid, "uid-alice");

        let previous = session.sign_out();
        assert_eq!(previous.map(|u| u.uid), Some("uid-alice".to_string()));
        assert!(session.current().is_none());
    }

    #[tokio::test]
    async fn test_forwarder_sees_changes_and_stops() {
        let session = SessionState::new();
        let seen: Arc<Mutex<Vec<Option<String>>>> = Arc::new(Mutex::new(Vec::new()));

        let sink = seen.clone();
        let rx = session.subscribe();
        let forwarder = tokio::spawn(forward_changes(rx, move |user| {
            sink.lock().unwrap().push(user.map(|u| u.uid));
        }));

        session.sign_in(alice());
        tokio::task::yield_now().await;
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        session.sign_out();
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;

        drop(session);
        forwarder.await.unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.first(), Some(&Some("uid-alice".to_string())));
        assert_eq!(seen.last(), Some(&None));
    }
}
