//! Application Context
//!
//! Session signals provided via Leptos Context API.

use leptos::prelude::*;

use crate::models::User;

/// Who is signed in, as last reported by the backend
#[derive(Clone, Copy)]
pub struct SessionContext {
    pub user: ReadSignal<Option<User>>,
    set_user: WriteSignal<Option<User>>,
    /// False until the backend has answered at least once
    pub resolved: ReadSignal<bool>,
    set_resolved: WriteSignal<bool>,
}

impl SessionContext {
    pub fn new() -> Self {
        let (user, set_user) = signal(None::<User>);
        let (resolved, set_resolved) = signal(false);
        Self {
            user,
            set_user,
            resolved,
            set_resolved,
        }
    }

    pub fn set_user(&self, user: Option<User>) {
        self.set_user.set(user);
        self.set_resolved.set(true);
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.with(Option::is_some)
    }
}

pub fn use_session() -> SessionContext {
    expect_context::<SessionContext>()
}
