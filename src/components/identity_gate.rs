//! Identity Gate Component
//!
//! Tracks the signed-in user for the whole shell and keeps signed-out
//! visitors on the landing page.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands::{self, listen_while_mounted, AUTH_STATE_EVENT};
use crate::context::use_session;
use crate::models::User;
use crate::route::{navigate, Route};

#[component]
pub fn IdentityGate(route: Route, children: ChildrenFn) -> impl IntoView {
    let session = use_session();

    spawn_local(async move {
        let user = match commands::current_user().await {
            Ok(user) => user,
            Err(e) => {
                web_sys::console::warn_1(&format!("[AUTH] current_user failed: {}", e).into());
                None
            }
        };
        session.set_user(user);
    });

    listen_while_mounted(AUTH_STATE_EVENT, move |user: Option<User>| session.set_user(user));

    Effect::new(move |_| {
        if route.requires_auth() && session.resolved.get() && !session.is_signed_in() {
            navigate(Route::Landing);
        }
    });

    let allowed = move || !route.requires_auth() || session.is_signed_in();

    view! {
        <Show
            when=allowed
            fallback=|| view! { <div class="gate-pending">"Checking sign-in..."</div> }
        >
            {children()}
        </Show>
    }
}
