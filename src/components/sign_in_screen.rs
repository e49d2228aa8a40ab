//! Sign-In Screen Component
//!
//! Landing page with email/password and federated sign-in.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands;
use crate::route::{navigate, Route};

const CREDENTIALS_ERROR: &str = "Failed to sign in. Please check your credentials.";
const FEDERATED_ERROR: &str = "Failed to sign in with Google.";

#[component]
pub fn SignInScreen() -> impl IntoView {
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (error, set_error) = signal(String::new());
    let (pending, set_pending) = signal(false);

    let sign_in = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if pending.get_untracked() {
            return;
        }
        set_pending.set(true);
        set_error.set(String::new());

        let email = email.get_untracked();
        let password = password.get_untracked();
        spawn_local(async move {
            match commands::sign_in_with_credentials(&email, &password).await {
                Ok(_) => navigate(Route::Pantry),
                Err(e) => {
                    web_sys::console::error_1(&format!("[AUTH] sign in failed: {}", e).into());
                    set_error.set(CREDENTIALS_ERROR.to_string());
                    set_pending.set(false);
                }
            }
        });
    };

    let sign_in_federated = move |_| {
        if pending.get_untracked() {
            return;
        }
        set_pending.set(true);
        set_error.set(String::new());

        spawn_local(async move {
            match commands::sign_in_with_federated_provider().await {
                Ok(_) => navigate(Route::Pantry),
                Err(e) => {
                    web_sys::console::error_1(&format!("[AUTH] federated sign in failed: {}", e).into());
                    set_error.set(FEDERATED_ERROR.to_string());
                    set_pending.set(false);
                }
            }
        });
    };

    view! {
        <div class="sign-in-screen">
            <h1 class="sign-in-title">"Welcome to the Pantry Tracker"</h1>
            <form class="sign-in-form" on:submit=sign_in>
                <input
                    type="email"
                    placeholder="Email"
                    prop:value=move || email.get()
                    on:input=move |ev| set_email.set(event_target_value(&ev))
                />
                <input
                    type="password"
                    placeholder="Password"
                    prop:value=move || password.get()
                    on:input=move |ev| set_password.set(event_target_value(&ev))
                />
                <Show when=move || !error.get().is_empty()>
                    <p class="error-text">{move || error.get()}</p>
                </Show>
                <button type="submit" class="btn btn-primary" disabled=move || pending.get()>
                    "Sign In"
                </button>
            </form>
            <button
                class="btn btn-federated"
                disabled=move || pending.get()
                on:click=sign_in_federated
            >
                "Sign In with Google"
            </button>
        </div>
    }
}
