//! Pantry Tracker Frontend App
//!
//! Picks the page from the URL and wraps it in the identity gate.

use leptos::prelude::*;

use crate::components::{IdentityGate, InventoryScreen, SignInScreen};
use crate::context::SessionContext;
use crate::route::{current_route, Route};

#[component]
pub fn App() -> impl IntoView {
    provide_context(SessionContext::new());

    let route = current_route();

    view! {
        <IdentityGate route=route>
            {match route {
                Route::Landing => view! { <SignInScreen/> }.into_any(),
                Route::Pantry => view! { <InventoryScreen/> }.into_any(),
            }}
        </IdentityGate>
    }
}
