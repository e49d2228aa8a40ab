//! Inventory Screen Component
//!
//! Search, add, adjust and delete pantry items. Every change patches the
//! local list first, then re-fetches the full list whether or not the
//! write succeeded.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::commands::{self, listen_while_mounted, DB_READY_EVENT};
use crate::components::{AddItemModal, InventoryRow};
use crate::context::use_session;
use crate::models::filter_inventory;
use crate::route::{navigate, Route};
use crate::store::{
    store_apply_decrement, store_inventory, store_remove_item, store_set_inventory,
    store_upsert_item, PantryState, PantryStore,
};

async fn reload_inventory(store: PantryStore) {
    match commands::list_inventory().await {
        Ok(items) => store_set_inventory(&store, items),
        Err(e) => web_sys::console::warn_1(&format!("[INVENTORY] list failed: {}", e).into()),
    }
}

fn log_failure(action: &str, name: &str, err: &str) {
    web_sys::console::error_1(&format!("[INVENTORY] {} '{}' failed: {}", action, name, err).into());
}

#[component]
pub fn InventoryScreen() -> impl IntoView {
    let session = use_session();
    let store: PantryStore = Store::new(PantryState::default());
    let search_query = RwSignal::new(String::new());
    let item_name = RwSignal::new(String::new());
    let modal_open = RwSignal::new(false);

    let refresh = move || spawn_local(reload_inventory(store));

    // Load on mount, and again once the database finishes opening
    refresh();
    listen_while_mounted(DB_READY_EVENT, move |_: ()| refresh());

    let filtered = Memo::new(move |_| {
        search_query.with(|query| filter_inventory(&store_inventory(&store), query))
    });

    let increment = Callback::new(move |name: String| {
        spawn_local(async move {
            match commands::add_inventory_item(&name).await {
                Ok(item) => store_upsert_item(&store, item),
                Err(e) => log_failure("add", &name, &e),
            }
            reload_inventory(store).await;
        });
    });

    let decrement = Callback::new(move |name: String| {
        spawn_local(async move {
            match commands::decrement_inventory_item(&name).await {
                Ok(outcome) => store_apply_decrement(&store, &outcome),
                Err(e) => log_failure("decrement", &name, &e),
            }
            reload_inventory(store).await;
        });
    });

    let remove = Callback::new(move |name: String| {
        spawn_local(async move {
            match commands::remove_inventory_item(&name).await {
                Ok(()) => store_remove_item(&store, &name),
                Err(e) => log_failure("remove", &name, &e),
            }
            reload_inventory(store).await;
        });
    });

    let sign_out = move |_| {
        spawn_local(async move {
            match commands::sign_out().await {
                Ok(()) => navigate(Route::Landing),
                Err(e) => web_sys::console::error_1(&format!("[AUTH] sign out failed: {}", e).into()),
            }
        });
    };

    view! {
        <div class="pantry-screen">
            <header class="pantry-header">
                <h1 class="pantry-title">"Welcome to Your Pantry Tracker"</h1>
                <div class="account">
                    <span class="signed-in-as">
                        {move || session.user.with(|user| user.as_ref().map(|u| u.label().to_string()))}
                    </span>
                    <button class="btn btn-link" on:click=sign_out>"Sign Out"</button>
                </div>
            </header>

            <div class="toolbar">
                <button class="btn btn-primary" on:click=move |_| modal_open.set(true)>
                    "Add New Item"
                </button>
                <input
                    type="search"
                    class="search-input"
                    placeholder="Search Item"
                    prop:value=move || search_query.get()
                    on:input=move |ev| search_query.set(event_target_value(&ev))
                />
            </div>

            <div class="inventory-list">
                <div class="inventory-row inventory-heading">
                    <span class="col-name">"Item"</span>
                    <span class="col-qty">"Quantity"</span>
                    <span class="col-actions">"Actions"</span>
                </div>
                <For
                    each=move || filtered.get()
                    key=|item| (item.name.clone(), item.quantity)
                    children=move |item| view! {
                        <InventoryRow
                            item=item
                            on_increment=increment
                            on_decrement=decrement
                            on_remove=remove
                        />
                    }
                />
                <Show when=move || filtered.with(Vec::is_empty)>
                    <p class="empty-hint">
                        {move || if search_query.with(String::is_empty) {
                            "Your pantry is empty."
                        } else {
                            "No items match your search."
                        }}
                    </p>
                </Show>
            </div>

            <AddItemModal open=modal_open item_name=item_name on_submit=increment />
        </div>
    }
}
