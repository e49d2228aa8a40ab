//! Inventory Row Component

use leptos::prelude::*;

use crate::models::InventoryItem;

/// One item with its quantity controls
///
/// The decrement button stays enabled at quantity 1; going below that
/// removes the item.
#[component]
pub fn InventoryRow(
    item: InventoryItem,
    #[prop(into)] on_increment: Callback<String>,
    #[prop(into)] on_decrement: Callback<String>,
    #[prop(into)] on_remove: Callback<String>,
) -> impl IntoView {
    let row_class = format!("inventory-row {}", item.stock_level().css_class());
    let label = item.display_name();
    let name = StoredValue::new(item.name);

    view! {
        <div class=row_class>
            <span class="col-name">{label}</span>
            <span class="col-qty">{item.quantity}</span>
            <span class="col-actions">
                <button
                    class="icon-btn"
                    title="Add one"
                    on:click=move |_| on_increment.run(name.get_value())
                >
                    "+"
                </button>
                <button
                    class="icon-btn"
                    title="Remove one"
                    on:click=move |_| on_decrement.run(name.get_value())
                >
                    "−"
                </button>
                <button
                    class="icon-btn icon-btn-danger"
                    title="Delete"
                    on:click=move |_| on_remove.run(name.get_value())
                >
                    "×"
                </button>
            </span>
        </div>
    }
}
