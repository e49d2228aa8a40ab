//! Add Item Modal Component
//!
//! Name entry dialog; submitting adds one unit of the named item.

use leptos::prelude::*;

#[component]
pub fn AddItemModal(
    open: RwSignal<bool>,
    item_name: RwSignal<String>,
    #[prop(into)] on_submit: Callback<String>,
) -> impl IntoView {
    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let name = item_name.get_untracked();
        let name = name.trim();
        if name.is_empty() {
            return;
        }
        on_submit.run(name.to_string());
        item_name.set(String::new());
        open.set(false);
    };

    view! {
        <Show when=move || open.get()>
            <div class="modal-backdrop" on:click=move |_| open.set(false)>
                <form
                    class="modal"
                    on:submit=submit
                    on:click=|ev| ev.stop_propagation()
                    on:keydown=move |ev: web_sys::KeyboardEvent| {
                        if ev.key() == "Escape" {
                            open.set(false);
                        }
                    }
                >
                    <h2 class="modal-title">"Add Item"</h2>
                    <input
                        type="text"
                        placeholder="Item Name"
                        autofocus=true
                        prop:value=move || item_name.get()
                        on:input=move |ev| item_name.set(event_target_value(&ev))
                    />
                    <button type="submit" class="btn btn-primary">"Add Item"</button>
                </form>
            </div>
        </Show>
    }
}
