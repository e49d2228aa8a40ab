//! Backend Events
//!
//! Subscriptions to events emitted by the Tauri side.

use leptos::prelude::*;
use leptos::task::spawn_local;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use super::js_error;

/// Payload: `Option<User>`
pub const AUTH_STATE_EVENT: &str = "auth-state-changed";
/// Payload: none
pub const DB_READY_EVENT: &str = "db-initialized";

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["window", "__TAURI__", "event"], js_name = listen)]
    fn tauri_listen(event: &str, handler: &Closure<dyn FnMut(JsValue)>) -> js_sys::Promise;
}

#[derive(Deserialize)]
struct EventEnvelope<T> {
    payload: T,
}

/// Registered listener; dropping it unlistens
pub struct EventSubscription {
    unlisten: js_sys::Function,
    _handler: Closure<dyn FnMut(JsValue)>,
}

impl Drop for EventSubscription {
    fn drop(&mut self) {
        if let Err(e) = self.unlisten.call0(&JsValue::NULL) {
            web_sys::console::warn_1(&format!("[EVENT] unlisten failed: {:?}", e).into());
        }
    }
}

pub async fn listen_event<T, F>(event: &str, mut on_payload: F) -> Result<EventSubscription, String>
where
    T: DeserializeOwned + 'static,
    F: FnMut(T) + 'static,
{
    let event_name = event.to_string();
    let handler = Closure::<dyn FnMut(JsValue)>::new(move |raw: JsValue| {
        match serde_wasm_bindgen::from_value::<EventEnvelope<T>>(raw) {
            Ok(envelope) => on_payload(envelope.payload),
            Err(e) => web_sys::console::warn_1(
                &format!("[EVENT] bad {} payload: {}", event_name, e).into(),
            ),
        }
    });

    let unlisten = JsFuture::from(tauri_listen(event, &handler))
        .await
        .map_err(js_error)?;
    let unlisten = unlisten
        .dyn_into::<js_sys::Function>()
        .map_err(|_| format!("listen({}) did not return an unlisten function", event))?;

    Ok(EventSubscription {
        unlisten,
        _handler: handler,
    })
}

/// Listen for as long as the current reactive owner lives
pub fn listen_while_mounted<T, F>(event: &'static str, on_payload: F)
where
    T: DeserializeOwned + 'static,
    F: FnMut(T) + 'static,
{
    let slot = StoredValue::new_local(None::<EventSubscription>);

    spawn_local(async move {
        match listen_event(event, on_payload).await {
            // If the owner is already gone the closure is dropped unrun,
            // taking the subscription (and the listener) with it
            Ok(subscription) => {
                slot.try_update_value(move |current| *current = Some(subscription));
            }
            Err(e) => web_sys::console::error_1(&format!("[EVENT] listen {} failed: {}", event, e).into()),
        }
    });

    on_cleanup(move || {
        slot.try_update_value(|current| current.take());
    });
}
