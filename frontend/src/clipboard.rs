use leptos::task::spawn_local;
use wasm_bindgen_futures::JsFuture;

/// Best-effort copy to the system clipboard. Failures are only logged.
pub fn copy_text(text: String) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let promise = window.navigator().clipboard().write_text(&text);
    spawn_local(async move {
        if let Err(e) = JsFuture::from(promise).await {
            log::warn!("Clipboard write failed: {e:?}");
        }
    });
}
