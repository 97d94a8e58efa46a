//! Browser Host Calls
//!
//! Tabs, the options page, the clipboard and file transfer.

use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = ["chrome", "tabs"], js_name = create)]
    async fn tabs_create(props: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "runtime"], js_name = openOptionsPage)]
    async fn runtime_open_options_page() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["navigator", "clipboard"], js_name = writeText)]
    async fn clipboard_write_text(text: &str) -> Result<JsValue, JsValue>;
}

#[derive(Serialize)]
struct CreateTabArgs<'a> {
    url: &'a str,
    active: bool,
}

fn js_message(e: &JsValue) -> String {
    e.as_string()
        .or_else(|| js_sys::Reflect::get(e, &JsValue::from_str("message")).ok().and_then(|m| m.as_string()))
        .unwrap_or_else(|| format!("{:?}", e))
}

/// Open every URL in its own tab; only the last one is focused.
pub async fn open_tabs(urls: &[String]) -> Result<(), String> {
    let last = urls.len().saturating_sub(1);
    for (i, url) in urls.iter().enumerate() {
        let args = CreateTabArgs { url, active: i == last };
        let props = serde_wasm_bindgen::to_value(&args)
            .map_err(|e| format!("Failed to serialize args: {}", e))?;
        tabs_create(props).await.map_err(|e| js_message(&e))?;
    }
    Ok(())
}

pub async fn open_options_page() -> Result<(), String> {
    runtime_open_options_page().await.map(|_| ()).map_err(|e| js_message(&e))
}

pub async fn copy_to_clipboard(text: &str) -> Result<(), String> {
    clipboard_write_text(text).await.map(|_| ()).map_err(|e| js_message(&e))
}

/// Offer `text` as a JSON file download.
pub fn download_json(file_name: &str, text: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;

    let parts = js_sys::Array::of1(&JsValue::from_str(text));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type("application/json");
    let blob = web_sys::Blob::new_with_str_sequence_and_options(&parts, &options).map_err(|e| js_message(&e))?;
    let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(|e| js_message(&e))?;

    let anchor: web_sys::HtmlAnchorElement = document
        .create_element("a")
        .map_err(|e| js_message(&e))?
        .dyn_into()
        .map_err(|_| "anchor element cast failed".to_string())?;
    anchor.set_href(&url);
    anchor.set_download(file_name);
    anchor.click();

    let _ = web_sys::Url::revoke_object_url(&url);
    Ok(())
}

/// Text content of a user-picked file.
pub async fn read_file_text(file: web_sys::File) -> Result<String, String> {
    let text = JsFuture::from(file.text()).await.map_err(|e| js_message(&e))?;
    text.as_string().ok_or_else(|| "file is not text".to_string())
}

/// Read a user-picked image as a data URL for storage.
pub async fn read_file_data_url(file: web_sys::File) -> Result<String, String> {
    let buffer = JsFuture::from(file.array_buffer()).await.map_err(|e| js_message(&e))?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    let mime = file.type_();
    let mime = if mime.is_empty() { "application/octet-stream".to_string() } else { mime };
    let encoded = window_btoa(&bytes)?;
    Ok(format!("data:{};base64,{}", mime, encoded))
}

fn window_btoa(bytes: &[u8]) -> Result<String, String> {
    let window = web_sys::window().ok_or("no window")?;
    // btoa expects a binary string: one char per byte
    let binary: String = bytes.iter().map(|&b| b as char).collect();
    window.btoa(&binary).map_err(|e| js_message(&e))
}

/// Whether the page is currently hidden (background tab, minimized).
pub fn document_hidden() -> bool {
    web_sys::window()
        .and_then(|w| w.document())
        .map(|d| d.hidden())
        .unwrap_or(false)
}

/// Current page path, used to pick the surface to mount.
pub fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_default()
}

/// Call `on_change` with the new hidden state whenever page visibility flips.
pub fn on_visibility_change<F>(on_change: F)
where
    F: Fn(bool) + 'static,
{
    let Some(document) = web_sys::window().and_then(|w| w.document()) else { return };
    let target = document.clone();
    let callback = Closure::<dyn FnMut(web_sys::Event)>::new(move |_ev: web_sys::Event| {
        on_change(target.hidden());
    });
    let _ = document.add_event_listener_with_callback("visibilitychange", callback.as_ref().unchecked_ref());
    callback.forget();
}
