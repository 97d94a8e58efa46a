//! Change Notification and Settings Transfer
//!
//! Subscription to `chrome.storage.onChanged`, plus the whole-partition
//! reads and writes behind export and import.

use std::collections::BTreeSet;

use chrono::Utc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use super::{load_all, save, Area};
use crate::changes::{classify, RefreshScope};
use crate::error::StorageError;
use crate::transfer::{export_json, ImportPlan};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["chrome", "storage", "onChanged"], js_name = addListener)]
    fn add_changed_listener(callback: &Closure<dyn FnMut(JsValue, JsValue)>);
}

/// Register `on_change` for every store change. The listener lives as long
/// as the page.
pub fn subscribe_changes<F>(on_change: F)
where
    F: Fn(BTreeSet<RefreshScope>) + 'static,
{
    let callback = Closure::<dyn FnMut(JsValue, JsValue)>::new(move |changes: JsValue, area: JsValue| {
        let area = area.as_string().unwrap_or_default();
        let changed: Vec<String> = match changes.dyn_into::<js_sys::Object>() {
            Ok(obj) => js_sys::Object::keys(&obj).iter().filter_map(|k| k.as_string()).collect(),
            Err(_) => Vec::new(),
        };
        let scopes = classify(&area, changed.iter().map(String::as_str));
        if !scopes.is_empty() {
            log::debug!("[STORE] {} change: {:?} -> {:?}", area, changed, scopes);
            on_change(scopes);
        }
    });
    add_changed_listener(&callback);
    callback.forget();
}

/// Pretty JSON of the whole sync partition with export metadata.
pub async fn export_settings() -> Result<String, StorageError> {
    let data = load_all(Area::Sync).await?;
    export_json(data, Utc::now()).map_err(|e| StorageError::Encode(e.to_string()))
}

pub async fn apply_import(plan: &ImportPlan) -> Result<(), StorageError> {
    if !plan.sync.is_empty() {
        save(Area::Sync, &plan.sync).await?;
    }
    if !plan.local.is_empty() {
        save(Area::Local, &plan.local).await?;
    }
    Ok(())
}
