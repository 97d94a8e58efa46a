//! Extension Storage Bindings
//!
//! Frontend wrappers over `chrome.storage`, organized by domain. Values
//! cross the JS boundary as plain JSON-compatible objects.

mod admin;
mod browser;
mod layout;
mod records;
mod settings;
mod sync;

pub mod keys;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use wasm_bindgen::prelude::*;

use crate::error::StorageError;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = ["chrome", "storage", "sync"], js_name = get)]
    async fn sync_get(keys: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "storage", "sync"], js_name = set)]
    async fn sync_set(items: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "storage", "sync"], js_name = remove)]
    async fn sync_remove(keys: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "storage", "local"], js_name = get)]
    async fn local_get(keys: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "storage", "local"], js_name = set)]
    async fn local_set(items: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "storage", "local"], js_name = remove)]
    async fn local_remove(keys: JsValue) -> Result<JsValue, JsValue>;
}

// Re-export all public items
pub use admin::*;
pub use browser::*;
pub use layout::*;
pub use records::*;
pub use settings::*;
pub use sync::*;

/// Storage partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Area {
    /// Small settings synced across browsers
    Sync,
    /// Device-local large values (images)
    Local,
}

impl Area {
    pub fn name(&self) -> &'static str {
        match self {
            Area::Sync => "sync",
            Area::Local => "local",
        }
    }
}

fn host_error(area: Area, op: &str, e: JsValue) -> StorageError {
    let message = e
        .as_string()
        .or_else(|| js_sys::Reflect::get(&e, &JsValue::from_str("message")).ok().and_then(|m| m.as_string()))
        .unwrap_or_else(|| format!("{:?}", e));
    StorageError::Host(format!("{}.{}: {}", area.name(), op, message))
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, StorageError> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| StorageError::Encode(e.to_string()))
}

fn keys_to_js(keys: &[&str]) -> Result<JsValue, StorageError> {
    to_js(keys)
}

/// Raw `get`; `None` keys read the whole partition.
async fn get_raw(area: Area, keys: Option<&[&str]>) -> Result<JsValue, StorageError> {
    let arg = match keys {
        Some(keys) => keys_to_js(keys)?,
        None => JsValue::NULL,
    };
    let result = match area {
        Area::Sync => sync_get(arg).await,
        Area::Local => local_get(arg).await,
    };
    let value = result.map_err(|e| host_error(area, "get", e))?;
    // Some hosts resolve with `undefined` for an empty partition
    if value.is_undefined() || value.is_null() {
        return Ok(js_sys::Object::new().into());
    }
    Ok(value)
}

/// Read `keys` and decode them into a record struct.
pub async fn load<T: DeserializeOwned>(area: Area, keys: &[&str]) -> Result<T, StorageError> {
    let value = get_raw(area, Some(keys)).await?;
    Ok(serde_wasm_bindgen::from_value(value)?)
}

/// Like [`load`], falling back to the default record on failure.
pub async fn load_or_default<T: DeserializeOwned + Default>(area: Area, keys: &[&str]) -> T {
    match load(area, keys).await {
        Ok(value) => value,
        Err(e) => {
            log::warn!("[STORE] Falling back to defaults for {:?}: {}", keys, e);
            T::default()
        }
    }
}

/// Whole partition as JSON.
pub async fn load_all(area: Area) -> Result<Map<String, Value>, StorageError> {
    let value = get_raw(area, None).await?;
    match serde_wasm_bindgen::from_value::<Value>(value)? {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Map::new()),
        other => Err(StorageError::Decode(format!("expected an object, got {}", other))),
    }
}

/// Read a list stored under `key`. Entries that fail to decode are dropped
/// individually so one bad record does not hide the rest.
pub async fn load_list<T: DeserializeOwned>(area: Area, key: &str) -> Result<Vec<T>, StorageError> {
    let mut all = load::<Map<String, Value>>(area, &[key]).await?;
    let entries = match all.remove(key) {
        Some(Value::Array(entries)) => entries,
        Some(Value::Null) | None => return Ok(Vec::new()),
        Some(other) => return Err(StorageError::Decode(format!("{} is not a list: {}", key, other))),
    };

    Ok(entries
        .into_iter()
        .enumerate()
        .filter_map(|(i, entry)| match serde_json::from_value(entry) {
            Ok(item) => Some(item),
            Err(e) => {
                log::warn!("[STORE] Skipping {}[{}]: {}", key, i, e);
                None
            }
        })
        .collect())
}

/// Write every field of a record struct.
pub async fn save<T: Serialize + ?Sized>(area: Area, record: &T) -> Result<(), StorageError> {
    let items = to_js(record)?;
    let result = match area {
        Area::Sync => sync_set(items).await,
        Area::Local => local_set(items).await,
    };
    result.map(|_| ()).map_err(|e| host_error(area, "set", e))
}

/// Write one key.
pub async fn save_value<T: Serialize + ?Sized>(area: Area, key: &str, value: &T) -> Result<(), StorageError> {
    let value = serde_json::to_value(value).map_err(|e| StorageError::Encode(e.to_string()))?;
    let mut items = Map::new();
    items.insert(key.to_string(), value);
    save(area, &items).await
}

pub async fn remove(area: Area, keys: &[&str]) -> Result<(), StorageError> {
    if keys.is_empty() {
        return Ok(());
    }
    let arg = keys_to_js(keys)?;
    let result = match area {
        Area::Sync => sync_remove(arg).await,
        Area::Local => local_remove(arg).await,
    };
    result.map(|_| ()).map_err(|e| host_error(area, "remove", e))
}
