//! Brand Settings Storage

use serde_json::{Map, Value};

use super::{keys, load, load_or_default, remove, save, Area};
use crate::brand::{install_defaults, reset_defaults, BrandImages, BrandSettings};
use crate::error::StorageError;

#[derive(serde::Deserialize, Default)]
struct ApiKeyRecord {
    #[serde(rename = "todoistApiKey", default)]
    todoist_api_key: Option<String>,
}

#[derive(serde::Deserialize, Default)]
struct PaletteProbe {
    #[serde(rename = "primaryColor", default)]
    primary_color: Option<String>,
}

/// Brand settings from sync plus images from local storage.
pub async fn load_brand() -> Result<(BrandSettings, BrandImages), StorageError> {
    let settings: BrandSettings = load(Area::Sync, &BrandSettings::KEYS).await?;
    // Images are optional decoration; a failed local read only hides them
    let images: BrandImages = load_or_default(Area::Local, &BrandImages::KEYS).await;
    Ok((settings.with_fallbacks(), images))
}

pub async fn load_todoist_api_key() -> Result<Option<String>, StorageError> {
    let record: ApiKeyRecord = load(Area::Sync, &[keys::TODOIST_API_KEY]).await?;
    Ok(record.todoist_api_key.filter(|k| !k.trim().is_empty()))
}

/// Persist the brand form. Blank text fields are removed from the store and
/// images go to the local partition.
pub async fn save_brand(form: BrandSettings, images: &BrandImages) -> Result<(), StorageError> {
    let (settings, removed) = form.into_save();
    save(Area::Sync, &settings).await?;
    remove(Area::Sync, &removed).await?;

    save_image(keys::BACKGROUND_IMAGE, images.background_image.as_deref()).await?;
    save_image(keys::COMPANY_LOGO, images.company_logo.as_deref()).await
}

async fn save_image(key: &str, value: Option<&str>) -> Result<(), StorageError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(data) => {
            let mut items = Map::new();
            items.insert(key.to_string(), Value::String(data.to_string()));
            save(Area::Local, &items).await
        }
        None => remove(Area::Local, &[key]).await,
    }
}

/// Reset brand values and card visibility; clears the local background image.
pub async fn reset_brand() -> Result<(), StorageError> {
    save(Area::Sync, &reset_defaults()).await?;
    remove(Area::Local, &[keys::BACKGROUND_IMAGE]).await
}

/// Seed the install defaults when no palette has ever been written.
/// Returns whether anything was written.
pub async fn ensure_install_defaults() -> Result<bool, StorageError> {
    let probe: PaletteProbe = load(Area::Sync, &[keys::PRIMARY_COLOR]).await?;
    if probe.primary_color.is_some_and(|c| !c.is_empty()) {
        return Ok(false);
    }
    save(Area::Sync, &install_defaults()).await?;
    log::info!("[STORE] Wrote install defaults");
    Ok(true)
}
