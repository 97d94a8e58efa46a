//! Transfer Section Component
//!
//! JSON export and import of all settings.

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use crate::changes::RefreshScope;
use crate::context::AppContext;
use crate::storage;
use crate::transfer::{export_file_name, plan_import};

use super::{ensure_unlocked, StatusHandle};

const ALL_SCOPES: [RefreshScope; 9] = [
    RefreshScope::Admin,
    RefreshScope::Layout,
    RefreshScope::Brand,
    RefreshScope::Trackers,
    RefreshScope::Links,
    RefreshScope::Notes,
    RefreshScope::Responses,
    RefreshScope::Todoist,
    RefreshScope::Images,
];

async fn import_file(file: web_sys::File) -> Result<usize, String> {
    let text = storage::read_file_text(file).await?;
    let plan = plan_import(&text).map_err(|e| e.to_string())?;
    storage::apply_import(&plan).await.map_err(|e| e.to_string())?;
    Ok(plan.len())
}

#[component]
pub fn TransferSection() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let status = StatusHandle::use_context();

    let export = move |_| {
        spawn_local(async move {
            let result = match storage::export_settings().await {
                Ok(json) => storage::download_json(&export_file_name(js_sys::Date::now() as i64), &json),
                Err(e) => Err(e.to_string()),
            };
            match result {
                Ok(()) => status.success("Settings exported"),
                Err(e) => status.error(format!("Export failed: {}", e)),
            }
        });
    };

    let import = move |ev: web_sys::Event| {
        let Some(input) = ev.target().and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok()) else {
            return;
        };
        let Some(file) = input.files().and_then(|files| files.get(0)) else { return };
        // Let the same file be picked again
        input.set_value("");

        spawn_local(async move {
            if !ensure_unlocked(status).await {
                return;
            }
            match import_file(file).await {
                Ok(count) => {
                    log::info!("[OPTIONS] Imported {} keys", count);
                    status.success("Settings imported successfully!");
                    ctx.reload_all(ALL_SCOPES);
                }
                Err(e) => status.error(format!("Import failed: {}", e)),
            }
        });
    };

    view! {
        <section class="settings-section transfer-section">
            <h2>"Backup"</h2>
            <p class="form-hint">"Export all settings to a JSON file or restore them from one. The admin password is never imported."</p>
            <div class="form-actions">
                <button class="btn btn-secondary" on:click=export>"Export Settings"</button>
                <label class="btn btn-secondary file-btn" class:disabled=move || !ctx.is_unlocked()>
                    "Import Settings"
                    <input
                        type="file"
                        accept="application/json,.json"
                        style="display: none"
                        disabled=move || !ctx.is_unlocked()
                        on:change=import
                    />
                </label>
            </div>
        </section>
    }
}
