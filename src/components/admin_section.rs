//! Admin Section Component
//!
//! Password lock controls at the top of the options page.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::admin;
use crate::changes::RefreshScope;
use crate::context::AppContext;
use crate::storage;

use super::{ensure_unlocked, StatusHandle};

#[component]
pub fn AdminSection() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let status = StatusHandle::use_context();

    let (new_password, set_new_password) = signal(String::new());
    let (entered, set_entered) = signal(String::new());

    let save_password = move |_| {
        let password = new_password.get();
        spawn_local(async move {
            if !ensure_unlocked(status).await {
                return;
            }
            match storage::write_admin_record(&admin::set_password(&password)).await {
                Ok(()) => {
                    set_new_password.set(String::new());
                    status.success(admin::password_status(&password));
                    ctx.reload(RefreshScope::Admin);
                }
                Err(e) => status.error(format!("Failed to save password: {}", e)),
            }
        });
    };

    let try_unlock = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let attempt = entered.get();
        spawn_local(async move {
            let result = match storage::load_admin_record().await {
                Ok(stored) => admin::unlock(&stored, &attempt).map_err(|e| e.to_string()),
                Err(e) => Err(e.to_string()),
            };
            let record = match result {
                Ok(record) => record,
                Err(message) => {
                    status.error(message);
                    return;
                }
            };
            match storage::write_admin_record(&record).await {
                Ok(()) => {
                    set_entered.set(String::new());
                    status.success("Settings unlocked");
                    ctx.reload(RefreshScope::Admin);
                }
                Err(e) => status.error(format!("Failed to unlock: {}", e)),
            }
        });
    };

    let lock = move |_| {
        spawn_local(async move {
            match storage::write_admin_record(&admin::lock()).await {
                Ok(()) => {
                    status.success("Settings locked");
                    ctx.reload(RefreshScope::Admin);
                }
                Err(e) => status.error(format!("Failed to lock: {}", e)),
            }
        });
    };

    let has_password = move || ctx.admin.get().has_password;
    let unlocked = move || ctx.admin.get().is_unlocked();

    view! {
        <section class="settings-section admin-section">
            <h2>"Admin Access"</h2>
            <p class=move || if unlocked() { "admin-status unlocked" } else { "admin-status locked" }>
                {move || if unlocked() { "🔓 " } else { "🔒 " }}
                {move || ctx.admin.get().status_text()}
            </p>

            <Show when=move || !unlocked()>
                <form class="admin-unlock-form" on:submit=try_unlock>
                    <input
                        type="password"
                        placeholder="Admin password"
                        prop:value=move || entered.get()
                        on:input=move |ev| set_entered.set(event_target_value(&ev))
                    />
                    <button type="submit" class="btn btn-primary">"Unlock"</button>
                </form>
            </Show>

            <Show when=unlocked>
                <div class="admin-password-row">
                    <input
                        type="password"
                        placeholder="New admin password (leave empty to disable)"
                        prop:value=move || new_password.get()
                        on:input=move |ev| set_new_password.set(event_target_value(&ev))
                    />
                    <button class="btn btn-primary" on:click=save_password>"Set Password"</button>
                    <Show when=has_password>
                        <button class="btn btn-secondary" on:click=lock>"Lock Settings"</button>
                    </Show>
                </div>
            </Show>
        </section>
    }
}
