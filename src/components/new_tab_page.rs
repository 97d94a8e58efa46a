//! New Tab Page Component

use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::storage;

use super::{BrandBackdrop, BrandHeader, DashboardGrid};

fn open_settings() {
    spawn_local(async {
        if let Err(e) = storage::open_options_page().await {
            log::error!("[DASH] Could not open settings: {}", e);
        }
    });
}

/// Dashboard shown in every new tab
#[component]
pub fn NewTabPage() -> impl IntoView {
    // Ctrl/Cmd+K opens settings
    let shortcut = window_event_listener(ev::keydown, |ev| {
        if (ev.ctrl_key() || ev.meta_key()) && ev.key().eq_ignore_ascii_case("k") {
            ev.prevent_default();
            open_settings();
        }
    });
    on_cleanup(move || shortcut.remove());

    view! {
        <BrandBackdrop with_background=true />
        <div class="container">
            <BrandHeader />
            <DashboardGrid />
        </div>
        <button class="settings-btn" title="Settings (Ctrl+K)" on:click=|_| open_settings()>
            "⚙"
        </button>
    }
}
