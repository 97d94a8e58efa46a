//! Trackers Card Component
//!
//! Pinned countdowns and count-ups, refreshed every second while shown.

use std::time::Duration;

use leptos::prelude::*;

use crate::context::AppContext;
use crate::models::Tracker;
use crate::store::{use_dashboard_store, DashboardStateStoreFields};
use crate::tracker::pinned_trackers;

const TICK: Duration = Duration::from_secs(1);

fn now_ms() -> i64 {
    js_sys::Date::now() as i64
}

/// One tracker row
#[component]
fn TrackerRow(tracker: Tracker, now: ReadSignal<i64>) -> impl IntoView {
    let icon = tracker.display_icon().to_string();
    let name = tracker.display_name().to_string();
    let url = tracker.link_url.clone().filter(|u| !u.trim().is_empty());
    let clickable = url.is_some();

    let reading = {
        let tracker = tracker.clone();
        Memo::new(move |_| tracker.reading_at(now.get()))
    };

    let open = move |_| {
        if let Some(url) = &url {
            if let Some(window) = web_sys::window() {
                let _ = window.open_with_url_and_target(url, "_blank");
            }
        }
    };

    view! {
        <div
            class=move || {
                let mut class = String::from("countdown-item");
                if clickable { class.push_str(" clickable"); }
                if reading.get().is_expired() { class.push_str(" expired"); }
                class
            }
            on:click=open
        >
            <span class="countdown-icon">{icon}</span>
            <div class="countdown-info">
                <div class="countdown-name">{name}</div>
                <div class="countdown-time">{move || reading.get().text().to_string()}</div>
            </div>
        </div>
    }
}

#[component]
pub fn TrackersCard() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_dashboard_store();

    let pinned = Memo::new(move |_| store.trackers().with(|t| pinned_trackers(t)));
    let (now, set_now) = signal(now_ms());

    // Tick only while the page is visible and something is shown
    let ticker = RwSignal::new(None::<IntervalHandle>);
    Effect::new(move |_| {
        let should_tick = ctx.page_visible.get() && !pinned.with(|p| p.is_empty());
        let running = ticker.with_untracked(|t| t.is_some());
        if should_tick && !running {
            set_now.set(now_ms());
            match set_interval_with_handle(move || set_now.set(now_ms()), TICK) {
                Ok(handle) => ticker.set(Some(handle)),
                Err(e) => log::warn!("[DASH] Tracker timer unavailable: {:?}", e),
            }
        } else if !should_tick && running {
            if let Some(handle) = ticker.get_untracked() {
                handle.clear();
            }
            ticker.set(None);
        }
    });
    on_cleanup(move || {
        if let Some(handle) = ticker.try_get_untracked().flatten() {
            handle.clear();
        }
    });

    view! {
        <div class="card trackers-card">
            <h2 class="card-title">"Trackers"</h2>
            <div class="countdown-list">
                <Show
                    when=move || !pinned.with(|p| p.is_empty())
                    fallback=|| view! {
                        <p class="empty-state">"No trackers pinned to dashboard"</p>
                    }
                >
                    <For
                        each=move || pinned.get()
                        key=|t| (t.id.clone(), t.name.clone(), t.target, t.kind.as_str(), t.link_url.clone(), t.icon.clone())
                        children=move |tracker| view! { <TrackerRow tracker=tracker now=now /> }
                    />
                </Show>
            </div>
        </div>
    }
}
