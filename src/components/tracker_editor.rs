//! Tracker Editor Component
//!
//! Create, edit, pin and delete countdown / count-up trackers.

use chrono::Local;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::changes::RefreshScope;
use crate::context::AppContext;
use crate::forms::{upsert, TrackerForm};
use crate::models::{Tracker, TrackerKind};
use crate::storage;
use crate::store::{use_dashboard_store, DashboardStateStoreFields};

use super::{ensure_unlocked, DeleteConfirmButton, StatusHandle};

/// Persist a modified tracker list and refresh.
fn commit(ctx: AppContext, status: StatusHandle, trackers: Vec<Tracker>, message: &'static str) {
    spawn_local(async move {
        if !ensure_unlocked(status).await {
            return;
        }
        match storage::save_trackers(&trackers).await {
            Ok(()) => {
                status.success(message);
                ctx.reload(RefreshScope::Trackers);
            }
            Err(e) => status.error(format!("Failed to save trackers: {}", e)),
        }
    });
}

#[component]
pub fn TrackerEditor() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_dashboard_store();
    let status = StatusHandle::use_context();

    let form = RwSignal::new(TrackerForm { pinned: true, ..Default::default() });
    let (editing, set_editing) = signal(None::<usize>);

    let reset_form = move || {
        form.set(TrackerForm { pinned: true, ..Default::default() });
        set_editing.set(None);
    };

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let index = editing.get_untracked();
        let mut trackers = store.trackers().get_untracked();
        let existing_id = index.and_then(|i| trackers.get(i)).map(|t| t.id.clone());
        let now_ms = js_sys::Date::now() as i64;

        match form.get_untracked().into_tracker(existing_id, now_ms, &Local) {
            Ok(tracker) => {
                upsert(&mut trackers, index, tracker);
                commit(ctx, status, trackers, if index.is_some() { "Tracker updated" } else { "Tracker added" });
                reset_form();
            }
            Err(e) => status.error(e.to_string()),
        }
    };

    let locked = Signal::derive(move || !ctx.is_unlocked());

    view! {
        <section class="settings-section tracker-section">
            <h2>"Trackers"</h2>

            <div class="item-list">
                <Show
                    when=move || !store.trackers().with(|t| t.is_empty())
                    fallback=|| view! { <p class="empty-state">"No trackers yet"</p> }
                >
                    {move || store.trackers().get().into_iter().enumerate().map(|(index, tracker)| {
                        let pinned = tracker.pinned_to_dashboard;
                        let edit = {
                            let tracker = tracker.clone();
                            move |_| {
                                form.set(TrackerForm::from_tracker(&tracker));
                                set_editing.set(Some(index));
                            }
                        };
                        let toggle_pin = move |_| {
                            let mut trackers = store.trackers().get_untracked();
                            if let Some(t) = trackers.get_mut(index) {
                                t.pinned_to_dashboard = !t.pinned_to_dashboard;
                                commit(ctx, status, trackers, "Tracker updated");
                            }
                        };
                        let delete = move |_| {
                            let mut trackers = store.trackers().get_untracked();
                            if index < trackers.len() {
                                trackers.remove(index);
                                commit(ctx, status, trackers, "Tracker deleted");
                                if editing.get_untracked() == Some(index) {
                                    reset_form();
                                }
                            }
                        };
                        let when = tracker.target.with_timezone(&Local).format("%b %-d, %Y %H:%M").to_string();
                        view! {
                            <div class="item-row">
                                <span class="item-icon">{tracker.display_icon().to_string()}</span>
                                <div class="item-info">
                                    <div class="item-title">{tracker.display_name().to_string()}</div>
                                    <div class="item-meta">{format!("{} · {}", tracker.kind.label(), when)}</div>
                                </div>
                                <button
                                    class=if pinned { "pin-btn pinned" } else { "pin-btn" }
                                    title=if pinned { "Unpin from dashboard" } else { "Pin to dashboard" }
                                    disabled=move || locked.get()
                                    on:click=toggle_pin
                                >
                                    "📌"
                                </button>
                                <button class="edit-btn" disabled=move || locked.get() on:click=edit>"Edit"</button>
                                <DeleteConfirmButton button_class="delete-btn" disabled=locked on_confirm=delete />
                            </div>
                        }
                    }).collect_view()}
                </Show>
            </div>

            <form class="editor-form" on:submit=submit>
                <h3>{move || if editing.get().is_some() { "Edit Tracker" } else { "Add Tracker" }}</h3>
                <input
                    type="text"
                    placeholder="Name"
                    prop:value=move || form.with(|f| f.name.clone())
                    on:input=move |ev| form.update(|f| f.name = event_target_value(&ev))
                />
                <select
                    prop:value=move || form.with(|f| f.kind.as_str())
                    on:change=move |ev| form.update(|f| f.kind = TrackerKind::from(event_target_value(&ev)))
                >
                    {[TrackerKind::Countdown, TrackerKind::Countup].into_iter().map(|kind| view! {
                        <option value=kind.as_str()>{kind.label()}</option>
                    }).collect_view()}
                </select>
                <input
                    type="datetime-local"
                    prop:value=move || form.with(|f| f.target_local.clone())
                    on:input=move |ev| form.update(|f| f.target_local = event_target_value(&ev))
                />
                <input
                    type="text"
                    placeholder="Icon (emoji)"
                    prop:value=move || form.with(|f| f.icon.clone())
                    on:input=move |ev| form.update(|f| f.icon = event_target_value(&ev))
                />
                <input
                    type="text"
                    placeholder="Link (optional)"
                    prop:value=move || form.with(|f| f.url.clone())
                    on:input=move |ev| form.update(|f| f.url = event_target_value(&ev))
                />
                <label class="checkbox-field">
                    <input
                        type="checkbox"
                        prop:checked=move || form.with(|f| f.pinned)
                        on:change=move |ev| form.update(|f| f.pinned = event_target_checked(&ev))
                    />
                    <span>"Pin to dashboard"</span>
                </label>
                <div class="form-actions">
                    <button type="submit" class="btn btn-primary" disabled=move || locked.get()>
                        {move || if editing.get().is_some() { "Update" } else { "Add" }}
                    </button>
                    <Show when=move || editing.get().is_some()>
                        <button type="button" class="btn btn-secondary" on:click=move |_| reset_form()>"Cancel"</button>
                    </Show>
                </div>
            </form>
        </section>
    }
}
