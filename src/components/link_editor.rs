//! Link Editor Component
//!
//! Quick links with one or more URLs, plus batch entry.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::changes::RefreshScope;
use crate::context::AppContext;
use crate::forms::{link_from_form, parse_batch_links, upsert};
use crate::models::Link;
use crate::storage;
use crate::store::{use_dashboard_store, DashboardStateStoreFields};

use super::{ensure_unlocked, DeleteConfirmButton, StatusHandle};

fn commit(ctx: AppContext, status: StatusHandle, links: Vec<Link>, message: String) {
    spawn_local(async move {
        if !ensure_unlocked(status).await {
            return;
        }
        match storage::save_links(&links).await {
            Ok(()) => {
                status.success(message);
                ctx.reload(RefreshScope::Links);
            }
            Err(e) => status.error(format!("Failed to save links: {}", e)),
        }
    });
}

/// Batch entry, one `name | url1, url2 | icon` per line
#[component]
fn BatchLinks(locked: Signal<bool>) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_dashboard_store();
    let status = StatusHandle::use_context();

    let (input, set_input) = signal(String::new());
    let (open, set_open) = signal(false);

    let add_all = move |_| match parse_batch_links(&input.get_untracked()) {
        Ok(parsed) => {
            let count = parsed.len();
            let mut links = store.links().get_untracked();
            links.extend(parsed);
            commit(ctx, status, links, format!("Added {} link(s)", count));
            set_input.set(String::new());
            set_open.set(false);
        }
        Err(e) => status.error(e.to_string()),
    };

    view! {
        <div class="batch-links">
            <button type="button" class="btn btn-secondary" on:click=move |_| set_open.update(|o| *o = !*o)>
                {move || if open.get() { "Hide batch add" } else { "Batch add" }}
            </button>
            <Show when=move || open.get()>
                <textarea
                    rows="6"
                    placeholder="Name | https://url1.com, https://url2.com | 🔗"
                    prop:value=move || input.get()
                    on:input=move |ev| set_input.set(event_target_value(&ev))
                />
                <button type="button" class="btn btn-primary" disabled=move || locked.get() on:click=add_all>
                    "Add All"
                </button>
            </Show>
        </div>
    }
}

#[component]
pub fn LinkEditor() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_dashboard_store();
    let status = StatusHandle::use_context();

    let (name, set_name) = signal(String::new());
    let (icon, set_icon) = signal(String::new());
    let urls = RwSignal::new(vec![String::new()]);
    let (editing, set_editing) = signal(None::<usize>);
    // Rows are rebuilt only when a URL is added or removed
    let url_count = Memo::new(move |_| urls.with(Vec::len));

    let reset_form = move || {
        set_name.set(String::new());
        set_icon.set(String::new());
        urls.set(vec![String::new()]);
        set_editing.set(None);
    };

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        match link_from_form(&name.get_untracked(), &urls.get_untracked(), &icon.get_untracked()) {
            Ok(link) => {
                let index = editing.get_untracked();
                let mut links = store.links().get_untracked();
                upsert(&mut links, index, link);
                let message = if index.is_some() { "Link updated" } else { "Link added" };
                commit(ctx, status, links, message.to_string());
                reset_form();
            }
            Err(e) => status.error(e.to_string()),
        }
    };

    let locked = Signal::derive(move || !ctx.is_unlocked());

    view! {
        <section class="settings-section link-section">
            <h2>"Quick Links"</h2>

            <div class="item-list">
                <Show
                    when=move || !store.links().with(|l| l.is_empty())
                    fallback=|| view! { <p class="empty-state">"No links yet"</p> }
                >
                    {move || store.links().get().into_iter().enumerate().map(|(index, link)| {
                        let edit = {
                            let link = link.clone();
                            move |_| {
                                set_name.set(link.name.clone());
                                set_icon.set(link.icon.clone().unwrap_or_default());
                                urls.set(if link.urls.is_empty() { vec![String::new()] } else { link.urls.clone() });
                                set_editing.set(Some(index));
                            }
                        };
                        let delete = move |_| {
                            let mut links = store.links().get_untracked();
                            if index < links.len() {
                                links.remove(index);
                                commit(ctx, status, links, "Link deleted".to_string());
                                if editing.get_untracked() == Some(index) {
                                    reset_form();
                                }
                            }
                        };
                        let summary = match link.urls.len() {
                            0 => "No URL".to_string(),
                            1 => link.urls[0].clone(),
                            n => format!("{} URLs", n),
                        };
                        view! {
                            <div class="item-row">
                                <span class="item-icon">{link.display_icon()}</span>
                                <div class="item-info">
                                    <div class="item-title">{link.name.clone()}</div>
                                    <div class="item-meta">{summary}</div>
                                </div>
                                <button class="edit-btn" disabled=move || locked.get() on:click=edit>"Edit"</button>
                                <DeleteConfirmButton button_class="delete-btn" disabled=locked on_confirm=delete />
                            </div>
                        }
                    }).collect_view()}
                </Show>
            </div>

            <form class="editor-form" on:submit=submit>
                <h3>{move || if editing.get().is_some() { "Edit Link" } else { "Add Link" }}</h3>
                <input
                    type="text"
                    placeholder="Name"
                    prop:value=move || name.get()
                    on:input=move |ev| set_name.set(event_target_value(&ev))
                />
                <div class="url-inputs">
                    {move || (0..url_count.get()).map(|i| view! {
                        <div class="url-input-row">
                            <input
                                type="text"
                                placeholder="https://"
                                prop:value=move || urls.with(|u| u.get(i).cloned().unwrap_or_default())
                                on:input=move |ev| urls.update(|u| {
                                    if let Some(slot) = u.get_mut(i) {
                                        *slot = event_target_value(&ev);
                                    }
                                })
                            />
                            <Show when=move || urls.with(|u| u.len() > 1)>
                                <button
                                    type="button"
                                    class="remove-url-btn"
                                    title="Remove URL"
                                    on:click=move |_| urls.update(|u| {
                                        if i < u.len() {
                                            u.remove(i);
                                        }
                                    })
                                >
                                    "−"
                                </button>
                            </Show>
                        </div>
                    }).collect_view()}
                    <button type="button" class="add-url-btn" on:click=move |_| urls.update(|u| u.push(String::new()))>
                        "+ Add URL"
                    </button>
                </div>
                <input
                    type="text"
                    placeholder="Icon (optional)"
                    prop:value=move || icon.get()
                    on:input=move |ev| set_icon.set(event_target_value(&ev))
                />
                <div class="form-actions">
                    <button type="submit" class="btn btn-primary" disabled=move || locked.get()>
                        {move || if editing.get().is_some() { "Update" } else { "Add" }}
                    </button>
                    <Show when=move || editing.get().is_some()>
                        <button type="button" class="btn btn-secondary" on:click=move |_| reset_form()>"Cancel"</button>
                    </Show>
                </div>
            </form>

            <BatchLinks locked=locked />
        </section>
    }
}
