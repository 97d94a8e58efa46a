//! Quick Response Editor Component
//!
//! Canned texts offered by the popup.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::changes::RefreshScope;
use crate::context::AppContext;
use crate::forms::{response_from_form, upsert};
use crate::models::QuickResponse;
use crate::storage;
use crate::store::{use_dashboard_store, DashboardStateStoreFields};

use super::{ensure_unlocked, DeleteConfirmButton, StatusHandle};

fn commit(ctx: AppContext, status: StatusHandle, responses: Vec<QuickResponse>, message: &'static str) {
    spawn_local(async move {
        if !ensure_unlocked(status).await {
            return;
        }
        match storage::save_quick_responses(&responses).await {
            Ok(()) => {
                status.success(message);
                ctx.reload(RefreshScope::Responses);
            }
            Err(e) => status.error(format!("Failed to save quick responses: {}", e)),
        }
    });
}

#[component]
pub fn ResponseEditor() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_dashboard_store();
    let status = StatusHandle::use_context();

    let (title, set_title) = signal(String::new());
    let (text, set_text) = signal(String::new());
    let (category, set_category) = signal(String::new());
    let (editing, set_editing) = signal(None::<usize>);

    let reset_form = move || {
        set_title.set(String::new());
        set_text.set(String::new());
        set_category.set(String::new());
        set_editing.set(None);
    };

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        match response_from_form(&title.get_untracked(), &text.get_untracked(), &category.get_untracked()) {
            Ok(response) => {
                let index = editing.get_untracked();
                let mut responses = store.quick_responses().get_untracked();
                upsert(&mut responses, index, response);
                commit(ctx, status, responses, if index.is_some() { "Response updated" } else { "Response added" });
                reset_form();
            }
            Err(e) => status.error(e.to_string()),
        }
    };

    let locked = Signal::derive(move || !ctx.is_unlocked());

    view! {
        <section class="settings-section response-section">
            <h2>"Quick Responses"</h2>

            <div class="item-list">
                <Show
                    when=move || !store.quick_responses().with(|r| r.is_empty())
                    fallback=|| view! { <p class="empty-state">"No quick responses yet"</p> }
                >
                    {move || store.quick_responses().get().into_iter().enumerate().map(|(index, response)| {
                        let edit = {
                            let response = response.clone();
                            move |_| {
                                set_title.set(response.title.clone());
                                set_text.set(response.text.clone());
                                set_category.set(response.category.clone().unwrap_or_default());
                                set_editing.set(Some(index));
                            }
                        };
                        let delete = move |_| {
                            let mut responses = store.quick_responses().get_untracked();
                            if index < responses.len() {
                                responses.remove(index);
                                commit(ctx, status, responses, "Response deleted");
                                if editing.get_untracked() == Some(index) {
                                    reset_form();
                                }
                            }
                        };
                        view! {
                            <div class="item-row">
                                <div class="item-info">
                                    <div class="item-title">
                                        {response.title}
                                        {response.category.map(|c| view! { <span class="item-category">{c}</span> })}
                                    </div>
                                    <div class="item-meta">{response.text}</div>
                                </div>
                                <button class="edit-btn" disabled=move || locked.get() on:click=edit>"Edit"</button>
                                <DeleteConfirmButton button_class="delete-btn" disabled=locked on_confirm=delete />
                            </div>
                        }
                    }).collect_view()}
                </Show>
            </div>

            <form class="editor-form" on:submit=submit>
                <h3>{move || if editing.get().is_some() { "Edit Response" } else { "Add Response" }}</h3>
                <input
                    type="text"
                    placeholder="Title"
                    prop:value=move || title.get()
                    on:input=move |ev| set_title.set(event_target_value(&ev))
                />
                <textarea
                    rows="4"
                    placeholder="Response text"
                    prop:value=move || text.get()
                    on:input=move |ev| set_text.set(event_target_value(&ev))
                />
                <input
                    type="text"
                    placeholder="Category (optional)"
                    prop:value=move || category.get()
                    on:input=move |ev| set_category.set(event_target_value(&ev))
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
        </section>
    }
}
