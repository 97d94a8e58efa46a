//! Note Editor Component

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::changes::RefreshScope;
use crate::context::AppContext;
use crate::forms::{note_from_form, upsert};
use crate::models::Note;
use crate::storage;
use crate::store::{use_dashboard_store, DashboardStateStoreFields};

use super::{ensure_unlocked, DeleteConfirmButton, StatusHandle};

fn commit(ctx: AppContext, status: StatusHandle, notes: Vec<Note>, message: &'static str) {
    spawn_local(async move {
        if !ensure_unlocked(status).await {
            return;
        }
        match storage::save_notes(&notes).await {
            Ok(()) => {
                status.success(message);
                ctx.reload(RefreshScope::Notes);
            }
            Err(e) => status.error(format!("Failed to save notes: {}", e)),
        }
    });
}

#[component]
pub fn NoteEditor() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_dashboard_store();
    let status = StatusHandle::use_context();

    let (title, set_title) = signal(String::new());
    let (content, set_content) = signal(String::new());
    let (url, set_url) = signal(String::new());
    let (editing, set_editing) = signal(None::<usize>);

    let reset_form = move || {
        set_title.set(String::new());
        set_content.set(String::new());
        set_url.set(String::new());
        set_editing.set(None);
    };

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        match note_from_form(&title.get_untracked(), &content.get_untracked(), &url.get_untracked()) {
            Ok(note) => {
                let index = editing.get_untracked();
                let mut notes = store.notes().get_untracked();
                upsert(&mut notes, index, note);
                commit(ctx, status, notes, if index.is_some() { "Note updated" } else { "Note added" });
                reset_form();
            }
            Err(e) => status.error(e.to_string()),
        }
    };

    let locked = Signal::derive(move || !ctx.is_unlocked());

    view! {
        <section class="settings-section note-section">
            <h2>"Notes"</h2>

            <div class="item-list">
                <Show
                    when=move || !store.notes().with(|n| n.is_empty())
                    fallback=|| view! { <p class="empty-state">"No notes yet"</p> }
                >
                    {move || store.notes().get().into_iter().enumerate().map(|(index, note)| {
                        let edit = {
                            let note = note.clone();
                            move |_| {
                                set_title.set(note.title.clone());
                                set_content.set(note.content.clone());
                                set_url.set(note.url.clone().unwrap_or_default());
                                set_editing.set(Some(index));
                            }
                        };
                        let delete = move |_| {
                            let mut notes = store.notes().get_untracked();
                            if index < notes.len() {
                                notes.remove(index);
                                commit(ctx, status, notes, "Note deleted");
                                if editing.get_untracked() == Some(index) {
                                    reset_form();
                                }
                            }
                        };
                        view! {
                            <div class="item-row">
                                <div class="item-info">
                                    <div class="item-title">{note.title}</div>
                                    <div class="item-meta">{note.content}</div>
                                </div>
                                <button class="edit-btn" disabled=move || locked.get() on:click=edit>"Edit"</button>
                                <DeleteConfirmButton button_class="delete-btn" disabled=locked on_confirm=delete />
                            </div>
                        }
                    }).collect_view()}
                </Show>
            </div>

            <form class="editor-form" on:submit=submit>
                <h3>{move || if editing.get().is_some() { "Edit Note" } else { "Add Note" }}</h3>
                <input
                    type="text"
                    placeholder="Title"
                    prop:value=move || title.get()
                    on:input=move |ev| set_title.set(event_target_value(&ev))
                />
                <textarea
                    rows="4"
                    placeholder="Content"
                    prop:value=move || content.get()
                    on:input=move |ev| set_content.set(event_target_value(&ev))
                />
                <input
                    type="text"
                    placeholder="Link (optional)"
                    prop:value=move || url.get()
                    on:input=move |ev| set_url.set(event_target_value(&ev))
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
