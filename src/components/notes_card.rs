//! Notes Card Component

use leptos::prelude::*;

use crate::context::AppContext;
use crate::store::{use_dashboard_store, DashboardStateStoreFields};

#[component]
pub fn NotesCard() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_dashboard_store();

    view! {
        <div class="card notes-card">
            <h2 class="card-title">"Notes"</h2>
            <div class="notes-list">
                <Show
                    when=move || !store.notes().with(|n| n.is_empty())
                    fallback=move || view! {
                        <p class="empty-state">
                            {move || if ctx.is_unlocked() {
                                "No notes yet"
                            } else {
                                "No notes yet. Admin can add notes in settings."
                            }}
                        </p>
                    }
                >
                    {move || store.notes().get().into_iter().map(|note| {
                        let url = note.url.clone().filter(|u| !u.trim().is_empty());
                        view! {
                            <div class="note-item">
                                <div class="note-title">{note.title}</div>
                                <div class="note-content">{note.content}</div>
                                {url.map(|url| view! {
                                    <a class="note-link" href=url target="_blank" rel="noopener noreferrer">
                                        "Open link →"
                                    </a>
                                })}
                            </div>
                        }
                    }).collect_view()}
                </Show>
            </div>
        </div>
    }
}
