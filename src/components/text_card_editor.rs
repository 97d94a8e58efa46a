//! Text Card Editor Component
//!
//! Add, edit and delete user-authored dashboard cards. Edits are saved
//! after a short pause in typing.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::changes::RefreshScope;
use crate::context::AppContext;
use crate::layout::{add_text_card, delete_text_card};
use crate::models::TextCard;
use crate::storage;
use crate::store::{use_dashboard_store, DashboardStateStoreFields};

use super::{ensure_unlocked, DeleteConfirmButton, StatusHandle};

const SAVE_DEBOUNCE_MS: u32 = 500;

/// Local working copy of the text cards with a debounced writer
#[derive(Clone, Copy)]
struct TextCardDraft {
    cards: RwSignal<Vec<TextCard>>,
    /// Unsaved edits exist; store reloads must not overwrite them
    dirty: RwSignal<bool>,
    generation: RwSignal<u32>,
}

impl TextCardDraft {
    fn new() -> Self {
        Self {
            cards: RwSignal::new(Vec::new()),
            dirty: RwSignal::new(false),
            generation: RwSignal::new(0),
        }
    }

    fn field(&self, id: &str, read: fn(&TextCard) -> &str) -> String {
        self.cards
            .with(|cards| cards.iter().find(|c| c.id == id).map(|c| read(c).to_string()))
            .unwrap_or_default()
    }

    fn edit(&self, id: &str, ctx: AppContext, status: StatusHandle, apply: impl FnOnce(&mut TextCard)) {
        self.cards.update(|cards| {
            if let Some(card) = cards.iter_mut().find(|c| c.id == id) {
                apply(card);
            }
        });
        self.dirty.set(true);
        self.generation.update(|g| *g += 1);

        let this = *self;
        let scheduled = self.generation.get_untracked();
        spawn_local(async move {
            TimeoutFuture::new(SAVE_DEBOUNCE_MS).await;
            if this.generation.try_get_untracked() != Some(scheduled) {
                return;
            }
            if !ensure_unlocked(status).await {
                return;
            }
            let cards = this.cards.get_untracked();
            match storage::save_text_cards(&cards).await {
                Ok(()) => {
                    log::debug!("[OPTIONS] Saved {} text cards", cards.len());
                    if this.generation.try_get_untracked() == Some(scheduled) {
                        this.dirty.set(false);
                    }
                    ctx.reload(RefreshScope::Layout);
                }
                Err(e) => status.error(format!("Failed to save text card: {}", e)),
            }
        });
    }
}

#[component]
fn TextCardRow(id: String, draft: TextCardDraft, locked: Signal<bool>) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_dashboard_store();
    let status = StatusHandle::use_context();

    let delete = {
        let id = id.clone();
        move |_| {
            let id = id.clone();
            spawn_local(async move {
                if !ensure_unlocked(status).await {
                    return;
                }
                let mut text_cards = draft.cards.get_untracked();
                let mut order = store.layout().with_untracked(|l| l.order());
                delete_text_card(&mut text_cards, &mut order, &id);
                match storage::save_text_cards_and_order(&text_cards, &order).await {
                    Ok(()) => {
                        draft.cards.set(text_cards);
                        status.success("Text card deleted");
                        ctx.reload(RefreshScope::Layout);
                    }
                    Err(e) => status.error(format!("Failed to delete text card: {}", e)),
                }
            });
        }
    };

    let title_id = id.clone();
    let title_edit_id = id.clone();
    let content_id = id.clone();
    let content_edit_id = id;

    view! {
        <div class="text-card-editor-item">
            <div class="text-card-editor-header">
                <input
                    type="text"
                    placeholder="Card title"
                    disabled=move || locked.get()
                    prop:value=move || draft.field(&title_id, |c| c.title.as_str())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        draft.edit(&title_edit_id, ctx, status, |c| c.title = value);
                    }
                />
                <DeleteConfirmButton button_class="delete-btn" disabled=locked on_confirm=delete />
            </div>
            <textarea
                rows="5"
                placeholder="Content (basic HTML allowed)"
                disabled=move || locked.get()
                prop:value=move || draft.field(&content_id, |c| c.content.as_str())
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    draft.edit(&content_edit_id, ctx, status, |c| c.content = value);
                }
            />
        </div>
    }
}

#[component]
pub fn TextCardEditor() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_dashboard_store();
    let status = StatusHandle::use_context();

    let draft = TextCardDraft::new();
    Effect::new(move |_| {
        let stored = store.layout().with(|l| l.text_cards.clone());
        if !draft.dirty.get_untracked() {
            draft.cards.set(stored);
        }
    });

    let add = move |_| {
        spawn_local(async move {
            if !ensure_unlocked(status).await {
                return;
            }
            // The draft may hold edits not yet written
            let mut text_cards = draft.cards.get_untracked();
            let mut order = store.layout().with_untracked(|l| l.order());
            let card = add_text_card(&mut text_cards, &mut order);
            match storage::save_text_cards_and_order(&text_cards, &order).await {
                Ok(()) => {
                    log::info!("[OPTIONS] Added text card {}", card.id);
                    draft.cards.set(text_cards);
                    status.success("Text card added");
                    ctx.reload(RefreshScope::Layout);
                }
                Err(e) => status.error(format!("Failed to add text card: {}", e)),
            }
        });
    };

    let locked = Signal::derive(move || !ctx.is_unlocked());

    view! {
        <section class="settings-section text-card-section">
            <h2>"Text Cards"</h2>
            <div class="text-card-editor-list">
                <Show
                    when=move || !draft.cards.with(|c| c.is_empty())
                    fallback=|| view! { <p class="empty-state">"No text cards yet"</p> }
                >
                    <For
                        each=move || draft.cards.with(|cards| cards.iter().map(|c| c.id.clone()).collect::<Vec<_>>())
                        key=|id| id.clone()
                        children=move |id| view! { <TextCardRow id=id draft=draft locked=locked /> }
                    />
                </Show>
            </div>
            <button class="btn btn-primary" disabled=move || locked.get() on:click=add>
                "+ Add Text Card"
            </button>
        </section>
    }
}
