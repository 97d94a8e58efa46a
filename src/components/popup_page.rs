//! Popup Page Component
//!
//! Searchable quick responses; a click copies the text.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::AppContext;
use crate::models::{filter_responses, QuickResponse};
use crate::storage;
use crate::store::{use_dashboard_store, DashboardStateStoreFields};

use super::BrandBackdrop;

/// How long the copy confirmation stays
const FEEDBACK_MS: u32 = 2_000;

#[component]
pub fn PopupPage() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_dashboard_store();

    let (query, set_query) = signal(String::new());
    let feedback = RwSignal::new(None::<String>);
    let generation = RwSignal::new(0u32);

    let visible = Memo::new(move |_| store.quick_responses().with(|r| filter_responses(r, &query.get())));

    let copy = move |response: QuickResponse| {
        spawn_local(async move {
            match storage::copy_to_clipboard(&response.text).await {
                Ok(()) => {
                    feedback.set(Some(format!("Copied: {}", response.title)));
                    generation.update(|g| *g += 1);
                    let shown = generation.get_untracked();
                    TimeoutFuture::new(FEEDBACK_MS).await;
                    if generation.try_get_untracked() == Some(shown) {
                        let _ = feedback.try_set(None);
                    }
                }
                Err(e) => {
                    log::error!("[POPUP] Copy failed: {}", e);
                    feedback.set(Some("Could not copy to clipboard".to_string()));
                }
            }
        });
    };

    let open_admin = move |_| {
        spawn_local(async {
            if let Err(e) = storage::open_options_page().await {
                log::error!("[POPUP] Could not open settings: {}", e);
            }
        });
    };

    view! {
        <BrandBackdrop />
        <div class="popup-container">
            <header class="popup-header">
                <h1>"Quick Responses"</h1>
                <Show when=move || ctx.admin.get().has_password>
                    <button class="admin-btn" title="Settings" on:click=open_admin>"⚙"</button>
                </Show>
            </header>
            <input
                type="search"
                class="popup-search"
                placeholder="Search responses..."
                autofocus
                prop:value=move || query.get()
                on:input=move |ev| set_query.set(event_target_value(&ev))
            />
            {move || feedback.get().map(|text| view! { <div class="copy-feedback">{text}</div> })}
            <div class="response-list">
                <Show
                    when=move || !visible.with(|v| v.is_empty())
                    fallback=move || view! {
                        <p class="empty-state">
                            {move || if store.quick_responses().with(|r| r.is_empty()) {
                                "No quick responses yet"
                            } else {
                                "No matching responses"
                            }}
                        </p>
                    }
                >
                    {move || visible.get().into_iter().map(|response| {
                        let title = response.title.clone();
                        let preview = response.text.clone();
                        let category = response.category.clone();
                        view! {
                            <button class="response-item" on:click=move |_| copy(response.clone())>
                                <div class="response-title">
                                    {title}
                                    {category.map(|c| view! { <span class="response-category">{c}</span> })}
                                </div>
                                <div class="response-preview">{preview}</div>
                            </button>
                        }
                    }).collect_view()}
                </Show>
            </div>
        </div>
    }
}
