//! Links Card Component

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::AppContext;
use crate::models::Link;
use crate::storage;
use crate::store::{use_dashboard_store, DashboardStateStoreFields};

#[component]
fn LinkItem(link: Link) -> impl IntoView {
    let icon = link.display_icon();
    let name = link.name.clone();
    let urls = link.urls.clone();

    match urls.len() {
        0 => view! {
            <span class="link-item disabled" title="No URL configured">
                <span class="link-icon">{icon}</span>
                <span class="link-name">{name}</span>
            </span>
        }
        .into_any(),
        1 => view! {
            <a class="link-item" href=urls[0].clone() target="_blank" rel="noopener noreferrer">
                <span class="link-icon">{icon}</span>
                <span class="link-name">{name}</span>
            </a>
        }
        .into_any(),
        count => {
            let open_all = move |ev: web_sys::MouseEvent| {
                ev.prevent_default();
                let urls = urls.clone();
                spawn_local(async move {
                    if let Err(e) = storage::open_tabs(&urls).await {
                        log::error!("[DASH] Failed to open tabs: {}", e);
                    }
                });
            };
            view! {
                <a class="link-item multi-url" href="#" title=format!("Opens {} tabs", count) on:click=open_all>
                    <span class="link-icon">{icon}</span>
                    <span class="link-name">{name}</span>
                    <span class="link-count">{format!("({} tabs)", count)}</span>
                </a>
            }
            .into_any()
        }
    }
}

#[component]
pub fn LinksCard() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_dashboard_store();

    let empty_message = move || {
        if ctx.is_unlocked() {
            "No links yet"
        } else {
            "No links yet. Admin can add links in settings."
        }
    };

    view! {
        <div class="card links-card">
            <h2 class="card-title">"Quick Links"</h2>
            <div class="links-grid">
                <Show
                    when=move || !store.links().with(|l| l.is_empty())
                    fallback=move || view! { <p class="empty-state">{empty_message}</p> }
                >
                    {move || store.links().get().into_iter().map(|link| view! { <LinkItem link=link /> }).collect_view()}
                </Show>
            </div>
        </div>
    }
}
