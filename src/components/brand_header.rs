//! Brand Header Component
//!
//! Root CSS variables, background image and overlay, plus the greeting
//! header with logo and business info lines.

use std::time::Duration;

use chrono::Local;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

use crate::brand::{self, HeaderSubtitle, HeaderTitle};
use crate::store::{use_dashboard_store, DashboardStateStoreFields};

/// Header clock cadence
const CLOCK_REFRESH: Duration = Duration::from_secs(60);

fn apply_css_variables(vars: &[(&'static str, String)]) {
    let Some(root) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
        .and_then(|e| e.dyn_into::<web_sys::HtmlElement>().ok())
    else {
        return;
    };
    let style = root.style();
    for (name, value) in vars {
        if let Err(e) = style.set_property(name, value) {
            log::warn!("[BRAND] Could not set {}: {:?}", name, e);
        }
    }
}

/// Applies the brand palette to the document root and renders the
/// background layers. Used by every surface.
#[component]
pub fn BrandBackdrop(#[prop(optional)] with_background: bool) -> impl IntoView {
    let store = use_dashboard_store();

    Effect::new(move |_| {
        let vars = store.brand().with(|b| b.css_variables());
        apply_css_variables(&vars);
    });

    let background = move || {
        let image = brand::background_image(&store.images().get(), &store.brand().get());
        image.map(|url| format!("url(\"{}\")", url.replace('"', "%22")))
    };
    let overlay = move || store.brand().with(|b| b.overlay_color());

    view! {
        <Show when=move || with_background>
            <div
                class="background-image"
                style:background-image=move || background().unwrap_or_else(|| "none".to_string())
                style:opacity=move || if background().is_some() { "1" } else { "0" }
            />
            <div
                class="overlay"
                style:display=move || if overlay().is_some() { "block" } else { "none" }
                style:background-color=move || overlay().unwrap_or_default()
            />
        </Show>
    }
}

/// Greeting header of the dashboard
#[component]
pub fn BrandHeader() -> impl IntoView {
    let store = use_dashboard_store();

    let (now, set_now) = signal(Local::now());
    let clock = RwSignal::new(None::<IntervalHandle>);
    if let Ok(handle) = set_interval_with_handle(move || set_now.set(Local::now()), CLOCK_REFRESH) {
        clock.set(Some(handle));
    }
    on_cleanup(move || {
        if let Some(handle) = clock.try_get_untracked().flatten() {
            handle.clear();
        }
    });

    let header = Memo::new(move |_| store.brand().with(|b| b.header(&now.get())));
    let logo = move || brand::logo(&store.images().get(), &store.brand().get());

    view! {
        <header class="dashboard-header">
            {move || logo().map(|logo| {
                let clickable = logo.href.is_some();
                view! {
                    <a
                        class="company-logo-link"
                        href=logo.href.clone().unwrap_or_else(|| "#".to_string())
                        style:pointer-events=if clickable { "auto" } else { "none" }
                        target="_blank"
                        rel="noopener noreferrer"
                    >
                        <img class="company-logo" src=logo.src alt="Company logo" />
                    </a>
                }
            })}

            <div class="header-text">
                {move || match header.get().title {
                    HeaderTitle::Greeting { greeting, user_name } => view! {
                        <h1 class="greeting">
                            <span class="greeting-text">{greeting}</span>", "
                            <span class="user-name">{user_name}</span>"."
                        </h1>
                    }.into_any(),
                    HeaderTitle::Custom(html) => view! {
                        <h1 class="greeting" inner_html=html />
                    }.into_any(),
                }}
                {move || match header.get().subtitle {
                    HeaderSubtitle::Date(text) => view! { <p class="date-time">{text}</p> }.into_any(),
                    HeaderSubtitle::Custom(html) => view! { <p class="date-time" inner_html=html /> }.into_any(),
                }}
            </div>

            <Show when=move || header.with(|h| !h.business_lines.is_empty())>
                <div class="business-info">
                    <For
                        each=move || header.get().business_lines.into_iter().enumerate()
                        key=|(i, line)| (*i, line.clone())
                        children=|(_, line)| view! { <div class="business-info-line" inner_html=line /> }
                    />
                </div>
            </Show>
        </header>
    }
}
