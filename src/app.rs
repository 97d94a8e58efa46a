//! Brand Kit Frontend App
//!
//! Picks the surface for the current page and keeps the shared state in
//! sync with extension storage.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::admin::AdminState;
use crate::changes::RefreshScope;
use crate::components::{NewTabPage, OptionsPage, PopupPage};
use crate::context::AppContext;
use crate::storage;
use crate::store::{DashboardState, DashboardStateStoreFields, DashboardStore};

/// Extension page a bundle instance is mounted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    NewTab,
    Options,
    Popup,
}

impl Surface {
    /// Surface for a page path such as `/options.html`; unknown pages get
    /// the dashboard.
    pub fn from_path(path: &str) -> Self {
        let page = path.rsplit('/').next().unwrap_or_default();
        if page.starts_with("options") {
            Surface::Options
        } else if page.starts_with("popup") {
            Surface::Popup
        } else {
            Surface::NewTab
        }
    }
}

#[component]
pub fn App() -> impl IntoView {
    let surface = Surface::from_path(&storage::current_path());
    log::info!("[APP] Mounting {:?}", surface);

    provide_app_state(surface);

    match surface {
        Surface::NewTab => view! { <NewTabPage /> }.into_any(),
        Surface::Options => view! { <OptionsPage /> }.into_any(),
        Surface::Popup => view! { <PopupPage /> }.into_any(),
    }
}

/// Create context and store, subscribe to store changes, and load every
/// scope whenever its trigger fires.
fn provide_app_state(surface: Surface) {
    let ctx = AppContext::new();
    let store: DashboardStore = Store::new(DashboardState::default());
    provide_context(ctx);
    provide_context(store);

    storage::subscribe_changes(move |scopes| ctx.reload_all(scopes));
    storage::on_visibility_change(move |hidden| ctx.set_page_visible(!hidden));
    ctx.set_page_visible(!storage::document_hidden());

    // Admin
    Effect::new(move |_| {
        let _ = ctx.trigger(RefreshScope::Admin).get();
        spawn_local(async move {
            // Only the options page normalizes the stored flag
            let state = if surface == Surface::Options {
                storage::load_admin_state().await
            } else {
                storage::load_admin_record().await.map(|r| AdminState::from_record(&r))
            };
            match state {
                Ok(state) => ctx.set_admin(state),
                Err(e) => log::warn!("[APP] Admin state unavailable: {}", e),
            }
        });
    });

    // Card layout
    Effect::new(move |_| {
        let _ = ctx.trigger(RefreshScope::Layout).get();
        spawn_local(async move {
            match storage::load_layout().await {
                Ok(layout) => store.layout().set(layout),
                Err(e) => log::warn!("[APP] Failed to load card layout: {}", e),
            }
        });
    });

    // Brand and images share one read
    Effect::new(move |_| {
        let _ = ctx.trigger(RefreshScope::Brand).get();
        let _ = ctx.trigger(RefreshScope::Images).get();
        spawn_local(async move {
            match storage::load_brand().await {
                Ok((brand, images)) => {
                    store.brand().set(brand);
                    store.images().set(images);
                }
                Err(e) => log::warn!("[APP] Failed to load brand settings: {}", e),
            }
        });
    });

    Effect::new(move |_| {
        let _ = ctx.trigger(RefreshScope::Trackers).get();
        spawn_local(async move {
            match storage::load_trackers().await {
                Ok(trackers) => store.trackers().set(trackers),
                Err(e) => log::warn!("[APP] Failed to load trackers: {}", e),
            }
        });
    });

    Effect::new(move |_| {
        let _ = ctx.trigger(RefreshScope::Links).get();
        spawn_local(async move {
            match storage::load_links().await {
                Ok(links) => store.links().set(links),
                Err(e) => log::warn!("[APP] Failed to load links: {}", e),
            }
        });
    });

    Effect::new(move |_| {
        let _ = ctx.trigger(RefreshScope::Notes).get();
        spawn_local(async move {
            match storage::load_notes().await {
                Ok(notes) => store.notes().set(notes),
                Err(e) => log::warn!("[APP] Failed to load notes: {}", e),
            }
        });
    });

    Effect::new(move |_| {
        let _ = ctx.trigger(RefreshScope::Responses).get();
        spawn_local(async move {
            match storage::load_quick_responses().await {
                Ok(responses) => store.quick_responses().set(responses),
                Err(e) => log::warn!("[APP] Failed to load quick responses: {}", e),
            }
        });
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_from_path() {
        assert_eq!(Surface::from_path("/newtab.html"), Surface::NewTab);
        assert_eq!(Surface::from_path("/options.html"), Surface::Options);
        assert_eq!(Surface::from_path("/pages/popup.html"), Surface::Popup);
        assert_eq!(Surface::from_path(""), Surface::NewTab);
    }
}
