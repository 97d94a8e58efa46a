//! Status Banner Component
//!
//! Transient success/error message at the top of the options page.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::storage;

/// How long a message stays visible
const STATUS_DISPLAY_MS: u32 = 5_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
}

impl StatusKind {
    fn class(&self) -> &'static str {
        match self {
            StatusKind::Success => "status-message success",
            StatusKind::Error => "status-message error",
        }
    }
}

/// Handle for posting messages, provided via context on the options page.
#[derive(Clone, Copy)]
pub struct StatusHandle {
    message: RwSignal<Option<(String, StatusKind)>>,
    /// Bumped per message so an older timeout does not clear a newer one
    generation: RwSignal<u32>,
}

impl StatusHandle {
    pub fn new() -> Self {
        Self {
            message: RwSignal::new(None),
            generation: RwSignal::new(0),
        }
    }

    pub fn show(&self, text: impl Into<String>, kind: StatusKind) {
        let text = text.into();
        match kind {
            StatusKind::Success => log::info!("[OPTIONS] {}", text),
            StatusKind::Error => log::warn!("[OPTIONS] {}", text),
        }
        self.message.set(Some((text, kind)));
        self.generation.update(|g| *g += 1);

        let this = *self;
        let shown = self.generation.get_untracked();
        spawn_local(async move {
            TimeoutFuture::new(STATUS_DISPLAY_MS).await;
            if this.generation.try_get_untracked() == Some(shown) {
                let _ = this.message.try_set(None);
            }
        });
    }

    pub fn success(&self, text: impl Into<String>) {
        self.show(text, StatusKind::Success);
    }

    pub fn error(&self, text: impl Into<String>) {
        self.show(text, StatusKind::Error);
    }

    pub fn use_context() -> Self {
        use_context::<StatusHandle>().expect("StatusHandle should be provided")
    }
}

/// Check the lock against the store and report a refusal.
/// Returns `true` when the mutation may proceed.
pub async fn ensure_unlocked(status: StatusHandle) -> bool {
    match storage::require_unlocked().await {
        Ok(()) => true,
        Err(e) => {
            status.error(e.to_string());
            false
        }
    }
}

#[component]
pub fn StatusBanner(status: StatusHandle) -> impl IntoView {
    view! {
        {move || status.message.get().map(|(text, kind)| view! {
            <div class=kind.class() role="status">{text}</div>
        })}
    }
}
