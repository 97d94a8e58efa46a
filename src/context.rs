//! Application Context
//!
//! Shared state provided via Leptos Context API.

use leptos::prelude::*;

use crate::admin::AdminState;
use crate::changes::RefreshScope;

const SCOPE_COUNT: usize = 9;

fn scope_index(scope: RefreshScope) -> usize {
    match scope {
        RefreshScope::Admin => 0,
        RefreshScope::Layout => 1,
        RefreshScope::Brand => 2,
        RefreshScope::Trackers => 3,
        RefreshScope::Links => 4,
        RefreshScope::Notes => 5,
        RefreshScope::Responses => 6,
        RefreshScope::Todoist => 7,
        RefreshScope::Images => 8,
    }
}

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// One counter per refresh scope, bumped on store changes
    triggers: [(ReadSignal<u32>, WriteSignal<u32>); SCOPE_COUNT],
    /// Admin gate as last read from the store - read
    pub admin: ReadSignal<AdminState>,
    /// Admin gate as last read from the store - write
    set_admin: WriteSignal<AdminState>,
    /// Whether the document is visible - read
    pub page_visible: ReadSignal<bool>,
    /// Whether the document is visible - write
    set_page_visible: WriteSignal<bool>,
}

impl AppContext {
    pub fn new() -> Self {
        let triggers = std::array::from_fn(|_| signal(0u32));
        let (admin, set_admin) = signal(AdminState::default());
        let (page_visible, set_page_visible) = signal(true);
        Self {
            triggers,
            admin,
            set_admin,
            page_visible,
            set_page_visible,
        }
    }

    /// Subscribe to reloads of a scope; read inside an Effect.
    pub fn trigger(&self, scope: RefreshScope) -> ReadSignal<u32> {
        self.triggers[scope_index(scope)].0
    }

    /// Trigger a reload of one scope
    pub fn reload(&self, scope: RefreshScope) {
        self.triggers[scope_index(scope)].1.update(|v| *v += 1);
    }

    pub fn reload_all(&self, scopes: impl IntoIterator<Item = RefreshScope>) {
        for scope in scopes {
            self.reload(scope);
        }
    }

    pub fn set_admin(&self, state: AdminState) {
        self.set_admin.set(state);
    }

    pub fn set_page_visible(&self, visible: bool) {
        self.set_page_visible.set(visible);
    }

    pub fn is_unlocked(&self) -> bool {
        self.admin.get().is_unlocked()
    }
}
