//! Dashboard State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::brand::{BrandImages, BrandSettings};
use crate::layout::LayoutSnapshot;
use crate::models::{Link, Note, QuickResponse, Tracker};

/// Everything the surfaces render, as last read from extension storage
#[derive(Clone, Debug, Default, Store)]
pub struct DashboardState {
    /// All trackers (the dashboard shows the pinned ones)
    pub trackers: Vec<Tracker>,
    pub links: Vec<Link>,
    pub notes: Vec<Note>,
    pub quick_responses: Vec<QuickResponse>,
    /// Card order, visibility flags and text cards
    pub layout: LayoutSnapshot,
    pub brand: BrandSettings,
    pub images: BrandImages,
}

/// Type alias for the store
pub type DashboardStore = Store<DashboardState>;

/// Get the dashboard store from context
pub fn use_dashboard_store() -> DashboardStore {
    expect_context::<DashboardStore>()
}
