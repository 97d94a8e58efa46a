//! Dashboard Grid Component
//!
//! Three columns placed from the card layout. Cards are keyed so system
//! widgets stay mounted while text cards are rebuilt on edit.

use leptos::prelude::*;

use crate::layout::{column_cards, reconcile_snapshot, Column, PlacedCard};
use crate::models::SystemCard;
use crate::store::{use_dashboard_store, DashboardStateStoreFields};

use super::{LinksCard, NotesCard, TextCardView, TodoistCard, TrackersCard};

fn render_card(card: PlacedCard) -> AnyView {
    match card {
        PlacedCard::System(SystemCard::Trackers) => view! { <TrackersCard /> }.into_any(),
        PlacedCard::System(SystemCard::Notes) => view! { <NotesCard /> }.into_any(),
        PlacedCard::System(SystemCard::Links) => view! { <LinksCard /> }.into_any(),
        PlacedCard::System(SystemCard::Todoist) => view! { <TodoistCard /> }.into_any(),
        PlacedCard::Text(card) => view! { <TextCardView card=card /> }.into_any(),
    }
}

#[component]
pub fn DashboardGrid() -> impl IntoView {
    let store = use_dashboard_store();

    let placements = Memo::new(move |_| {
        let placements = store.layout().with(reconcile_snapshot);
        log::debug!("[DASH] Placed {} cards", placements.len());
        placements
    });

    view! {
        <main class="dashboard-grid">
            {Column::ALL.into_iter().map(|column| view! {
                <div class=column.css_class()>
                    <For
                        each=move || placements.with(|p| column_cards(p, column))
                        key=|card| card.render_key()
                        children=render_card
                    />
                </div>
            }).collect_view()}
        </main>
    }
}
