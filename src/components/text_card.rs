//! Text Card Component
//!
//! Admin-authored tile: plain title, sanitized rich content.

use leptos::prelude::*;

use crate::html::sanitize_rich;
use crate::models::TextCard;

#[component]
pub fn TextCardView(card: TextCard) -> impl IntoView {
    let content = sanitize_rich(&card.content);

    view! {
        <div class="card text-card" data-card-id=card.id.clone()>
            <h2 class="card-title">{card.display_title().to_string()}</h2>
            <div class="text-card-content" inner_html=content />
        </div>
    }
}
