//! Card Order List Component
//!
//! Drag-to-reorder list of dashboard cards with visibility toggles.
//! Uses leptos-dragdrop with drop slots between rows.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dragdrop::*;

use crate::changes::RefreshScope;
use crate::context::AppContext;
use crate::layout::{order_entries, OrderEntry};
use crate::models::CardId;
use crate::storage;
use crate::store::{use_dashboard_store, DashboardStateStoreFields};

use super::{ensure_unlocked, StatusHandle};

/// Gap between two rows; hovering it while dragging targets that slot
#[component]
fn DropGap(dnd: DndSignals, slot: usize) -> impl IntoView {
    let on_mouseenter = make_on_slot_mouseenter(dnd, slot);
    let on_mouseleave = make_on_mouseleave(dnd);

    let gap_class = move || {
        let mut c = String::from("drop-zone");
        if dnd.dragging_read.get().is_none() { c.push_str(" hidden"); }
        if dnd.drop_slot_read.get() == Some(DropSlot(slot)) { c.push_str(" active"); }
        c
    };

    view! {
        <div class=gap_class on:mouseenter=on_mouseenter on:mouseleave=on_mouseleave />
    }
}

#[component]
pub fn CardOrderList() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_dashboard_store();
    let status = StatusHandle::use_context();

    let entries = Memo::new(move |_| store.layout().with(order_entries));
    let dnd = create_dnd_signals();

    bind_global_mouseup(dnd, move |dragged, slot| {
        let Some(mut keys) = entries.try_with_untracked(|e| e.iter().map(|entry| entry.key.clone()).collect::<Vec<_>>()) else {
            return;
        };
        if !reorder(&mut keys, dragged, slot) {
            return;
        }
        log::debug!("[OPTIONS] Card order: {:?}", keys);
        spawn_local(async move {
            if !ensure_unlocked(status).await {
                return;
            }
            match storage::save_card_order(&keys).await {
                Ok(()) => {
                    status.success("Card order saved");
                    ctx.reload(RefreshScope::Layout);
                }
                Err(e) => status.error(format!("Failed to save card order: {}", e)),
            }
        });
    });

    let toggle_visibility = move |entry: OrderEntry, visible: bool| {
        let Some(card) = CardId::parse(&entry.key) else { return };
        spawn_local(async move {
            if !ensure_unlocked(status).await {
                return;
            }
            match storage::set_card_visibility(&card, visible).await {
                Ok(()) => ctx.reload(RefreshScope::Layout),
                Err(e) => status.error(format!("Failed to update {}: {}", entry.name, e)),
            }
        });
    };

    view! {
        <section class="settings-section card-order-section">
            <h2>"Dashboard Cards"</h2>
            <p class="form-hint">"Drag to reorder. Cards fill the three columns left to right."</p>
            <div class="card-order-list">
                <DropGap dnd=dnd slot=0 />
                {move || entries.get().into_iter().enumerate().map(|(index, entry)| {
                    let on_mousedown = make_on_mousedown(dnd, index);
                    let on_mouseenter = make_on_row_mouseenter(dnd, index);
                    let on_mouseleave = make_on_mouseleave(dnd);

                    let is_dragging = move || dnd.dragging_read.get() == Some(index);
                    let row_class = move || {
                        let mut c = String::from("card-order-item");
                        if is_dragging() { c.push_str(" dragging"); }
                        if dnd.drop_slot_read.get() == Some(DropSlot(index)) { c.push_str(" drop-target"); }
                        c
                    };

                    let visible = entry.visible;
                    let toggled = entry.clone();
                    view! {
                        <div
                            class=row_class
                            on:mousedown=on_mousedown
                            on:mouseenter=on_mouseenter
                            on:mouseleave=on_mouseleave
                        >
                            <span class="drag-handle">"⋮⋮"</span>
                            <span class="card-order-name">{entry.name.clone()}</span>
                            {entry.is_text.then(|| view! { <span class="card-order-badge">"Text"</span> })}
                            <label class="card-visibility-toggle">
                                <input
                                    type="checkbox"
                                    prop:checked=visible
                                    disabled=move || !ctx.is_unlocked()
                                    on:change=move |ev| toggle_visibility(toggled.clone(), event_target_checked(&ev))
                                />
                                <span>"Visible"</span>
                            </label>
                        </div>
                        <DropGap dnd=dnd slot=index + 1 />
                    }
                }).collect_view()}
            </div>
        </section>
    }
}
