//! Leptos DragDrop Utilities
//!
//! Mouse-driven reordering of flat lists for Leptos.
//! Uses movement threshold to distinguish click from drag.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Insertion slot in a list: the dragged entry lands before the entry at this index.
/// A slot equal to the list length means "append".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DropSlot(pub usize);

/// DnD state signals
#[derive(Clone, Copy)]
pub struct DndSignals {
    pub dragging_read: ReadSignal<Option<usize>>,
    pub dragging_write: WriteSignal<Option<usize>>,
    pub drop_slot_read: ReadSignal<Option<DropSlot>>,
    pub drop_slot_write: WriteSignal<Option<DropSlot>>,
    pub drag_just_ended_read: ReadSignal<bool>,
    pub drag_just_ended_write: WriteSignal<bool>,
    /// Pending index (mousedown but not yet dragging)
    pub pending_read: ReadSignal<Option<usize>>,
    pub pending_write: WriteSignal<Option<usize>>,
    /// Start position for movement detection
    pub start_x_read: ReadSignal<i32>,
    pub start_x_write: WriteSignal<i32>,
    pub start_y_read: ReadSignal<i32>,
    pub start_y_write: WriteSignal<i32>,
}

/// Movement threshold in pixels to start dragging
const DRAG_THRESHOLD_PX: i32 = 5;

pub fn create_dnd_signals() -> DndSignals {
    let (dragging_read, dragging_write) = signal(None::<usize>);
    let (drop_slot_read, drop_slot_write) = signal(None::<DropSlot>);
    let (drag_just_ended_read, drag_just_ended_write) = signal(false);
    let (pending_read, pending_write) = signal(None::<usize>);
    let (start_x_read, start_x_write) = signal(0i32);
    let (start_y_read, start_y_write) = signal(0i32);
    DndSignals {
        dragging_read,
        dragging_write,
        drop_slot_read,
        drop_slot_write,
        drag_just_ended_read,
        drag_just_ended_write,
        pending_read,
        pending_write,
        start_x_read,
        start_x_write,
        start_y_read,
        start_y_write,
    }
}

/// Move the entry at `from` so that it lands at `slot`.
///
/// Returns `false` when the move is a no-op (out of range, or dropped onto
/// its own position).
pub fn reorder<T>(items: &mut Vec<T>, from: usize, slot: DropSlot) -> bool {
    let DropSlot(slot) = slot;
    if from >= items.len() || slot > items.len() {
        return false;
    }
    // Slots directly before and after the dragged entry leave the list unchanged
    if slot == from || slot == from + 1 {
        return false;
    }
    let entry = items.remove(from);
    let insert_at = if slot > from { slot - 1 } else { slot };
    items.insert(insert_at, entry);
    true
}

/// End drag operation
pub fn end_drag(dnd: &DndSignals) {
    dnd.dragging_write.set(None);
    dnd.drop_slot_write.set(None);
    dnd.pending_write.set(None);
    dnd.drag_just_ended_write.set(true);

    if let Some(win) = web_sys::window() {
        let clear = dnd.drag_just_ended_write;
        let cb = wasm_bindgen::closure::Closure::<dyn FnMut()>::new(move || {
            let _ = clear.try_set(false);
        });
        let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(cb.as_ref().unchecked_ref(), 100);
        cb.forget();
    }
}

/// Create mousedown handler for draggable rows
/// Records pending drag with start position
pub fn make_on_mousedown(dnd: DndSignals, index: usize) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |ev: web_sys::MouseEvent| {
        if ev.button() == 0 {
            // Form controls inside a row keep their own click behaviour
            if let Some(target) = ev.target() {
                if target.dyn_ref::<web_sys::HtmlInputElement>().is_some() { return; }
                if target.dyn_ref::<web_sys::HtmlButtonElement>().is_some() { return; }
                if target.dyn_ref::<web_sys::HtmlTextAreaElement>().is_some() { return; }
            }
            dnd.pending_write.set(Some(index));
            dnd.start_x_write.set(ev.client_x());
            dnd.start_y_write.set(ev.client_y());
        }
    }
}

/// Create mousemove handler for document - starts drag if moved enough
pub fn bind_global_mousemove(dnd: DndSignals) {
    use wasm_bindgen::closure::Closure;

    let on_mousemove = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
        let Some(pending) = dnd.pending_read.try_get_untracked().flatten() else { return };
        if dnd.dragging_read.try_get_untracked().flatten().is_some() {
            return;
        }

        let dx = (ev.client_x() - dnd.start_x_read.get_untracked()).abs();
        let dy = (ev.client_y() - dnd.start_y_read.get_untracked()).abs();
        if dx > DRAG_THRESHOLD_PX || dy > DRAG_THRESHOLD_PX {
            dnd.dragging_write.set(Some(pending));
        }
    });

    if let Some(win) = web_sys::window() {
        if let Some(doc) = win.document() {
            let _ = doc.add_event_listener_with_callback("mousemove", on_mousemove.as_ref().unchecked_ref());
        }
    }
    on_mousemove.forget();
}

/// Create mouseenter handler for a row: hovering the upper half of a row
/// targets the slot before it, so the row itself is the simplest target.
pub fn make_on_row_mouseenter(dnd: DndSignals, index: usize) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        if dnd.dragging_read.get_untracked().is_some() {
            dnd.drop_slot_write.set(Some(DropSlot(index)));
        }
    }
}

/// Create mouseenter handler for the gaps between rows
pub fn make_on_slot_mouseenter(dnd: DndSignals, slot: usize) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        if dnd.dragging_read.get_untracked().is_some() {
            dnd.drop_slot_write.set(Some(DropSlot(slot)));
        }
    }
}

/// Create mouseleave handler
pub fn make_on_mouseleave(dnd: DndSignals) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        if dnd.dragging_read.get_untracked().is_some() {
            dnd.drop_slot_write.set(None);
        }
    }
}

/// Bind global mouseup handler for drop detection
pub fn bind_global_mouseup<F>(dnd: DndSignals, on_drop: F)
where
    F: Fn(usize, DropSlot) + Clone + 'static,
{
    use wasm_bindgen::closure::Closure;

    let on_mouseup = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |_ev: web_sys::MouseEvent| {
        // Listener outlives the list component; bail out once its signals are gone
        let Some(dragging) = dnd.dragging_read.try_get_untracked() else { return };
        let drop_slot = dnd.drop_slot_read.get_untracked();

        dnd.pending_write.set(None);

        end_drag(&dnd);
        if let (Some(dragged), Some(slot)) = (dragging, drop_slot) {
            on_drop(dragged, slot);
        }
    });

    if let Some(win) = web_sys::window() {
        if let Some(doc) = win.document() {
            let _ = doc.add_event_listener_with_callback("mouseup", on_mouseup.as_ref().unchecked_ref());
        }
    }
    on_mouseup.forget();

    bind_global_mousemove(dnd);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reorder_moves_down() {
        let mut items = vec!["a", "b", "c", "d"];
        assert!(reorder(&mut items, 0, DropSlot(3)));
        assert_eq!(items, vec!["b", "c", "a", "d"]);
    }

    #[test]
    fn test_reorder_moves_up() {
        let mut items = vec!["a", "b", "c", "d"];
        assert!(reorder(&mut items, 3, DropSlot(1)));
        assert_eq!(items, vec!["a", "d", "b", "c"]);
    }

    #[test]
    fn test_reorder_append() {
        let mut items = vec!["a", "b", "c"];
        assert!(reorder(&mut items, 0, DropSlot(3)));
        assert_eq!(items, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_reorder_noop_slots() {
        let mut items = vec!["a", "b", "c"];
        assert!(!reorder(&mut items, 1, DropSlot(1)));
        assert!(!reorder(&mut items, 1, DropSlot(2)));
        assert!(!reorder(&mut items, 5, DropSlot(0)));
        assert!(!reorder(&mut items, 0, DropSlot(9)));
        assert_eq!(items, vec!["a", "b", "c"]);
    }
}
