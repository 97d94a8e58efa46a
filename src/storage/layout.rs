//! Card Layout Storage

use serde_json::{Map, Value};

use super::{keys, load, save, save_value, Area};
use crate::error::StorageError;
use crate::layout::LayoutSnapshot;
use crate::models::{CardId, TextCard};

pub async fn load_layout() -> Result<LayoutSnapshot, StorageError> {
    load(Area::Sync, &LayoutSnapshot::KEYS).await
}

pub async fn save_card_order(order: &[String]) -> Result<(), StorageError> {
    save_value(Area::Sync, keys::CARD_ORDER, order).await
}

pub async fn save_text_cards(text_cards: &[TextCard]) -> Result<(), StorageError> {
    save_value(Area::Sync, keys::TEXT_CARDS, text_cards).await
}

/// Write text cards and order in one `set` so no surface sees one without the other.
pub async fn save_text_cards_and_order(text_cards: &[TextCard], order: &[String]) -> Result<(), StorageError> {
    let mut items = Map::new();
    items.insert(keys::TEXT_CARDS.into(), serde_json::to_value(text_cards).map_err(|e| StorageError::Encode(e.to_string()))?);
    items.insert(keys::CARD_ORDER.into(), Value::from(order.to_vec()));
    save(Area::Sync, &items).await
}

/// Toggle a card's visibility. System cards have their own flag; text cards
/// carry it on the record.
pub async fn set_card_visibility(card: &CardId, visible: bool) -> Result<(), StorageError> {
    match card {
        CardId::System(system) => save_value(Area::Sync, system.visibility_key(), &visible).await,
        CardId::Text(id) => {
            let snapshot = load_layout().await?;
            let mut text_cards = snapshot.text_cards;
            match text_cards.iter_mut().find(|tc| tc.id == *id) {
                Some(card) => card.visible = visible,
                None => {
                    log::warn!("[STORE] Visibility change for missing text card {}", id);
                    return Ok(());
                }
            }
            save_text_cards(&text_cards).await
        }
    }
}
