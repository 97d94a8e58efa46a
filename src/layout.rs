//! Card Layout Reconciler
//!
//! Merges the stored card order, the system-card visibility flags and the
//! text cards into the column placement of the dashboard grid. The order
//! list is the single source of sequencing truth.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::models::{CardId, SystemCard, TextCard};

/// Order used when none has been stored yet
pub const DEFAULT_CARD_ORDER: [&str; 4] = ["trackers", "notes", "links", "todoist"];

pub fn default_card_order() -> Vec<String> {
    DEFAULT_CARD_ORDER.iter().map(|s| s.to_string()).collect()
}

/// Dashboard columns, filled round-robin from the left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Left,
    Center,
    Right,
}

impl Column {
    pub const ALL: [Column; 3] = [Column::Left, Column::Center, Column::Right];

    pub fn index(&self) -> usize {
        match self {
            Column::Left => 0,
            Column::Center => 1,
            Column::Right => 2,
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Column::Left => "column column-left",
            Column::Center => "column column-center",
            Column::Right => "column column-right",
        }
    }
}

/// Everything the reconciler reads, as stored in the sync partition.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutSnapshot {
    #[serde(default, deserialize_with = "lenient_order")]
    pub card_order: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub card_visibility_trackers: Option<bool>,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub card_visibility_notes: Option<bool>,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub card_visibility_links: Option<bool>,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub card_visibility_todoist: Option<bool>,
    #[serde(default, deserialize_with = "lenient_text_cards")]
    pub text_cards: Vec<TextCard>,
}

/// Non-string entries are dropped; anything but a list reads as unset.
fn lenient_order<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(entries) => Some(
            entries
                .into_iter()
                .filter_map(|entry| match entry {
                    Value::String(key) => Some(key),
                    other => {
                        log::warn!("[STORE] Skipping card order entry {}", other);
                        None
                    }
                })
                .collect(),
        ),
        Value::Null => None,
        other => {
            log::warn!("[STORE] Ignoring card order {}", other);
            None
        }
    })
}

fn lenient_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(flag) => Some(flag),
        _ => None,
    })
}

/// Decodes text cards one by one, skipping malformed entries.
fn lenient_text_cards<'de, D>(deserializer: D) -> Result<Vec<TextCard>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = match Value::deserialize(deserializer)? {
        Value::Array(entries) => entries,
        Value::Null => return Ok(Vec::new()),
        other => {
            log::warn!("[STORE] textCards is not a list: {}", other);
            return Ok(Vec::new());
        }
    };

    Ok(entries
        .into_iter()
        .enumerate()
        .filter_map(|(i, entry)| match serde_json::from_value(entry) {
            Ok(card) => Some(card),
            Err(e) => {
                log::warn!("[STORE] Skipping textCards[{}]: {}", i, e);
                None
            }
        })
        .collect())
}

impl LayoutSnapshot {
    pub const KEYS: [&'static str; 6] = [
        "cardOrder",
        "cardVisibilityTrackers",
        "cardVisibilityNotes",
        "cardVisibilityLinks",
        "cardVisibilityTodoist",
        "textCards",
    ];

    pub fn order(&self) -> Vec<String> {
        self.card_order.clone().unwrap_or_else(default_card_order)
    }

    /// System-card visibility, defaulting to visible
    pub fn is_system_visible(&self, card: SystemCard) -> bool {
        let flag = match card {
            SystemCard::Trackers => self.card_visibility_trackers,
            SystemCard::Notes => self.card_visibility_notes,
            SystemCard::Links => self.card_visibility_links,
            SystemCard::Todoist => self.card_visibility_todoist,
        };
        flag != Some(false)
    }

    pub fn visibility_map(&self) -> HashMap<SystemCard, bool> {
        SystemCard::ALL
            .into_iter()
            .map(|card| (card, self.is_system_visible(card)))
            .collect()
    }
}

/// A card resolved against live data.
#[derive(Debug, Clone, PartialEq)]
pub enum PlacedCard {
    System(SystemCard),
    Text(TextCard),
}

impl PlacedCard {
    pub fn key(&self) -> String {
        match self {
            PlacedCard::System(card) => CardId::System(*card).to_key(),
            PlacedCard::Text(card) => CardId::Text(card.id.clone()).to_key(),
        }
    }

    /// Identity for keyed rendering. System widgets keep theirs across
    /// layout changes; a text card gets a new one whenever its title or
    /// content changes.
    pub fn render_key(&self) -> String {
        match self {
            PlacedCard::System(_) => self.key(),
            PlacedCard::Text(card) => format!("{}\u{0}{}\u{0}{}", self.key(), card.title, card.content),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub column: Column,
    pub card: PlacedCard,
}

/// Distribute visible cards over the three columns.
///
/// Unknown ids, deleted text cards and hidden cards are skipped without
/// consuming a column slot.
pub fn reconcile(
    order: &[String],
    visibility: &HashMap<SystemCard, bool>,
    text_cards: &[TextCard],
) -> Vec<Placement> {
    let mut placements = Vec::new();
    let mut placed: HashSet<&str> = HashSet::new();
    let mut cursor = 0usize;

    for key in order {
        if !placed.insert(key.as_str()) {
            continue;
        }
        let card = match CardId::parse(key) {
            Some(CardId::System(card)) => {
                if !visibility.get(&card).copied().unwrap_or(true) {
                    continue;
                }
                PlacedCard::System(card)
            }
            Some(CardId::Text(id)) => match text_cards.iter().find(|tc| tc.id == id) {
                Some(tc) if tc.visible => PlacedCard::Text(tc.clone()),
                _ => continue,
            },
            None => continue,
        };

        placements.push(Placement {
            column: Column::ALL[cursor % Column::ALL.len()],
            card,
        });
        cursor += 1;
    }

    placements
}

/// Reconcile a full storage snapshot.
pub fn reconcile_snapshot(snapshot: &LayoutSnapshot) -> Vec<Placement> {
    reconcile(&snapshot.order(), &snapshot.visibility_map(), &snapshot.text_cards)
}

/// Cards of one column, in render order.
pub fn column_cards(placements: &[Placement], column: Column) -> Vec<PlacedCard> {
    placements
        .iter()
        .filter(|p| p.column == column)
        .map(|p| p.card.clone())
        .collect()
}

// ========================
// Text card lifecycle
// ========================

/// Next text-card id: one past the largest numeric id, 0 when none.
pub fn next_text_card_id(text_cards: &[TextCard]) -> String {
    text_cards
        .iter()
        .filter_map(|tc| tc.id.parse::<u64>().ok())
        .max()
        .map(|max| max + 1)
        .unwrap_or(0)
        .to_string()
}

/// Create a text card and append it to the end of the order.
///
/// Returns the new card; `text_cards` and `order` are updated in place.
pub fn add_text_card(text_cards: &mut Vec<TextCard>, order: &mut Vec<String>) -> TextCard {
    let card = TextCard {
        id: next_text_card_id(text_cards),
        title: String::new(),
        content: String::new(),
        visible: true,
    };
    text_cards.push(card.clone());
    order.push(CardId::Text(card.id.clone()).to_key());
    card
}

/// Remove a text card together with its order entry.
pub fn delete_text_card(text_cards: &mut Vec<TextCard>, order: &mut Vec<String>, id: &str) {
    let key = CardId::Text(id.to_string()).to_key();
    text_cards.retain(|tc| tc.id != id);
    order.retain(|entry| *entry != key);
}

// ========================
// Settings list
// ========================

/// Row of the card-order list on the options page.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderEntry {
    pub key: String,
    pub name: String,
    pub is_text: bool,
    pub visible: bool,
}

/// Entries in stored order, then text cards the order does not mention yet.
/// Stale and unknown ids are dropped from the list.
pub fn order_entries(snapshot: &LayoutSnapshot) -> Vec<OrderEntry> {
    let mut entries: Vec<OrderEntry> = Vec::new();

    for key in snapshot.order() {
        if entries.iter().any(|e| e.key == key) {
            continue;
        }
        match CardId::parse(&key) {
            Some(CardId::System(card)) => entries.push(OrderEntry {
                key,
                name: card.label().to_string(),
                is_text: false,
                visible: snapshot.is_system_visible(card),
            }),
            Some(CardId::Text(id)) => {
                if let Some(tc) = snapshot.text_cards.iter().find(|tc| tc.id == id) {
                    entries.push(OrderEntry {
                        key,
                        name: tc.display_title().to_string(),
                        is_text: true,
                        visible: tc.visible,
                    });
                }
            }
            None => {}
        }
    }

    for tc in &snapshot.text_cards {
        let key = CardId::Text(tc.id.clone()).to_key();
        if !entries.iter().any(|e| e.key == key) {
            entries.push(OrderEntry {
                key,
                name: tc.display_title().to_string(),
                is_text: true,
                visible: tc.visible,
            });
        }
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn text_card(id: &str, visible: bool) -> TextCard {
        TextCard {
            id: id.to_string(),
            title: format!("Card {}", id),
            content: "<b>hi</b>".to_string(),
            visible,
        }
    }

    fn keys(order: &[&str]) -> Vec<String> {
        order.iter().map(|s| s.to_string()).collect()
    }

    fn placed_keys(placements: &[Placement]) -> Vec<(usize, String)> {
        placements.iter().map(|p| (p.column.index(), p.card.key())).collect()
    }

    #[test]
    fn test_round_robin_over_visible_cards() {
        let visibility = HashMap::new();
        let placements = reconcile(&default_card_order(), &visibility, &[]);
        assert_eq!(
            placed_keys(&placements),
            vec![
                (0, "trackers".to_string()),
                (1, "notes".to_string()),
                (2, "links".to_string()),
                (0, "todoist".to_string()),
            ]
        );
    }

    #[test]
    fn test_hidden_card_does_not_consume_column() {
        let mut visibility = HashMap::new();
        visibility.insert(SystemCard::Trackers, false);
        let placements = reconcile(&keys(&["trackers", "notes", "links"]), &visibility, &[]);
        assert_eq!(
            placed_keys(&placements),
            vec![(0, "notes".to_string()), (1, "links".to_string())]
        );
    }

    #[test]
    fn test_hidden_text_card_skipped() {
        let cards = vec![text_card("0", true), text_card("1", false), text_card("2", true)];
        let order = keys(&["text-0", "text-1", "text-2"]);
        let placements = reconcile(&order, &HashMap::new(), &cards);
        assert_eq!(
            placed_keys(&placements),
            vec![(0, "text-0".to_string()), (1, "text-2".to_string())]
        );
    }

    #[test]
    fn test_stale_and_unknown_ids_skipped() {
        let cards = vec![text_card("5", true)];
        let order = keys(&["text-9", "weather", "links", "text-5"]);
        let placements = reconcile(&order, &HashMap::new(), &cards);
        assert_eq!(
            placed_keys(&placements),
            vec![(0, "links".to_string()), (1, "text-5".to_string())]
        );
    }

    #[test]
    fn test_cards_absent_from_order_not_rendered() {
        let cards = vec![text_card("0", true)];
        let placements = reconcile(&keys(&["notes"]), &HashMap::new(), &cards);
        assert_eq!(placed_keys(&placements), vec![(0, "notes".to_string())]);
    }

    #[test]
    fn test_reconcile_is_idempotent() {
        let snapshot = LayoutSnapshot {
            card_order: Some(keys(&["links", "text-1", "trackers", "text-0", "todoist", "notes"])),
            card_visibility_notes: Some(false),
            text_cards: vec![text_card("0", true), text_card("1", true)],
            ..Default::default()
        };
        let first = reconcile_snapshot(&snapshot);
        let second = reconcile_snapshot(&snapshot);
        assert_eq!(first, second);
        assert_eq!(first.len(), 5);
    }

    #[test]
    fn test_snapshot_defaults() {
        let snapshot = LayoutSnapshot::default();
        assert_eq!(snapshot.order(), default_card_order());
        assert!(SystemCard::ALL.iter().all(|c| snapshot.is_system_visible(*c)));
    }

    #[test]
    fn test_column_cards_filters() {
        let placements = reconcile(&default_card_order(), &HashMap::new(), &[]);
        assert_eq!(
            column_cards(&placements, Column::Left),
            vec![PlacedCard::System(SystemCard::Trackers), PlacedCard::System(SystemCard::Todoist)]
        );
        assert_eq!(column_cards(&placements, Column::Right), vec![PlacedCard::System(SystemCard::Links)]);
    }

    #[test]
    fn test_next_text_card_id() {
        assert_eq!(next_text_card_id(&[]), "0");
        let cards = vec![text_card("3", true), text_card("x", true), text_card("7", true)];
        assert_eq!(next_text_card_id(&cards), "8");
    }

    #[test]
    fn test_new_text_card_lands_at_end_of_order() {
        let mut cards = vec![text_card("1", true)];
        let mut order = keys(&["text-1", "links", "trackers"]);
        let card = add_text_card(&mut cards, &mut order);
        assert_eq!(card.id, "2");
        assert_eq!(order.last().map(String::as_str), Some("text-2"));
        assert_eq!(cards.len(), 2);

        // The new card is rendered without any manual reorder
        let placements = reconcile(&order, &HashMap::new(), &cards);
        assert_eq!(placements.last().map(|p| p.card.key()), Some("text-2".to_string()));
    }

    #[test]
    fn test_delete_text_card_removes_order_entry() {
        let mut cards = vec![text_card("0", true), text_card("1", true)];
        let mut order = keys(&["text-0", "notes", "text-1"]);
        delete_text_card(&mut cards, &mut order, "0");
        assert_eq!(order, keys(&["notes", "text-1"]));
        assert_eq!(cards.len(), 1);
    }

    #[test]
    fn test_order_entries_append_unordered_text_cards() {
        let snapshot = LayoutSnapshot {
            card_order: Some(keys(&["notes", "text-9", "trackers", "notes"])),
            card_visibility_trackers: Some(false),
            text_cards: vec![text_card("2", false)],
            ..Default::default()
        };
        let entries = order_entries(&snapshot);
        let summary: Vec<(&str, bool, bool)> =
            entries.iter().map(|e| (e.key.as_str(), e.is_text, e.visible)).collect();
        assert_eq!(
            summary,
            vec![("notes", false, true), ("trackers", false, false), ("text-2", true, false)]
        );
        assert_eq!(entries[0].name, "Notes");
    }

    #[test]
    fn test_duplicate_order_entry_placed_once() {
        let order = keys(&["todoist", "notes", "todoist", "links"]);
        let placements = reconcile(&order, &HashMap::new(), &[]);
        assert_eq!(
            placed_keys(&placements),
            vec![(0, "todoist".to_string()), (1, "notes".to_string()), (2, "links".to_string())]
        );
    }

    #[test]
    fn test_snapshot_skips_malformed_text_card() {
        let snapshot: LayoutSnapshot = serde_json::from_str(
            r#"{
                "cardOrder": ["links", "notes", "text-1"],
                "cardVisibilityNotes": false,
                "textCards": [{"id": "1"}, {"title": "no id"}, {"id": null}, {"id": 4, "title": "Four"}]
            }"#,
        )
        .unwrap();

        assert_eq!(snapshot.order(), keys(&["links", "notes", "text-1"]));
        assert!(!snapshot.is_system_visible(SystemCard::Notes));
        let ids: Vec<&str> = snapshot.text_cards.iter().map(|tc| tc.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "4"]);
        assert_eq!(
            placed_keys(&reconcile_snapshot(&snapshot)),
            vec![(0, "links".to_string()), (1, "text-1".to_string())]
        );
    }

    #[test]
    fn test_snapshot_drops_non_string_order_entries() {
        let snapshot: LayoutSnapshot = serde_json::from_str(
            r#"{"cardOrder": ["notes", 7, null, "trackers"], "cardVisibilityLinks": "no", "textCards": {}}"#,
        )
        .unwrap();
        assert_eq!(snapshot.order(), keys(&["notes", "trackers"]));
        assert_eq!(snapshot.card_visibility_links, None);
        assert!(snapshot.text_cards.is_empty());

        let unset: LayoutSnapshot = serde_json::from_str(r#"{"cardOrder": "notes"}"#).unwrap();
        assert_eq!(unset.order(), default_card_order());
    }

    #[test]
    fn test_render_key_tracks_text_content_only() {
        let notes = PlacedCard::System(SystemCard::Notes);
        assert_eq!(notes.render_key(), "notes");

        let mut card = text_card("3", true);
        let before = PlacedCard::Text(card.clone()).render_key();
        card.content = "<i>edited</i>".to_string();
        let after = PlacedCard::Text(card.clone()).render_key();
        assert_ne!(before, after);
        assert!(after.starts_with("text-3"));

        // Editing a text card leaves the system widgets' keys untouched
        let order = keys(&["todoist", "text-3", "notes"]);
        let old = reconcile(&order, &HashMap::new(), &[text_card("3", true)]);
        let new = reconcile(&order, &HashMap::new(), &[card]);
        let system_keys = |placements: &[Placement]| -> Vec<String> {
            placements
                .iter()
                .filter(|p| matches!(p.card, PlacedCard::System(_)))
                .map(|p| p.card.render_key())
                .collect()
        };
        assert_eq!(system_keys(&old), system_keys(&new));
    }
}
