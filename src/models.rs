//! Dashboard Models
//!
//! Data structures matching the records kept in extension storage.
//! Legacy shapes are normalized here, at the store-read boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

fn default_true() -> bool {
    true
}

/// Accepts ids stored either as strings or as bare numbers.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Str(s) => s,
        Raw::Int(n) => n.to_string(),
        Raw::Float(f) => format!("{}", f),
    })
}

// ========================
// Trackers
// ========================

/// Countdown counts towards the target, count-up counts away from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum TrackerKind {
    #[default]
    Countdown,
    Countup,
}

impl From<String> for TrackerKind {
    fn from(value: String) -> Self {
        // Anything that is not explicitly a count-up behaves as a countdown
        if value == "countup" {
            TrackerKind::Countup
        } else {
            TrackerKind::Countdown
        }
    }
}

impl From<TrackerKind> for &'static str {
    fn from(kind: TrackerKind) -> Self {
        kind.as_str()
    }
}

impl TrackerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrackerKind::Countdown => "countdown",
            TrackerKind::Countup => "countup",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TrackerKind::Countdown => "Countdown",
            TrackerKind::Countup => "Count up",
        }
    }
}

/// A named countdown or count-up tied to an absolute instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tracker {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(rename = "type", default)]
    pub kind: TrackerKind,
    #[serde(rename = "date")]
    pub target: DateTime<Utc>,
    #[serde(rename = "pinnedToDashboard", default = "default_true")]
    pub pinned_to_dashboard: bool,
    #[serde(rename = "url", default, skip_serializing_if = "Option::is_none")]
    pub link_url: Option<String>,
}

impl Tracker {
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() { "Tracker" } else { &self.name }
    }

    pub fn display_icon(&self) -> &str {
        if self.icon.is_empty() { "⏰" } else { &self.icon }
    }
}

// ========================
// Links
// ========================

/// Link as it may appear in storage: older records carry a single `url`.
#[derive(Debug, Clone, Deserialize)]
struct StoredLink {
    #[serde(default)]
    name: String,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    urls: Option<Vec<String>>,
    #[serde(default)]
    icon: Option<String>,
}

/// Pinned link, always in canonical multi-URL shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredLink")]
pub struct Link {
    pub name: String,
    pub urls: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl From<StoredLink> for Link {
    fn from(raw: StoredLink) -> Self {
        let urls = match (raw.urls, raw.url) {
            (Some(urls), _) => urls,
            (None, Some(url)) if !url.is_empty() => vec![url],
            _ => Vec::new(),
        };
        Link {
            name: raw.name,
            urls,
            icon: raw.icon.filter(|i| !i.trim().is_empty()),
        }
    }
}

impl Link {
    /// Explicit icon, else the uppercased first letter of the name, else 🔗
    pub fn display_icon(&self) -> String {
        if let Some(icon) = &self.icon {
            return icon.clone();
        }
        self.name
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_else(|| "🔗".to_string())
    }
}

// ========================
// Notes, responses, text cards
// ========================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Canned text copied from the popup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickResponse {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl QuickResponse {
    /// Case-insensitive match on title, text or category; blank queries match all.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        self.title.to_lowercase().contains(&query)
            || self.text.to_lowercase().contains(&query)
            || self.category.as_deref().is_some_and(|c| c.to_lowercase().contains(&query))
    }
}

/// Responses matching the popup search box, in stored order.
pub fn filter_responses(responses: &[QuickResponse], query: &str) -> Vec<QuickResponse> {
    responses.iter().filter(|r| r.matches(query)).cloned().collect()
}

/// User-authored dashboard tile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextCard {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    /// Admin-authored HTML, sanitized before rendering
    #[serde(default)]
    pub content: String,
    #[serde(default = "default_true")]
    pub visible: bool,
}

impl TextCard {
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() { "Text Card" } else { &self.title }
    }
}

// ========================
// Cards
// ========================

/// Built-in dashboard widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SystemCard {
    Trackers,
    Notes,
    Links,
    Todoist,
}

impl SystemCard {
    pub const ALL: [SystemCard; 4] = [
        SystemCard::Trackers,
        SystemCard::Notes,
        SystemCard::Links,
        SystemCard::Todoist,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            SystemCard::Trackers => "trackers",
            SystemCard::Notes => "notes",
            SystemCard::Links => "links",
            SystemCard::Todoist => "todoist",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        SystemCard::ALL.into_iter().find(|c| c.key() == key)
    }

    /// Storage key of the per-card visibility flag
    pub fn visibility_key(&self) -> &'static str {
        match self {
            SystemCard::Trackers => "cardVisibilityTrackers",
            SystemCard::Notes => "cardVisibilityNotes",
            SystemCard::Links => "cardVisibilityLinks",
            SystemCard::Todoist => "cardVisibilityTodoist",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SystemCard::Trackers => "Trackers",
            SystemCard::Notes => "Notes",
            SystemCard::Links => "Quick Links",
            SystemCard::Todoist => "Todoist",
        }
    }
}

const TEXT_CARD_PREFIX: &str = "text-";

/// Entry of the persisted card order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CardId {
    System(SystemCard),
    Text(String),
}

impl CardId {
    /// Parse an order entry; unknown system ids yield `None`.
    pub fn parse(key: &str) -> Option<Self> {
        if let Some(id) = key.strip_prefix(TEXT_CARD_PREFIX) {
            return Some(CardId::Text(id.to_string()));
        }
        SystemCard::from_key(key).map(CardId::System)
    }

    pub fn to_key(&self) -> String {
        match self {
            CardId::System(card) => card.key().to_string(),
            CardId::Text(id) => format!("{}{}", TEXT_CARD_PREFIX, id),
        }
    }
}

// ========================
// Todoist
// ========================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodoistDue {
    pub date: String,
}

/// Task record returned by the Todoist REST API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodoistTask {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub due: Option<TodoistDue>,
    #[serde(default = "default_priority")]
    pub priority: u8,
    #[serde(default)]
    pub order: i64,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub url: Option<String>,
}

fn default_priority() -> u8 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_link_legacy_url_is_folded() {
        let link: Link = serde_json::from_str(r#"{"name":"Docs","url":"https://docs.example"}"#).unwrap();
        assert_eq!(link.urls, vec!["https://docs.example".to_string()]);
        assert_eq!(link.icon, None);

        let both: Link = serde_json::from_str(
            r#"{"name":"Both","url":"https://old","urls":["https://a","https://b"],"icon":"📚"}"#,
        )
        .unwrap();
        assert_eq!(both.urls.len(), 2);
        assert_eq!(both.icon.as_deref(), Some("📚"));
    }

    #[test]
    fn test_link_serializes_canonical_shape() {
        let link: Link = serde_json::from_str(r#"{"name":"Docs","url":"https://docs.example"}"#).unwrap();
        let value = serde_json::to_value(&link).unwrap();
        assert_eq!(value, serde_json::json!({"name": "Docs", "urls": ["https://docs.example"]}));
    }

    #[test]
    fn test_link_display_icon() {
        let link = Link { name: "mail".into(), urls: vec![], icon: None };
        assert_eq!(link.display_icon(), "M");
        let unnamed = Link { name: String::new(), urls: vec![], icon: None };
        assert_eq!(unnamed.display_icon(), "🔗");
    }

    #[test]
    fn test_tracker_parses_stored_shape() {
        let tracker: Tracker = serde_json::from_str(
            r#"{"id":"1700000000000","name":"Launch","type":"countup","date":"2024-01-01T00:00:00.000Z","icon":"🚀"}"#,
        )
        .unwrap();
        assert_eq!(tracker.kind, TrackerKind::Countup);
        assert!(tracker.pinned_to_dashboard);
        assert_eq!(tracker.link_url, None);
        assert_eq!(tracker.target.timestamp_millis(), 1_704_067_200_000);
    }

    #[test]
    fn test_tracker_unknown_type_is_countdown() {
        let tracker: Tracker =
            serde_json::from_str(r#"{"id":"1","type":"weird","date":"2024-01-01T00:00:00Z"}"#).unwrap();
        assert_eq!(tracker.kind, TrackerKind::Countdown);
        assert_eq!(tracker.display_name(), "Tracker");
        assert_eq!(tracker.display_icon(), "⏰");
    }

    #[test]
    fn test_text_card_numeric_id() {
        let card: TextCard = serde_json::from_str(r#"{"id":3,"title":"Hi"}"#).unwrap();
        assert_eq!(card.id, "3");
        assert!(card.visible);
    }

    #[test]
    fn test_response_search() {
        let responses = vec![
            QuickResponse { title: "Greeting".into(), text: "Hello!".into(), category: None },
            QuickResponse { title: "Refund".into(), text: "We processed it".into(), category: Some("Billing".into()) },
        ];
        assert_eq!(filter_responses(&responses, "").len(), 2);
        assert_eq!(filter_responses(&responses, "HELLO")[0].title, "Greeting");
        assert_eq!(filter_responses(&responses, "billing")[0].title, "Refund");
        assert!(filter_responses(&responses, "shipping").is_empty());
    }

    #[test]
    fn test_card_id_round_trip_keys() {
        assert_eq!(CardId::parse("notes"), Some(CardId::System(SystemCard::Notes)));
        assert_eq!(CardId::parse("text-12"), Some(CardId::Text("12".into())));
        assert_eq!(CardId::parse("weather"), None);
        assert_eq!(CardId::Text("4".into()).to_key(), "text-4");
    }
}
