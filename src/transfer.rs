//! Settings export and import.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};

use crate::brand::BrandSettings;
use crate::error::ImportError;
use crate::layout::LayoutSnapshot;
use crate::storage::keys;

pub const EXPORT_VERSION: &str = "1.0.0";

/// Keys that are never taken from an imported file.
const NEVER_IMPORTED: [&str; 2] = ["adminPassword", "adminUnlocked"];

/// Keys routed to the local partition on import.
const LOCAL_KEYS: [&str; 2] = ["backgroundImage", "companyLogo"];

/// Every key a settings file may carry.
pub fn importable_keys() -> Vec<&'static str> {
    let mut allowed: Vec<&'static str> = BrandSettings::KEYS.to_vec();
    allowed.extend(LayoutSnapshot::KEYS);
    allowed.extend([keys::TRACKERS, keys::LINKS, keys::NOTES, keys::QUICK_RESPONSES, "companyLogo"]);
    allowed.retain(|k| !NEVER_IMPORTED.contains(k));
    allowed
}

/// Whole sync partition plus export metadata, pretty printed.
pub fn export_json(mut sync_data: Map<String, Value>, now: DateTime<Utc>) -> Result<String, serde_json::Error> {
    sync_data.insert("exportDate".into(), Value::String(now.to_rfc3339_opts(SecondsFormat::Millis, true)));
    sync_data.insert("version".into(), Value::String(EXPORT_VERSION.into()));
    serde_json::to_string_pretty(&Value::Object(sync_data))
}

pub fn export_file_name(now_ms: i64) -> String {
    format!("brand-kit-dashboard-settings-{}.json", now_ms)
}

/// Whitelisted values of an imported file, split by partition.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ImportPlan {
    pub sync: Map<String, Value>,
    pub local: Map<String, Value>,
}

impl ImportPlan {
    pub fn len(&self) -> usize {
        self.sync.len() + self.local.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub fn plan_import(text: &str) -> Result<ImportPlan, ImportError> {
    let value: Value = serde_json::from_str(text).map_err(|_| ImportError::InvalidJson)?;
    let Value::Object(data) = value else {
        return Err(ImportError::NotAnObject);
    };

    let allowed = importable_keys();
    let mut plan = ImportPlan::default();
    for (key, value) in data {
        if !allowed.contains(&key.as_str()) {
            continue;
        }
        if LOCAL_KEYS.contains(&key.as_str()) {
            plan.local.insert(key, value);
        } else {
            plan.sync.insert(key, value);
        }
    }

    if plan.is_empty() {
        return Err(ImportError::Empty);
    }
    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_export_adds_metadata() {
        let mut data = Map::new();
        data.insert("userName".into(), json!("Acme"));
        let now = Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap();

        let text = export_json(data, now).unwrap();
        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed["userName"], json!("Acme"));
        assert_eq!(parsed["exportDate"], json!("2026-10-18T12:00:00.000Z"));
        assert_eq!(parsed["version"], json!("1.0.0"));
        assert!(text.contains("\n  "));
    }

    #[test]
    fn test_import_whitelist() {
        let text = r##"{
            "primaryColor": "#000000",
            "links": [{"name": "A", "url": "https://a"}],
            "cardOrder": ["notes", "text-1"],
            "textCards": [],
            "adminPassword": "leaked",
            "adminUnlocked": true,
            "exportDate": "2026-01-01T00:00:00.000Z",
            "somethingElse": 1,
            "backgroundImage": "data:image/png;base64,AAAA"
        }"##;
        let plan = plan_import(text).unwrap();

        let mut sync_keys: Vec<&str> = plan.sync.keys().map(String::as_str).collect();
        sync_keys.sort();
        assert_eq!(sync_keys, vec!["cardOrder", "links", "primaryColor", "textCards"]);
        assert_eq!(plan.local.keys().map(String::as_str).collect::<Vec<_>>(), vec!["backgroundImage"]);
    }

    #[test]
    fn test_import_rejects_bad_input() {
        assert_eq!(plan_import("{not json"), Err(ImportError::InvalidJson));
        assert_eq!(plan_import("[1, 2]"), Err(ImportError::NotAnObject));
        assert_eq!(plan_import(r#"{"adminPassword": "x"}"#), Err(ImportError::Empty));
    }

    #[test]
    fn test_admin_keys_never_importable() {
        let keys = importable_keys();
        assert!(!keys.contains(&"adminPassword"));
        assert!(!keys.contains(&"adminUnlocked"));
        assert!(keys.contains(&"countdowns"));
        assert!(keys.contains(&"quickResponses"));
    }

    #[test]
    fn test_export_file_name() {
        assert_eq!(export_file_name(5), "brand-kit-dashboard-settings-5.json");
    }
}
