//! Editor input parsing for the options page.
//!
//! Converts raw form fields into stored records. Every record that leaves
//! here is in canonical shape.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};

use crate::error::FormError;
use crate::models::{Link, Note, QuickResponse, Tracker, TrackerKind};

/// Format of `<input type="datetime-local">` values.
const DATETIME_LOCAL_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Prefix `https://` unless the URL already names http or https.
pub fn normalize_url(url: &str) -> String {
    let url = url.trim();
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{}", url)
    }
}

/// Trimmed, normalized URL, or `None` for blank input.
pub fn optional_url(url: &str) -> Option<String> {
    let url = url.trim();
    if url.is_empty() {
        None
    } else {
        Some(normalize_url(url))
    }
}

// ========================
// Trackers
// ========================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackerForm {
    pub name: String,
    pub kind: TrackerKind,
    /// `YYYY-MM-DDTHH:MM` in the browser's local zone
    pub target_local: String,
    pub icon: String,
    pub pinned: bool,
    pub url: String,
}

impl TrackerForm {
    pub fn from_tracker(tracker: &Tracker) -> Self {
        Self {
            name: tracker.name.clone(),
            kind: tracker.kind,
            target_local: tracker.target.with_timezone(&Local).format(DATETIME_LOCAL_FORMAT).to_string(),
            icon: tracker.icon.clone(),
            pinned: tracker.pinned_to_dashboard,
            url: tracker.link_url.clone().unwrap_or_default(),
        }
    }

    /// Build the stored record. `id` is kept on edit; new trackers are keyed
    /// by their creation time in epoch milliseconds.
    pub fn into_tracker<Tz: TimeZone>(self, existing_id: Option<String>, now_ms: i64, tz: &Tz) -> Result<Tracker, FormError> {
        let name = self.name.trim().to_string();
        if name.is_empty() || self.target_local.trim().is_empty() {
            return Err(FormError::MissingTrackerFields);
        }

        let target = parse_local_datetime(self.target_local.trim(), tz)?;

        Ok(Tracker {
            id: existing_id.unwrap_or_else(|| now_ms.to_string()),
            name,
            icon: self.icon.trim().to_string(),
            kind: self.kind,
            target,
            pinned_to_dashboard: self.pinned,
            link_url: optional_url(&self.url),
        })
    }
}

/// Interpret a `datetime-local` value in `tz` and convert it to UTC.
pub fn parse_local_datetime<Tz: TimeZone>(value: &str, tz: &Tz) -> Result<DateTime<Utc>, FormError> {
    let naive = NaiveDateTime::parse_from_str(value, DATETIME_LOCAL_FORMAT)
        .map_err(|_| FormError::InvalidDate(value.to_string()))?;
    // Ambiguous wall-clock times (DST fold) resolve to the earlier instant
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| FormError::InvalidDate(value.to_string()))
}

// ========================
// Links
// ========================

/// Single-link editor with one input per URL.
pub fn link_from_form(name: &str, urls: &[String], icon: &str) -> Result<Link, FormError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(FormError::MissingLinkName);
    }
    let urls: Vec<String> = urls
        .iter()
        .map(|u| u.trim())
        .filter(|u| !u.is_empty())
        .map(normalize_url)
        .collect();
    if urls.is_empty() {
        return Err(FormError::MissingLinkUrl);
    }
    let icon = icon.trim();
    Ok(Link {
        name: name.to_string(),
        urls,
        icon: if icon.is_empty() { None } else { Some(icon.to_string()) },
    })
}

/// Parse batch input, one link per line: `name | url1, url2 | icon`.
///
/// Lines without a name or without any URL are skipped with a warning.
pub fn parse_batch_links(input: &str) -> Result<Vec<Link>, FormError> {
    let mut links = Vec::new();

    for (index, line) in input.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let parts: Vec<&str> = line.split('|').map(str::trim).collect();
        if parts.len() < 2 {
            log::warn!("[OPTIONS] Skipping invalid batch line {}: {}", index + 1, line);
            continue;
        }

        let urls: Vec<String> = parts[1].split(',').map(str::to_string).collect();
        let icon = parts.get(2).copied().unwrap_or_default();
        match link_from_form(parts[0], &urls, icon) {
            Ok(link) => links.push(link),
            Err(e) => log::warn!("[OPTIONS] Skipping batch line {} ({}): {}", index + 1, e, line),
        }
    }

    if links.is_empty() {
        return Err(FormError::NoValidLinks);
    }
    Ok(links)
}

// ========================
// Notes and responses
// ========================

pub fn note_from_form(title: &str, content: &str, url: &str) -> Result<Note, FormError> {
    let (title, content) = (title.trim(), content.trim());
    if title.is_empty() || content.is_empty() {
        return Err(FormError::IncompleteNote);
    }
    Ok(Note {
        title: title.to_string(),
        content: content.to_string(),
        url: optional_url(url),
    })
}

pub fn response_from_form(title: &str, text: &str, category: &str) -> Result<QuickResponse, FormError> {
    let (title, text, category) = (title.trim(), text.trim(), category.trim());
    if title.is_empty() || text.is_empty() {
        return Err(FormError::IncompleteResponse);
    }
    Ok(QuickResponse {
        title: title.to_string(),
        text: text.to_string(),
        category: if category.is_empty() { None } else { Some(category.to_string()) },
    })
}

/// Replace the entry at `index` or append when `index` is `None` or stale.
pub fn upsert<T>(items: &mut Vec<T>, index: Option<usize>, item: T) {
    match index {
        Some(i) if i < items.len() => items[i] = item,
        _ => items.push(item),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_normalize_url() {
        assert_eq!(normalize_url("example.com"), "https://example.com");
        assert_eq!(normalize_url(" http://a.b "), "http://a.b");
        assert_eq!(normalize_url("https://a.b/x"), "https://a.b/x");
        assert_eq!(optional_url("   "), None);
    }

    #[test]
    fn test_batch_links() {
        let input = "Docs | docs.example.com | 📚\n\
                     \n\
                     broken line\n\
                     Work | https://mail.example, calendar.example\n\
                     | nameless.example\n\
                     Empty |  , ";
        let links = parse_batch_links(input).unwrap();
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].name, "Docs");
        assert_eq!(links[0].urls, vec!["https://docs.example.com".to_string()]);
        assert_eq!(links[0].icon.as_deref(), Some("📚"));
        assert_eq!(
            links[1].urls,
            vec!["https://mail.example".to_string(), "https://calendar.example".to_string()]
        );
        assert_eq!(links[1].icon, None);
    }

    #[test]
    fn test_batch_links_all_invalid() {
        assert_eq!(parse_batch_links("nothing here\n"), Err(FormError::NoValidLinks));
    }

    #[test]
    fn test_link_form_requires_name_and_url() {
        assert_eq!(link_from_form(" ", &["a.com".into()], ""), Err(FormError::MissingLinkName));
        assert_eq!(link_from_form("A", &["  ".into()], ""), Err(FormError::MissingLinkUrl));
    }

    #[test]
    fn test_tracker_form_new_and_edit() {
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        let form = TrackerForm {
            name: " Launch ".into(),
            kind: TrackerKind::Countdown,
            target_local: "2026-12-01T10:30".into(),
            icon: "🚀".into(),
            pinned: true,
            url: "launch.example".into(),
        };

        let created = form.clone().into_tracker(None, 1_760_000_000_000, &tz).unwrap();
        assert_eq!(created.id, "1760000000000");
        assert_eq!(created.name, "Launch");
        assert_eq!(created.target.to_rfc3339(), "2026-12-01T08:30:00+00:00");
        assert_eq!(created.link_url.as_deref(), Some("https://launch.example"));

        let edited = form.into_tracker(Some("42".into()), 1, &tz).unwrap();
        assert_eq!(edited.id, "42");
    }

    #[test]
    fn test_tracker_form_validation() {
        let tz = FixedOffset::east_opt(0).unwrap();
        let missing = TrackerForm { target_local: "2026-01-01T00:00".into(), ..Default::default() };
        assert_eq!(missing.into_tracker(None, 0, &tz), Err(FormError::MissingTrackerFields));

        let bad = TrackerForm { name: "x".into(), target_local: "tomorrow".into(), ..Default::default() };
        assert_eq!(bad.into_tracker(None, 0, &tz), Err(FormError::InvalidDate("tomorrow".into())));
    }

    #[test]
    fn test_note_and_response_forms() {
        assert_eq!(note_from_form("T", "", ""), Err(FormError::IncompleteNote));
        let note = note_from_form("T", "C", "x.io").unwrap();
        assert_eq!(note.url.as_deref(), Some("https://x.io"));

        assert_eq!(response_from_form("", "t", ""), Err(FormError::IncompleteResponse));
        let response = response_from_form("Hi", "Hello there", " ").unwrap();
        assert_eq!(response.category, None);
    }

    #[test]
    fn test_upsert() {
        let mut items = vec![1, 2];
        upsert(&mut items, Some(0), 9);
        upsert(&mut items, None, 3);
        upsert(&mut items, Some(10), 4);
        assert_eq!(items, vec![9, 2, 3, 4]);
    }
}
