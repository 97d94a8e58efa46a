//! Store change classification.
//!
//! Maps the keys of a `storage.onChanged` event onto the parts of a page
//! that must reload.

use std::collections::BTreeSet;

use crate::admin::AdminRecord;
use crate::brand::{BrandImages, BrandSettings};
use crate::layout::LayoutSnapshot;
use crate::storage::keys;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RefreshScope {
    Admin,
    Layout,
    Brand,
    Trackers,
    Links,
    Notes,
    Responses,
    Todoist,
    Images,
}

fn scope_for_key(area: &str, key: &str) -> Option<RefreshScope> {
    if area == "local" {
        return BrandImages::KEYS.contains(&key).then_some(RefreshScope::Images);
    }
    if area != "sync" {
        return None;
    }

    match key {
        keys::TRACKERS => Some(RefreshScope::Trackers),
        keys::LINKS => Some(RefreshScope::Links),
        keys::NOTES => Some(RefreshScope::Notes),
        keys::QUICK_RESPONSES => Some(RefreshScope::Responses),
        keys::TODOIST_API_KEY => Some(RefreshScope::Todoist),
        // Legacy sync copy of the background image
        keys::BACKGROUND_IMAGE => Some(RefreshScope::Images),
        k if AdminRecord::KEYS.contains(&k) => Some(RefreshScope::Admin),
        k if LayoutSnapshot::KEYS.contains(&k) => Some(RefreshScope::Layout),
        k if BrandSettings::KEYS.contains(&k) => Some(RefreshScope::Brand),
        _ => None,
    }
}

/// Scopes touched by a change event in `area` ("sync" or "local").
pub fn classify<'a>(area: &str, changed: impl IntoIterator<Item = &'a str>) -> BTreeSet<RefreshScope> {
    changed.into_iter().filter_map(|key| scope_for_key(area, key)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn scopes(area: &str, changed: &[&str]) -> Vec<RefreshScope> {
        classify(area, changed.iter().copied()).into_iter().collect()
    }

    #[test]
    fn test_layout_keys() {
        assert_eq!(
            scopes("sync", &["cardOrder", "textCards", "cardVisibilityTodoist"]),
            vec![RefreshScope::Layout]
        );
    }

    #[test]
    fn test_record_keys() {
        assert_eq!(
            scopes("sync", &["countdowns", "links", "notes", "quickResponses"]),
            vec![RefreshScope::Trackers, RefreshScope::Links, RefreshScope::Notes, RefreshScope::Responses]
        );
    }

    #[test]
    fn test_brand_admin_and_todoist() {
        assert_eq!(
            scopes("sync", &["primaryColor", "adminUnlocked", "todoistApiKey", "businessInfoLine3"]),
            vec![RefreshScope::Admin, RefreshScope::Brand, RefreshScope::Todoist]
        );
    }

    #[test]
    fn test_local_images_only() {
        assert_eq!(scopes("local", &["backgroundImage", "companyLogo"]), vec![RefreshScope::Images]);
        assert_eq!(scopes("local", &["links"]), Vec::<RefreshScope>::new());
        assert_eq!(scopes("managed", &["primaryColor"]), Vec::<RefreshScope>::new());
    }

    #[test]
    fn test_unknown_keys_ignored() {
        assert_eq!(scopes("sync", &["dailyFocus", "reminders"]), Vec::<RefreshScope>::new());
    }
}
