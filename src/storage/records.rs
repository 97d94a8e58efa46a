//! Record List Storage
//!
//! Trackers, links, notes and quick responses, each a list under one key.

use super::{keys, load_list, save_value, Area};
use crate::error::StorageError;
use crate::models::{Link, Note, QuickResponse, Tracker};

pub async fn load_trackers() -> Result<Vec<Tracker>, StorageError> {
    load_list(Area::Sync, keys::TRACKERS).await
}

pub async fn save_trackers(trackers: &[Tracker]) -> Result<(), StorageError> {
    save_value(Area::Sync, keys::TRACKERS, trackers).await
}

/// Links in canonical shape; legacy single-URL records are folded on read.
pub async fn load_links() -> Result<Vec<Link>, StorageError> {
    load_list(Area::Sync, keys::LINKS).await
}

pub async fn save_links(links: &[Link]) -> Result<(), StorageError> {
    save_value(Area::Sync, keys::LINKS, links).await
}

pub async fn load_notes() -> Result<Vec<Note>, StorageError> {
    load_list(Area::Sync, keys::NOTES).await
}

pub async fn save_notes(notes: &[Note]) -> Result<(), StorageError> {
    save_value(Area::Sync, keys::NOTES, notes).await
}

pub async fn load_quick_responses() -> Result<Vec<QuickResponse>, StorageError> {
    load_list(Area::Sync, keys::QUICK_RESPONSES).await
}

pub async fn save_quick_responses(responses: &[QuickResponse]) -> Result<(), StorageError> {
    save_value(Area::Sync, keys::QUICK_RESPONSES, responses).await
}
