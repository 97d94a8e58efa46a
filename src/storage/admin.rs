//! Admin Lock Storage

use super::{keys, load, save, save_value, Area};
use crate::admin::{AdminRecord, AdminState};
use crate::error::{GateError, StorageError};

pub async fn load_admin_record() -> Result<AdminRecord, StorageError> {
    load(Area::Sync, &AdminRecord::KEYS).await
}

/// Current gate state.
pub async fn load_admin_state() -> Result<AdminState, StorageError> {
    let record = load_admin_record().await?;
    // Without a password the stored flag is kept at unlocked
    if !record.has_password() && record.admin_unlocked != Some(true) {
        save_value(Area::Sync, keys::ADMIN_UNLOCKED, &true).await?;
    }
    Ok(AdminState::from_record(&record))
}

pub async fn write_admin_record(record: &AdminRecord) -> Result<(), StorageError> {
    save(Area::Sync, record).await
}

/// Fresh lock check against the store, run before every mutation.
pub async fn require_unlocked() -> Result<(), GateError> {
    let record = load_admin_record().await?;
    AdminState::from_record(&record).require_unlocked()
}
