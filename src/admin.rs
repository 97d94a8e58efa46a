//! Admin Gate
//!
//! Password lock over the options page. The stored record is read once per
//! refresh and turned into an explicit `AdminState` value that views and
//! mutating operations consult.

use serde::{Deserialize, Serialize};

use crate::error::GateError;

/// Admin keys as stored in the sync partition.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_unlocked: Option<bool>,
}

impl AdminRecord {
    pub const KEYS: [&'static str; 2] = ["adminPassword", "adminUnlocked"];

    pub fn has_password(&self) -> bool {
        self.admin_password.as_deref().is_some_and(|p| !p.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AdminState {
    pub has_password: bool,
    /// Stored unlock flag; only meaningful when a password is set
    pub unlocked: bool,
}

impl AdminState {
    pub fn from_record(record: &AdminRecord) -> Self {
        Self {
            has_password: record.has_password(),
            unlocked: record.admin_unlocked == Some(true),
        }
    }

    /// Without a password everything is editable.
    pub fn is_unlocked(&self) -> bool {
        !self.has_password || self.unlocked
    }

    pub fn require_unlocked(&self) -> Result<(), GateError> {
        if self.is_unlocked() {
            Ok(())
        } else {
            Err(GateError::Locked)
        }
    }

    pub fn status_text(&self) -> &'static str {
        if self.is_unlocked() {
            "Settings are unlocked"
        } else {
            "Settings are locked"
        }
    }
}

/// Record to write when the password field is saved.
/// An empty password switches protection off and unlocks.
pub fn set_password(password: &str) -> AdminRecord {
    AdminRecord {
        admin_password: Some(password.to_string()),
        admin_unlocked: Some(password.is_empty()),
    }
}

/// Record to write on a successful unlock attempt.
pub fn unlock(stored: &AdminRecord, entered: &str) -> Result<AdminRecord, GateError> {
    let matches = match stored.admin_password.as_deref() {
        None | Some("") => true,
        Some(password) => password == entered,
    };
    if !matches {
        return Err(GateError::WrongPassword);
    }
    Ok(AdminRecord {
        admin_password: None,
        admin_unlocked: Some(true),
    })
}

pub fn lock() -> AdminRecord {
    AdminRecord {
        admin_password: None,
        admin_unlocked: Some(false),
    }
}

/// Message shown after a password change.
pub fn password_status(password: &str) -> &'static str {
    if password.is_empty() {
        "Password protection disabled. Settings are now unlocked."
    } else {
        "Admin password set successfully! Settings are now locked."
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(password: Option<&str>, unlocked: Option<bool>) -> AdminRecord {
        AdminRecord {
            admin_password: password.map(String::from),
            admin_unlocked: unlocked,
        }
    }

    #[test]
    fn test_effective_unlock_truth_table() {
        let cases = [
            (None, None, true),
            (None, Some(false), true),
            (Some(""), Some(false), true),
            (Some("pw"), None, false),
            (Some("pw"), Some(false), false),
            (Some("pw"), Some(true), true),
        ];
        for (password, unlocked, expected) in cases {
            let state = AdminState::from_record(&record(password, unlocked));
            assert_eq!(state.is_unlocked(), expected, "{:?} {:?}", password, unlocked);
        }
    }

    #[test]
    fn test_locked_state_refuses_mutation() {
        let state = AdminState::from_record(&record(Some("pw"), Some(false)));
        assert_eq!(state.require_unlocked(), Err(GateError::Locked));
        assert_eq!(state.status_text(), "Settings are locked");
    }

    #[test]
    fn test_set_password_locks() {
        let written = set_password("secret");
        assert_eq!(written.admin_unlocked, Some(false));
        assert!(!AdminState::from_record(&written).is_unlocked());

        let cleared = set_password("");
        assert_eq!(cleared.admin_unlocked, Some(true));
        assert!(AdminState::from_record(&cleared).is_unlocked());
    }

    #[test]
    fn test_unlock_checks_password() {
        let stored = record(Some("secret"), Some(false));
        assert_eq!(unlock(&stored, "nope"), Err(GateError::WrongPassword));
        assert_eq!(unlock(&stored, "secret").map(|r| r.admin_unlocked), Ok(Some(true)));

        // No password set: any input unlocks
        assert!(unlock(&record(None, None), "").is_ok());
    }

    #[test]
    fn test_unlock_and_lock_keep_password() {
        let serialized = serde_json::to_value(lock()).unwrap();
        assert_eq!(serialized, serde_json::json!({"adminUnlocked": false}));
    }
}
