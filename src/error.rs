//! Error Types
//!
//! Typed failures for the browser collaborators. None of these are fatal:
//! callers degrade to defaults or inline status text.

use thiserror::Error;

/// Extension storage failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StorageError {
    /// The host rejected or failed the call (quota, missing permission, ...)
    #[error("storage call failed: {0}")]
    Host(String),

    /// A stored value did not match the expected shape
    #[error("could not decode stored value: {0}")]
    Decode(String),

    /// A value could not be converted for the host
    #[error("could not encode value: {0}")]
    Encode(String),
}

impl From<serde_wasm_bindgen::Error> for StorageError {
    fn from(e: serde_wasm_bindgen::Error) -> Self {
        StorageError::Decode(e.to_string())
    }
}

/// Todoist REST failures, rendered inline in the widget.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TodoistError {
    #[error("Configure Todoist API key in settings")]
    MissingApiKey,

    #[error("Invalid API token")]
    Unauthorized,

    #[error("API error: {0}")]
    Status(u16),

    #[error("{0}")]
    Network(String),

    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for TodoistError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            TodoistError::Decode(e.to_string())
        } else {
            TodoistError::Network(e.to_string())
        }
    }
}

/// Settings import failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ImportError {
    #[error("Invalid file format")]
    InvalidJson,

    #[error("Settings file must contain a JSON object")]
    NotAnObject,

    #[error("No recognised settings in file")]
    Empty,
}

/// Rejected editor input on the options page.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormError {
    #[error("Please fill in all required fields")]
    MissingTrackerFields,

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Name is required!")]
    MissingLinkName,

    #[error("At least one URL is required!")]
    MissingLinkUrl,

    #[error("No valid links found. Please check your format.")]
    NoValidLinks,

    #[error("Title and content are required!")]
    IncompleteNote,

    #[error("Title and text are required!")]
    IncompleteResponse,
}

/// Refusal of a mutating options operation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GateError {
    #[error("Settings are locked! Unlock settings to make changes.")]
    Locked,

    #[error("Incorrect password!")]
    WrongPassword,

    #[error(transparent)]
    Storage(#[from] StorageError),
}
