//! Error types for the input engine
//!
//! None of these reach the host as failures: event handlers log them and
//! carry on, preferring resynchronization over surfacing an error.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("System clipboard is not writable: {0}")]
    ClipboardUnavailable(String),

    #[error("Edit permission required to focus the input surface")]
    PermissionDenied,
}
