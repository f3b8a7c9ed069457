//! # Paste/Copy Arbitration
//!
//! When the user pastes exactly what they last copied or cut from the
//! document, the remote engine still holds the rich version of it on its
//! own clipboard, so we ask it to paste from there and keep formatting.
//! Anything else is an external payload and goes through document
//! transfer.
//!
//! Copy and cut always put *plain text* on the system clipboard, never
//! the platform's HTML rendering of the hidden surface.

use crate::errors::InputError;
use serde::{Deserialize, Serialize};

/// One representation of clipboard content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClipboardItem {
    pub mime_type: String,
    pub data: String,
}

/// Clipboard content delivered with a paste event
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClipboardPayload {
    #[serde(default)]
    pub plain_text: Option<String>,

    /// Raw representations, forwarded unmodified on transfer
    #[serde(default)]
    pub items: Vec<ClipboardItem>,
}

impl ClipboardPayload {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            plain_text: Some(text.into()),
            items: Vec::new(),
        }
    }

    pub fn with_item(mut self, mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        self.items.push(ClipboardItem {
            mime_type: mime_type.into(),
            data: data.into(),
        });
        self
    }
}

/// Platform clipboard write access during a copy/cut event
pub trait SystemClipboard {
    fn set_plain_text(&mut self, text: &str) -> Result<(), InputError>;
}

/// Clipboard that remembers the last text written
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    text: Option<String>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

impl SystemClipboard for MemoryClipboard {
    fn set_plain_text(&mut self, text: &str) -> Result<(), InputError> {
        self.text = Some(text.to_string());
        Ok(())
    }
}

/// Platform without a clipboard write API
#[derive(Debug, Default, Clone, Copy)]
pub struct NoClipboard;

impl SystemClipboard for NoClipboard {
    fn set_plain_text(&mut self, _text: &str) -> Result<(), InputError> {
        Err(InputError::ClipboardUnavailable(
            "platform exposes no clipboard write API".to_string(),
        ))
    }
}

/// Outcome of paste arbitration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasteRoute {
    /// Ask the remote engine to paste from its own clipboard
    RemoteClipboard,
    /// Forward the external payload through document transfer
    DocumentTransfer,
}

#[derive(Debug, Default)]
pub struct ClipboardArbiter {
    last_clipboard_text: Option<String>,
}

impl ClipboardArbiter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_clipboard_text(&self) -> Option<&str> {
        self.last_clipboard_text.as_deref()
    }

    /// Remember the plain text of a local copy/cut
    pub fn record(&mut self, text: impl Into<String>) {
        self.last_clipboard_text = Some(text.into());
    }

    pub fn route(&self, payload: &ClipboardPayload) -> PasteRoute {
        match (&payload.plain_text, &self.last_clipboard_text) {
            (Some(pasted), Some(copied)) if !pasted.is_empty() && pasted == copied => {
                PasteRoute::RemoteClipboard
            }
            _ => PasteRoute::DocumentTransfer,
        }
    }
}
