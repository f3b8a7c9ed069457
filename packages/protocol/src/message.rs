//! # Outbound Messages
//!
//! Typed form of every frame the input engine sends to the remote
//! document engine. Each message is an independent unit: the channel
//! delivers them in call order and nothing waits for a reply.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Character code sent with an Enter key event
pub const ENTER_CHAR_CODE: u32 = 13;

/// Remote key code for Enter
pub const ENTER_KEY_CODE: u32 = 1280;

/// Identifies the editing surface a message is addressed to
///
/// `TargetId::MAIN` (0) is the document itself; any other value names a
/// dialog or sidebar window hosted next to it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetId(pub u32);

impl TargetId {
    pub const MAIN: TargetId = TargetId(0);

    pub fn is_main(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stage of a composition text operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompositionPhase {
    /// Provisional composition text
    Input,
    /// Commit of the composed text
    End,
}

impl CompositionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompositionPhase::Input => "input",
            CompositionPhase::End => "end",
        }
    }
}

/// Phase of a discrete key event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyPhase {
    /// Key pressed
    Input,
    /// Key released
    Up,
}

impl KeyPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyPhase::Input => "input",
            KeyPhase::Up => "up",
        }
    }
}

/// Clipboard commands the remote engine executes against its own clipboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClipboardCommand {
    Copy,
    Cut,
    Paste,
}

impl ClipboardCommand {
    pub fn uno_name(&self) -> &'static str {
        match self {
            ClipboardCommand::Copy => ".uno:Copy",
            ClipboardCommand::Cut => ".uno:Cut",
            ClipboardCommand::Paste => ".uno:Paste",
        }
    }
}

/// A single outbound protocol message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Message {
    /// Remove characters around the remote cursor
    RemoveText {
        target: TargetId,
        before: usize,
        after: usize,
    },

    /// Composition text (provisional or committed)
    TextInput {
        target: TargetId,
        phase: CompositionPhase,
        text: String,
    },

    /// Discrete key event
    Key {
        target: TargetId,
        phase: KeyPhase,
        char_code: u32,
        key_code: u32,
    },

    /// Remote clipboard command
    ///
    /// The remote engine runs these against whichever window holds focus,
    /// so the target is only used for local routing and is not written to
    /// the frame.
    Clipboard {
        target: TargetId,
        command: ClipboardCommand,
    },
}

impl Message {
    /// Remove `count` characters before the cursor (backspace)
    pub fn remove_before(target: TargetId, count: usize) -> Self {
        Message::RemoveText {
            target,
            before: count,
            after: 0,
        }
    }

    /// Remove `count` characters after the cursor (forward delete)
    pub fn remove_after(target: TargetId, count: usize) -> Self {
        Message::RemoveText {
            target,
            before: 0,
            after: count,
        }
    }

    pub fn composition_input(target: TargetId, text: impl Into<String>) -> Self {
        Message::TextInput {
            target,
            phase: CompositionPhase::Input,
            text: text.into(),
        }
    }

    pub fn composition_commit(target: TargetId, text: impl Into<String>) -> Self {
        Message::TextInput {
            target,
            phase: CompositionPhase::End,
            text: text.into(),
        }
    }

    /// Enter key press
    pub fn enter(target: TargetId) -> Self {
        Message::Key {
            target,
            phase: KeyPhase::Input,
            char_code: ENTER_CHAR_CODE,
            key_code: ENTER_KEY_CODE,
        }
    }

    pub fn clipboard(target: TargetId, command: ClipboardCommand) -> Self {
        Message::Clipboard { target, command }
    }

    pub fn target(&self) -> TargetId {
        match self {
            Message::RemoveText { target, .. }
            | Message::TextInput { target, .. }
            | Message::Key { target, .. }
            | Message::Clipboard { target, .. } => *target,
        }
    }

    /// Serialize to the text frame sent over the channel
    pub fn to_frame(&self) -> String {
        crate::frame::encode(self)
    }

    /// Decode a text frame; see [`crate::parse`]
    pub fn parse(frame: &str) -> crate::error::ProtocolResult<Self> {
        crate::frame::parse(frame)
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_frame())
    }
}
