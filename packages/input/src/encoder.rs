//! # Protocol Encoder
//!
//! Turns an edit script into the ordered operations sent to the remote
//! engine.
//!
//! Composition messages do not handle line breaks well, neither alone nor
//! inside a composed word, so every line break becomes a discrete Enter
//! key event followed by a surface reset. Text between line breaks is sent
//! as a composition input immediately committed.

use crate::differ::EditScript;
use crate::platform::PlatformQuirks;
use imebridge_protocol::{Message, TargetId};
use tracing::debug;

/// One encoded operation, in send order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodedStep {
    Send(Message),
    ResetSurface,
}

fn is_line_break(c: char) -> bool {
    c == '\n' || c == '\r'
}

#[derive(Debug, Clone)]
pub struct ProtocolEncoder {
    target: TargetId,
    quirks: PlatformQuirks,
}

impl ProtocolEncoder {
    pub fn new(target: TargetId, quirks: PlatformQuirks) -> Self {
        Self { target, quirks }
    }

    pub fn target(&self) -> TargetId {
        self.target
    }

    /// Encode a full diff step: removal first, then insertion
    pub fn encode(&self, script: &EditScript) -> Vec<EncodedStep> {
        let mut steps = Vec::new();
        if script.remove_count > 0 {
            steps.push(EncodedStep::Send(Message::remove_before(
                self.target,
                script.remove_count,
            )));
        }
        if !script.inserted_text.is_empty() {
            steps.extend(self.encode_insertion(&script.inserted_text));
        }
        steps
    }

    /// Encode inserted text
    pub fn encode_insertion(&self, text: &str) -> Vec<EncodedStep> {
        let mut steps = Vec::new();

        let mut chars = text.chars();
        let lone_break = matches!((chars.next(), chars.next()), (Some(c), None) if is_line_break(c));

        if lone_break {
            if self.quirks.duplicate_enter_key_event {
                debug!("Dropping line break already sent as a key event by the platform");
            } else {
                steps.push(EncodedStep::Send(Message::enter(self.target)));
                steps.push(EncodedStep::ResetSurface);
            }
            return steps;
        }

        for (i, part) in text.split(is_line_break).enumerate() {
            if i > 0 {
                steps.push(EncodedStep::Send(Message::enter(self.target)));
                steps.push(EncodedStep::ResetSurface);
            }
            if !part.is_empty() {
                steps.push(EncodedStep::Send(Message::composition_input(self.target, part)));
                steps.push(EncodedStep::Send(Message::composition_commit(self.target, part)));
            }
        }

        debug!(text_len = text.chars().count(), steps = steps.len(), "Encoded insertion");
        steps
    }
}
