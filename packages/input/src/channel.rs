//! Outbound channel to the remote document engine.

use crate::clipboard::ClipboardPayload;
use imebridge_protocol::{Message, TargetId};

/// Fire-and-forget sink shared by everything that talks to the remote
/// engine
///
/// Delivery and acknowledgement are the channel's business; the engine
/// only guarantees call order.
pub trait OutboundChannel {
    fn send(&mut self, message: Message);

    /// Hand an external clipboard payload to the document-transfer path
    /// for conversion and upload
    fn transfer_document(&mut self, target: TargetId, payload: ClipboardPayload);
}

/// Everything the engine emitted, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    Message(Message),
    DocumentTransfer {
        target: TargetId,
        payload: ClipboardPayload,
    },
}

/// Channel that keeps what it is given
#[derive(Debug, Default)]
pub struct RecordingChannel {
    sent: Vec<Outbound>,
}

impl RecordingChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> &[Outbound] {
        &self.sent
    }

    /// Protocol messages only, skipping document transfers
    pub fn messages(&self) -> Vec<Message> {
        self.sent
            .iter()
            .filter_map(|out| match out {
                Outbound::Message(message) => Some(message.clone()),
                Outbound::DocumentTransfer { .. } => None,
            })
            .collect()
    }

    pub fn frames(&self) -> Vec<String> {
        self.messages().iter().map(Message::to_frame).collect()
    }

    pub fn transfers(&self) -> usize {
        self.sent
            .iter()
            .filter(|out| matches!(out, Outbound::DocumentTransfer { .. }))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.sent.is_empty()
    }

    /// Drain everything recorded so far
    pub fn take(&mut self) -> Vec<Outbound> {
        std::mem::take(&mut self.sent)
    }
}

impl OutboundChannel for RecordingChannel {
    fn send(&mut self, message: Message) {
        self.sent.push(Outbound::Message(message));
    }

    fn transfer_document(&mut self, target: TargetId, payload: ClipboardPayload) {
        self.sent.push(Outbound::DocumentTransfer { target, payload });
    }
}
