//! # Input Engine
//!
//! One engine per editing surface. It owns the surface guard, the last
//! accepted snapshot, composition state and the clipboard arbiter, and
//! pushes encoded operations to the outbound channel in call order.
//!
//! ## Flow
//!
//! ```text
//! raw change ──► guard (echo? sentinels?) ──► diff ──► encoder ──► channel
//!                     │                                   │
//!                     └── boundary delete ──► reset ◄─────┘ line break
//! ```
//!
//! Everything runs on the caller's thread and nothing blocks. A reset
//! writes the sentinel padding with the guard raised, so notifications the
//! write provokes are dropped instead of diffed.

use crate::channel::OutboundChannel;
use crate::clipboard::{ClipboardArbiter, ClipboardPayload, PasteRoute, SystemClipboard};
use crate::composition::{AbortTrigger, CompositionMachine, CompositionState};
use crate::differ::{diff, Snapshot};
use crate::encoder::{EncodedStep, ProtocolEncoder};
use crate::errors::InputError;
use crate::platform::{Permission, PlatformQuirks};
use crate::surface::{
    is_navigation_key, EditingSurface, RawChange, SurfaceGuard, SENTINEL_CARET, SENTINEL_PADDING,
};
use imebridge_protocol::{ClipboardCommand, Message, TargetId};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Whether the host should let the platform run its default handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventDisposition {
    PreventDefault,
    Default,
}

/// Construction parameters for [`InputEngine`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineOptions {
    #[serde(default)]
    pub target: TargetId,

    #[serde(default)]
    pub quirks: PlatformQuirks,

    #[serde(default)]
    pub permission: Permission,
}

pub struct InputEngine<S: EditingSurface, C: OutboundChannel> {
    surface: S,
    channel: C,
    guard: SurfaceGuard,
    /// Last content diffed and forwarded, without sentinels
    last_content: Snapshot,
    composition: CompositionMachine,
    encoder: ProtocolEncoder,
    clipboard: ClipboardArbiter,
    permission: Permission,
}

impl<S: EditingSurface, C: OutboundChannel> InputEngine<S, C> {
    /// Create an engine and bring the surface to its padded empty state
    pub fn new(surface: S, channel: C, options: EngineOptions) -> Self {
        let mut engine = Self {
            surface,
            channel,
            guard: SurfaceGuard::new(),
            last_content: Snapshot::new(),
            composition: CompositionMachine::new(),
            encoder: ProtocolEncoder::new(options.target, options.quirks),
            clipboard: ClipboardArbiter::new(),
            permission: options.permission,
        };
        engine.reset();
        engine
    }

    pub fn target(&self) -> TargetId {
        self.encoder.target()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Direct surface access, for hosts that simulate typing
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    pub fn channel_mut(&mut self) -> &mut C {
        &mut self.channel
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.last_content
    }

    pub fn composition_state(&self) -> CompositionState {
        self.composition.state()
    }

    pub fn last_clipboard_text(&self) -> Option<&str> {
        self.clipboard.last_clipboard_text()
    }

    pub fn permission(&self) -> Permission {
        self.permission
    }

    pub fn set_permission(&mut self, permission: Permission) {
        self.permission = permission;
    }

    // ------------------------------------------------------------------
    // Surface guard
    // ------------------------------------------------------------------

    /// Rewrite the surface to the sentinel padding and forget the snapshot
    pub fn reset(&mut self) {
        self.guard.begin_write();
        debug!(depth = self.guard.pending_writes(), "Resetting input surface");

        self.last_content.clear();
        let echoes = self.surface.write(SENTINEL_PADDING, SENTINEL_CARET);
        for raw in echoes {
            self.on_raw_change(&raw);
        }

        self.guard.end_write();
    }

    /// Content-change notification with the surface's full raw text
    pub fn on_raw_change(&mut self, raw: &str) {
        self.handle_change(Snapshot::from(raw));
    }

    /// Same as [`InputEngine::on_raw_change`] for hosts that hand out
    /// UTF-16 code units
    pub fn on_raw_change_utf16(&mut self, raw: &[u16]) {
        self.handle_change(Snapshot::from_utf16(raw));
    }

    fn handle_change(&mut self, raw: Snapshot) {
        match self.guard.classify(raw) {
            RawChange::Echo => {
                debug!(pending = self.guard.pending_writes(), "Ignoring synthetic input");
            }
            RawChange::Backspace => {
                debug!("Sending backspace");
                self.channel.send(Message::remove_before(self.target(), 1));
                self.reset();
            }
            RawChange::ForwardDelete => {
                debug!("Sending delete");
                self.channel.send(Message::remove_after(self.target(), 1));
                self.reset();
            }
            RawChange::Content(current) => self.apply_content(current),
        }
    }

    fn apply_content(&mut self, current: Snapshot) {
        let script = diff(self.last_content.chars(), current.chars());
        debug!(
            match_to = self.last_content.len() - script.remove_count,
            previous = %self.last_content,
            current = %current,
            remove = script.remove_count,
            "Compared snapshots"
        );

        let steps = self.encoder.encode(&script);
        self.last_content = current;
        self.run(steps);
    }

    fn run(&mut self, steps: Vec<EncodedStep>) {
        for step in steps {
            match step {
                EncodedStep::Send(message) => self.channel.send(message),
                EncodedStep::ResetSurface => self.reset(),
            }
        }
    }

    /// Navigation keys move the caret outside the padding; start over
    pub fn on_key_up(&mut self, key: &str) {
        if is_navigation_key(key) {
            debug!(key, "Navigation key released");
            self.reset();
        }
    }

    /// Focus the surface, if the user may edit
    pub fn focus(&mut self) {
        match self.check_edit_permission() {
            Ok(()) => self.surface.focus(),
            Err(e) => warn!(error = %e, "Dropping focus request"),
        }
    }

    pub fn blur(&mut self) {
        self.surface.blur();
    }

    /// Mark the surface content selected for system clipboard interaction
    pub fn select(&mut self) {
        self.surface.select_all();
    }

    fn check_edit_permission(&self) -> Result<(), InputError> {
        if self.permission.can_edit() {
            Ok(())
        } else {
            Err(InputError::PermissionDenied)
        }
    }

    // ------------------------------------------------------------------
    // Composition
    // ------------------------------------------------------------------

    pub fn on_composition_start(&mut self) {
        self.composition.start();
    }

    pub fn on_composition_update(&mut self, raw: &str) {
        self.on_raw_change(raw);
    }

    pub fn on_composition_end(&mut self, raw: &str) {
        self.on_raw_change(raw);
        self.composition.end();
    }

    /// Pointer interaction outside the surface, or focus loss
    pub fn on_abort(&mut self, trigger: AbortTrigger) {
        let was_composing = self.composition.is_composing();
        if self.composition.abort(trigger) {
            info!(?trigger, was_composing, "Aborting composition");
            self.reset();
        }
    }

    /// The surface lost focus
    pub fn on_blur(&mut self) {
        self.on_abort(AbortTrigger::FocusLoss);
    }

    fn force_abort(&mut self) {
        info!(was_composing = self.composition.is_composing(), "Aborting composition");
        self.composition.end();
        self.reset();
    }

    // ------------------------------------------------------------------
    // Clipboard
    // ------------------------------------------------------------------

    /// Paste into the document instead of the surface
    pub fn on_paste(&mut self, payload: ClipboardPayload) -> EventDisposition {
        match self.clipboard.route(&payload) {
            PasteRoute::RemoteClipboard => {
                debug!("Pasting from the remote clipboard");
                self.channel
                    .send(Message::clipboard(self.target(), ClipboardCommand::Paste));
            }
            PasteRoute::DocumentTransfer => {
                debug!(items = payload.items.len(), "Transferring external clipboard payload");
                self.channel.transfer_document(self.target(), payload);
                self.force_abort();
            }
        }
        EventDisposition::PreventDefault
    }

    pub fn on_copy(
        &mut self,
        selection: &str,
        clipboard: &mut dyn SystemClipboard,
    ) -> EventDisposition {
        self.cut_copy(ClipboardCommand::Copy, selection, clipboard)
    }

    pub fn on_cut(
        &mut self,
        selection: &str,
        clipboard: &mut dyn SystemClipboard,
    ) -> EventDisposition {
        self.cut_copy(ClipboardCommand::Cut, selection, clipboard)
    }

    fn cut_copy(
        &mut self,
        command: ClipboardCommand,
        selection: &str,
        clipboard: &mut dyn SystemClipboard,
    ) -> EventDisposition {
        self.clipboard.record(selection);
        self.channel.send(Message::clipboard(self.target(), command));

        match clipboard.set_plain_text(selection) {
            Ok(()) => EventDisposition::PreventDefault,
            Err(e) => {
                warn!(error = %e, "Could not set the clipboard contents to plain text");
                EventDisposition::Default
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::RecordingChannel;
    use crate::clipboard::{MemoryClipboard, NoClipboard};
    use crate::surface::MemorySurface;

    type TestEngine = InputEngine<MemorySurface, RecordingChannel>;

    fn engine() -> TestEngine {
        InputEngine::new(
            MemorySurface::new(),
            RecordingChannel::new(),
            EngineOptions::default(),
        )
    }

    fn type_text(engine: &mut TestEngine, text: &str) {
        let raw = engine.surface_mut().insert(text);
        engine.on_raw_change(&raw);
    }

    #[test]
    fn test_new_engine_is_padded_and_silent() {
        let engine = engine();
        assert_eq!(engine.surface().content(), SENTINEL_PADDING);
        assert_eq!(engine.surface().caret(), SENTINEL_CARET);
        assert!(engine.channel().is_empty());
        assert!(engine.snapshot().is_empty());
    }

    #[test]
    fn test_typing_sends_composition_pairs() {
        let mut engine = engine();
        type_text(&mut engine, "a");
        type_text(&mut engine, "b");

        let t = TargetId::MAIN;
        assert_eq!(
            engine.channel().messages(),
            vec![
                Message::composition_input(t, "a"),
                Message::composition_commit(t, "a"),
                Message::composition_input(t, "b"),
                Message::composition_commit(t, "b"),
            ]
        );
        assert_eq!(engine.snapshot(), &Snapshot::from("ab"));
    }

    #[test]
    fn test_unchanged_content_sends_nothing() {
        let mut engine = engine();
        type_text(&mut engine, "ab");
        engine.channel_mut().take();

        let raw = engine.surface().content();
        engine.on_raw_change(&raw);
        assert!(engine.channel().is_empty());
    }

    #[test]
    fn test_backspace_at_start_removes_before_and_resets() {
        let mut engine = engine();
        let raw = engine.surface_mut().backspace();
        engine.on_raw_change(&raw);

        assert_eq!(
            engine.channel().messages(),
            vec![Message::remove_before(TargetId::MAIN, 1)]
        );
        assert_eq!(engine.surface().content(), SENTINEL_PADDING);
    }

    #[test]
    fn test_delete_at_end_removes_after_and_resets() {
        let mut engine = engine();
        let raw = engine.surface_mut().delete_forward();
        engine.on_raw_change(&raw);

        assert_eq!(
            engine.channel().messages(),
            vec![Message::remove_after(TargetId::MAIN, 1)]
        );
        assert_eq!(engine.surface().content(), SENTINEL_PADDING);
    }

    #[test]
    fn test_reset_swallows_echoes() {
        let mut engine = InputEngine::new(
            MemorySurface::with_echo(),
            RecordingChannel::new(),
            EngineOptions::default(),
        );
        type_text(&mut engine, "x");
        engine.channel_mut().take();

        engine.reset();
        engine.reset();
        assert!(engine.channel().is_empty());
        assert!(engine.snapshot().is_empty());
    }

    #[test]
    fn test_key_up_navigation_resets() {
        let mut engine = engine();
        type_text(&mut engine, "abc");
        let writes = engine.surface().write_count();

        engine.on_key_up("a");
        assert_eq!(engine.surface().write_count(), writes);

        engine.on_key_up("ArrowLeft");
        assert_eq!(engine.surface().write_count(), writes + 1);
        assert!(engine.snapshot().is_empty());
    }

    #[test]
    fn test_focus_requires_edit_permission() {
        let mut engine = InputEngine::new(
            MemorySurface::new(),
            RecordingChannel::new(),
            EngineOptions {
                permission: Permission::View,
                ..EngineOptions::default()
            },
        );
        engine.focus();
        assert!(!engine.surface().is_focused());
        assert!(!engine.permission().can_edit());

        engine.set_permission(Permission::Edit);
        engine.focus();
        assert!(engine.surface().is_focused());

        engine.blur();
        assert!(!engine.surface().is_focused());
    }

    #[test]
    fn test_copy_records_and_writes_plain_text() {
        let mut engine = engine();
        let mut clipboard = MemoryClipboard::new();

        let disposition = engine.on_copy("Hello", &mut clipboard);

        assert_eq!(disposition, EventDisposition::PreventDefault);
        assert_eq!(clipboard.text(), Some("Hello"));
        assert_eq!(engine.last_clipboard_text(), Some("Hello"));
        assert_eq!(engine.channel().frames(), vec!["uno .uno:Copy"]);
    }

    #[test]
    fn test_cut_without_clipboard_api_still_sends_command() {
        let mut engine = engine();
        let disposition = engine.on_cut("gone", &mut NoClipboard);

        assert_eq!(disposition, EventDisposition::Default);
        assert_eq!(engine.last_clipboard_text(), Some("gone"));
        assert_eq!(engine.channel().frames(), vec!["uno .uno:Cut"]);
    }

    #[test]
    fn test_select_marks_surface() {
        let mut engine = engine();
        engine.select();
        assert!(engine.surface().is_selected());
    }
}
