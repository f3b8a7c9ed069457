//! # Host Adapter
//!
//! Platform signals as data. A host subscribes to its native events,
//! converts each into a [`HostEvent`] and calls [`dispatch`]; nothing in
//! here interprets the signal beyond picking the engine entry point.
//!
//! Events deserialize from JSON so recorded sessions can be replayed:
//!
//! ```json
//! [
//!   { "type": "composition_start" },
//!   { "type": "composition_update", "raw": "\u00a0ni " },
//!   { "type": "composition_end", "raw": "\u00a0你 " },
//!   { "type": "key_up", "key": "ArrowLeft" }
//! ]
//! ```

use crate::channel::OutboundChannel;
use crate::clipboard::{ClipboardPayload, SystemClipboard};
use crate::composition::AbortTrigger;
use crate::engine::{EventDisposition, InputEngine};
use crate::surface::EditingSurface;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostEvent {
    /// Content of the surface changed
    Input { raw: String },
    CompositionStart,
    CompositionUpdate { raw: String },
    CompositionEnd { raw: String },
    KeyUp { key: String },
    /// Mouse down on the host view outside the surface
    PointerDown,
    /// Touch start on the host view outside the surface
    TouchStart,
    /// Surface lost focus
    Blur,
    /// Host asks to focus the surface
    FocusRequest,
    /// Host selects the surface content before a clipboard gesture
    Select,
    Paste { payload: ClipboardPayload },
    Copy { selection: String },
    Cut { selection: String },
}

/// Forward one host event to the engine
///
/// Returns whether the host should suppress the platform default.
pub fn dispatch<S, C>(
    engine: &mut InputEngine<S, C>,
    event: HostEvent,
    clipboard: &mut dyn SystemClipboard,
) -> EventDisposition
where
    S: EditingSurface,
    C: OutboundChannel,
{
    match event {
        HostEvent::Input { raw } => engine.on_raw_change(&raw),
        HostEvent::CompositionStart => engine.on_composition_start(),
        HostEvent::CompositionUpdate { raw } => engine.on_composition_update(&raw),
        HostEvent::CompositionEnd { raw } => engine.on_composition_end(&raw),
        HostEvent::KeyUp { key } => engine.on_key_up(&key),
        HostEvent::PointerDown => engine.on_abort(AbortTrigger::PointerDown),
        HostEvent::TouchStart => engine.on_abort(AbortTrigger::TouchStart),
        HostEvent::Blur => engine.on_blur(),
        HostEvent::FocusRequest => engine.focus(),
        HostEvent::Select => engine.select(),
        HostEvent::Paste { payload } => return engine.on_paste(payload),
        HostEvent::Copy { selection } => return engine.on_copy(&selection, clipboard),
        HostEvent::Cut { selection } => return engine.on_cut(&selection, clipboard),
    }
    EventDisposition::Default
}
