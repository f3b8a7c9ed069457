//! # imebridge Input
//!
//! Reconciles text typed, dictated or composed into a hidden editing
//! surface with a remote document engine.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ host: platform events → HostEvent           │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ engine                                      │
//! │  - surface guard: sentinels + echo counter  │
//! │  - differ: prefix-anchored edit script      │
//! │  - composition: Idle / Composing + abort    │
//! │  - encoder: edit script → ordered messages  │
//! │  - clipboard: remote paste vs transfer      │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ protocol: Message → text frame → channel    │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **The surface looks empty**: real content is always wrapped in
//!    sentinel padding, and the surface is reset after discrete operations
//! 2. **Snapshots, not events**: composition delivers noisy full-content
//!    snapshots; the diff against the last snapshot is what gets sent
//! 3. **Own writes are invisible**: every program write is guarded
//! 4. **Resynchronize over recover**: when composition state is in doubt,
//!    drop it and reset
//!
//! ## Usage
//!
//! ```rust
//! use imebridge_input::{EngineOptions, InputEngine, MemorySurface, RecordingChannel};
//!
//! let mut engine = InputEngine::new(
//!     MemorySurface::new(),
//!     RecordingChannel::new(),
//!     EngineOptions::default(),
//! );
//!
//! let raw = engine.surface_mut().insert("hi");
//! engine.on_raw_change(&raw);
//!
//! assert_eq!(
//!     engine.channel().frames(),
//!     vec!["textinput id=0 type=input text=hi", "textinput id=0 type=end text=hi"]
//! );
//! ```

mod adapter;
mod channel;
mod clipboard;
mod composition;
mod differ;
mod encoder;
mod engine;
mod errors;
mod platform;
mod surface;

pub use adapter::{dispatch, HostEvent};
pub use channel::{Outbound, OutboundChannel, RecordingChannel};
pub use clipboard::{
    ClipboardArbiter, ClipboardItem, ClipboardPayload, MemoryClipboard, NoClipboard, PasteRoute,
    SystemClipboard,
};
pub use composition::{AbortTrigger, CompositionMachine, CompositionState};
pub use differ::{common_prefix_len, diff, EditScript, Snapshot};
pub use encoder::{EncodedStep, ProtocolEncoder};
pub use engine::{EngineOptions, EventDisposition, InputEngine};
pub use errors::InputError;
pub use platform::{Permission, Platform, PlatformQuirks};
pub use surface::{
    is_navigation_key, EditingSurface, MemorySurface, RawChange, SurfaceGuard, LEADING_SENTINEL,
    NAVIGATION_KEYS, SENTINEL_CARET, SENTINEL_PADDING, TRAILING_SENTINEL,
};

// Re-export protocol types for convenience
pub use imebridge_protocol::{ClipboardCommand, Message, TargetId};
