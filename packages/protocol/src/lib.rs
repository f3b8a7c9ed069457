//! # imebridge Protocol
//!
//! Outbound messages sent by the input engine to the remote document
//! engine, and their text-frame encoding.
//!
//! Every message is addressed to a [`TargetId`] and delivered as one
//! fire-and-forget text frame. Ordering is the caller's call order; this
//! crate holds no connection state.
//!
//! ```rust
//! use imebridge_protocol::{Message, TargetId};
//!
//! let frame = Message::composition_input(TargetId::MAIN, "héllo").to_frame();
//! assert_eq!(frame, "textinput id=0 type=input text=h%C3%A9llo");
//! ```

mod error;
mod frame;
mod message;

pub use error::{ProtocolError, ProtocolResult};
pub use frame::{decode_text, encode_text, parse};
pub use message::{
    ClipboardCommand, CompositionPhase, KeyPhase, Message, TargetId, ENTER_CHAR_CODE,
    ENTER_KEY_CODE,
};
