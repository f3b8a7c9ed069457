//! # Text Frames
//!
//! Wire form of [`Message`]. Frames are space-separated `key=value`
//! fields after a leading command word:
//!
//! ```text
//! removetextcontext id=0 before=2 after=0
//! textinput id=0 type=input text=caf%C3%A9
//! key type=input char=13 key=1280
//! windowkey id=3 type=input char=13 key=1280
//! uno .uno:Paste
//! ```
//!
//! Composition text is percent-encoded with the URI-component set so it
//! never contains a space.

use crate::error::{ProtocolError, ProtocolResult};
use crate::message::{ClipboardCommand, CompositionPhase, KeyPhase, Message, TargetId};
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters left unescaped by URI-component encoding
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode composition text for a `textinput` frame
pub fn encode_text(text: &str) -> String {
    utf8_percent_encode(text, URI_COMPONENT).to_string()
}

/// Reverse of [`encode_text`]
pub fn decode_text(encoded: &str) -> ProtocolResult<String> {
    percent_decode_str(encoded)
        .decode_utf8()
        .map(|text| text.into_owned())
        .map_err(|e| ProtocolError::InvalidText(e.to_string()))
}

pub(crate) fn encode(message: &Message) -> String {
    match message {
        Message::RemoveText {
            target,
            before,
            after,
        } => format!("removetextcontext id={} before={} after={}", target, before, after),

        Message::TextInput {
            target,
            phase,
            text,
        } => format!(
            "textinput id={} type={} text={}",
            target,
            phase.as_str(),
            encode_text(text)
        ),

        Message::Key {
            target,
            phase,
            char_code,
            key_code,
        } => {
            if target.is_main() {
                format!(
                    "key type={} char={} key={}\n",
                    phase.as_str(),
                    char_code,
                    key_code
                )
            } else {
                format!(
                    "windowkey id={} type={} char={} key={}\n",
                    target,
                    phase.as_str(),
                    char_code,
                    key_code
                )
            }
        }

        Message::Clipboard { command, .. } => format!("uno {}", command.uno_name()),
    }
}

/// Parse a text frame back into a [`Message`]
///
/// `uno` frames carry no target and decode with [`TargetId::MAIN`].
pub fn parse(frame: &str) -> ProtocolResult<Message> {
    let frame = frame.trim_end_matches(|c: char| c == '\n' || c == '\r');
    let mut words = frame.split(' ').filter(|w| !w.is_empty());
    let command = words.next().ok_or(ProtocolError::EmptyFrame)?;
    let rest: Vec<&str> = words.collect();

    match command {
        "removetextcontext" => {
            let fields = Fields::parse(command, &rest)?;
            Ok(Message::RemoveText {
                target: TargetId(fields.number("id")?),
                before: fields.number("before")?,
                after: fields.number("after")?,
            })
        }

        "textinput" => {
            let fields = Fields::parse(command, &rest)?;
            let phase = match fields.get("type")? {
                "input" => CompositionPhase::Input,
                "end" => CompositionPhase::End,
                other => return Err(ProtocolError::invalid_field("type", other)),
            };
            Ok(Message::TextInput {
                target: TargetId(fields.number("id")?),
                phase,
                text: decode_text(fields.get("text")?)?,
            })
        }

        "key" | "windowkey" => {
            let fields = Fields::parse(command, &rest)?;
            let target = if command == "key" {
                TargetId::MAIN
            } else {
                TargetId(fields.number("id")?)
            };
            let phase = match fields.get("type")? {
                "input" => KeyPhase::Input,
                "up" => KeyPhase::Up,
                other => return Err(ProtocolError::invalid_field("type", other)),
            };
            Ok(Message::Key {
                target,
                phase,
                char_code: fields.number("char")?,
                key_code: fields.number("key")?,
            })
        }

        "uno" => {
            let command = match rest.first().copied() {
                Some(".uno:Copy") => ClipboardCommand::Copy,
                Some(".uno:Cut") => ClipboardCommand::Cut,
                Some(".uno:Paste") => ClipboardCommand::Paste,
                Some(other) => return Err(ProtocolError::UnknownCommand(format!("uno {}", other))),
                None => return Err(ProtocolError::missing_field("uno", "command")),
            };
            Ok(Message::Clipboard {
                target: TargetId::MAIN,
                command,
            })
        }

        other => Err(ProtocolError::UnknownCommand(other.to_string())),
    }
}

/// `key=value` pairs of one frame
struct Fields<'a> {
    command: &'a str,
    pairs: Vec<(&'a str, &'a str)>,
}

impl<'a> Fields<'a> {
    fn parse(command: &'a str, words: &[&'a str]) -> ProtocolResult<Self> {
        let pairs = words
            .iter()
            .map(|word| {
                word.split_once('=')
                    .ok_or_else(|| ProtocolError::MalformedField(word.to_string()))
            })
            .collect::<ProtocolResult<Vec<_>>>()?;
        Ok(Self { command, pairs })
    }

    fn get(&self, field: &str) -> ProtocolResult<&'a str> {
        self.pairs
            .iter()
            .find(|(key, _)| *key == field)
            .map(|(_, value)| *value)
            .ok_or_else(|| ProtocolError::missing_field(self.command, field))
    }

    fn number<T: std::str::FromStr>(&self, field: &str) -> ProtocolResult<T> {
        let value = self.get(field)?;
        value
            .parse()
            .map_err(|_| ProtocolError::invalid_field(field, value))
    }
}
