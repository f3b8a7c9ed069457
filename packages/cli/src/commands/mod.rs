pub mod diff;
pub mod encode;
pub mod replay;

pub use diff::{diff, DiffArgs};
pub use encode::{encode, EncodeArgs};
pub use replay::{replay, ReplayArgs};

use imebridge_input::Platform;

/// Parse a `--platform` value
pub(crate) fn parse_platform(value: &str) -> Result<Platform, String> {
    value.parse()
}

/// Expand `\n`, `\r`, `\t` and `\\` in text given on the command line
pub(crate) fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}
