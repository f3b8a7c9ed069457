//! # Surface Guard
//!
//! The editing surface always holds its real content wrapped in two
//! sentinel characters: a non-breaking space in front and an ordinary
//! space behind, with the caret between them. A notification whose
//! content has lost the leading sentinel means the user pressed backspace
//! at the start; a lost trailing sentinel means forward delete.
//!
//! Program-driven writes fire change notifications on some platforms.
//! Every write is bracketed by [`SurfaceGuard::begin_write`] and
//! [`SurfaceGuard::end_write`]; notifications seen in between are echoes.

use crate::differ::Snapshot;

/// Leading sentinel (U+00A0). A plain space would be collapsed by some
/// platforms when the surface is otherwise empty.
pub const LEADING_SENTINEL: char = '\u{a0}';

/// Trailing sentinel
pub const TRAILING_SENTINEL: char = ' ';

/// Content of a freshly reset surface
pub const SENTINEL_PADDING: &str = "\u{a0} ";

/// Caret offset of a freshly reset surface, between the sentinels
pub const SENTINEL_CARET: usize = 1;

/// Keys that move the caret out of the sentinel envelope
pub const NAVIGATION_KEYS: &[&str] = &[
    "ArrowLeft",
    "ArrowRight",
    "ArrowUp",
    "ArrowDown",
    "Home",
    "End",
    "PageUp",
    "PageDown",
];

pub fn is_navigation_key(key: &str) -> bool {
    NAVIGATION_KEYS.contains(&key)
}

/// The hidden text field the platform types into
pub trait EditingSurface {
    /// Replace the whole content and put the caret at `caret` (in code points)
    ///
    /// Returns the raw content of every change notification the platform
    /// fired synchronously while the write was in progress.
    fn write(&mut self, content: &str, caret: usize) -> Vec<String>;

    fn focus(&mut self);

    fn blur(&mut self);

    /// Select the whole content for system clipboard interaction
    fn select_all(&mut self);
}

/// What a raw change notification means
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawChange {
    /// Caused by our own write
    Echo,
    /// Leading sentinel deleted
    Backspace,
    /// Trailing sentinel deleted
    ForwardDelete,
    /// Real content with the sentinels stripped
    Content(Snapshot),
}

/// Echo suppression and sentinel checks
///
/// A counter rather than a flag so nested writes unwind correctly.
#[derive(Debug, Default)]
pub struct SurfaceGuard {
    pending_writes: u32,
}

impl SurfaceGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_write(&mut self) {
        self.pending_writes += 1;
    }

    pub fn end_write(&mut self) {
        self.pending_writes = self.pending_writes.saturating_sub(1);
    }

    pub fn is_writing(&self) -> bool {
        self.pending_writes > 0
    }

    pub fn pending_writes(&self) -> u32 {
        self.pending_writes
    }

    pub fn classify(&self, raw: Snapshot) -> RawChange {
        if self.is_writing() {
            return RawChange::Echo;
        }
        if raw.first() != Some(LEADING_SENTINEL) {
            return RawChange::Backspace;
        }
        if raw.last() != Some(TRAILING_SENTINEL) {
            return RawChange::ForwardDelete;
        }
        RawChange::Content(raw.trimmed(1, 1))
    }
}

/// In-memory editing surface
///
/// Used by tests and the replay tool. With [`MemorySurface::with_echo`]
/// every program write reports one synchronous change notification, the
/// way browsers fire `input` on some platforms.
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    content: Vec<char>,
    caret: usize,
    focused: bool,
    selected: bool,
    echo_writes: bool,
    writes: usize,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_echo() -> Self {
        Self {
            echo_writes: true,
            ..Self::default()
        }
    }

    pub fn content(&self) -> String {
        self.content.iter().collect()
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Number of program writes so far
    pub fn write_count(&self) -> usize {
        self.writes
    }

    /// Type `text` at the caret; returns the new raw content
    pub fn insert(&mut self, text: &str) -> String {
        for c in text.chars() {
            self.content.insert(self.caret, c);
            self.caret += 1;
        }
        self.selected = false;
        self.content()
    }

    /// Replace the `len` code points before the caret with `text`,
    /// as an IME or spellchecker does; returns the new raw content
    pub fn replace_before_caret(&mut self, len: usize, text: &str) -> String {
        let start = self.caret.saturating_sub(len);
        self.content.drain(start..self.caret);
        self.caret = start;
        self.insert(text)
    }

    /// Delete the code point before the caret; returns the new raw content
    pub fn backspace(&mut self) -> String {
        if self.caret > 0 {
            self.caret -= 1;
            self.content.remove(self.caret);
        }
        self.content()
    }

    /// Delete the code point after the caret; returns the new raw content
    pub fn delete_forward(&mut self) -> String {
        if self.caret < self.content.len() {
            self.content.remove(self.caret);
        }
        self.content()
    }
}

impl EditingSurface for MemorySurface {
    fn write(&mut self, content: &str, caret: usize) -> Vec<String> {
        self.content = content.chars().collect();
        self.caret = caret.min(self.content.len());
        self.selected = false;
        self.writes += 1;

        if self.echo_writes {
            vec![self.content()]
        } else {
            Vec::new()
        }
    }

    fn focus(&mut self) {
        self.focused = true;
    }

    fn blur(&mut self) {
        self.focused = false;
    }

    fn select_all(&mut self) {
        self.selected = true;
    }
}
