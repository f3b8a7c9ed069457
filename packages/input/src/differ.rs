//! # Snapshot Differ
//!
//! Derives the edit script between two snapshots of the editing surface.
//!
//! The diff is anchored at the common prefix: everything after the first
//! differing code point counts as removed and re-inserted. The surface is
//! emptied after most discrete operations, so edits sit at or near the
//! caret and the prefix covers almost everything. A rewrite in the middle
//! of the text (autocorrect on an earlier word) is sent as removal of the
//! whole tail plus insertion of the new tail.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Accepted content of the editing surface, one entry per code point
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot(Vec<char>);

impl Snapshot {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Decode UTF-16 code units, joining surrogate pairs
    ///
    /// Unpaired surrogates become U+FFFD.
    pub fn from_utf16(units: &[u16]) -> Self {
        Self(
            char::decode_utf16(units.iter().copied())
                .map(|unit| unit.unwrap_or(char::REPLACEMENT_CHARACTER))
                .collect(),
        )
    }

    pub fn chars(&self) -> &[char] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Option<char> {
        self.0.first().copied()
    }

    pub fn last(&self) -> Option<char> {
        self.0.last().copied()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Drop `leading` code points from the front and `trailing` from the back
    pub fn trimmed(&self, leading: usize, trailing: usize) -> Snapshot {
        let start = leading.min(self.0.len());
        let end = self.0.len().saturating_sub(trailing).max(start);
        Snapshot(self.0[start..end].to_vec())
    }
}

impl From<&str> for Snapshot {
    fn from(text: &str) -> Self {
        Self(text.chars().collect())
    }
}

impl From<Vec<char>> for Snapshot {
    fn from(chars: Vec<char>) -> Self {
        Self(chars)
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|c| write!(f, "{}", c))
    }
}

/// Transformation from one snapshot to the next
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditScript {
    /// Code points to remove from the tail of the previous snapshot
    pub remove_count: usize,

    /// Text to append after the removal
    pub inserted_text: String,
}

impl EditScript {
    pub fn is_empty(&self) -> bool {
        self.remove_count == 0 && self.inserted_text.is_empty()
    }

    /// Replay this script on top of `previous`
    pub fn apply(&self, previous: &[char]) -> Vec<char> {
        let keep = previous.len().saturating_sub(self.remove_count);
        previous[..keep]
            .iter()
            .copied()
            .chain(self.inserted_text.chars())
            .collect()
    }
}

/// Length of the longest common prefix
pub fn common_prefix_len(previous: &[char], current: &[char]) -> usize {
    previous
        .iter()
        .zip(current)
        .take_while(|(old, new)| old == new)
        .count()
}

/// Prefix-anchored diff of two code-point sequences
pub fn diff(previous: &[char], current: &[char]) -> EditScript {
    let match_to = common_prefix_len(previous, current);

    EditScript {
        remove_count: previous.len() - match_to,
        inserted_text: current[match_to..].iter().collect(),
    }
}
