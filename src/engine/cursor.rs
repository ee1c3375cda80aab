//! Cursor
//!
//! The committed position `index` and the speculative offset `scout`.
//! Matching only ever advances `scout`; a successful derivation folds the
//! speculation into `index`. The cursor is an explicit value threaded by
//! `&mut` through every matching call — never process-wide state — so
//! parses are reentrant and independently testable.

/// A committed/speculative cursor pair over one input text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    pub index: usize,
    pub scout: usize,
}

impl Cursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// The position matching currently reads from.
    pub fn pos(&self) -> usize {
        self.index + self.scout
    }

    /// Fold the speculative advance into the committed position.
    pub fn commit(&mut self) {
        self.index += self.scout;
        self.scout = 0;
    }
}
