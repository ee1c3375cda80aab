//! Line Provider
//!
//! Yields successive raw lines of grammar source, abstracting over where the
//! source lives. The core only ever consumes lines, so anything that can hand
//! them out one at a time can feed the compiler.

/// A source of raw grammar lines.
pub trait LineProvider {
    /// Return the next raw line, without its terminator, or `None` when the
    /// source is exhausted.
    fn next_line(&mut self) -> Option<&str>;
}

/// A [`LineProvider`] backed by an in-memory string.
///
/// Splits on `\n` and tolerates `\r\n` terminators.
pub struct StringLineProvider {
    lines: Vec<String>,
    next: usize,
}

impl StringLineProvider {
    pub fn new(source: &str) -> Self {
        let lines = source
            .replace('\r', "")
            .split('\n')
            .map(str::to_owned)
            .collect();
        Self { lines, next: 0 }
    }
}

impl LineProvider for StringLineProvider {
    fn next_line(&mut self) -> Option<&str> {
        let line = self.lines.get(self.next)?;
        self.next += 1;
        Some(line)
    }
}
