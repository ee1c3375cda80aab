//! Source writer
//!
//! Indentation-aware text accumulation for emitted source. This is the
//! swappable formatting collaborator: the emitter only ever asks for
//! lines, blanks and indent steps, so any writer producing equivalent
//! text is acceptable.

/// Accumulates generated source text with a fixed indent unit.
pub struct SourceWriter {
    buf: String,
    level: usize,
    unit: String,
}

impl SourceWriter {
    /// Four-space indentation.
    pub fn new() -> Self {
        Self::with_indent("    ")
    }

    pub fn with_indent(unit: &str) -> Self {
        Self {
            buf: String::new(),
            level: 0,
            unit: unit.to_string(),
        }
    }

    /// Write one line at the current indent level.
    pub fn line(&mut self, text: &str) {
        if text.is_empty() {
            self.buf.push('\n');
            return;
        }
        for _ in 0..self.level {
            self.buf.push_str(&self.unit);
        }
        self.buf.push_str(text);
        self.buf.push('\n');
    }

    pub fn blank(&mut self) {
        self.buf.push('\n');
    }

    /// Write `text` and indent the following lines.
    pub fn open(&mut self, text: &str) {
        self.line(text);
        self.level += 1;
    }

    /// Dedent and write `text` (typically a closing brace).
    pub fn close(&mut self, text: &str) {
        self.level = self.level.saturating_sub(1);
        self.line(text);
    }

    pub fn finish(self) -> String {
        self.buf
    }
}

impl Default for SourceWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indents_nested_lines() {
        let mut writer = SourceWriter::new();
        writer.open("fn f() {");
        writer.line("body();");
        writer.close("}");
        assert_eq!(writer.finish(), "fn f() {\n    body();\n}\n");
    }

    #[test]
    fn empty_lines_carry_no_indent() {
        let mut writer = SourceWriter::new();
        writer.open("{");
        writer.blank();
        writer.close("}");
        assert_eq!(writer.finish(), "{\n\n}\n");
    }
}
