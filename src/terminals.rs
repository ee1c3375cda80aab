//! Built-in terminal registry
//!
//! The fixed catalog of primitive matchers a grammar can reference by name.
//! Terminals are not grammar-definable; the catalog is closed. Each matcher
//! is a pure function over the input text and the current read position
//! (committed index plus speculative scout).
//!
//! Catalog (ASCII semantics throughout; see the crate's non-goals):
//! - `newline`: a single `\n`
//! - `eof`: succeeds iff the read position is at end of input, consumes
//!   nothing, carries no value
//! - `space`: a single ASCII space
//! - `whitespace`: a greedy, possibly empty run of space/tab/newline;
//!   always succeeds
//! - `empty`: always succeeds, consumes nothing
//! - `alpha`: a greedy run of one or more ASCII letters

/// A successful terminal match: how far scout advances and the matched text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalMatch {
    pub len: usize,
    pub value: Option<String>,
}

/// One entry of the built-in catalog.
pub struct BuiltInTerminal {
    pub name: &'static str,
    matcher: fn(&str, usize) -> Option<TerminalMatch>,
}

impl BuiltInTerminal {
    /// Attempt a match at position `at`. Never touches the cursor; the
    /// caller advances scout by the returned length.
    pub fn match_at(&self, source: &str, at: usize) -> Option<TerminalMatch> {
        (self.matcher)(source, at)
    }
}

/// The fixed catalog, in documentation order.
pub static CATALOG: &[BuiltInTerminal] = &[
    BuiltInTerminal {
        name: "newline",
        matcher: match_newline,
    },
    BuiltInTerminal {
        name: "eof",
        matcher: match_eof,
    },
    BuiltInTerminal {
        name: "space",
        matcher: match_space,
    },
    BuiltInTerminal {
        name: "whitespace",
        matcher: match_whitespace,
    },
    BuiltInTerminal {
        name: "empty",
        matcher: match_empty,
    },
    BuiltInTerminal {
        name: "alpha",
        matcher: match_alpha,
    },
];

/// Look a terminal up by name.
pub fn lookup(name: &str) -> Option<&'static BuiltInTerminal> {
    CATALOG.iter().find(|t| t.name == name)
}

fn match_single_byte(source: &str, at: usize, expected: u8) -> Option<TerminalMatch> {
    if source.as_bytes().get(at) == Some(&expected) {
        Some(TerminalMatch {
            len: 1,
            value: Some(source[at..at + 1].to_string()),
        })
    } else {
        None
    }
}

fn match_newline(source: &str, at: usize) -> Option<TerminalMatch> {
    match_single_byte(source, at, b'\n')
}

fn match_eof(source: &str, at: usize) -> Option<TerminalMatch> {
    if at == source.len() {
        Some(TerminalMatch {
            len: 0,
            value: None,
        })
    } else {
        None
    }
}

fn match_space(source: &str, at: usize) -> Option<TerminalMatch> {
    match_single_byte(source, at, b' ')
}

fn match_whitespace(source: &str, at: usize) -> Option<TerminalMatch> {
    let len = source
        .as_bytes()
        .get(at..)
        .unwrap_or(&[])
        .iter()
        .take_while(|b| matches!(**b, b' ' | b'\t' | b'\n'))
        .count();
    Some(TerminalMatch {
        len,
        value: Some(source[at..at + len].to_string()),
    })
}

fn match_empty(_source: &str, _at: usize) -> Option<TerminalMatch> {
    Some(TerminalMatch {
        len: 0,
        value: Some(String::new()),
    })
}

fn match_alpha(source: &str, at: usize) -> Option<TerminalMatch> {
    let len = source
        .as_bytes()
        .get(at..)
        .unwrap_or(&[])
        .iter()
        .take_while(|b| b.is_ascii_alphabetic())
        .count();
    if len == 0 {
        return None;
    }
    Some(TerminalMatch {
        len,
        value: Some(source[at..at + len].to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn matched(name: &str, source: &str, at: usize) -> Option<TerminalMatch> {
        lookup(name).unwrap().match_at(source, at)
    }

    #[test]
    fn catalog_is_closed() {
        assert_eq!(CATALOG.len(), 6);
        assert!(lookup("bogus").is_none());
    }

    #[rstest]
    #[case("newline", "\nx", 1, "\n")]
    #[case("space", " x", 1, " ")]
    #[case("alpha", "abc123", 3, "abc")]
    fn simple_matchers(
        #[case] name: &str,
        #[case] source: &str,
        #[case] len: usize,
        #[case] value: &str,
    ) {
        let m = matched(name, source, 0).unwrap();
        assert_eq!(m.len, len);
        assert_eq!(m.value.as_deref(), Some(value));
    }

    #[test]
    fn alpha_fails_on_zero_letters() {
        assert_eq!(matched("alpha", "123", 0), None);
        assert_eq!(matched("alpha", "", 0), None);
    }

    #[test]
    fn matchers_respect_the_read_position() {
        let m = matched("alpha", "12abc", 2).unwrap();
        assert_eq!(m.value.as_deref(), Some("abc"));
    }

    #[test]
    fn whitespace_always_succeeds() {
        let m = matched("whitespace", "abc", 0).unwrap();
        assert_eq!(m.len, 0);
        let m = matched("whitespace", " \t\nabc", 0).unwrap();
        assert_eq!(m.len, 3);
    }

    #[test]
    fn eof_matches_only_at_end_of_input() {
        assert_eq!(matched("eof", "ab", 2).unwrap().len, 0);
        assert_eq!(matched("eof", "ab", 0), None);
        assert_eq!(matched("eof", "", 0).unwrap().len, 0);
    }

    #[test]
    fn empty_consumes_nothing() {
        let m = matched("empty", "abc", 0).unwrap();
        assert_eq!(m.len, 0);
        assert_eq!(m.value.as_deref(), Some(""));
    }
}
