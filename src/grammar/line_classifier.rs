//! Line Classification
//!
//! Converts each raw grammar line into a typed line or marks it ignorable.
//! Classification follows this specific order (important for correctness):
//!
//! 1. Derivation lines: a fixed 4-space indent followed by the `|` marker
//! 2. Production lines: first character is a letter or the `$` entry marker,
//!    with optional `abstract` prefix and `name=alias` suffix
//! 3. Directive lines: `!name params…`
//!
//! Comments are stripped first: an unescaped `;` runs to end of line, and
//! `\;` is unescaped to a literal semicolon. Blank lines are ignorable;
//! anything else that matches no rule is [`Classified::Unrecognized`] and
//! left to the builder's strictness policy.

use once_cell::sync::Lazy;
use regex::Regex;

use super::error::GrammarError;
use super::model::{Quantifier, Target, TargetKind};

/// Identifier pattern for aliases and production names
static IDENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier regex"));

/// Production line shape, after the optional `abstract` prefix is stripped
static PRODUCTION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\$?[A-Za-z_][A-Za-z0-9_]*\s*$").expect("production regex"));

/// Directive line shape: `!name` plus space-separated parameters
static DIRECTIVE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^!([a-z]+)((?:\s+\S+)*)\s*$").expect("directive regex"));

/// Embedded `[p1 p2 …]` parameter list inside a terminal token
static TERMINAL_PARAMS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]*)\]").expect("terminal params regex"));

/// The fixed prefix that marks a derivation line
const DERIVATION_PREFIX: &str = "    |";

/// A grammar line that carries meaning for the builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Production(ProductionLine),
    Derivation(DerivationLine),
    Directive(DirectiveLine),
}

/// Opens a new production.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductionLine {
    pub name: String,
    pub is_abstract: bool,
    pub is_entry: bool,
    pub alias: Option<String>,
}

/// Appends one derivation to the open production.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivationLine {
    pub targets: Vec<Target>,
}

/// Appends one directive to the grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveLine {
    pub name: String,
    pub parameters: Vec<String>,
}

/// Outcome of classifying one raw line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classified {
    Line(Line),
    /// Blank or comment-only line
    Ignorable,
    /// Matched no rule; the builder decides whether this is fatal
    Unrecognized,
}

/// Classify one raw grammar line.
///
/// `line_no` is 1-based and only used for diagnostics.
pub fn classify(raw: &str, line_no: usize) -> Result<Classified, GrammarError> {
    let uncommented = strip_comment(raw);
    let line = uncommented.replace("\\;", ";");

    if line.trim().is_empty() {
        return Ok(Classified::Ignorable);
    }

    if let Some(derivation) = try_parse_derivation(&line, line_no)? {
        return Ok(Classified::Line(Line::Derivation(derivation)));
    }
    if let Some(production) = try_parse_production(&line, line_no)? {
        return Ok(Classified::Line(Line::Production(production)));
    }
    if let Some(directive) = try_parse_directive(&line) {
        return Ok(Classified::Line(Line::Directive(directive)));
    }

    Ok(Classified::Unrecognized)
}

/// Cut an unescaped `;` comment off the end of the line.
fn strip_comment(raw: &str) -> String {
    let bytes = raw.as_bytes();
    for (i, b) in bytes.iter().enumerate() {
        if *b == b';' && (i == 0 || bytes[i - 1] != b'\\') {
            return raw[..i].to_string();
        }
    }
    raw.to_string()
}

fn try_parse_derivation(
    line: &str,
    line_no: usize,
) -> Result<Option<DerivationLine>, GrammarError> {
    let rest = match line.strip_prefix(DERIVATION_PREFIX) {
        Some(rest) => rest,
        None => return Ok(None),
    };
    // Split on single spaces; quoted strings containing spaces are a known
    // limitation of the notation and are not supported.
    let targets = rest
        .trim()
        .split(' ')
        .filter(|token| !token.is_empty())
        .map(|token| parse_target(token, line_no))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Some(DerivationLine { targets }))
}

fn try_parse_production(
    line: &str,
    line_no: usize,
) -> Result<Option<ProductionLine>, GrammarError> {
    let (is_abstract, rest) = match line.strip_prefix("abstract ") {
        Some(rest) => (true, rest.trim_start()),
        None => (false, line),
    };

    let mut first_chars = rest.chars();
    match first_chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '$' || c == '_' => {}
        _ => return Ok(None),
    }

    // Optional trailing `name=alias`, split on the first `=`
    let (head, alias) = match rest.split_once('=') {
        Some((head, alias_segment)) => {
            let alias_segment = alias_segment.trim();
            if !IDENT_RE.is_match(alias_segment) {
                return Err(GrammarError::InvalidAlias {
                    line: line_no,
                    alias: alias_segment.to_string(),
                });
            }
            (head.trim(), Some(alias_segment.to_string()))
        }
        None => (rest.trim(), None),
    };

    if !PRODUCTION_RE.is_match(head) {
        return Ok(None);
    }

    let (is_entry, name) = match head.trim().strip_prefix('$') {
        Some(name) => (true, name),
        None => (false, head.trim()),
    };

    if is_abstract && alias.is_some() {
        return Err(GrammarError::AliasOnAbstractProduction {
            line: line_no,
            name: name.to_string(),
        });
    }

    Ok(Some(ProductionLine {
        name: name.to_string(),
        is_abstract,
        is_entry,
        alias,
    }))
}

fn try_parse_directive(line: &str) -> Option<DirectiveLine> {
    let captures = DIRECTIVE_RE.captures(line)?;
    let name = captures[1].to_string();
    let parameters = captures[2]
        .split_whitespace()
        .map(str::to_owned)
        .collect();
    Some(DirectiveLine { name, parameters })
}

/// Parse one derivation target token.
///
/// Applied in this order: alias split, presence unwrap, quantifier strip,
/// kind dispatch. The order matters: `(<x>{*})` is a quantified presence
/// target, while an alias on a presence target is fatal.
pub fn parse_target(token: &str, line_no: usize) -> Result<Target, GrammarError> {
    let original = token;

    // 1. alias split on a single `=`
    let (mut core, alias) = match token.split_once('=') {
        Some((core, alias_segment)) => {
            if !IDENT_RE.is_match(alias_segment) {
                return Err(GrammarError::InvalidAlias {
                    line: line_no,
                    alias: alias_segment.to_string(),
                });
            }
            (core, Some(alias_segment.to_string()))
        }
        None => (token, None),
    };

    // 2. presence unwrap of a fully parenthesized token
    let mut is_presence = false;
    if core.len() > 2 && core.starts_with('(') && core.ends_with(')') {
        core = &core[1..core.len() - 1];
        is_presence = true;
        if alias.is_some() {
            return Err(GrammarError::AliasOnPresenceTarget {
                line: line_no,
                token: original.to_string(),
            });
        }
    }

    // 3. quantifier suffix
    let (core, quantifier) = if let Some(stripped) = core.strip_suffix("{*}") {
        (stripped, Quantifier::ZeroOrMore)
    } else if let Some(stripped) = core.strip_suffix("{+}") {
        (stripped, Quantifier::OneOrMore)
    } else {
        (core, Quantifier::One)
    };

    // 4. kind dispatch
    let kind = if core.starts_with('"') {
        TargetKind::Literal {
            value: core.replace('"', ""),
        }
    } else if core.starts_with('<') {
        let raw = core.replace(['<', '>'], "");
        let (name, parameters) = match TERMINAL_PARAMS_RE.captures(&raw) {
            Some(captures) => {
                let parameters = captures[1]
                    .split_whitespace()
                    .map(str::to_owned)
                    .collect();
                (raw.replace(&captures[0], ""), parameters)
            }
            None => (raw, Vec::new()),
        };
        TargetKind::Terminal { name, parameters }
    } else {
        TargetKind::ProductionRef {
            name: core.to_string(),
        }
    };

    Ok(Target {
        kind,
        quantifier,
        is_presence,
        alias,
    })
}
