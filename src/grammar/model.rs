//! Grammar model
//!
//! The assembled form of a gram grammar: ordered productions, each with
//! ordered derivations of targets, plus the directives that appeared in the
//! source. Everything here is a closed tagged variant — consumers match
//! exhaustively, there is no open-shaped fallback.

use serde::Serialize;

/// Repetition modifier on a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Quantifier {
    /// Exactly one match
    One,
    /// `{*}`: any number of matches, including zero
    ZeroOrMore,
    /// `{+}`: at least one match
    OneOrMore,
}

/// What a target matches against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TargetKind {
    /// Exact string match
    Literal { value: String },
    /// Built-in terminal, referenced by name, with an optional parameter
    /// list (carried through but unused by the current built-ins)
    Terminal {
        name: String,
        parameters: Vec<String>,
    },
    /// Reference to another production
    ProductionRef { name: String },
}

/// A single matchable element within a derivation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Target {
    pub kind: TargetKind,
    pub quantifier: Quantifier,
    /// Presence targets must match but are never bound into children
    pub is_presence: bool,
    /// Rename for AST shaping; defaults to the target's own name/value
    pub alias: Option<String>,
}

impl Target {
    /// The name this target refers to, for terminals and production
    /// references. Literals carry a match value, not a referenced name.
    pub fn referenced_name(&self) -> Option<&str> {
        match &self.kind {
            TargetKind::Literal { .. } => None,
            TargetKind::Terminal { name, .. } => Some(name),
            TargetKind::ProductionRef { name } => Some(name),
        }
    }
}

/// One ordered alternative within a production. All targets must match
/// consecutively for the derivation to succeed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Derivation {
    pub targets: Vec<Target>,
}

/// A named grammar rule with one or more derivations, tried first-to-last.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Production {
    /// Unique nonterminal identifier (entry marker already stripped)
    pub name: String,
    /// Marked with `$` in the source
    pub is_entry: bool,
    /// Declared with the `abstract` keyword; removed during flattening
    pub is_abstract: bool,
    /// `name=alias` suffix; `None` means the production's own name
    pub alias: Option<String>,
    pub derivations: Vec<Derivation>,
}

/// A `!name params…` directive, applied to the grammar after assembly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Directive {
    pub name: String,
    pub parameters: Vec<String>,
}

/// An assembled grammar: ordered productions and ordered directives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Grammar {
    pub productions: Vec<Production>,
    pub directives: Vec<Directive>,
}

impl Grammar {
    /// Look up a production by name.
    pub fn production(&self, name: &str) -> Option<&Production> {
        self.productions.iter().find(|p| p.name == name)
    }

    /// The first production flagged as entry, if any.
    pub fn entry_production(&self) -> Option<&Production> {
        self.productions.iter().find(|p| p.is_entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn referenced_name_covers_terminals_and_refs() {
        let terminal = Target {
            kind: TargetKind::Terminal {
                name: "alpha".to_string(),
                parameters: vec![],
            },
            quantifier: Quantifier::One,
            is_presence: false,
            alias: None,
        };
        assert_eq!(terminal.referenced_name(), Some("alpha"));

        let literal = Target {
            kind: TargetKind::Literal {
                value: "alpha".to_string(),
            },
            quantifier: Quantifier::One,
            is_presence: false,
            alias: None,
        };
        assert_eq!(literal.referenced_name(), None);
    }
}
