//! Error types for grammar compilation

use std::fmt;

/// Errors that can occur while classifying, assembling or validating a
/// grammar. Every variant names the offending line or token so a grammar
/// author can find it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrammarError {
    /// An alias segment does not match the identifier pattern
    InvalidAlias { line: usize, alias: String },
    /// `abstract` productions are removed from the tree; aliasing one is
    /// contradictory
    AliasOnAbstractProduction { line: usize, name: String },
    /// Presence targets are never bound into children, so an alias on one
    /// can never be used
    AliasOnPresenceTarget { line: usize, token: String },
    /// A derivation line appeared before any production was opened
    DerivationBeforeProduction { line: usize },
    /// Two productions share a name
    DuplicateProduction { line: usize, name: String },
    /// A line matched no classification rule (strict mode only)
    UnrecognizedLine { line: usize, content: String },
    /// A target references a production that is never defined
    DanglingReference { production: String, name: String },
    /// A target references a terminal outside the built-in catalog
    UnknownTerminal { production: String, name: String },
    /// No production carries the `$` entry marker
    MissingEntryProduction,
}

impl fmt::Display for GrammarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrammarError::InvalidAlias { line, alias } => {
                write!(f, "line {}: invalid alias \"{}\"", line, alias)
            }
            GrammarError::AliasOnAbstractProduction { line, name } => {
                write!(f, "line {}: cannot alias abstract production \"{}\"", line, name)
            }
            GrammarError::AliasOnPresenceTarget { line, token } => {
                write!(f, "line {}: cannot alias presence target \"{}\"", line, token)
            }
            GrammarError::DerivationBeforeProduction { line } => {
                write!(f, "line {}: derivation before any production", line)
            }
            GrammarError::DuplicateProduction { line, name } => {
                write!(f, "line {}: duplicate production \"{}\"", line, name)
            }
            GrammarError::UnrecognizedLine { line, content } => {
                write!(f, "line {}: unrecognized line \"{}\"", line, content)
            }
            GrammarError::DanglingReference { production, name } => {
                write!(
                    f,
                    "production \"{}\" references undefined production \"{}\"",
                    production, name
                )
            }
            GrammarError::UnknownTerminal { production, name } => {
                write!(
                    f,
                    "production \"{}\" references unknown terminal <{}>",
                    production, name
                )
            }
            GrammarError::MissingEntryProduction => {
                write!(f, "grammar has no entry production (mark one with `$`)")
            }
        }
    }
}

impl std::error::Error for GrammarError {}
