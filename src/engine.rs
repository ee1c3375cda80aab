//! Matching engine
//!
//! Executes a [`Grammar`] directly against input text, implementing the
//! exact runtime contract that [`crate::codegen`]'s emitted parsers carry:
//! committed-index/speculative-scout cursor management, ordered-derivation
//! backtracking, quantifier combinators, and the two-pass parse-tree →
//! AST post-processor.

pub mod cursor;
pub mod matcher;
pub mod node;
pub mod postprocess;

pub use cursor::Cursor;
pub use matcher::Matcher;
pub use node::{NodeProperties, ParseTreeNode};
pub use postprocess::{flatten, shape, AstNode, Contents, ContentsEntry};

use crate::grammar::{Grammar, GrammarError};

/// The result of running the entry production against input.
///
/// A failed match is an ordinary outcome, never an error: callers must be
/// able to distinguish "did not match" from a genuinely broken grammar.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome {
    Matched(AstNode),
    NoMatch,
}

impl ParseOutcome {
    pub fn into_ast(self) -> Option<AstNode> {
        match self {
            ParseOutcome::Matched(ast) => Some(ast),
            ParseOutcome::NoMatch => None,
        }
    }
}

/// Parse `source` with the grammar's entry production and shape the result.
///
/// The engine does not require the match to consume the entire input;
/// grammars that need that include an explicit `<eof>` terminal in the
/// entry derivation.
pub fn parse(grammar: &Grammar, source: &str) -> Result<ParseOutcome, GrammarError> {
    let entry = grammar
        .entry_production()
        .ok_or(GrammarError::MissingEntryProduction)?;
    let matcher = Matcher::new(grammar, source);
    let mut cursor = Cursor::new();
    match matcher.match_production(entry, &mut cursor, None) {
        Some(tree) => Ok(ParseOutcome::Matched(shape(flatten(tree)))),
        None => Ok(ParseOutcome::NoMatch),
    }
}
