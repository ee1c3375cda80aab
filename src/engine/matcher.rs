//! Backtracking matcher
//!
//! One matching function per production, evaluated through quantifier
//! combinators against a [`Cursor`]. The matching protocol:
//!
//! - a production fails outright when the committed index is at or past the
//!   end of input;
//! - derivations are tried in declared order, each starting from the scout
//!   value recorded on production entry (a failed derivation's partial
//!   speculation never leaks into the next);
//! - non-presence target results bind to positional child slots;
//! - success commits the cursor and names the node after the production,
//!   with a caller-supplied alias overriding the production's static alias;
//! - total failure restores the scout and yields `None` — the typed
//!   no-match, never an error.

use log::debug;

use super::cursor::Cursor;
use super::node::{NodeProperties, ParseTreeNode};
use crate::grammar::{Grammar, Production, Quantifier, Target, TargetKind};
use crate::idents;
use crate::terminals;

/// Matches productions of one grammar against one input text.
pub struct Matcher<'g, 's> {
    grammar: &'g Grammar,
    source: &'s str,
}

impl<'g, 's> Matcher<'g, 's> {
    pub fn new(grammar: &'g Grammar, source: &'s str) -> Self {
        Self { grammar, source }
    }

    /// Try the production at the cursor. `alias` is the caller-supplied
    /// occurrence alias, which overrides the production's static alias.
    pub fn match_production(
        &self,
        production: &Production,
        cursor: &mut Cursor,
        alias: Option<&str>,
    ) -> Option<ParseTreeNode> {
        if cursor.index >= self.source.len() {
            return None;
        }
        debug!("trying {}", production.name);
        let scout_original = cursor.scout;

        'derivations: for derivation in &production.derivations {
            cursor.scout = scout_original;
            let mut children = Vec::new();
            for target in &derivation.targets {
                match self.match_target(target, cursor) {
                    Some(node) => {
                        if !target.is_presence {
                            children.push(node);
                        }
                    }
                    None => continue 'derivations,
                }
            }
            cursor.commit();
            debug!("parsed {}", production.name);
            return Some(ParseTreeNode::new(
                production.name.clone(),
                None,
                children,
                NodeProperties {
                    is_entry: production.is_entry,
                    is_abstract: production.is_abstract,
                    alias: alias.map(str::to_owned).or_else(|| production.alias.clone()),
                },
            ));
        }

        debug!("no parse for {}", production.name);
        cursor.scout = scout_original;
        None
    }

    /// Evaluate one target through its quantifier combinator.
    pub fn match_target(&self, target: &Target, cursor: &mut Cursor) -> Option<ParseTreeNode> {
        match target.quantifier {
            Quantifier::One => self.quantify_once(target, cursor),
            Quantifier::ZeroOrMore => self.quantify_at_least(0, target, cursor),
            Quantifier::OneOrMore => self.quantify_at_least(1, target, cursor),
        }
    }

    /// Exactly one application; the result is the underlying outcome.
    fn quantify_once(&self, target: &Target, cursor: &mut Cursor) -> Option<ParseTreeNode> {
        self.match_target_once(target, cursor)
    }

    /// Repeat until the first failing attempt, then succeed iff at least
    /// `n` repetitions matched, wrapping them in an abstract List node.
    /// A zero-width success ends the repetition: terminals like
    /// `whitespace` and `empty` always succeed, and repeating them without
    /// progress would never terminate.
    fn quantify_at_least(
        &self,
        n: usize,
        target: &Target,
        cursor: &mut Cursor,
    ) -> Option<ParseTreeNode> {
        let mut nodes = Vec::new();
        loop {
            // Position, not scout: a successful sub-production commits and
            // zeroes the scout while still having consumed input.
            let pos_before = cursor.pos();
            match self.match_target_once(target, cursor) {
                Some(node) => {
                    nodes.push(node);
                    if cursor.pos() == pos_before {
                        break;
                    }
                }
                None => break,
            }
        }
        if nodes.len() >= n {
            Some(ParseTreeNode::list(nodes))
        } else {
            None
        }
    }

    fn match_target_once(&self, target: &Target, cursor: &mut Cursor) -> Option<ParseTreeNode> {
        let alias = target.alias.as_deref();
        match &target.kind {
            TargetKind::Literal { value } => self.match_literal(value, alias, cursor),
            TargetKind::Terminal { name, .. } => self.match_terminal(name, alias, cursor),
            TargetKind::ProductionRef { name } => {
                let production = self.grammar.production(name)?;
                self.match_production(production, cursor, alias)
            }
        }
    }

    /// Exact string match at `index + scout`; scout advances by the
    /// literal's length on success and is untouched on failure.
    fn match_literal(
        &self,
        value: &str,
        alias: Option<&str>,
        cursor: &mut Cursor,
    ) -> Option<ParseTreeNode> {
        let rest = self.source.get(cursor.pos()..)?;
        if !rest.starts_with(value) {
            return None;
        }
        cursor.scout += value.len();
        Some(ParseTreeNode::leaf(
            idents::sanitize(value),
            Some(value.to_string()),
            alias.map(str::to_owned),
        ))
    }

    fn match_terminal(
        &self,
        name: &str,
        alias: Option<&str>,
        cursor: &mut Cursor,
    ) -> Option<ParseTreeNode> {
        let terminal = terminals::lookup(name)?;
        let matched = terminal.match_at(self.source, cursor.pos())?;
        cursor.scout += matched.len;
        Some(ParseTreeNode::leaf(
            name,
            matched.value,
            alias.map(str::to_owned),
        ))
    }
}
