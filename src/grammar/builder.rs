//! Grammar assembly
//!
//! Folds the classified line stream into a [`Grammar`]: a production line
//! closes the currently-open production before opening the next, derivation
//! lines accumulate on the open production, directive lines collect on the
//! grammar, and end of input flushes whatever is still open.

use log::{debug, warn};
use std::collections::HashSet;

use super::error::GrammarError;
use super::line_classifier::{self, Classified, Line, ProductionLine};
use super::line_provider::LineProvider;
use super::model::{Derivation, Directive, Grammar, Production, TargetKind};
use crate::terminals;

/// Assembles a [`Grammar`] from a stream of raw lines.
pub struct GrammarBuilder {
    strict: bool,
}

impl GrammarBuilder {
    pub fn new() -> Self {
        Self { strict: false }
    }

    /// In strict mode, lines matching no classification rule are errors
    /// instead of being logged and discarded.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Fold every line from `provider` into a grammar.
    ///
    /// The result is assembled but not yet reference-checked; see
    /// [`validate`].
    pub fn build(&self, provider: &mut dyn LineProvider) -> Result<Grammar, GrammarError> {
        let mut grammar = Grammar {
            productions: Vec::new(),
            directives: Vec::new(),
        };
        let mut open: Option<OpenProduction> = None;
        let mut seen_names: HashSet<String> = HashSet::new();
        let mut line_no = 0;

        while let Some(raw) = provider.next_line() {
            line_no += 1;
            match line_classifier::classify(raw, line_no)? {
                Classified::Ignorable => {}
                Classified::Unrecognized => {
                    if self.strict {
                        return Err(GrammarError::UnrecognizedLine {
                            line: line_no,
                            content: raw.trim().to_string(),
                        });
                    }
                    warn!("line {}: discarding unrecognized line {:?}", line_no, raw);
                }
                Classified::Line(Line::Production(production_line)) => {
                    if !seen_names.insert(production_line.name.clone()) {
                        return Err(GrammarError::DuplicateProduction {
                            line: line_no,
                            name: production_line.name,
                        });
                    }
                    if let Some(finished) = open.take() {
                        grammar.productions.push(finished.close());
                    }
                    debug!("line {}: opening production {}", line_no, production_line.name);
                    open = Some(OpenProduction::new(production_line));
                }
                Classified::Line(Line::Derivation(derivation_line)) => match open.as_mut() {
                    Some(open) => {
                        open.derivations.push(Derivation {
                            targets: derivation_line.targets,
                        });
                    }
                    None => {
                        return Err(GrammarError::DerivationBeforeProduction { line: line_no });
                    }
                },
                Classified::Line(Line::Directive(directive_line)) => {
                    // Directives never touch the open production
                    grammar.directives.push(Directive {
                        name: directive_line.name,
                        parameters: directive_line.parameters,
                    });
                }
            }
        }

        if let Some(finished) = open.take() {
            grammar.productions.push(finished.close());
        }

        Ok(grammar)
    }
}

impl Default for GrammarBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The production currently accumulating derivations.
struct OpenProduction {
    line: ProductionLine,
    derivations: Vec<Derivation>,
}

impl OpenProduction {
    fn new(line: ProductionLine) -> Self {
        Self {
            line,
            derivations: Vec::new(),
        }
    }

    fn close(self) -> Production {
        Production {
            name: self.line.name,
            is_entry: self.line.is_entry,
            is_abstract: self.line.is_abstract,
            alias: self.line.alias,
            derivations: self.derivations,
        }
    }
}

/// Check that every reference in the grammar resolves: production references
/// must name a defined production and terminal references must name a
/// built-in. Runs after directive processing, so targets a directive has
/// repointed to literals are exempt.
pub fn validate(grammar: &Grammar) -> Result<(), GrammarError> {
    let defined: HashSet<&str> = grammar.productions.iter().map(|p| p.name.as_str()).collect();

    for production in &grammar.productions {
        for derivation in &production.derivations {
            for target in &derivation.targets {
                match &target.kind {
                    TargetKind::Literal { .. } => {}
                    TargetKind::Terminal { name, .. } => {
                        if terminals::lookup(name).is_none() {
                            return Err(GrammarError::UnknownTerminal {
                                production: production.name.clone(),
                                name: name.clone(),
                            });
                        }
                    }
                    TargetKind::ProductionRef { name } => {
                        if !defined.contains(name.as_str()) {
                            return Err(GrammarError::DanglingReference {
                                production: production.name.clone(),
                                name: name.clone(),
                            });
                        }
                    }
                }
            }
        }
    }
    Ok(())
}
