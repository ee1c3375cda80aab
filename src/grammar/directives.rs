//! Directive processing
//!
//! Rewrites the assembled grammar once, after assembly and before
//! validation/codegen. The one defined directive is `terminal`:
//!
//! ```text
//! !terminal <name> "literal"
//! ```
//!
//! which repoints every target referencing `name` — wherever it occurs,
//! regardless of containing production — to an exact-literal target.
//! Unknown directive types are reported and skipped, never fatal.

use log::{debug, warn};

use super::model::{Directive, Grammar, TargetKind};

/// Apply every directive to the grammar, in declaration order.
pub fn process_directives(grammar: &mut Grammar) {
    let directives = grammar.directives.clone();
    for directive in &directives {
        match directive.name.as_str() {
            "terminal" => apply_terminal(grammar, directive),
            other => {
                warn!("skipping unknown directive \"!{}\"", other);
            }
        }
    }
}

/// `!terminal <name> "value"`: convert every target whose referenced name is
/// `name` into a literal matching `value`. The literal value also seeds the
/// generated matcher name.
fn apply_terminal(grammar: &mut Grammar, directive: &Directive) {
    let (name, value) = match directive.parameters.as_slice() {
        [name, value, ..] => (
            name.trim_matches(|c| c == '<' || c == '>'),
            value.trim_matches('"'),
        ),
        _ => {
            warn!(
                "skipping malformed !terminal directive (expected <name> \"value\", got {:?})",
                directive.parameters
            );
            return;
        }
    };

    let mut rewritten = 0;
    for production in &mut grammar.productions {
        for derivation in &mut production.derivations {
            for target in &mut derivation.targets {
                if target.referenced_name() == Some(name) {
                    target.kind = TargetKind::Literal {
                        value: value.to_string(),
                    };
                    rewritten += 1;
                }
            }
        }
    }
    debug!("!terminal <{}>: rewrote {} target(s)", name, rewritten);
}
