//! Grammar front-end
//!
//! Turns gram grammar source text into a validated [`Grammar`] model:
//! raw lines ([`line_provider`]) are classified into typed lines
//! ([`line_classifier`]), folded into productions and directives
//! ([`builder`]), rewritten by directives ([`directives`]) and finally
//! reference-checked.

pub mod builder;
pub mod directives;
pub mod error;
pub mod line_classifier;
pub mod line_provider;
pub mod model;

pub use builder::GrammarBuilder;
pub use error::GrammarError;
pub use line_provider::{LineProvider, StringLineProvider};
pub use model::{Derivation, Directive, Grammar, Production, Quantifier, Target, TargetKind};

/// Compile grammar source text into a validated [`Grammar`].
///
/// Unrecognized lines are logged and discarded. Use [`compile_strict`] to
/// turn them into errors instead; silent discard hides grammar typos.
pub fn compile(source: &str) -> Result<Grammar, GrammarError> {
    compile_with(source, false)
}

/// Compile grammar source text, reporting unrecognized lines as errors.
pub fn compile_strict(source: &str) -> Result<Grammar, GrammarError> {
    compile_with(source, true)
}

fn compile_with(source: &str, strict: bool) -> Result<Grammar, GrammarError> {
    let mut provider = StringLineProvider::new(source);
    let mut grammar = GrammarBuilder::new()
        .strict(strict)
        .build(&mut provider)?;
    directives::process_directives(&mut grammar);
    // Directives may repoint a name to a literal, so references are checked
    // only after they have run.
    builder::validate(&grammar)?;
    Ok(grammar)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compile_assembles_and_validates() {
        let grammar = compile(
            "$root\n    | item (<eof>)\nitem\n    | \"x\"\n",
        )
        .unwrap();
        assert_eq!(grammar.productions.len(), 2);
        assert!(grammar.productions[0].is_entry);
    }

    #[test]
    fn compile_rejects_dangling_reference() {
        let err = compile("$root\n    | missing\n").unwrap_err();
        match err {
            GrammarError::DanglingReference { production, name } => {
                assert_eq!(production, "root");
                assert_eq!(name, "missing");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn directive_runs_before_reference_validation() {
        // `item` is never defined as a production; the directive repoints it
        // to a literal before references are checked.
        let grammar = compile("!terminal <item> \"x\"\n$root\n    | item\n").unwrap();
        let target = &grammar.productions[0].derivations[0].targets[0];
        assert_eq!(
            target.kind,
            TargetKind::Literal {
                value: "x".to_string()
            }
        );
    }
}
