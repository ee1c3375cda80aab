//! Structural tests for generated parser source
//!
//! The emitted text is one acceptable rendering of the runtime contract,
//! so these tests pin the load-bearing structure — which functions exist
//! and how they wire together — rather than the full text.

use gram::codegen::{self, CodegenError};
use gram::grammar;

const WORD_LIST_GRAMMAR: &str = "\
$root
    | item{+} (<eof>)
item
    | word <whitespace>
word=token
    | <alpha>
    | \"-\"
";

fn generated(source: &str) -> String {
    codegen::generate(&grammar::compile(source).expect("grammar should compile"))
        .expect("generation should succeed")
}

#[test]
fn emits_a_self_contained_module() {
    let text = generated(WORD_LIST_GRAMMAR);
    // runtime prelude
    assert!(text.contains("pub struct Node {"));
    assert!(text.contains("pub struct State<'s> {"));
    assert!(text.contains("fn quantify_at_least("));
    assert!(text.contains("fn parse_terminal_eof(st: &mut State, alias: Option<&str>) -> Option<Node> {"));
    assert!(text.contains("fn flatten(tree: Node) -> Node {"));
    // no external imports: the module must stand alone
    assert!(!text.contains("\nuse "));
    assert!(!text.contains("extern crate"));
}

#[test]
fn every_production_gets_a_function() {
    let text = generated(WORD_LIST_GRAMMAR);
    for name in ["root", "item", "word"] {
        let needle = format!(
            "fn parse_production_{}(st: &mut State, alias: Option<&str>) -> Option<Node> {{",
            name
        );
        assert!(text.contains(&needle), "missing function for {}", name);
    }
}

#[test]
fn entry_function_wires_to_the_entry_production() {
    let text = generated(WORD_LIST_GRAMMAR);
    assert!(text.contains("pub fn parse(source: &str) -> Option<AstNode> {"));
    assert!(text.contains("let tree = parse_production_root(&mut st, None)?;"));
    assert!(text.contains("return Some(shape(flatten(tree)));"));
}

#[test]
fn derivations_try_in_order_with_scout_isolation() {
    let text = generated(WORD_LIST_GRAMMAR);
    // word has two derivations; both restart from the saved scout and the
    // function ends with a final restore
    let word_fn = text
        .split("fn parse_production_word")
        .nth(1)
        .expect("word function");
    let word_fn = word_fn.split("fn ").next().expect("function body");
    assert_eq!(word_fn.matches("st.scout = scout_original;").count(), 3);
    assert!(word_fn.contains("'d0: {"));
    assert!(word_fn.contains("'d1: {"));
    assert!(word_fn.contains("alias.or(Some(\"token\"))"));
}

#[test]
fn success_commits_and_failure_falls_through() {
    let text = generated("$root\n    | \"x\"\n");
    assert!(text.contains("st.index += st.scout;"));
    assert!(text.contains("st.scout = 0;"));
    // outright failure below end-of-input check
    assert!(text.contains("if st.index >= st.source.len() {"));
}

#[test]
fn literal_functions_are_shared_and_escaped() {
    let text = generated(
        "$root\n    | \"x\\;\" item\nitem\n    | \"x\\;\"\n",
    );
    // one definition, two call sites
    assert_eq!(text.matches("fn parse_literal_x_x3b_(").count(), 1);
    assert_eq!(
        text.matches("parse_literal_x_x3b_(st, None)").count(),
        2
    );
    // the semicolon survives as an escaped Rust string
    assert!(text.contains("rest.starts_with(\"x;\")"));
}

#[test]
fn missing_entry_production_is_reported() {
    let grammar = grammar::compile("root\n    | \"x\"\n").expect("grammar should compile");
    assert_eq!(
        codegen::generate(&grammar),
        Err(CodegenError::MissingEntryProduction)
    );
}

#[test]
fn generated_text_is_deterministic() {
    assert_eq!(generated(WORD_LIST_GRAMMAR), generated(WORD_LIST_GRAMMAR));
}

#[test]
fn header_names_the_generator() {
    let text = generated(WORD_LIST_GRAMMAR);
    assert!(text.starts_with("// Parser generated by gram"));
}
