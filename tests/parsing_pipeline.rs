//! End-to-end tests for the grammar → engine pipeline
//!
//! Each test compiles a grammar from source and runs input through the
//! in-process engine, asserting on the shaped AST rather than the raw
//! parse tree.

use gram::engine::{self, AstNode, ContentsEntry, ParseOutcome};
use gram::grammar::{self, Grammar, GrammarError};

fn compiled(source: &str) -> Grammar {
    grammar::compile(source).expect("grammar should compile")
}

fn parsed(grammar_source: &str, input: &str) -> AstNode {
    engine::parse(&compiled(grammar_source), input)
        .expect("parse should not error")
        .into_ast()
        .expect("input should match")
}

fn one(entry: &ContentsEntry) -> &AstNode {
    match entry {
        ContentsEntry::One(node) => node,
        ContentsEntry::Many(_) => panic!("expected scalar entry"),
    }
}

#[test]
fn word_grammar_shapes_alpha_into_contents() {
    let ast = parsed(
        "$root\n    | word (<eof>)\nword\n    | <alpha>{+}\n",
        "abc",
    );
    assert_eq!(ast.kind, "root");
    let word = one(ast.get("word").expect("word slot"));
    let alpha = one(word.get("alpha").expect("alpha slot"));
    assert_eq!(alpha.value.as_deref(), Some("abc"));
}

#[test]
fn greedy_alpha_shapes_to_a_single_scalar_entry() {
    // alpha consumes "abc" in one greedy step, so the one-or-more wrapper
    // holds a single match and the slot stays scalar; eof binds nothing.
    let ast = parsed("$root\n    | <alpha>{+} (<eof>)\n", "abc");
    assert_eq!(ast.contents.as_ref().map(|c| c.len()), Some(1));
    let alpha = one(ast.get("alpha").expect("alpha slot"));
    assert_eq!(alpha.value.as_deref(), Some("abc"));
}

#[test]
fn presence_terminals_never_appear_in_contents() {
    let ast = parsed(
        "$root\n    | word (<eof>)\nword\n    | <alpha>{+}\n",
        "abc",
    );
    assert!(ast.get("eof").is_none());
    assert_eq!(ast.contents.as_ref().map(|c| c.len()), Some(1));
}

#[test]
fn repeated_production_promotes_to_ordered_list() {
    let grammar_source = "\
$root
    | item{+} (<eof>)
item
    | <alpha> <whitespace>
";
    let ast = parsed(grammar_source, "ab cd ");
    match ast.get("item").expect("item slot") {
        ContentsEntry::Many(items) => {
            let words: Vec<&str> = items
                .iter()
                .map(|item| {
                    one(item.get("alpha").expect("alpha slot"))
                        .value
                        .as_deref()
                        .expect("alpha value")
                })
                .collect();
            assert_eq!(words, vec!["ab", "cd"]);
        }
        other => panic!("expected promoted list, got {:?}", other),
    }
}

#[test]
fn aliases_name_the_content_slots() {
    let grammar_source = "\
$root
    | word=subject <space> word=verb (<eof>)
word
    | <alpha>
";
    let ast = parsed(grammar_source, "dogs bark");
    let subject = one(ast.get("subject").expect("subject slot"));
    let verb = one(ast.get("verb").expect("verb slot"));
    assert_eq!(one(subject.get("alpha").unwrap()).value.as_deref(), Some("dogs"));
    assert_eq!(one(verb.get("alpha").unwrap()).value.as_deref(), Some("bark"));
}

#[test]
fn abstract_productions_vanish_from_the_ast() {
    let grammar_source = "\
$root
    | pair (<eof>)
abstract pair
    | word <space> word
word
    | <alpha>
";
    let ast = parsed(grammar_source, "ab cd");
    // pair's children are spliced directly into root
    assert!(ast.get("pair").is_none());
    match ast.get("word").expect("word slot") {
        ContentsEntry::Many(words) => assert_eq!(words.len(), 2),
        other => panic!("expected two words, got {:?}", other),
    }
}

#[test]
fn later_derivations_back_track_cleanly() {
    let grammar_source = "\
$root
    | \"let\" <space> word (<eof>)
    | word (<eof>)
word
    | <alpha>
";
    let ast = parsed(grammar_source, "letter");
    // "let" matches as a prefix but the first derivation then fails; the
    // second must see the untouched input.
    let word = one(ast.get("word").expect("word slot"));
    assert_eq!(one(word.get("alpha").unwrap()).value.as_deref(), Some("letter"));
}

#[test]
fn terminal_directive_repoints_names_to_literals() {
    let grammar_source = "\
!terminal <arrow> \"->\"
$root
    | edge (<eof>)
edge
    | <alpha> arrow <alpha>
";
    let ast = parsed(grammar_source, "a->b");
    let edge = one(ast.get("edge").expect("edge slot"));
    match edge.get("alpha").expect("alpha slot") {
        ContentsEntry::Many(sides) => assert_eq!(sides.len(), 2),
        other => panic!("expected both sides, got {:?}", other),
    }
}

#[test]
fn unmatched_input_is_an_outcome_not_an_error() {
    let grammar = compiled("$root\n    | \"yes\" (<eof>)\n");
    let outcome = engine::parse(&grammar, "no").expect("parse should not error");
    assert_eq!(outcome, ParseOutcome::NoMatch);
}

#[test]
fn empty_input_never_matches() {
    let grammar = compiled("$root\n    | <whitespace>\n");
    let outcome = engine::parse(&grammar, "").expect("parse should not error");
    assert_eq!(outcome, ParseOutcome::NoMatch);
}

#[test]
fn grammar_without_entry_is_an_error() {
    let grammar = compiled("root\n    | \"x\"\n");
    let err = engine::parse(&grammar, "x").unwrap_err();
    assert_eq!(err, GrammarError::MissingEntryProduction);
}

#[test]
fn partial_match_succeeds_without_eof_anchor() {
    let ast = parsed("$root\n    | \"ab\"\n", "abcdef");
    let literal = one(ast.get("ab").expect("literal slot"));
    assert_eq!(literal.value.as_deref(), Some("ab"));
}

#[test]
fn strict_compilation_surfaces_grammar_typos() {
    let source = "$root\n   | \"x\"\n"; // three-space indent, not a derivation
    assert!(grammar::compile(source).is_ok());
    let err = grammar::compile_strict(source).unwrap_err();
    assert!(matches!(err, GrammarError::UnrecognizedLine { line: 2, .. }));
}

#[test]
fn comments_and_blank_lines_are_inert() {
    let grammar_source = "\
; word grammar

$root
    | word (<eof>) ; anchored
word
    | <alpha>
";
    let ast = parsed(grammar_source, "hi");
    assert_eq!(ast.kind, "root");
}

#[test]
fn ast_serializes_to_stable_json() {
    let ast = parsed(
        "$root\n    | word (<eof>)\nword\n    | <alpha>\n",
        "hi",
    );
    let json = serde_json::to_value(&ast).expect("serialize");
    assert_eq!(json["kind"], "root");
    assert_eq!(json["contents"]["word"]["contents"]["alpha"]["value"], "hi");
}
