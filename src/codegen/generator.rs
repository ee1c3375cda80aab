//! Parser generator
//!
//! Builds the IR module for a grammar: a header comment, the runtime
//! prelude, one parse function per production, one shared function per
//! distinct literal, and the public `parse` entry point wired to the
//! grammar's entry production. The emitted functions follow the same
//! matching protocol as [`crate::engine::Matcher`]: fail at end of input,
//! try derivations in order from a saved scout, commit on success.

use std::fmt;

use super::emitter;
use super::ir::{Expr, Function, Item, Module, Stmt};
use super::prelude::RUNTIME_PRELUDE;
use crate::grammar::{Derivation, Grammar, Production, Quantifier, Target, TargetKind};
use crate::idents;

/// Generation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodegenError {
    /// The grammar declares no `$`-marked entry production.
    MissingEntryProduction,
}

impl fmt::Display for CodegenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodegenError::MissingEntryProduction => {
                write!(f, "grammar has no entry production")
            }
        }
    }
}

impl std::error::Error for CodegenError {}

/// Generate standalone Rust parser source for `grammar`.
pub fn generate(grammar: &Grammar) -> Result<String, CodegenError> {
    let module = build_module(grammar)?;
    Ok(emitter::emit(&module))
}

fn build_module(grammar: &Grammar) -> Result<Module, CodegenError> {
    let entry = grammar
        .entry_production()
        .ok_or(CodegenError::MissingEntryProduction)?;

    let mut items = vec![
        Item::Comment(format!(
            "Parser generated by gram {}.\nEdit the grammar, not this file.",
            env!("CARGO_PKG_VERSION")
        )),
        Item::Blank,
        Item::Raw(RUNTIME_PRELUDE.to_string()),
    ];

    for production in &grammar.productions {
        items.push(Item::Function(production_function(production)));
    }
    for value in collect_literals(grammar) {
        items.push(Item::Function(literal_function(&value)));
    }
    items.push(Item::Function(entry_function(&entry.name)));

    Ok(Module { items })
}

fn production_fn_name(name: &str) -> String {
    format!("parse_production_{}", idents::sanitize(name))
}

fn literal_fn_name(value: &str) -> String {
    format!("parse_literal_{}", idents::sanitize(value))
}

fn production_function(production: &Production) -> Function {
    let mut body = vec![
        Stmt::If {
            cond: Expr::raw("st.index >= st.source.len()"),
            then: vec![Stmt::Return(Expr::raw("None"))],
        },
        Stmt::Raw("let scout_original = st.scout;".to_string()),
        Stmt::Blank,
    ];
    for (i, derivation) in production.derivations.iter().enumerate() {
        let label = format!("d{}", i);
        body.push(Stmt::Comment(describe_derivation(derivation)));
        body.push(Stmt::Raw("st.scout = scout_original;".to_string()));
        body.push(Stmt::LabeledBlock {
            label: label.clone(),
            body: derivation_block(production, derivation, &label),
        });
        body.push(Stmt::Blank);
    }
    body.push(Stmt::Raw("st.scout = scout_original;".to_string()));
    body.push(Stmt::Raw("None".to_string()));

    Function {
        name: production_fn_name(&production.name),
        params: vec![
            "st: &mut State".to_string(),
            "alias: Option<&str>".to_string(),
        ],
        ret: "Option<Node>".to_string(),
        is_public: false,
        doc: Some(format!("Production `{}`.", production.name)),
        body,
    }
}

fn derivation_block(production: &Production, derivation: &Derivation, label: &str) -> Vec<Stmt> {
    let mut body = vec![Stmt::Raw(
        "let mut children: Vec<Node> = Vec::new();".to_string(),
    )];
    for target in &derivation.targets {
        let expr = target_expr(target).render();
        if target.is_presence {
            body.push(Stmt::Raw(format!(
                "if {}.is_none() {{ break '{}; }}",
                expr, label
            )));
        } else {
            body.push(Stmt::Raw(format!(
                "let Some(child) = {} else {{ break '{}; }};",
                expr, label
            )));
            body.push(Stmt::Raw("children.push(child);".to_string()));
        }
    }
    body.push(Stmt::Raw("st.index += st.scout;".to_string()));
    body.push(Stmt::Raw("st.scout = 0;".to_string()));
    body.push(Stmt::Return(Expr::call("Some", vec![node_expr(production)])));
    body
}

/// The node constructor call for a successful derivation. A caller-supplied
/// alias overrides the production's static alias.
fn node_expr(production: &Production) -> Expr {
    let alias = match &production.alias {
        Some(alias) => format!("alias.or(Some({:?}))", alias),
        None => "alias".to_string(),
    };
    Expr::call(
        "node",
        vec![
            Expr::raw(format!("{:?}", production.name)),
            Expr::raw("None"),
            Expr::raw("children"),
            Expr::raw(if production.is_entry { "true" } else { "false" }),
            Expr::raw(if production.is_abstract { "true" } else { "false" }),
            Expr::raw(alias),
        ],
    )
}

/// One target evaluated through its quantifier combinator.
fn target_expr(target: &Target) -> Expr {
    let alias = match &target.alias {
        Some(alias) => format!("Some({:?})", alias),
        None => "None".to_string(),
    };
    let callee = match &target.kind {
        TargetKind::Literal { value } => literal_fn_name(value),
        TargetKind::Terminal { name, .. } => format!("parse_terminal_{}", idents::sanitize(name)),
        TargetKind::ProductionRef { name } => production_fn_name(name),
    };
    let inner = Expr::closure(
        "st",
        Expr::call(callee, vec![Expr::raw("st"), Expr::raw(alias)]),
    );
    let quantifier = match target.quantifier {
        Quantifier::One => "quantify_once",
        Quantifier::ZeroOrMore => "quantify_zero_or_more",
        Quantifier::OneOrMore => "quantify_one_or_more",
    };
    Expr::call(quantifier, vec![Expr::raw("st"), inner])
}

/// Every distinct literal value, in first-seen order.
fn collect_literals(grammar: &Grammar) -> Vec<String> {
    let mut seen = Vec::new();
    for production in &grammar.productions {
        for derivation in &production.derivations {
            for target in &derivation.targets {
                if let TargetKind::Literal { value } = &target.kind {
                    if !seen.contains(value) {
                        seen.push(value.clone());
                    }
                }
            }
        }
    }
    seen
}

fn literal_function(value: &str) -> Function {
    Function {
        name: literal_fn_name(value),
        params: vec![
            "st: &mut State".to_string(),
            "alias: Option<&str>".to_string(),
        ],
        ret: "Option<Node>".to_string(),
        is_public: false,
        doc: Some(format!("Literal `{:?}`.", value)),
        body: vec![
            Stmt::Raw("let at = st.index + st.scout;".to_string()),
            Stmt::If {
                cond: Expr::raw(format!(
                    "!st.source.get(at..).map_or(false, |rest| rest.starts_with({:?}))",
                    value
                )),
                then: vec![Stmt::Return(Expr::raw("None"))],
            },
            Stmt::Raw(format!("st.scout += {};", value.len())),
            Stmt::Return(Expr::call(
                "Some",
                vec![Expr::call(
                    "leaf",
                    vec![
                        Expr::raw(format!("{:?}", idents::sanitize(value))),
                        Expr::raw(format!("Some({:?}.to_string())", value)),
                        Expr::raw("alias"),
                    ],
                )],
            )),
        ],
    }
}

fn entry_function(entry_name: &str) -> Function {
    Function {
        name: "parse".to_string(),
        params: vec!["source: &str".to_string()],
        ret: "Option<AstNode>".to_string(),
        is_public: true,
        doc: Some(format!(
            "Parse `source` from the `{}` entry production.\n\
             Returns `None` when the input does not match.",
            entry_name
        )),
        body: vec![
            Stmt::Raw("let mut st = State::new(source);".to_string()),
            Stmt::Raw(format!(
                "let tree = {}(&mut st, None)?;",
                production_fn_name(entry_name)
            )),
            Stmt::Return(Expr::call(
                "Some",
                vec![Expr::call(
                    "shape",
                    vec![Expr::call("flatten", vec![Expr::raw("tree")])],
                )],
            )),
        ],
    }
}

/// Render a derivation back to grammar notation for the emitted comment.
fn describe_derivation(derivation: &Derivation) -> String {
    let targets: Vec<String> = derivation.targets.iter().map(describe_target).collect();
    format!("| {}", targets.join(" "))
}

fn describe_target(target: &Target) -> String {
    let mut text = match &target.kind {
        TargetKind::Literal { value } => format!("{:?}", value),
        TargetKind::Terminal { name, .. } => format!("<{}>", name),
        TargetKind::ProductionRef { name } => name.clone(),
    };
    match target.quantifier {
        Quantifier::One => {}
        Quantifier::ZeroOrMore => text.push_str("{*}"),
        Quantifier::OneOrMore => text.push_str("{+}"),
    }
    if target.is_presence {
        text = format!("({})", text);
    }
    if let Some(alias) = &target.alias {
        text = format!("{}={}", text, alias);
    }
    text
}
