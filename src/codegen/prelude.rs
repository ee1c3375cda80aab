//! Runtime prelude for emitted parsers
//!
//! Every generated parser begins with this fixed block: the parse-tree node
//! type, the cursor state, the quantifier combinators, the built-in
//! terminal matchers and the two-pass post-processor. Semantics mirror
//! [`crate::engine`] exactly; the per-grammar functions the generator
//! appends only dispatch into these helpers.

pub(crate) const RUNTIME_PRELUDE: &str = r##"#![allow(dead_code, unused_mut, unused_variables)]

/// One node of the raw parse tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub name: String,
    pub value: Option<String>,
    pub children: Vec<Node>,
    pub is_entry: bool,
    pub is_abstract: bool,
    pub alias: Option<String>,
}

/// Matching state: committed `index` plus speculative `scout` offset.
/// Matching only ever advances `scout`; a successful derivation commits it.
pub struct State<'s> {
    source: &'s str,
    index: usize,
    scout: usize,
}

impl<'s> State<'s> {
    pub fn new(source: &'s str) -> Self {
        State { source, index: 0, scout: 0 }
    }
}

fn node(
    name: &str,
    value: Option<String>,
    children: Vec<Node>,
    is_entry: bool,
    is_abstract: bool,
    alias: Option<&str>,
) -> Node {
    Node {
        name: name.to_string(),
        value,
        children,
        is_entry,
        is_abstract,
        alias: alias.map(str::to_string),
    }
}

fn leaf(name: &str, value: Option<String>, alias: Option<&str>) -> Node {
    node(name, value, Vec::new(), false, false, alias)
}

fn quantify_once(
    st: &mut State,
    mut parse: impl FnMut(&mut State) -> Option<Node>,
) -> Option<Node> {
    parse(st)
}

/// Repeat until the first failing attempt, then succeed iff at least `n`
/// repetitions matched, wrapped in an abstract List node. A zero-width
/// success ends the repetition so always-succeeding terminals terminate.
fn quantify_at_least(
    n: usize,
    st: &mut State,
    mut parse: impl FnMut(&mut State) -> Option<Node>,
) -> Option<Node> {
    let mut nodes = Vec::new();
    loop {
        let at_before = st.index + st.scout;
        match parse(st) {
            Some(matched) => {
                nodes.push(matched);
                if st.index + st.scout == at_before {
                    break;
                }
            }
            None => break,
        }
    }
    if nodes.len() >= n {
        let mut list = node("List", None, nodes, false, false, None);
        list.is_abstract = true;
        Some(list)
    } else {
        None
    }
}

fn quantify_zero_or_more(
    st: &mut State,
    parse: impl FnMut(&mut State) -> Option<Node>,
) -> Option<Node> {
    quantify_at_least(0, st, parse)
}

fn quantify_one_or_more(
    st: &mut State,
    parse: impl FnMut(&mut State) -> Option<Node>,
) -> Option<Node> {
    quantify_at_least(1, st, parse)
}

fn parse_terminal_newline(st: &mut State, alias: Option<&str>) -> Option<Node> {
    let at = st.index + st.scout;
    if st.source.as_bytes().get(at) == Some(&b'\n') {
        st.scout += 1;
        return Some(leaf("newline", Some("\n".to_string()), alias));
    }
    None
}

fn parse_terminal_eof(st: &mut State, alias: Option<&str>) -> Option<Node> {
    if st.index + st.scout == st.source.len() {
        return Some(leaf("eof", None, alias));
    }
    None
}

fn parse_terminal_space(st: &mut State, alias: Option<&str>) -> Option<Node> {
    let at = st.index + st.scout;
    if st.source.as_bytes().get(at) == Some(&b' ') {
        st.scout += 1;
        return Some(leaf("space", Some(" ".to_string()), alias));
    }
    None
}

fn parse_terminal_whitespace(st: &mut State, alias: Option<&str>) -> Option<Node> {
    let at = st.index + st.scout;
    let len = st
        .source
        .as_bytes()
        .get(at..)
        .unwrap_or(&[])
        .iter()
        .take_while(|b| matches!(**b, b' ' | b'\t' | b'\n'))
        .count();
    st.scout += len;
    Some(leaf("whitespace", Some(st.source[at..at + len].to_string()), alias))
}

fn parse_terminal_empty(_st: &mut State, alias: Option<&str>) -> Option<Node> {
    Some(leaf("empty", Some(String::new()), alias))
}

fn parse_terminal_alpha(st: &mut State, alias: Option<&str>) -> Option<Node> {
    let at = st.index + st.scout;
    let len = st
        .source
        .as_bytes()
        .get(at..)
        .unwrap_or(&[])
        .iter()
        .take_while(|b| b.is_ascii_alphabetic())
        .count();
    if len == 0 {
        return None;
    }
    st.scout += len;
    Some(leaf("alpha", Some(st.source[at..at + len].to_string()), alias))
}

/// A shaped AST node: a leaf with a value, or an interior node whose
/// children live in an ordered alias-to-entry map.
#[derive(Debug, Clone, PartialEq)]
pub struct AstNode {
    pub kind: String,
    pub value: Option<String>,
    pub contents: Option<Vec<(String, Entry)>>,
}

/// One contents slot: a single child, or the ordered list a repeated
/// alias was promoted to.
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    One(AstNode),
    Many(Vec<AstNode>),
}

/// Bottom-up abstract flattening; idempotent by construction.
fn flatten(tree: Node) -> Node {
    let mut children: Vec<Node> = tree.children.into_iter().map(flatten).collect();
    while children.iter().any(|child| child.is_abstract) {
        children = children
            .into_iter()
            .flat_map(|child| {
                if child.is_abstract {
                    child.children
                } else {
                    vec![child]
                }
            })
            .collect();
    }
    Node { children, ..tree }
}

fn insert_entry(contents: &mut Vec<(String, Entry)>, alias: String, ast: AstNode) {
    match contents.iter().position(|(key, _)| *key == alias) {
        Some(pos) => {
            let slot = &mut contents[pos].1;
            let current = std::mem::replace(slot, Entry::Many(Vec::new()));
            *slot = match current {
                Entry::One(first) => Entry::Many(vec![first, ast]),
                Entry::Many(mut nodes) => {
                    nodes.push(ast);
                    Entry::Many(nodes)
                }
            };
        }
        None => contents.push((alias, Entry::One(ast))),
    }
}

/// Alias/contents shaping: default alias is the node's own name; repeated
/// aliases promote scalar slots to ordered lists.
fn shape(tree: Node) -> AstNode {
    if tree.children.is_empty() {
        return AstNode { kind: tree.name, value: tree.value, contents: None };
    }
    let mut contents = Vec::new();
    for child in tree.children {
        let alias = child.alias.clone().unwrap_or_else(|| child.name.clone());
        insert_entry(&mut contents, alias, shape(child));
    }
    AstNode { kind: tree.name, value: tree.value, contents: Some(contents) }
}
"##;
