//! Code-generation IR
//!
//! A small tree of items, statements and expressions standing between the
//! grammar model and emitted text. The generator builds this; the emitter
//! renders it. Free-form source strings appear only at the leaves
//! (`Raw`), never as whole function bodies.

/// An expression in generated code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Raw(String),
    Call { callee: String, args: Vec<Expr> },
    Closure { param: String, body: Box<Expr> },
}

impl Expr {
    pub fn raw(text: impl Into<String>) -> Self {
        Expr::Raw(text.into())
    }

    pub fn call(callee: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::Call {
            callee: callee.into(),
            args,
        }
    }

    pub fn closure(param: impl Into<String>, body: Expr) -> Self {
        Expr::Closure {
            param: param.into(),
            body: Box::new(body),
        }
    }

    /// Render to source text. Expressions are single-line by construction.
    pub fn render(&self) -> String {
        match self {
            Expr::Raw(text) => text.clone(),
            Expr::Call { callee, args } => {
                let args: Vec<String> = args.iter().map(Expr::render).collect();
                format!("{}({})", callee, args.join(", "))
            }
            Expr::Closure { param, body } => format!("|{}| {}", param, body.render()),
        }
    }
}

/// A statement in a generated function body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    Raw(String),
    Comment(String),
    Blank,
    If { cond: Expr, then: Vec<Stmt> },
    /// `'label: { … }` — derivations break out of these on failure
    LabeledBlock { label: String, body: Vec<Stmt> },
    Return(Expr),
}

/// A generated function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    pub name: String,
    pub params: Vec<String>,
    pub ret: String,
    pub is_public: bool,
    pub doc: Option<String>,
    pub body: Vec<Stmt>,
}

/// A top-level item of the generated module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    Comment(String),
    Raw(String),
    Function(Function),
    Blank,
}

/// The whole generated module.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Module {
    pub items: Vec<Item>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_nested_calls_and_closures() {
        let expr = Expr::call(
            "quantify_once",
            vec![
                Expr::raw("st"),
                Expr::closure("st", Expr::call("parse_literal_a", vec![Expr::raw("st"), Expr::raw("None")])),
            ],
        );
        assert_eq!(
            expr.render(),
            "quantify_once(st, |st| parse_literal_a(st, None))"
        );
    }
}
