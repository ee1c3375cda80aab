//! IR emitter
//!
//! Renders the code-generation IR to text through a [`SourceWriter`].
//! Layout decisions (indent width, brace placement) live here and in the
//! writer; the IR carries structure only.

use super::formatter::SourceWriter;
use super::ir::{Item, Module, Stmt};

/// Render a whole module with default formatting.
pub fn emit(module: &Module) -> String {
    let mut writer = SourceWriter::new();
    for item in &module.items {
        emit_item(item, &mut writer);
    }
    writer.finish()
}

fn emit_item(item: &Item, writer: &mut SourceWriter) {
    match item {
        Item::Comment(text) => {
            for line in text.lines() {
                writer.line(&format!("// {}", line));
            }
        }
        Item::Raw(text) => {
            for line in text.lines() {
                writer.line(line);
            }
        }
        Item::Blank => writer.blank(),
        Item::Function(function) => {
            if let Some(doc) = &function.doc {
                for line in doc.lines() {
                    writer.line(&format!("/// {}", line));
                }
            }
            let visibility = if function.is_public { "pub " } else { "" };
            writer.open(&format!(
                "{}fn {}({}) -> {} {{",
                visibility,
                function.name,
                function.params.join(", "),
                function.ret
            ));
            emit_stmts(&function.body, writer);
            writer.close("}");
            writer.blank();
        }
    }
}

fn emit_stmts(stmts: &[Stmt], writer: &mut SourceWriter) {
    for stmt in stmts {
        match stmt {
            Stmt::Raw(text) => writer.line(text),
            Stmt::Comment(text) => writer.line(&format!("// {}", text)),
            Stmt::Blank => writer.blank(),
            Stmt::If { cond, then } => {
                writer.open(&format!("if {} {{", cond.render()));
                emit_stmts(then, writer);
                writer.close("}");
            }
            Stmt::LabeledBlock { label, body } => {
                writer.open(&format!("'{}: {{", label));
                emit_stmts(body, writer);
                writer.close("}");
            }
            Stmt::Return(expr) => writer.line(&format!("return {};", expr.render())),
        }
    }
}
