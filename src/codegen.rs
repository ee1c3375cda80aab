//! Parser code generation
//!
//! Compiles a [`Grammar`](crate::grammar::Grammar) into standalone Rust
//! parser source. The generator assembles an explicit intermediate
//! representation — function, conditional and call nodes ([`ir`]) — which
//! the [`emitter`] renders through a swappable indentation formatter
//! ([`formatter`]). The emitted parser's runtime behavior is the binding
//! contract, and it is the same contract [`crate::engine`] implements
//! in-process; the text itself is just one acceptable rendering.

pub mod emitter;
pub mod formatter;
pub mod generator;
pub mod ir;
mod prelude;

pub use formatter::SourceWriter;
pub use generator::{generate, CodegenError};
