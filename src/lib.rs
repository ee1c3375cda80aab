//! # gram
//!
//! A parser generator for the gram grammar notation.
//!
//! A gram grammar is a line-oriented description of a language: productions,
//! their ordered derivations, and directives. From it this crate builds a
//! [`grammar::Grammar`] model, can execute that model directly against input
//! text with the backtracking [`engine`], and can compile it into standalone
//! Rust parser source with [`codegen`].
//!
//! ```text
//! ; a tiny grammar
//! $greeting
//!     | "hello" <space> <alpha>=name (<eof>)
//! ```
//!
//! Compilation is a synchronous batch transform: grammar text in, either an
//! assembled model or generated parser source out. All file I/O lives in the
//! `gram` binary, not here.

pub mod codegen;
pub mod engine;
pub mod grammar;
pub mod idents;
pub mod terminals;
