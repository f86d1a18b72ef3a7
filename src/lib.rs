//! Frontend for a small Oberon-style record language.
//!
//! The language has record types with single inheritance, pointer types,
//! assignment/conditional/loop statements, and arithmetic and boolean
//! expressions. [`parse`] turns a source text into a [`frontend::ast::Program`]
//! or fails with the first [`Error`] encountered; error positions are 0-based
//! character offsets into the input.

pub mod frontend;
pub mod utils;

pub use frontend::ast;
pub use frontend::parse;
pub use utils::{Error, Result, Span};
