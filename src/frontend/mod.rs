//! Frontend: lexical analysis, parsing, AST construction

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod token;

use crate::utils::Result;
use ast::Program;
use lexer::Lexer;
use parser::Parser;

/// Parse a complete source text into a [`Program`].
///
/// Each call gets fresh lexer and parser state, so independent texts can be
/// parsed concurrently. The first lex or parse error halts parsing and is
/// returned as is.
pub fn parse(source: &str) -> Result<Program> {
    let tokens = Lexer::new(source).tokenize()?;
    Parser::from_tokens(tokens).parse_program()
}
