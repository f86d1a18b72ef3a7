//! Lexer for the record language
//!
//! Converts source text into a stream of tokens, skipping whitespace and
//! `(* ... *)` comments.

use crate::frontend::token::{Token, TokenKind};
use crate::utils::{Error, Result, Span};

/// The lexer state
pub struct Lexer {
    /// Source text as characters
    source: Vec<char>,
    /// Current position in source
    pos: usize,
    /// Start position of current token
    start: usize,
}

impl Lexer {
    /// Create a new lexer for the given source text
    pub fn new(source: &str) -> Self {
        Self {
            source: source.chars().collect(),
            pos: 0,
            start: 0,
        }
    }

    /// Get the current character without advancing
    fn peek(&self) -> Option<char> {
        self.source.get(self.pos).copied()
    }

    /// Get the next character without advancing
    fn peek_next(&self) -> Option<char> {
        self.source.get(self.pos + 1).copied()
    }

    /// Advance to the next character
    fn advance(&mut self) -> Option<char> {
        let c = self.peek();
        self.pos += 1;
        c
    }

    /// Create a span from start to current position
    fn make_span(&self) -> Span {
        Span::new(self.start, self.pos)
    }

    /// Create a token with the current span
    fn make_token(&self, kind: TokenKind) -> Token {
        Token::new(kind, self.make_span())
    }

    /// Skip whitespace and comments.
    ///
    /// A comment runs from `(*` to the nearest following `*)` on the same
    /// line; comments do not nest and cannot span a newline. A `(*` with no
    /// closing `*)` before the end of the line (or of the input) is not a
    /// comment at all, so the `(` is left for ordinary tokenization.
    fn skip_ignored(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.advance();
            } else if c == '(' && self.peek_next() == Some('*') {
                let mut i = self.pos + 2;
                let mut close = None;
                while i + 1 < self.source.len() {
                    if self.source[i] == '\n' {
                        break;
                    }
                    if self.source[i] == '*' && self.source[i + 1] == ')' {
                        close = Some(i + 2);
                        break;
                    }
                    i += 1;
                }
                match close {
                    Some(end) => self.pos = end,
                    None => break,
                }
            } else {
                break;
            }
        }
    }

    /// Read an identifier or keyword.
    ///
    /// Keywords take priority over type names; a non-keyword identifier is a
    /// type name or a variable name depending on the case of its first
    /// letter.
    fn read_identifier(&mut self) -> Token {
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() {
                self.advance();
            } else {
                break;
            }
        }

        let text: String = self.source[self.start..self.pos].iter().collect();

        let kind = TokenKind::keyword_from_str(&text).unwrap_or_else(|| {
            if text.starts_with(|c: char| c.is_ascii_uppercase()) {
                TokenKind::TypeName(text)
            } else {
                TokenKind::VarName(text)
            }
        });

        self.make_token(kind)
    }

    /// Read a number literal.
    ///
    /// A bare digit run is always an integer; only a fractional part or a
    /// well-formed exponent (`e` followed by an optional sign and at least
    /// one digit, lowercase `e` only) makes it a real. An `e` without digits
    /// after it is left for the next token. An integer literal that does not
    /// fit `i64` is a lexical error.
    fn read_number(&mut self) -> Result<Token> {
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                self.advance();
            } else {
                break;
            }
        }

        let mut is_real = false;

        if self.peek() == Some('.') {
            is_real = true;
            self.advance();
            while let Some(c) = self.peek() {
                if c.is_ascii_digit() {
                    self.advance();
                } else {
                    break;
                }
            }
        }

        if self.peek() == Some('e') {
            let mut i = self.pos + 1;
            if matches!(self.source.get(i), Some('+') | Some('-')) {
                i += 1;
            }
            if self.source.get(i).is_some_and(|c| c.is_ascii_digit()) {
                is_real = true;
                self.pos = i;
                while let Some(c) = self.peek() {
                    if c.is_ascii_digit() {
                        self.advance();
                    } else {
                        break;
                    }
                }
            }
        }

        let text: String = self.source[self.start..self.pos].iter().collect();

        if is_real {
            let value = text.parse().unwrap_or(0.0);
            Ok(self.make_token(TokenKind::RealLit(value)))
        } else {
            match text.parse() {
                Ok(value) => Ok(self.make_token(TokenKind::IntLit(value))),
                Err(_) => Err(Error::Lex {
                    message: "integer literal out of range".to_string(),
                    span: self.make_span(),
                }),
            }
        }
    }

    /// Get the next token
    pub fn next_token(&mut self) -> Result<Token> {
        self.skip_ignored();
        self.start = self.pos;

        let Some(c) = self.peek() else {
            return Ok(Token::eof(self.make_span()));
        };

        if c.is_ascii_alphabetic() {
            return Ok(self.read_identifier());
        }

        if c.is_ascii_digit() {
            return self.read_number();
        }

        self.advance();

        let kind = match c {
            ':' => {
                if self.peek() == Some('=') {
                    self.advance();
                    TokenKind::Assign
                } else {
                    TokenKind::Colon
                }
            }
            '<' => {
                if self.peek() == Some('=') {
                    self.advance();
                    TokenKind::Le
                } else {
                    TokenKind::Lt
                }
            }
            '>' => {
                if self.peek() == Some('=') {
                    self.advance();
                    TokenKind::Ge
                } else {
                    TokenKind::Gt
                }
            }
            ';' => TokenKind::Semicolon,
            ',' => TokenKind::Comma,
            '.' => TokenKind::Dot,
            '^' => TokenKind::Caret,
            '=' => TokenKind::Eq,
            '#' => TokenKind::Hash,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            _ => {
                return Err(Error::Lex {
                    message: format!("unrecognized character {:?}", c),
                    span: self.make_span(),
                })
            }
        };

        Ok(self.make_token(kind))
    }

    /// Tokenize the entire source and return all tokens (including `Eof`)
    pub fn tokenize(&mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        Ok(tokens)
    }
}
