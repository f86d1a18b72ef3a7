//! Parser for the record language
//!
//! Recursive descent with one token of lookahead, one method per grammar
//! nonterminal. The expression grammar is layered: comparison (lowest,
//! non-associative) < additive < multiplicative < unary NOT < atoms.

use crate::frontend::ast::*;
use crate::frontend::lexer::Lexer;
use crate::frontend::token::{Token, TokenKind};
use crate::utils::{Error, Result};

/// The parser
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    /// Create a parser from a lexer, tokenizing the whole input up front
    pub fn new(mut lexer: Lexer) -> Result<Self> {
        Ok(Self {
            tokens: lexer.tokenize()?,
            pos: 0,
        })
    }

    /// Create a parser from pre-tokenized input.
    ///
    /// The token list must end with an `Eof` token, as produced by
    /// [`Lexer::tokenize`].
    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        debug_assert!(matches!(
            tokens.last().map(|t| &t.kind),
            Some(TokenKind::Eof)
        ));
        Self { tokens, pos: 0 }
    }

    // ==================== Helper Methods ====================

    fn current(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or_else(|| {
            self.tokens.last().expect("tokens should not be empty")
        })
    }

    fn current_kind(&self) -> &TokenKind {
        &self.current().kind
    }

    fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        token
    }

    fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(self.current_kind()) == std::mem::discriminant(kind)
    }

    fn is_at_end(&self) -> bool {
        matches!(self.current_kind(), TokenKind::Eof)
    }

    fn expect(&mut self, expected: TokenKind) -> Result<Token> {
        if self.check(&expected) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(&format!("'{}'", expected)))
        }
    }

    fn consume(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn unexpected(&self, expected: &str) -> Error {
        Error::UnexpectedToken {
            expected: expected.to_string(),
            found: format!("'{}'", self.current_kind()),
            span: self.current().span,
        }
    }

    // ==================== Declarations ====================

    /// Parse a complete program:
    /// `TYPE TypeDef* VAR VarsDef* BEGIN Statement+ END .`
    pub fn parse_program(&mut self) -> Result<Program> {
        self.expect(TokenKind::Type)?;
        let mut type_defs = Vec::new();
        while matches!(self.current_kind(), TokenKind::TypeName(_)) {
            type_defs.push(self.parse_type_def()?);
        }

        self.expect(TokenKind::Var)?;
        let mut var_defs = Vec::new();
        while matches!(self.current_kind(), TokenKind::VarName(_)) {
            var_defs.push(self.parse_vars_def()?);
        }

        self.expect(TokenKind::Begin)?;
        let statements = self.parse_statements()?;
        self.expect(TokenKind::End)?;
        self.expect(TokenKind::Dot)?;

        if !self.is_at_end() {
            return Err(self.unexpected("end of input"));
        }

        Ok(Program {
            type_defs,
            var_defs,
            statements,
        })
    }

    /// `TYPENAME = RECORD [( Type )] VarsDef* END ;`
    fn parse_type_def(&mut self) -> Result<TypeDef> {
        let name = self.parse_type_name()?;
        self.expect(TokenKind::Eq)?;
        self.expect(TokenKind::Record)?;

        let parent = if self.consume(&TokenKind::LParen) {
            let parent = self.parse_type()?;
            self.expect(TokenKind::RParen)?;
            Some(parent)
        } else {
            None
        };

        let mut fields = Vec::new();
        while matches!(self.current_kind(), TokenKind::VarName(_)) {
            fields.push(self.parse_vars_def()?);
        }

        self.expect(TokenKind::End)?;
        self.expect(TokenKind::Semicolon)?;

        Ok(TypeDef {
            name,
            parent,
            fields,
        })
    }

    /// `VARNAME (, VARNAME)* : VarType ;`
    fn parse_vars_def(&mut self) -> Result<VarsDef> {
        let mut names = vec![self.parse_var_name()?];
        while self.consume(&TokenKind::Comma) {
            names.push(self.parse_var_name()?);
        }

        self.expect(TokenKind::Colon)?;
        let ty = self.parse_var_type()?;
        self.expect(TokenKind::Semicolon)?;

        Ok(VarsDef::new(names, ty))
    }

    /// `Type | POINTER TO Type`
    fn parse_var_type(&mut self) -> Result<VarType> {
        let is_pointer = self.consume(&TokenKind::Pointer);
        if is_pointer {
            self.expect(TokenKind::To)?;
        }
        let ty = self.parse_type()?;
        Ok(VarType { ty, is_pointer })
    }

    /// `INTEGER | REAL | BOOLEAN | TYPENAME`
    fn parse_type(&mut self) -> Result<Type> {
        let ty = match self.current_kind() {
            TokenKind::Integer => Type::Global(GlobalType::Integer),
            TokenKind::Real => Type::Global(GlobalType::Real),
            TokenKind::Boolean => Type::Global(GlobalType::Boolean),
            TokenKind::TypeName(name) => Type::Local(name.clone()),
            _ => return Err(self.unexpected("a type")),
        };
        self.advance();
        Ok(ty)
    }

    fn parse_var_name(&mut self) -> Result<String> {
        match self.current_kind() {
            TokenKind::VarName(name) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            _ => Err(self.unexpected("a variable name")),
        }
    }

    fn parse_type_name(&mut self) -> Result<String> {
        match self.current_kind() {
            TokenKind::TypeName(name) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            _ => Err(self.unexpected("a type name")),
        }
    }

    /// `VARNAME (. VARNAME)*`
    fn parse_var_chain(&mut self) -> Result<VarChain> {
        let mut parts = vec![self.parse_var_name()?];
        while self.consume(&TokenKind::Dot) {
            parts.push(self.parse_var_name()?);
        }
        Ok(VarChain::new(parts))
    }

    // ==================== Statements ====================

    /// One or more statements; `IF`/`WHILE` bodies and the top-level list
    /// have no empty form.
    fn parse_statements(&mut self) -> Result<Vec<Statement>> {
        let mut statements = vec![self.parse_statement()?];
        while self.at_statement_start() {
            statements.push(self.parse_statement()?);
        }
        Ok(statements)
    }

    fn at_statement_start(&self) -> bool {
        matches!(
            self.current_kind(),
            TokenKind::VarName(_) | TokenKind::New | TokenKind::If | TokenKind::While
        )
    }

    fn parse_statement(&mut self) -> Result<Statement> {
        match self.current_kind() {
            TokenKind::VarName(_) => self.parse_assign(),
            TokenKind::New => self.parse_create(),
            TokenKind::If => self.parse_if(),
            TokenKind::While => self.parse_while(),
            _ => Err(self.unexpected("a statement")),
        }
    }

    /// `VarChain := Expr ;` or `VARNAME ^ := VarChain ;`
    fn parse_assign(&mut self) -> Result<Statement> {
        let name = self.parse_var_name()?;

        if self.consume(&TokenKind::Caret) {
            self.expect(TokenKind::Assign)?;
            let value = self.parse_var_chain()?;
            self.expect(TokenKind::Semicolon)?;
            return Ok(Statement::PointerAssign {
                pointer: name,
                value,
            });
        }

        let mut parts = vec![name];
        while self.consume(&TokenKind::Dot) {
            parts.push(self.parse_var_name()?);
        }

        self.expect(TokenKind::Assign)?;
        let value = self.parse_expr()?;
        self.expect(TokenKind::Semicolon)?;

        Ok(Statement::Assign {
            target: VarChain::new(parts),
            value,
        })
    }

    /// `NEW ( VARNAME ) ;`
    fn parse_create(&mut self) -> Result<Statement> {
        self.expect(TokenKind::New)?;
        self.expect(TokenKind::LParen)?;
        let pointer = self.parse_var_name()?;
        self.expect(TokenKind::RParen)?;
        self.expect(TokenKind::Semicolon)?;
        Ok(Statement::Create { pointer })
    }

    /// `IF Expr THEN Statement+ ELSE Statement+ END ;`
    fn parse_if(&mut self) -> Result<Statement> {
        self.expect(TokenKind::If)?;
        let condition = self.parse_expr()?;
        self.expect(TokenKind::Then)?;
        let then_branch = self.parse_statements()?;
        self.expect(TokenKind::Else)?;
        let else_branch = self.parse_statements()?;
        self.expect(TokenKind::End)?;
        self.expect(TokenKind::Semicolon)?;
        Ok(Statement::If {
            condition,
            then_branch,
            else_branch,
        })
    }

    /// `WHILE Expr DO Statement+ END ;`
    fn parse_while(&mut self) -> Result<Statement> {
        self.expect(TokenKind::While)?;
        let condition = self.parse_expr()?;
        self.expect(TokenKind::Do)?;
        let body = self.parse_statements()?;
        self.expect(TokenKind::End)?;
        self.expect(TokenKind::Semicolon)?;
        Ok(Statement::While { condition, body })
    }

    // ==================== Expressions ====================

    /// `ArithmExpr [CmpOp ArithmExpr]`
    ///
    /// Comparisons are non-associative: the result of a comparison cannot be
    /// compared again, so `a < b < c` is a parse error.
    fn parse_expr(&mut self) -> Result<Expr> {
        let left = self.parse_arithm_expr()?;

        if let Some(op) = self.cmp_op() {
            self.advance();
            let right = self.parse_arithm_expr()?;
            return Ok(Expr::Binary {
                left: Box::new(left),
                op,
                right: Box::new(right),
            });
        }

        Ok(left)
    }

    fn cmp_op(&self) -> Option<BinOp> {
        match self.current_kind() {
            TokenKind::Gt => Some(BinOp::Gt),
            TokenKind::Lt => Some(BinOp::Lt),
            TokenKind::Ge => Some(BinOp::Ge),
            TokenKind::Le => Some(BinOp::Le),
            TokenKind::Eq => Some(BinOp::Eq),
            TokenKind::Hash => Some(BinOp::Ne),
            _ => None,
        }
    }

    /// `[+|-] Term (AddOp Term)*`, left-associative.
    ///
    /// A unary sign is permitted only on the very first operand; an operand
    /// after an `AddOp` must be a bare term, so `3+-4` is rejected while
    /// `3+(-4)` parses.
    fn parse_arithm_expr(&mut self) -> Result<Expr> {
        let mut left = match self.current_kind() {
            TokenKind::Plus => {
                self.advance();
                Expr::Unary {
                    op: UnOp::Plus,
                    operand: Box::new(self.parse_term()?),
                }
            }
            TokenKind::Minus => {
                self.advance();
                Expr::Unary {
                    op: UnOp::Minus,
                    operand: Box::new(self.parse_term()?),
                }
            }
            _ => self.parse_term()?,
        };

        while let Some(op) = self.add_op() {
            self.advance();
            let right = self.parse_term()?;
            left = Expr::Binary {
                left: Box::new(left),
                op,
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn add_op(&self) -> Option<BinOp> {
        match self.current_kind() {
            TokenKind::Plus => Some(BinOp::Add),
            TokenKind::Minus => Some(BinOp::Sub),
            TokenKind::Or => Some(BinOp::Or),
            _ => None,
        }
    }

    /// `Factor (MulOp Factor)*`, left-associative
    fn parse_term(&mut self) -> Result<Expr> {
        let mut left = self.parse_factor()?;

        while let Some(op) = self.mul_op() {
            self.advance();
            let right = self.parse_factor()?;
            left = Expr::Binary {
                left: Box::new(left),
                op,
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn mul_op(&self) -> Option<BinOp> {
        match self.current_kind() {
            TokenKind::Star => Some(BinOp::Mul),
            TokenKind::Slash => Some(BinOp::Div),
            TokenKind::Div => Some(BinOp::IntDiv),
            TokenKind::Mod => Some(BinOp::Mod),
            TokenKind::And => Some(BinOp::And),
            _ => None,
        }
    }

    /// `NOT Factor | VarChain | Const | ( Expr )`
    fn parse_factor(&mut self) -> Result<Expr> {
        let token = self.current().clone();

        match token.kind {
            TokenKind::Not => {
                self.advance();
                Ok(Expr::Unary {
                    op: UnOp::Not,
                    operand: Box::new(self.parse_factor()?),
                })
            }
            TokenKind::VarName(_) => Ok(Expr::Variable(self.parse_var_chain()?)),
            TokenKind::IntLit(value) => {
                self.advance();
                Ok(Expr::Const(Value::Int(value)))
            }
            TokenKind::RealLit(value) => {
                self.advance();
                Ok(Expr::Const(Value::Real(value)))
            }
            TokenKind::True => {
                self.advance();
                Ok(Expr::Const(Value::Bool(true)))
            }
            TokenKind::False => {
                self.advance();
                Ok(Expr::Const(Value::Bool(false)))
            }
            TokenKind::LParen => {
                self.advance();
                let expr = self.parse_expr()?;
                self.expect(TokenKind::RParen)?;
                Ok(expr)
            }
            _ => Err(self.unexpected("an expression")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(source: &str) -> Result<Program> {
        let tokens = Lexer::new(source).tokenize()?;
        Parser::from_tokens(tokens).parse_program()
    }

    /// Wrap a bare expression in a minimal program and return the parsed
    /// right-hand side of its single assignment.
    fn parse_expr_text(expr: &str) -> Result<Expr> {
        let program = parse(&format!("TYPE VAR BEGIN x := {}; END.", expr))?;
        match program.statements.into_iter().next() {
            Some(Statement::Assign { value, .. }) => Ok(value),
            other => panic!("expected an assignment, got {:?}", other),
        }
    }

    fn int(n: i64) -> Expr {
        Expr::Const(Value::Int(n))
    }

    fn var(name: &str) -> Expr {
        Expr::Variable(VarChain::new(vec![name.to_string()]))
    }

    fn binary(left: Expr, op: BinOp, right: Expr) -> Expr {
        Expr::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    #[test]
    fn test_minimal_program() {
        let program = parse("TYPE VAR x: INTEGER; BEGIN x := 1 + 2 * 3; END.").unwrap();

        assert_eq!(
            program,
            Program {
                type_defs: vec![],
                var_defs: vec![VarsDef::new(
                    vec!["x".to_string()],
                    VarType {
                        ty: Type::Global(GlobalType::Integer),
                        is_pointer: false,
                    },
                )],
                statements: vec![Statement::Assign {
                    target: VarChain::new(vec!["x".to_string()]),
                    value: binary(int(1), BinOp::Add, binary(int(2), BinOp::Mul, int(3))),
                }],
            }
        );
    }

    #[test]
    fn test_parse_is_deterministic() {
        let source = "TYPE VAR x: INTEGER; BEGIN x := 1 + 2 * 3; END.";
        assert_eq!(parse(source).unwrap(), parse(source).unwrap());
    }

    #[test]
    fn test_record_inheritance() {
        let program = parse(
            "TYPE \
             Base = RECORD x: INTEGER; END; \
             Derived = RECORD(Base) y: REAL; END; \
             VAR BEGIN x := 1; END.",
        )
        .unwrap();

        assert_eq!(
            program.type_defs,
            vec![
                TypeDef {
                    name: "Base".to_string(),
                    parent: None,
                    fields: vec![VarsDef::new(
                        vec!["x".to_string()],
                        VarType {
                            ty: Type::Global(GlobalType::Integer),
                            is_pointer: false,
                        },
                    )],
                },
                TypeDef {
                    name: "Derived".to_string(),
                    parent: Some(Type::Local("Base".to_string())),
                    fields: vec![VarsDef::new(
                        vec!["y".to_string()],
                        VarType {
                            ty: Type::Global(GlobalType::Real),
                            is_pointer: false,
                        },
                    )],
                },
            ]
        );
    }

    #[test]
    fn test_pointer_var_and_grouped_names() {
        let program = parse(
            "TYPE VAR p: POINTER TO Node; a, b: BOOLEAN; BEGIN a := TRUE; END.",
        )
        .unwrap();

        assert_eq!(
            program.var_defs,
            vec![
                VarsDef::new(
                    vec!["p".to_string()],
                    VarType {
                        ty: Type::Local("Node".to_string()),
                        is_pointer: true,
                    },
                ),
                VarsDef::new(
                    vec!["a".to_string(), "b".to_string()],
                    VarType {
                        ty: Type::Global(GlobalType::Boolean),
                        is_pointer: false,
                    },
                ),
            ]
        );
    }

    #[test]
    fn test_pointer_statements() {
        let program = parse("TYPE VAR BEGIN NEW(p); p^ := a.b; END.").unwrap();

        assert_eq!(
            program.statements,
            vec![
                Statement::Create {
                    pointer: "p".to_string(),
                },
                Statement::PointerAssign {
                    pointer: "p".to_string(),
                    value: VarChain::new(vec!["a".to_string(), "b".to_string()]),
                },
            ]
        );
    }

    #[test]
    fn test_if_and_while() {
        let program = parse(
            "TYPE VAR BEGIN \
             IF a < b THEN x := 1; ELSE x := 2; END; \
             WHILE NOT done DO n := n - 1; END; \
             END.",
        )
        .unwrap();

        assert_eq!(
            program.statements[0],
            Statement::If {
                condition: binary(var("a"), BinOp::Lt, var("b")),
                then_branch: vec![Statement::Assign {
                    target: VarChain::new(vec!["x".to_string()]),
                    value: int(1),
                }],
                else_branch: vec![Statement::Assign {
                    target: VarChain::new(vec!["x".to_string()]),
                    value: int(2),
                }],
            }
        );
        assert_eq!(
            program.statements[1],
            Statement::While {
                condition: Expr::Unary {
                    op: UnOp::Not,
                    operand: Box::new(var("done")),
                },
                body: vec![Statement::Assign {
                    target: VarChain::new(vec!["n".to_string()]),
                    value: binary(var("n"), BinOp::Sub, int(1)),
                }],
            }
        );
    }

    #[test]
    fn test_additive_left_associativity() {
        let expr = parse_expr_text("1 - 2 - 3").unwrap();
        assert_eq!(
            expr,
            binary(binary(int(1), BinOp::Sub, int(2)), BinOp::Sub, int(3))
        );
    }

    #[test]
    fn test_keyword_operators() {
        let expr = parse_expr_text("a DIV b MOD c AND d OR e").unwrap();
        assert_eq!(
            expr,
            binary(
                binary(
                    binary(
                        binary(var("a"), BinOp::IntDiv, var("b")),
                        BinOp::Mod,
                        var("c"),
                    ),
                    BinOp::And,
                    var("d"),
                ),
                BinOp::Or,
                var("e"),
            )
        );
    }

    #[test]
    fn test_single_comparison() {
        let expr = parse_expr_text("a < b").unwrap();
        assert_eq!(expr, binary(var("a"), BinOp::Lt, var("b")));
    }

    #[test]
    fn test_comparison_does_not_chain() {
        let err = parse_expr_text("a < b < c").unwrap_err();
        assert!(matches!(err, Error::UnexpectedToken { .. }));
    }

    #[test]
    fn test_leading_unary_sign() {
        let expr = parse_expr_text("-3 + 4").unwrap();
        assert_eq!(
            expr,
            binary(
                Expr::Unary {
                    op: UnOp::Minus,
                    operand: Box::new(int(3)),
                },
                BinOp::Add,
                int(4),
            )
        );
    }

    #[test]
    fn test_no_unary_sign_after_binary_op() {
        // The operand after `+` must be a bare term; parenthesize to negate.
        let err = parse_expr_text("3 + -4").unwrap_err();
        assert!(matches!(err, Error::UnexpectedToken { .. }));

        let expr = parse_expr_text("3 + (-4)").unwrap();
        assert_eq!(
            expr,
            binary(
                int(3),
                BinOp::Add,
                Expr::Unary {
                    op: UnOp::Minus,
                    operand: Box::new(int(4)),
                },
            )
        );
    }

    #[test]
    fn test_const_types() {
        assert_eq!(parse_expr_text("TRUE").unwrap(), Expr::Const(Value::Bool(true)));

        let expr = parse_expr_text("2.5").unwrap();
        assert_eq!(expr, Expr::Const(Value::Real(2.5)));
        match expr {
            Expr::Const(value) => assert_eq!(value.ty(), GlobalType::Real),
            other => panic!("expected a constant, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_statement_position() {
        // `Statement+` requires at least one statement; the error points at
        // the `END` keyword.
        let err = parse("TYPE VAR BEGIN END.").unwrap_err();
        assert!(matches!(err, Error::UnexpectedToken { .. }));
        assert_eq!(err.span().start, 15);
    }

    #[test]
    fn test_multi_line_comment_rejected() {
        // Comments cannot span a newline, so the commented-out text is
        // tokenized and the expression fails to parse.
        let err = parse("TYPE VAR BEGIN x := (* a\ncomment *) 1; END.").unwrap_err();
        assert!(matches!(err, Error::UnexpectedToken { .. }));
    }

    #[test]
    fn test_trailing_input_rejected() {
        let err = parse("TYPE VAR BEGIN x := 1; END. extra").unwrap_err();
        assert!(matches!(err, Error::UnexpectedToken { .. }));
    }

    #[test]
    fn test_lowercase_keyword_is_a_variable() {
        // `begin` is a variable name, so the required BEGIN is missing.
        let err = parse("TYPE VAR begin x := 1; END.").unwrap_err();
        assert!(matches!(err, Error::UnexpectedToken { .. }));
    }
}
