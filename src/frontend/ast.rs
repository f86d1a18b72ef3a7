//! Abstract Syntax Tree definitions for the record language
//!
//! Pure data: every node is built once by the parser and never mutated.
//! Parent types and pointer targets are references by name (`Type::Local`),
//! not owned links; resolving them is a later stage's job.

use serde::Serialize;

/// One of the three built-in primitive types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GlobalType {
    Integer,
    Real,
    Boolean,
}

/// A type reference: built-in, or a user-declared record type by name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Type {
    Global(GlobalType),
    Local(String),
}

/// A type together with its pointer flag (`POINTER TO T`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VarType {
    pub ty: Type,
    pub is_pointer: bool,
}

/// A group of variable names sharing one type (`a, b: INTEGER;`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VarsDef {
    pub names: Vec<String>,
    pub ty: VarType,
}

impl VarsDef {
    /// The grammar guarantees at least one name per group.
    pub fn new(names: Vec<String>, ty: VarType) -> Self {
        debug_assert!(!names.is_empty());
        Self { names, ty }
    }
}

/// A record type definition.
///
/// `fields` holds only the record's own fields; inherited fields are not
/// duplicated here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeDef {
    pub name: String,
    pub parent: Option<Type>,
    pub fields: Vec<VarsDef>,
}

/// The root of the AST
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Program {
    pub type_defs: Vec<TypeDef>,
    pub var_defs: Vec<VarsDef>,
    pub statements: Vec<Statement>,
}

/// A dotted field-access path (`a.b.c`), left to right
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VarChain {
    pub parts: Vec<String>,
}

impl VarChain {
    /// The grammar guarantees at least one identifier per chain.
    pub fn new(parts: Vec<String>) -> Self {
        debug_assert!(!parts.is_empty());
        Self { parts }
    }
}

/// Statement
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Statement {
    /// `chain := expr ;`
    Assign { target: VarChain, value: Expr },
    /// `p^ := chain ;`
    PointerAssign { pointer: String, value: VarChain },
    /// `NEW(p) ;`
    Create { pointer: String },
    /// `IF expr THEN ... ELSE ... END ;` (both branches always present)
    If {
        condition: Expr,
        then_branch: Vec<Statement>,
        else_branch: Vec<Statement>,
    },
    /// `WHILE expr DO ... END ;`
    While { condition: Expr, body: Vec<Statement> },
}

/// A constant value; its kind always matches the literal that produced it
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Value {
    Int(i64),
    Real(f64),
    Bool(bool),
}

impl Value {
    /// The built-in type this constant belongs to
    pub fn ty(&self) -> GlobalType {
        match self {
            Value::Int(_) => GlobalType::Integer,
            Value::Real(_) => GlobalType::Real,
            Value::Bool(_) => GlobalType::Boolean,
        }
    }
}

/// Binary operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BinOp {
    // Comparison (non-associative)
    Lt,
    Le,
    Gt,
    Ge,
    /// `=`
    Eq,
    /// `#`
    Ne,
    // Additive
    Add,
    Sub,
    Or,
    // Multiplicative
    Mul,
    /// `/`
    Div,
    /// `DIV`
    IntDiv,
    Mod,
    And,
}

/// Unary operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UnOp {
    Plus,
    Minus,
    Not,
}

/// Expression
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Expr {
    /// A variable access path
    Variable(VarChain),
    /// A literal constant
    Const(Value),
    /// Binary operation
    Binary {
        left: Box<Expr>,
        op: BinOp,
        right: Box<Expr>,
    },
    /// Unary operation
    Unary { op: UnOp, operand: Box<Expr> },
}
