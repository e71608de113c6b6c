//! Family tables: the raw input of a generation run.
//!
//! The built-in tables describe the Lox AST consumed by the interpreter.
//! Callers may supply their own through a JSON grammar file:
//!
//! ```json
//! {
//!   "Expr": ["Binary : Expr left, Token op, Expr right", "Literal : object value"],
//!   "Stmt": ["Print : Expr expression"]
//! }
//! ```
//!
//! Object order is preserved, so families are generated in file order.
use indexmap::IndexMap;
use serde::Deserialize;

use crate::codegen::Target;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilyTable {
    pub family: String,
    pub rules: Vec<String>,
}

impl FamilyTable {
    pub fn new(family: &str, rules: &[&str]) -> Self {
        Self {
            family: family.to_string(),
            rules: rules.iter().map(|r| r.to_string()).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(transparent)]
struct GrammarFile(IndexMap<String, Vec<String>>);

/// Deserialize a grammar file with JSON-path context in error messages.
pub fn parse_grammar_json(src: &str) -> Result<Vec<FamilyTable>, String> {
    let de = &mut serde_json::Deserializer::from_str(src);
    match serde_path_to_error::deserialize::<_, GrammarFile>(de) {
        Ok(GrammarFile(map)) => Ok(map
            .into_iter()
            .map(|(family, rules)| FamilyTable { family, rules })
            .collect()),
        Err(err) => {
            let path = err.path().to_string();
            Err(format!("at JSON path {path} → {}", err.into_inner()))
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// BUILT-IN LOX TABLES
// ————————————————————————————————————————————————————————————————————————————

pub fn builtin(target: Target) -> Vec<FamilyTable> {
    match target {
        Target::CSharp => vec![
            FamilyTable::new("Expr", CSHARP_EXPR),
            FamilyTable::new("Stmt", CSHARP_STMT),
        ],
        Target::Rust => vec![
            FamilyTable::new("Expr", RUST_EXPR),
            FamilyTable::new("Stmt", RUST_STMT),
        ],
    }
}

const CSHARP_EXPR: &[&str] = &[
    "Assign   : Token name, Expr value",
    "Binary   : Expr left, Token op, Expr right",
    "Call     : Expr callee, Token paren, List<Expr> arguments",
    "Get      : Expr obj, Token name",
    "Grouping : Expr expression",
    "Literal  : object value",
    "Logical  : Expr left, Token op, Expr right",
    "Set      : Expr obj, Token name, Expr value",
    "Super    : Token keyword, Token method",
    "This     : Token keyword",
    "Unary    : Token op, Expr right",
    "Variable : Token name",
];

const CSHARP_STMT: &[&str] = &[
    "Block      : List<Stmt> statements",
    "Class      : Token name, Expr.Variable superclass, List<Stmt.Function> methods",
    "Expression : Expr expression",
    "Function   : Token name, List<Token> parameters, List<Stmt> body",
    "If         : Expr condition, Stmt thenBranch, Stmt elseBranch",
    "Print      : Expr expression",
    "Return     : Token keyword, Expr value",
    "Var        : Token name, Expr initializer",
    "While      : Expr condition, Stmt body",
];

const RUST_EXPR: &[&str] = &[
    "Assign   : Token name, Box<Expr> value",
    "Binary   : Box<Expr> left, Token operator, Box<Expr> right",
    "Call     : Box<Expr> callee, Token paren, Vec<Expr> arguments",
    "Get      : Box<Expr> object, Token name",
    "Grouping : Box<Expr> expression",
    "Literal  : Object value",
    "Logical  : Box<Expr> left, Token operator, Box<Expr> right",
    "Set      : Box<Expr> object, Token name, Box<Expr> value",
    "Super    : Token keyword, Token method",
    "This     : Token keyword",
    "Unary    : Token operator, Box<Expr> right",
    "Variable : Token name",
];

const RUST_STMT: &[&str] = &[
    "Block      : Vec<Stmt> statements",
    "Class      : Token name, Option<Variable> superclass, Vec<Function> methods",
    "Expression : Expr expression",
    "Function   : Token name, Vec<Token> params, Vec<Stmt> body",
    "If         : Expr condition, Box<Stmt> then_branch, Option<Box<Stmt>> else_branch",
    "Print      : Expr expression",
    "Return     : Token keyword, Option<Expr> value",
    "Var        : Token name, Option<Expr> initializer",
    "While      : Expr condition, Box<Stmt> body",
];
