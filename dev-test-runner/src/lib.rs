//! Host types for the generated Lox AST.

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub lexeme: String,
    pub line: usize,
}

impl Token {
    pub fn new(lexeme: &str, line: usize) -> Self {
        Self { lexeme: lexeme.to_string(), line }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    Nil,
    Bool(bool),
    Number(f64),
    Str(String),
}

pub mod ast {
    use super::{Object, Token};

    include!(concat!(env!("OUT_DIR"), "/expr.rs"));
    include!(concat!(env!("OUT_DIR"), "/stmt.rs"));
}
