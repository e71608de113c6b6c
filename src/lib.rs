//! Grammar-driven generator of visitor-pattern AST hierarchies.
//!
//! A family (`Expr`, `Stmt`, ...) is a list of grammar lines such as
//! `Binary : Expr left, Token op, Expr right`. For each family the generator
//! emits a visitor interface with one `Visit<Variant><Family>` method per
//! variant, an abstract base with a generic dispatch method, and one
//! immutable concrete type per variant whose dispatch calls the matching
//! visitor method.
//!
//! ```
//! use astgen::codegen::CSharpBackend;
//!
//! let unit = astgen::family::generate(
//!     &CSharpBackend::default(),
//!     "Expr",
//!     ["Binary : Expr left, Token op, Expr right", "Literal : object value"],
//! )
//! .unwrap();
//! assert_eq!(unit.file_name, "Expr.cs");
//! assert!(unit.source.contains("R VisitBinaryExpr(Binary expr);"));
//! ```
pub mod codegen;
pub mod driver;
pub mod family;
pub mod grammar;
pub mod naming;
pub mod sink;
pub mod tables;
