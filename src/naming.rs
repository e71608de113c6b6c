//! Naming rules shared by the parser and every backend.
//!
//! The visitor method for a variant is a pure function of the family and
//! variant names, so a variant's dispatch method can call it without any
//! registry of what the interface declared.
use once_cell::sync::Lazy;
use regex::Regex;

static IDENTIFIER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier regex is valid")
});

/// Prefix of every visitor dispatch method.
pub const DISPATCH_PREFIX: &str = "Visit";

const CSHARP_KEYWORDS: &[&str] = &[
    "abstract", "as", "base", "bool", "break", "byte", "case", "catch", "char", "checked",
    "class", "const", "continue", "decimal", "default", "delegate", "do", "double", "else",
    "enum", "event", "explicit", "extern", "false", "finally", "fixed", "float", "for",
    "foreach", "goto", "if", "implicit", "in", "int", "interface", "internal", "is", "lock",
    "long", "namespace", "new", "null", "object", "operator", "out", "override", "params",
    "private", "protected", "public", "readonly", "ref", "return", "sbyte", "sealed", "short",
    "sizeof", "stackalloc", "static", "string", "struct", "switch", "this", "throw", "true",
    "try", "typeof", "uint", "ulong", "unchecked", "unsafe", "ushort", "using", "virtual",
    "void", "volatile", "while",
];

const RUST_KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "dyn", "else", "enum", "extern",
    "false", "fn", "for", "gen", "if", "impl", "in", "let", "loop", "match", "mod", "move",
    "mut", "pub", "ref", "return", "static", "struct", "trait", "true", "type", "unsafe",
    "use", "where", "while", "abstract", "become", "box", "do", "final", "macro", "override",
    "priv", "try", "typeof", "unsized", "virtual", "yield",
];

const RUST_PATH_KEYWORDS: &[&str] = &["self", "Self", "super", "crate"];

pub fn is_identifier(name: &str) -> bool {
    IDENTIFIER.is_match(name)
}

pub fn is_csharp_keyword(name: &str) -> bool {
    CSHARP_KEYWORDS.contains(&name)
}

pub fn is_rust_keyword(name: &str) -> bool {
    RUST_KEYWORDS.contains(&name) || is_rust_path_keyword(name)
}

/// `self`, `Self`, `super`, `crate`: keywords `r#` cannot escape.
pub fn is_rust_path_keyword(name: &str) -> bool {
    RUST_PATH_KEYWORDS.contains(&name)
}

/// Canonical dispatch method name: `Visit` + variant + family.
///
/// ```
/// assert_eq!(astgen::naming::dispatch_method_name("Expr", "Binary"), "VisitBinaryExpr");
/// ```
pub fn dispatch_method_name(family: &str, variant: &str) -> String {
    format!("{DISPATCH_PREFIX}{variant}{family}")
}

/// `VisitBinaryExpr` → `visit_binary_expr`, `HTTPRequest` → `http_request`.
pub fn to_snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            let prev = i.checked_sub(1).map(|p| chars[p]);
            let next = chars.get(i + 1).copied();
            let boundary = match prev {
                None | Some('_') => false,
                Some(p) if p.is_lowercase() || p.is_ascii_digit() => true,
                Some(p) => p.is_uppercase() && next.is_some_and(char::is_lowercase),
            };
            if boundary {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Escape an identifier that collides with a C# keyword (`@params`).
pub fn csharp_ident(name: &str) -> String {
    if is_csharp_keyword(name) {
        format!("@{name}")
    } else {
        name.to_string()
    }
}

/// Escape an identifier that collides with a Rust keyword (`r#type`).
pub fn rust_ident(name: &str) -> String {
    if RUST_KEYWORDS.contains(&name) {
        format!("r#{name}")
    } else {
        name.to_string()
    }
}
