//! Grammar lines → typed variant specs.
//!
//! A family is described by lines such as
//! `Binary : Expr left, Token op, Expr right`. The left side of the top-level
//! `:` names the variant, the right side is a comma separated list of
//! `<type> <name>` fields. Field types are opaque and copied verbatim into the
//! generated source; only names are checked.
use std::fmt;

use indexmap::IndexSet;
use thiserror::Error;

use crate::naming::is_identifier;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    /// Opaque target-language type, may contain spaces (`Dictionary<string, Expr>`).
    pub ty: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantSpec {
    pub name: String,
    /// Declaration order == constructor parameter order.
    pub fields: Vec<FieldSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilySpec {
    pub name: String,
    /// Declaration order == visitor method order.
    pub variants: Vec<VariantSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarFormatError {
    #[error("grammar line `{line}` has no top-level `:` between the variant name and its fields")]
    MissingSeparator { line: String },
    #[error("field `{token}` has no whitespace between its type and its name")]
    MissingFieldName { token: String },
    #[error("`{name}` is not a legal identifier")]
    InvalidIdentifier { name: String },
    #[error("variant `{variant}` is declared more than once in family `{family}`")]
    DuplicateVariant { family: String, variant: String },
    #[error("variant `{family}` has the same name as its family")]
    VariantNamedAfterFamily { family: String },
    #[error("`{name}` is reserved in the generated code: {reason}")]
    ReservedIdentifier { name: String, reason: &'static str },
    #[error("in grammar line `{line}`: {cause}")]
    InLine {
        line: String,
        cause: Box<GrammarFormatError>,
    },
}

impl GrammarFormatError {
    pub(crate) fn in_line(self, line: &str) -> Self {
        GrammarFormatError::InLine { line: line.to_string(), cause: Box::new(self) }
    }

    pub(crate) fn reserved(name: &str, reason: &'static str) -> Self {
        GrammarFormatError::ReservedIdentifier { name: name.to_string(), reason }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// PARSERS
// ————————————————————————————————————————————————————————————————————————————

/// Parse one `<type> <name>` token. The last whitespace-delimited word is the
/// name, everything before it is the type.
pub fn parse_field(token: &str) -> Result<FieldSpec, GrammarFormatError> {
    let token = token.trim();
    let Some((ty, name)) = token.rsplit_once(char::is_whitespace) else {
        return Err(GrammarFormatError::MissingFieldName { token: token.to_string() });
    };
    if !is_identifier(name) {
        return Err(GrammarFormatError::InvalidIdentifier { name: name.to_string() });
    }
    Ok(FieldSpec {
        ty: ty.trim_end().to_string(),
        name: name.to_string(),
    })
}

/// Parse a comma separated field list, keeping left-to-right order.
/// Commas nested inside `<>`, `()` or `[]` belong to the type.
pub fn parse_fields(list: &str) -> Result<Vec<FieldSpec>, GrammarFormatError> {
    if list.trim().is_empty() {
        return Ok(Vec::new());
    }
    split_top_level(list).into_iter().map(parse_field).collect()
}

/// Parse one grammar line into a variant.
pub fn parse_variant(line: &str) -> Result<VariantSpec, GrammarFormatError> {
    let line = line.trim();
    let Some(at) = find_separator(line) else {
        return Err(GrammarFormatError::MissingSeparator { line: line.to_string() });
    };
    let name = line[..at].trim();
    if !is_identifier(name) {
        return Err(GrammarFormatError::InvalidIdentifier { name: name.to_string() }.in_line(line));
    }
    let fields = parse_fields(&line[at + 1..]).map_err(|error| error.in_line(line))?;
    Ok(VariantSpec { name: name.to_string(), fields })
}

/// Parse a whole family, stopping at the first malformed line.
pub fn parse_family<I>(name: &str, lines: I) -> Result<FamilySpec, GrammarFormatError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    if !is_identifier(name) {
        return Err(GrammarFormatError::InvalidIdentifier { name: name.to_string() });
    }
    let mut seen = IndexSet::<String>::new();
    let mut variants = Vec::new();
    for line in lines {
        let variant = parse_variant(line.as_ref())?;
        if variant.name == name {
            return Err(GrammarFormatError::VariantNamedAfterFamily { family: name.to_string() });
        }
        if !seen.insert(variant.name.clone()) {
            return Err(GrammarFormatError::DuplicateVariant {
                family: name.to_string(),
                variant: variant.name,
            });
        }
        variants.push(variant);
    }
    Ok(FamilySpec { name: name.to_string(), variants })
}

// ————————————————————————————————————————————————————————————————————————————
// DISPLAY (grammar-line form)
// ————————————————————————————————————————————————————————————————————————————

impl fmt::Display for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.ty, self.name)
    }
}

impl fmt::Display for VariantSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} :", self.name)?;
        for (i, field) in self.fields.iter().enumerate() {
            let sep = if i == 0 { " " } else { ", " };
            write!(f, "{sep}{field}")?;
        }
        Ok(())
    }
}

impl VariantSpec {
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

/// First `:` that is not half of a `::` path separator.
fn find_separator(line: &str) -> Option<usize> {
    let bytes = line.as_bytes();
    (0..bytes.len()).find(|&i| {
        bytes[i] == b':'
            && (i == 0 || bytes[i - 1] != b':')
            && bytes.get(i + 1) != Some(&b':')
    })
}

fn split_top_level(list: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;
    let mut prev = '\0';
    for (i, c) in list.char_indices() {
        match c {
            '<' | '(' | '[' => depth += 1,
            // `->` inside a function type is not a closing bracket
            '>' if prev == '-' => {}
            '>' | ')' | ']' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&list[start..i]);
                start = i + 1;
            }
            _ => {}
        }
        prev = c;
    }
    parts.push(&list[start..]);
    parts
}
