//! Target-language backends.
//!
//! A backend knows how to render the three pieces of a family (visitor
//! interface, abstract base, one concrete type per variant) plus the wrapper
//! text around them. The order in which the pieces are requested is fixed by
//! [`crate::family::render`].
pub mod csharp;
pub mod rust;

pub use csharp::CSharpBackend;
pub use rust::RustBackend;

use crate::grammar::{FamilySpec, GrammarFormatError, VariantSpec};

/// Languages the generator can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    CSharp,
    Rust,
}

impl Target {
    /// Backend with its default options.
    pub fn default_backend(self) -> Box<dyn Backend> {
        match self {
            Target::CSharp => Box::new(CSharpBackend::default()),
            Target::Rust => Box::new(RustBackend::default()),
        }
    }
}

pub trait Backend {
    fn target(&self) -> Target;

    /// Rejects names the grammar accepts but this language cannot declare.
    /// Runs before any `emit_*` call, so emission itself never fails.
    fn validate(&self, family: &FamilySpec) -> Result<(), GrammarFormatError>;

    /// File the family's unit is written to, derived from the family name.
    fn file_name(&self, family: &FamilySpec) -> String;

    /// Header and any wrapper that must enclose the whole family.
    fn emit_prelude(&self, out: &mut SourceWriter, family: &FamilySpec);

    /// Visitor interface: one dispatch method per variant, in order.
    fn emit_visitor(&self, out: &mut SourceWriter, family: &FamilySpec);

    /// Abstract base and its generic dispatch method.
    fn emit_base(&self, out: &mut SourceWriter, family: &FamilySpec);

    /// One concrete variant type.
    fn emit_variant(&self, out: &mut SourceWriter, family: &FamilySpec, variant: &VariantSpec);

    /// Closes whatever the prelude opened.
    fn emit_epilogue(&self, out: &mut SourceWriter, family: &FamilySpec);
}

// ————————————————————————————————————————————————————————————————————————————
// SOURCE WRITER
// ————————————————————————————————————————————————————————————————————————————

/// Line-oriented text buffer with an indentation level.
#[derive(Debug)]
pub struct SourceWriter {
    buf: String,
    level: usize,
    unit: &'static str,
}

impl SourceWriter {
    pub fn new(unit: &'static str) -> Self {
        Self { buf: String::new(), level: 0, unit }
    }

    pub fn line(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if !text.is_empty() {
            for _ in 0..self.level {
                self.buf.push_str(self.unit);
            }
            self.buf.push_str(text);
        }
        self.buf.push('\n');
    }

    pub fn blank(&mut self) {
        self.buf.push('\n');
    }

    /// Writes `open`, then indents until [`SourceWriter::close`].
    pub fn open(&mut self, open: impl AsRef<str>) {
        self.line(open);
        self.level += 1;
    }

    pub fn close(&mut self, close: impl AsRef<str>) {
        self.level = self.level.saturating_sub(1);
        self.line(close);
    }

    pub fn into_string(self) -> String {
        self.buf
    }
}
