//! Rust backend.
//!
//! The base is a tagged union over per-variant structs. Each struct keeps its
//! own `accept`, and the enum's `accept` matches on the tag and forwards, so
//! `Expr` and `Binary` both dispatch to `visit_binary_expr`.
use super::{Backend, SourceWriter, Target};
use crate::grammar::{FamilySpec, GrammarFormatError, VariantSpec};
use crate::naming::{dispatch_method_name, is_rust_keyword, is_rust_path_keyword, rust_ident, to_snake_case};

#[derive(Debug, Clone)]
pub struct RustBackend {
    /// Derives attached to the base enum and every variant struct.
    pub derives: Vec<String>,
}

impl Default for RustBackend {
    fn default() -> Self {
        Self {
            derives: ["Debug", "Clone", "PartialEq"].map(String::from).to_vec(),
        }
    }
}

impl RustBackend {
    pub fn with_derives<I, S>(derives: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { derives: derives.into_iter().map(Into::into).collect() }
    }

    fn emit_derives(&self, out: &mut SourceWriter) {
        if !self.derives.is_empty() {
            out.line(format!("#[derive({})]", self.derives.join(", ")));
        }
    }
}

fn visitor_trait(family: &FamilySpec) -> String {
    format!("{}Visitor", family.name)
}

fn visit_method(family: &FamilySpec, variant: &VariantSpec) -> String {
    to_snake_case(&dispatch_method_name(&family.name, &variant.name))
}

fn accept_signature(family: &FamilySpec) -> String {
    format!(
        "pub fn accept<R, V: {}<R> + ?Sized>(&self, visitor: &mut V) -> R",
        visitor_trait(family)
    )
}

/// Type names are emitted unescaped, so any keyword is out.
fn check_type_name(name: &str) -> Result<(), GrammarFormatError> {
    if is_rust_keyword(name) {
        return Err(GrammarFormatError::reserved(name, "Rust keyword used as a type name"));
    }
    Ok(())
}

impl Backend for RustBackend {
    fn target(&self) -> Target {
        Target::Rust
    }

    fn validate(&self, family: &FamilySpec) -> Result<(), GrammarFormatError> {
        check_type_name(&family.name)?;
        let param = to_snake_case(&family.name);
        if is_rust_path_keyword(&param) {
            return Err(GrammarFormatError::reserved(&param, "visitor parameter cannot be a raw identifier"));
        }
        let visitor = visitor_trait(family);
        for variant in &family.variants {
            let line = variant.to_string();
            check_type_name(&variant.name).map_err(|error| error.in_line(&line))?;
            if variant.name == visitor {
                return Err(GrammarFormatError::reserved(&variant.name, "clashes with the visitor trait").in_line(&line));
            }
            if let Some(field) = variant.fields.iter().find(|f| is_rust_path_keyword(&f.name)) {
                return Err(GrammarFormatError::reserved(&field.name, "field cannot be a raw identifier").in_line(&line));
            }
        }
        Ok(())
    }

    fn file_name(&self, family: &FamilySpec) -> String {
        format!("{}.rs", to_snake_case(&family.name))
    }

    fn emit_prelude(&self, out: &mut SourceWriter, family: &FamilySpec) {
        out.line(format!("// Generated by astgen from the `{}` grammar. Do not edit by hand.", family.name));
        out.blank();
    }

    fn emit_visitor(&self, out: &mut SourceWriter, family: &FamilySpec) {
        let param = rust_ident(&to_snake_case(&family.name));
        out.open(format!("pub trait {}<R> {{", visitor_trait(family)));
        for variant in &family.variants {
            out.line(format!(
                "fn {}(&mut self, {param}: &{}) -> R;",
                visit_method(family, variant),
                variant.name
            ));
        }
        out.close("}");
        out.blank();
    }

    fn emit_base(&self, out: &mut SourceWriter, family: &FamilySpec) {
        let base = &family.name;
        self.emit_derives(out);
        out.open(format!("pub enum {base} {{"));
        for variant in &family.variants {
            out.line(format!("{0}({0}),", variant.name));
        }
        out.close("}");
        out.blank();

        out.open(format!("impl {base} {{"));
        out.open(format!("{} {{", accept_signature(family)));
        if family.variants.is_empty() {
            // a reference to an empty enum still needs an explicit deref to be matched
            out.line("match *self {}");
        } else {
            out.open("match self {");
            for variant in &family.variants {
                out.line(format!("{base}::{}(node) => node.accept(visitor),", variant.name));
            }
            out.close("}");
        }
        out.close("}");
        out.close("}");
        out.blank();
    }

    fn emit_variant(&self, out: &mut SourceWriter, family: &FamilySpec, variant: &VariantSpec) {
        let name = &variant.name;
        let idents = variant.fields.iter().map(|f| rust_ident(&f.name)).collect::<Vec<_>>();

        self.emit_derives(out);
        out.open(format!("pub struct {name} {{"));
        for (field, ident) in variant.fields.iter().zip(&idents) {
            out.line(format!("pub {ident}: {},", field.ty));
        }
        out.close("}");
        out.blank();

        let params = variant.fields.iter().zip(&idents)
            .map(|(f, ident)| format!("{ident}: {}", f.ty))
            .collect::<Vec<_>>()
            .join(", ");
        out.open(format!("impl {name} {{"));
        out.line("#[allow(clippy::too_many_arguments)]");
        out.open(format!("pub fn new({params}) -> Self {{"));
        if idents.is_empty() {
            out.line("Self {}");
        } else {
            out.line(format!("Self {{ {} }}", idents.join(", ")));
        }
        out.close("}");
        out.blank();
        out.open(format!("{} {{", accept_signature(family)));
        out.line(format!("visitor.{}(self)", visit_method(family, variant)));
        out.close("}");
        out.close("}");
        out.blank();

        out.open(format!("impl From<{name}> for {} {{", family.name));
        out.open(format!("fn from(node: {name}) -> Self {{"));
        out.line(format!("{}::{name}(node)", family.name));
        out.close("}");
        out.close("}");
        out.blank();
    }

    fn emit_epilogue(&self, _out: &mut SourceWriter, _family: &FamilySpec) {}
}
