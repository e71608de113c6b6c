//! C# backend.
//!
//! Layout consumed by the interpreter: the visitor interface and every
//! variant class are nested inside the abstract base class, so callers write
//! `Expr.IVisitor<object>` and `new Expr.Binary(left, op, right)`.
use super::{Backend, SourceWriter, Target};
use crate::grammar::{FamilySpec, GrammarFormatError, VariantSpec};
use crate::naming::{csharp_ident, dispatch_method_name, is_csharp_keyword};

const USINGS: &[&str] = &["System", "System.Collections.Generic", "System.Text"];
const VISITOR: &str = "IVisitor";
const ACCEPT: &str = "Accept";

#[derive(Debug, Clone)]
pub struct CSharpBackend {
    pub namespace: String,
}

impl Default for CSharpBackend {
    fn default() -> Self {
        Self { namespace: "cslox".to_string() }
    }
}

impl CSharpBackend {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self { namespace: namespace.into() }
    }
}

impl Backend for CSharpBackend {
    fn target(&self) -> Target {
        Target::CSharp
    }

    fn validate(&self, family: &FamilySpec) -> Result<(), GrammarFormatError> {
        if is_csharp_keyword(&family.name) {
            return Err(GrammarFormatError::reserved(&family.name, "C# keyword used as a class name"));
        }
        for variant in &family.variants {
            let line = variant.to_string();
            let clash = |name: &str, reason: &'static str| -> Result<(), GrammarFormatError> {
                Err(GrammarFormatError::reserved(name, reason).in_line(&line))
            };
            if is_csharp_keyword(&variant.name) {
                return clash(&variant.name, "C# keyword used as a class name");
            }
            if variant.name == VISITOR || variant.name == ACCEPT {
                return clash(&variant.name, "clashes with a member of the base class");
            }
            for field in &variant.fields {
                // a member may not share its enclosing class's name
                if field.name == variant.name {
                    return clash(&field.name, "field named after its own class");
                }
                if field.name == ACCEPT {
                    return clash(&field.name, "clashes with the dispatch method");
                }
            }
        }
        Ok(())
    }

    fn file_name(&self, family: &FamilySpec) -> String {
        format!("{}.cs", family.name)
    }

    fn emit_prelude(&self, out: &mut SourceWriter, family: &FamilySpec) {
        for using in USINGS {
            out.line(format!("using {using};"));
        }
        out.blank();
        out.line(format!("namespace {}", self.namespace));
        out.open("{");
        out.line(format!("public abstract class {}", family.name));
        out.open("{");
    }

    fn emit_visitor(&self, out: &mut SourceWriter, family: &FamilySpec) {
        let param = csharp_ident(&family.name.to_lowercase());
        out.line(format!("public interface {VISITOR}<R>"));
        out.open("{");
        for variant in &family.variants {
            let method = dispatch_method_name(&family.name, &variant.name);
            out.line(format!("R {method}({} {param});", variant.name));
        }
        out.close("}");
    }

    fn emit_base(&self, out: &mut SourceWriter, _family: &FamilySpec) {
        out.line(format!("public abstract R {ACCEPT}<R>({VISITOR}<R> visitor);"));
    }

    fn emit_variant(&self, out: &mut SourceWriter, family: &FamilySpec, variant: &VariantSpec) {
        out.line(format!("public class {} : {}", variant.name, family.name));
        out.open("{");

        for field in &variant.fields {
            out.line(format!("public readonly {} {};", field.ty, csharp_ident(&field.name)));
        }

        let params = variant.fields.iter()
            .map(|f| format!("{} {}", f.ty, csharp_ident(&f.name)))
            .collect::<Vec<_>>()
            .join(", ");
        out.line(format!("public {}({params})", variant.name));
        out.open("{");
        for field in &variant.fields {
            let name = csharp_ident(&field.name);
            out.line(format!("this.{name} = {name};"));
        }
        out.close("}");

        let method = dispatch_method_name(&family.name, &variant.name);
        out.line(format!("public override R {ACCEPT}<R>({VISITOR}<R> visitor)"));
        out.open("{");
        out.line(format!("return visitor.{method}(this);"));
        out.close("}");

        out.close("}");
        out.blank();
    }

    fn emit_epilogue(&self, out: &mut SourceWriter, _family: &FamilySpec) {
        out.close("}");
        out.close("}");
    }
}
