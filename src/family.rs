//! One family, one generation pass: parse every line, render the unit, hand
//! it to the sink in a single write.
use log::debug;
use thiserror::Error;

use crate::codegen::{Backend, SourceWriter, Target};
use crate::grammar::{FamilySpec, GrammarFormatError, parse_family};
use crate::sink::Sink;

/// Fully assembled source for one family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedUnit {
    pub family: String,
    pub file_name: String,
    pub source: String,
}

#[derive(Debug, Error)]
pub enum EmitError {
    #[error(transparent)]
    Grammar(#[from] GrammarFormatError),
    #[error("failed to write `{file_name}`")]
    Sink {
        file_name: String,
        #[source]
        source: std::io::Error,
    },
}

/// Render an already parsed family. Emission order is fixed:
/// prelude, visitor interface, abstract base, variants, epilogue.
pub fn render<B: Backend + ?Sized>(backend: &B, family: &FamilySpec) -> GeneratedUnit {
    let indent = match backend.target() {
        Target::CSharp => "\t",
        Target::Rust => "    ",
    };
    let mut out = SourceWriter::new(indent);
    backend.emit_prelude(&mut out, family);
    backend.emit_visitor(&mut out, family);
    backend.emit_base(&mut out, family);
    for variant in &family.variants {
        debug!("{}: emitting variant {}", family.name, variant.name);
        backend.emit_variant(&mut out, family, variant);
    }
    backend.emit_epilogue(&mut out, family);
    GeneratedUnit {
        family: family.name.clone(),
        file_name: backend.file_name(family),
        source: out.into_string(),
    }
}

/// Parse, check names against the backend and render, without touching any sink.
pub fn generate<B, I>(backend: &B, family: &str, lines: I) -> Result<GeneratedUnit, GrammarFormatError>
where
    B: Backend + ?Sized,
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let spec = parse_family(family, lines)?;
    backend.validate(&spec)?;
    Ok(render(backend, &spec))
}

/// Parse, render and write. Nothing reaches the sink if any line is malformed.
pub fn emit<B, I>(
    backend: &B,
    family: &str,
    lines: I,
    sink: &mut dyn Sink,
) -> Result<GeneratedUnit, EmitError>
where
    B: Backend + ?Sized,
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let unit = generate(backend, family, lines)?;
    sink.write_unit(&unit).map_err(|source| EmitError::Sink {
        file_name: unit.file_name.clone(),
        source,
    })?;
    Ok(unit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::{CSharpBackend, RustBackend};
    use crate::naming::dispatch_method_name;
    use crate::sink::MemorySink;

    const EXPR: [&str; 2] = ["Binary : Expr left, Token op, Expr right", "Literal : Object value"];

    #[test]
    fn end_to_end_expr_family() {
        let mut sink = MemorySink::default();
        let unit = emit(&CSharpBackend::default(), "Expr", EXPR, &mut sink).unwrap();
        assert_eq!(sink.units, vec![unit.clone()]);

        let src = &unit.source;
        assert!(src.contains("public abstract class Expr"));
        assert!(src.contains("public abstract R Accept<R>(IVisitor<R> visitor);"));
        assert!(src.contains("R VisitBinaryExpr(Binary expr);"));
        assert!(src.contains("R VisitLiteralExpr(Literal expr);"));
        assert!(src.contains("public Binary(Expr left, Token op, Expr right)"));
        assert!(src.contains("public Literal(Object value)"));
        assert!(src.contains("return visitor.VisitBinaryExpr(this);"));
        assert!(src.contains("return visitor.VisitLiteralExpr(this);"));
    }

    #[test]
    fn malformed_line_writes_nothing() {
        let mut sink = MemorySink::default();
        let err = emit(&CSharpBackend::default(), "Expr", ["Literal : Object value", "Foo"], &mut sink)
            .unwrap_err();
        assert!(matches!(err, EmitError::Grammar(GrammarFormatError::MissingSeparator { .. })));
        assert!(sink.units.is_empty());
    }

    #[test]
    fn reserved_name_writes_nothing() {
        let mut sink = MemorySink::default();
        let err = emit(&RustBackend::default(), "Expr", ["Literal : Object value", "This : Token self"], &mut sink)
            .unwrap_err();
        assert!(matches!(err, EmitError::Grammar(GrammarFormatError::InLine { .. })), "{err:?}");
        assert!(sink.units.is_empty());
    }

    #[test]
    fn one_visitor_method_per_variant_in_order() {
        let lines = [
            "Assign : Token name, Expr value",
            "Unary : Token op, Expr right",
            "Call : Expr callee, Token paren, List<Expr> arguments",
            "Variable : Token name",
        ];
        for backend in [&CSharpBackend::default() as &dyn Backend, &RustBackend::default()] {
            let unit = generate(backend, "Expr", lines).unwrap();
            let positions = ["Assign", "Unary", "Call", "Variable"]
                .iter()
                .map(|v| {
                    let name = dispatch_method_name("Expr", v);
                    let name = match backend.target() {
                        Target::CSharp => name,
                        Target::Rust => crate::naming::to_snake_case(&name),
                    };
                    // first occurrence is the interface declaration
                    assert_eq!(unit.source.matches(&format!("{name}(")).count(), 2, "{name}");
                    unit.source.find(&name).unwrap()
                })
                .collect::<Vec<_>>();
            assert!(positions.windows(2).all(|w| w[0] < w[1]));
        }
    }
}
