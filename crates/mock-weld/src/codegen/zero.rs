//! Zero-value synthesis
//!
//! Produces the literal a zero-returning mock hands back for each result
//! type. Shares qualification rules with the type renderer, so any type the
//! renderer can express can also be zeroed.

use crate::error::RenderError;
use crate::ir::{GoBasic, TypeDescriptor};

use super::ast::{Expr, TypeExpr};
use super::render::TypeRenderer;

/// Zero value of `ty` as seen from the renderer's output module
pub fn zero_value(ty: &TypeDescriptor, renderer: &TypeRenderer<'_>) -> Result<Expr, RenderError> {
    match ty {
        TypeDescriptor::Basic(GoBasic::Bool) => Ok(Expr::lit("false")),
        TypeDescriptor::Basic(GoBasic::String) => Ok(Expr::string_lit("")),
        TypeDescriptor::Basic(GoBasic::UnsafePointer) => Ok(Expr::nil()),
        TypeDescriptor::Basic(_) => Ok(Expr::lit("0")),

        TypeDescriptor::Named {
            name,
            module,
            underlying,
            ..
        } => match underlying.as_deref() {
            Some(TypeDescriptor::Composite(_)) | Some(TypeDescriptor::Array { .. }) => {
                Ok(Expr::composite(renderer.render(ty)?, Vec::new()))
            }
            Some(inner) => zero_value(inner, renderer),
            None if module.is_empty() && matches!(name.as_str(), "error" | "any") => {
                Ok(Expr::nil())
            }
            // *new(T) is the zero value of any T.
            None => Ok(new_deref(renderer.render(ty)?)),
        },

        TypeDescriptor::Composite(_) | TypeDescriptor::Array { .. } => {
            Ok(Expr::composite(renderer.render(ty)?, Vec::new()))
        }

        TypeDescriptor::TypeParam(name) => Err(RenderError::UnboundTypeParam(name.clone())),

        TypeDescriptor::Pointer(_)
        | TypeDescriptor::Slice(_)
        | TypeDescriptor::Map { .. }
        | TypeDescriptor::Channel { .. }
        | TypeDescriptor::Signature(_)
        | TypeDescriptor::CapabilitySet(_) => {
            // Render anyway so unrepresentable element types are still reported.
            renderer.render(ty)?;
            Ok(Expr::nil())
        }
    }
}

fn new_deref(ty: TypeExpr) -> Expr {
    Expr::ident("new").call(vec![Expr::Type(ty)]).deref()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::imports::ImportSet;
    use crate::codegen::printer::print_expr;
    use crate::ir::Field;

    const OUT: &str = "example.com/mocks";

    fn show(ty: &TypeDescriptor) -> String {
        let renderer = TypeRenderer::new(OUT);
        print_expr(&zero_value(ty, &renderer).unwrap(), &ImportSet::default())
    }

    #[test]
    fn test_basic_zeroes() {
        assert_eq!(show(&TypeDescriptor::bool()), "false");
        assert_eq!(show(&TypeDescriptor::string()), "\"\"");
        assert_eq!(show(&TypeDescriptor::int()), "0");
        assert_eq!(show(&TypeDescriptor::basic(GoBasic::Complex128)), "0");
        assert_eq!(show(&TypeDescriptor::basic(GoBasic::Rune)), "0");
        assert_eq!(show(&TypeDescriptor::basic(GoBasic::UnsafePointer)), "nil");
    }

    #[test]
    fn test_nil_shapes() {
        assert_eq!(show(&TypeDescriptor::pointer(TypeDescriptor::int())), "nil");
        assert_eq!(show(&TypeDescriptor::slice(TypeDescriptor::int())), "nil");
        assert_eq!(
            show(&TypeDescriptor::map(TypeDescriptor::string(), TypeDescriptor::int())),
            "nil"
        );
        assert_eq!(show(&TypeDescriptor::error()), "nil");
        assert_eq!(show(&TypeDescriptor::CapabilitySet(vec![])), "nil");
    }

    #[test]
    fn test_named_zeroes() {
        let options = TypeDescriptor::named_with("Options", OUT, TypeDescriptor::Composite(vec![]));
        assert_eq!(show(&options), "Options{}");

        let digest = TypeDescriptor::named_with(
            "Digest",
            OUT,
            TypeDescriptor::array(TypeDescriptor::basic(GoBasic::Byte), 32),
        );
        assert_eq!(show(&digest), "Digest{}");

        let duration = TypeDescriptor::named_with("Duration", "time", TypeDescriptor::basic(GoBasic::Int64));
        assert_eq!(show(&duration), "0");

        let handler = TypeDescriptor::named_with(
            "Handler",
            OUT,
            TypeDescriptor::Signature(Default::default()),
        );
        assert_eq!(show(&handler), "nil");

        let opaque = TypeDescriptor::named("Token", OUT);
        assert_eq!(show(&opaque), "*new(Token)");
    }

    #[test]
    fn test_anonymous_composites() {
        let point = TypeDescriptor::Composite(vec![
            Field {
                name: "X".to_string(),
                ty: TypeDescriptor::int(),
            },
            Field {
                name: "Y".to_string(),
                ty: TypeDescriptor::int(),
            },
        ]);
        assert_eq!(show(&point), "struct{ X int; Y int }{}");
        assert_eq!(show(&TypeDescriptor::array(TypeDescriptor::int(), 3)), "[3]int{}");
    }

    #[test]
    fn test_type_param_is_internal_error() {
        let renderer = TypeRenderer::new(OUT);
        let err = zero_value(&TypeDescriptor::TypeParam("T".to_string()), &renderer).unwrap_err();
        assert_eq!(err, RenderError::UnboundTypeParam("T".to_string()));
    }
}
