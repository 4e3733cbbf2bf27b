//! Type rendering
//!
//! Maps a `TypeDescriptor` to a Go type expression relative to the module the
//! generated file lives in. Named types owned by that module are referenced
//! without a qualifier; all others carry their module path for the import
//! pass to resolve.

use crate::error::RenderError;
use crate::ir::{GoBasic, Method, Signature, TypeDescriptor};

use super::ast::{FieldDecl, FuncType, InterfaceMethod, ParamDecl, TypeExpr};

/// Renders descriptors for one output module
#[derive(Debug, Clone, Copy)]
pub struct TypeRenderer<'a> {
    output_module: &'a str,
}

impl<'a> TypeRenderer<'a> {
    pub fn new(output_module: &'a str) -> Self {
        Self { output_module }
    }

    pub fn output_module(&self) -> &'a str {
        self.output_module
    }

    /// Reference to a declared type, qualified unless it lives in the output module
    pub fn named_ref(&self, name: &str, module: &str) -> Result<TypeExpr, RenderError> {
        if name.is_empty() {
            return Err(RenderError::EmptyName);
        }
        if module.is_empty() || module == self.output_module {
            Ok(TypeExpr::ident(name))
        } else {
            Ok(TypeExpr::qualified(module, name))
        }
    }

    /// Render a type descriptor
    pub fn render(&self, ty: &TypeDescriptor) -> Result<TypeExpr, RenderError> {
        let expr = match ty {
            TypeDescriptor::Basic(GoBasic::UnsafePointer) => TypeExpr::qualified("unsafe", "Pointer"),
            TypeDescriptor::Basic(basic) => TypeExpr::ident(basic.as_go()),

            TypeDescriptor::Named {
                name,
                module,
                type_args,
                ..
            } => {
                let base = self.named_ref(name, module)?;
                if type_args.is_empty() {
                    base
                } else {
                    TypeExpr::Instance {
                        base: Box::new(base),
                        args: self.render_all(type_args)?,
                    }
                }
            }

            TypeDescriptor::Pointer(elem) => TypeExpr::pointer(self.render(elem)?),

            TypeDescriptor::Slice(elem) => TypeExpr::slice(self.render(elem)?),

            TypeDescriptor::Array { elem, len } => TypeExpr::Array {
                len: *len,
                elem: Box::new(self.render(elem)?),
            },

            TypeDescriptor::Map { key, elem } => {
                if let Some(shape) = non_comparable(key) {
                    return Err(RenderError::InvalidMapKey(shape));
                }
                TypeExpr::Map {
                    key: Box::new(self.render(key)?),
                    value: Box::new(self.render(elem)?),
                }
            }

            TypeDescriptor::Channel { elem, dir } => TypeExpr::Chan {
                dir: *dir,
                elem: Box::new(self.render(elem)?),
            },

            TypeDescriptor::Composite(fields) => TypeExpr::Struct(
                fields
                    .iter()
                    .map(|f| Ok(FieldDecl::new(&f.name, self.render(&f.ty)?)))
                    .collect::<Result<_, RenderError>>()?,
            ),

            TypeDescriptor::Signature(sig) => TypeExpr::Func(self.signature(sig)?),

            TypeDescriptor::CapabilitySet(methods) => TypeExpr::Interface(
                methods
                    .iter()
                    .map(|m| {
                        Ok(InterfaceMethod {
                            name: m.name.clone(),
                            func: self.signature(&m.signature)?,
                        })
                    })
                    .collect::<Result<_, RenderError>>()?,
            ),

            TypeDescriptor::TypeParam(name) => {
                return Err(RenderError::UnboundTypeParam(name.clone()));
            }
        };

        Ok(expr)
    }

    fn render_all(&self, types: &[TypeDescriptor]) -> Result<Vec<TypeExpr>, RenderError> {
        types.iter().map(|t| self.render(t)).collect()
    }

    /// Render a parameter type, spreading the last one of a variadic list
    fn param(&self, ty: &TypeDescriptor, spread: bool) -> Result<TypeExpr, RenderError> {
        if !spread {
            return self.render(ty);
        }
        match ty {
            TypeDescriptor::Slice(elem) => Ok(TypeExpr::Ellipsis(Box::new(self.render(elem)?))),
            other => Err(RenderError::VariadicNotSlice(shape_name(other).to_string())),
        }
    }

    /// Render a function signature. Parameter names are kept only when every
    /// parameter has one.
    pub fn signature(&self, sig: &Signature) -> Result<FuncType, RenderError> {
        if sig.variadic && sig.params.is_empty() {
            return Err(RenderError::VariadicNotSlice("no parameters".to_string()));
        }
        let keep_names = !sig.params.is_empty() && sig.params.iter().all(|p| p.name.is_some());
        let last = sig.params.len().saturating_sub(1);

        let params = sig
            .params
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let ty = self.param(&p.ty, sig.variadic && i == last)?;
                Ok(ParamDecl {
                    name: if keep_names { p.name.clone() } else { None },
                    ty,
                })
            })
            .collect::<Result<_, RenderError>>()?;

        let results = sig
            .results
            .iter()
            .map(|r| Ok(ParamDecl::unnamed(self.render(r)?)))
            .collect::<Result<_, RenderError>>()?;

        Ok(FuncType::new(params, results))
    }

    /// Parameter types of a method, with the variadic tail spread
    pub fn param_types(&self, method: &Method) -> Result<Vec<TypeExpr>, RenderError> {
        if method.variadic && method.params.is_empty() {
            return Err(RenderError::VariadicNotSlice("no parameters".to_string()));
        }
        method
            .params
            .iter()
            .enumerate()
            .map(|(i, ty)| self.param(ty, method.is_variadic_index(i)))
            .collect()
    }

    /// Parameter types of a method with the variadic tail kept as a slice
    pub fn dotless_param_types(&self, method: &Method) -> Result<Vec<TypeExpr>, RenderError> {
        self.render_all(&method.params)
    }

    pub fn result_types(&self, method: &Method) -> Result<Vec<TypeExpr>, RenderError> {
        self.render_all(&method.results)
    }

    /// Unnamed function type matching a method
    pub fn method_func_type(&self, method: &Method) -> Result<FuncType, RenderError> {
        Ok(FuncType::new(
            self.param_types(method)?
                .into_iter()
                .map(ParamDecl::unnamed)
                .collect(),
            self.result_types(method)?
                .into_iter()
                .map(ParamDecl::unnamed)
                .collect(),
        ))
    }
}

/// Shapes Go refuses as map keys
fn non_comparable(key: &TypeDescriptor) -> Option<&'static str> {
    match key {
        TypeDescriptor::Slice(_) | TypeDescriptor::Map { .. } | TypeDescriptor::Signature(_) => {
            Some(shape_name(key))
        }
        TypeDescriptor::Named {
            underlying: Some(inner),
            ..
        } => non_comparable(inner),
        _ => None,
    }
}

fn shape_name(ty: &TypeDescriptor) -> &'static str {
    match ty {
        TypeDescriptor::Basic(_) => "basic",
        TypeDescriptor::Named { .. } => "named",
        TypeDescriptor::Pointer(_) => "pointer",
        TypeDescriptor::Slice(_) => "slice",
        TypeDescriptor::Array { .. } => "array",
        TypeDescriptor::Map { .. } => "map",
        TypeDescriptor::Channel { .. } => "channel",
        TypeDescriptor::Composite(_) => "struct",
        TypeDescriptor::Signature(_) => "function",
        TypeDescriptor::CapabilitySet(_) => "interface",
        TypeDescriptor::TypeParam(_) => "type parameter",
    }
}
