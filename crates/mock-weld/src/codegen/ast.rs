//! Go document tree
//!
//! A small immutable tree of Go declarations, statements, expressions and
//! type expressions. Generators build it with plain constructors; the printer
//! lays it out in a single pass.

use crate::ir::ChanDir;

use super::imports::ImportSet;

/// Go type expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    /// Unqualified name: builtins, local declarations
    Ident(String),
    /// Name owned by another module, printed with the module's import alias
    Qualified { module: String, name: String },
    /// Generic instantiation `Base[A, B]`
    Instance {
        base: Box<TypeExpr>,
        args: Vec<TypeExpr>,
    },
    Pointer(Box<TypeExpr>),
    Slice(Box<TypeExpr>),
    /// `...T`, only valid as the last parameter type
    Ellipsis(Box<TypeExpr>),
    Array { len: u64, elem: Box<TypeExpr> },
    Map {
        key: Box<TypeExpr>,
        value: Box<TypeExpr>,
    },
    Chan { dir: ChanDir, elem: Box<TypeExpr> },
    Func(FuncType),
    Struct(Vec<FieldDecl>),
    Interface(Vec<InterfaceMethod>),
}

impl TypeExpr {
    pub fn ident(name: impl Into<String>) -> Self {
        TypeExpr::Ident(name.into())
    }

    pub fn qualified(module: impl Into<String>, name: impl Into<String>) -> Self {
        TypeExpr::Qualified {
            module: module.into(),
            name: name.into(),
        }
    }

    pub fn pointer(elem: TypeExpr) -> Self {
        TypeExpr::Pointer(Box::new(elem))
    }

    pub fn slice(elem: TypeExpr) -> Self {
        TypeExpr::Slice(Box::new(elem))
    }

    /// `interface{}`
    pub fn empty_interface() -> Self {
        TypeExpr::Interface(Vec::new())
    }

    /// Visit every qualified name in the expression
    pub fn walk_qualifiers<'a>(&'a self, visit: &mut dyn FnMut(&'a str)) {
        match self {
            TypeExpr::Ident(_) => {}
            TypeExpr::Qualified { module, .. } => visit(module),
            TypeExpr::Instance { base, args } => {
                base.walk_qualifiers(visit);
                for arg in args {
                    arg.walk_qualifiers(visit);
                }
            }
            TypeExpr::Pointer(elem)
            | TypeExpr::Slice(elem)
            | TypeExpr::Ellipsis(elem)
            | TypeExpr::Array { elem, .. }
            | TypeExpr::Chan { elem, .. } => elem.walk_qualifiers(visit),
            TypeExpr::Map { key, value } => {
                key.walk_qualifiers(visit);
                value.walk_qualifiers(visit);
            }
            TypeExpr::Func(func) => func.walk_qualifiers(visit),
            TypeExpr::Struct(fields) => {
                for field in fields {
                    field.ty.walk_qualifiers(visit);
                }
            }
            TypeExpr::Interface(methods) => {
                for method in methods {
                    method.func.walk_qualifiers(visit);
                }
            }
        }
    }
}

/// Function parameter or result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamDecl {
    pub name: Option<String>,
    pub ty: TypeExpr,
}

impl ParamDecl {
    pub fn unnamed(ty: TypeExpr) -> Self {
        Self { name: None, ty }
    }

    pub fn named(name: impl Into<String>, ty: TypeExpr) -> Self {
        Self {
            name: Some(name.into()),
            ty,
        }
    }
}

/// `func(params) results`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FuncType {
    pub params: Vec<ParamDecl>,
    pub results: Vec<ParamDecl>,
}

impl FuncType {
    pub fn new(params: Vec<ParamDecl>, results: Vec<ParamDecl>) -> Self {
        Self { params, results }
    }

    pub fn walk_qualifiers<'a>(&'a self, visit: &mut dyn FnMut(&'a str)) {
        for p in self.params.iter().chain(&self.results) {
            p.ty.walk_qualifiers(visit);
        }
    }
}

/// Struct field with an optional doc comment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDecl {
    pub doc: Option<String>,
    pub name: String,
    pub ty: TypeExpr,
}

impl FieldDecl {
    pub fn new(name: impl Into<String>, ty: TypeExpr) -> Self {
        Self {
            doc: None,
            name: name.into(),
            ty,
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }
}

/// Method entry of an interface type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceMethod {
    pub name: String,
    pub func: FuncType,
}

/// Composite literal element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub key: Option<String>,
    pub value: Expr,
}

impl Element {
    pub fn keyed(key: impl Into<String>, value: Expr) -> Self {
        Self {
            key: Some(key.into()),
            value,
        }
    }

    pub fn positional(value: Expr) -> Self {
        Self { key: None, value }
    }
}

/// Go expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Ident(String),
    /// Literal token, printed verbatim
    Lit(String),
    /// Type used in expression position, e.g. the argument of `new`
    Type(TypeExpr),
    Selector(Box<Expr>, String),
    Call {
        func: Box<Expr>,
        args: Vec<Expr>,
        /// Spread the last argument with `...`
        spread: bool,
    },
    Index(Box<Expr>, Box<Expr>),
    /// `x[low:]`
    SliceFrom(Box<Expr>, Box<Expr>),
    Composite {
        ty: TypeExpr,
        elements: Vec<Element>,
        /// One element per line
        multiline: bool,
    },
    /// `&x`
    AddressOf(Box<Expr>),
    /// `*x`
    Deref(Box<Expr>),
    Binary {
        lhs: Box<Expr>,
        op: &'static str,
        rhs: Box<Expr>,
    },
    FuncLit { ty: FuncType, body: Vec<Stmt> },
}

impl Expr {
    pub fn ident(name: impl Into<String>) -> Self {
        Expr::Ident(name.into())
    }

    pub fn nil() -> Self {
        Expr::Ident("nil".to_string())
    }

    pub fn lit(text: impl Into<String>) -> Self {
        Expr::Lit(text.into())
    }

    /// Double-quoted Go string literal
    pub fn string_lit(value: &str) -> Self {
        Expr::Lit(quote(value))
    }

    /// `self.name`
    pub fn dot(self, name: impl Into<String>) -> Self {
        Expr::Selector(Box::new(self), name.into())
    }

    /// `self(args)`
    pub fn call(self, args: Vec<Expr>) -> Self {
        Expr::Call {
            func: Box::new(self),
            args,
            spread: false,
        }
    }

    /// `self(args...)`
    pub fn call_spread(self, args: Vec<Expr>) -> Self {
        Expr::Call {
            func: Box::new(self),
            args,
            spread: true,
        }
    }

    pub fn index(self, index: Expr) -> Self {
        Expr::Index(Box::new(self), Box::new(index))
    }

    pub fn slice_from(self, low: Expr) -> Self {
        Expr::SliceFrom(Box::new(self), Box::new(low))
    }

    /// Single-line composite literal `T{a, b}`
    pub fn composite(ty: TypeExpr, values: Vec<Expr>) -> Self {
        Expr::Composite {
            ty,
            elements: values.into_iter().map(Element::positional).collect(),
            multiline: false,
        }
    }

    /// Multi-line keyed composite literal
    pub fn keyed_composite(ty: TypeExpr, elements: Vec<Element>) -> Self {
        Expr::Composite {
            ty,
            elements,
            multiline: true,
        }
    }

    pub fn address_of(self) -> Self {
        Expr::AddressOf(Box::new(self))
    }

    pub fn deref(self) -> Self {
        Expr::Deref(Box::new(self))
    }

    pub fn binary(self, op: &'static str, rhs: Expr) -> Self {
        Expr::Binary {
            lhs: Box::new(self),
            op,
            rhs: Box::new(rhs),
        }
    }

    pub fn walk_qualifiers<'a>(&'a self, visit: &mut dyn FnMut(&'a str)) {
        match self {
            Expr::Ident(_) | Expr::Lit(_) => {}
            Expr::Type(ty) => ty.walk_qualifiers(visit),
            Expr::Selector(inner, _)
            | Expr::AddressOf(inner)
            | Expr::Deref(inner) => inner.walk_qualifiers(visit),
            Expr::Call { func, args, .. } => {
                func.walk_qualifiers(visit);
                for arg in args {
                    arg.walk_qualifiers(visit);
                }
            }
            Expr::Index(a, b) | Expr::SliceFrom(a, b) => {
                a.walk_qualifiers(visit);
                b.walk_qualifiers(visit);
            }
            Expr::Composite { ty, elements, .. } => {
                ty.walk_qualifiers(visit);
                for e in elements {
                    e.value.walk_qualifiers(visit);
                }
            }
            Expr::Binary { lhs, rhs, .. } => {
                lhs.walk_qualifiers(visit);
                rhs.walk_qualifiers(visit);
            }
            Expr::FuncLit { ty, body } => {
                ty.walk_qualifiers(visit);
                for stmt in body {
                    stmt.walk_qualifiers(visit);
                }
            }
        }
    }
}

/// Go statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    Expr(Expr),
    /// `a, b := values`
    Define { names: Vec<String>, values: Vec<Expr> },
    /// `targets = values`
    Assign { targets: Vec<Expr>, values: Vec<Expr> },
    Return(Vec<Expr>),
    Defer(Expr),
    If { cond: Expr, body: Vec<Stmt> },
    /// `for key, value := range expr`
    Range {
        key: String,
        value: String,
        expr: Expr,
        body: Vec<Stmt>,
    },
    /// Empty line
    Blank,
}

impl Stmt {
    pub fn define(name: impl Into<String>, value: Expr) -> Self {
        Stmt::Define {
            names: vec![name.into()],
            values: vec![value],
        }
    }

    pub fn assign(target: Expr, value: Expr) -> Self {
        Stmt::Assign {
            targets: vec![target],
            values: vec![value],
        }
    }

    pub fn walk_qualifiers<'a>(&'a self, visit: &mut dyn FnMut(&'a str)) {
        match self {
            Stmt::Expr(e) | Stmt::Defer(e) => e.walk_qualifiers(visit),
            Stmt::Define { values, .. } | Stmt::Return(values) => {
                for v in values {
                    v.walk_qualifiers(visit);
                }
            }
            Stmt::Assign { targets, values } => {
                for e in targets.iter().chain(values) {
                    e.walk_qualifiers(visit);
                }
            }
            Stmt::If { cond, body } => {
                cond.walk_qualifiers(visit);
                for s in body {
                    s.walk_qualifiers(visit);
                }
            }
            Stmt::Range { expr, body, .. } => {
                expr.walk_qualifiers(visit);
                for s in body {
                    s.walk_qualifiers(visit);
                }
            }
            Stmt::Blank => {}
        }
    }
}

/// Method receiver `(name Type)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receiver {
    pub name: String,
    pub ty: TypeExpr,
}

/// Top-level declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decl {
    Type {
        doc: Option<String>,
        name: String,
        ty: TypeExpr,
    },
    Func {
        doc: Option<String>,
        receiver: Option<Receiver>,
        name: String,
        ty: FuncType,
        body: Vec<Stmt>,
    },
}

impl Decl {
    pub fn walk_qualifiers<'a>(&'a self, visit: &mut dyn FnMut(&'a str)) {
        match self {
            Decl::Type { ty, .. } => ty.walk_qualifiers(visit),
            Decl::Func {
                receiver, ty, body, ..
            } => {
                if let Some(r) = receiver {
                    r.ty.walk_qualifiers(visit);
                }
                ty.walk_qualifiers(visit);
                for s in body {
                    s.walk_qualifiers(visit);
                }
            }
        }
    }
}

/// A complete Go source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    /// Comment lines above the package clause
    pub header: Vec<String>,
    pub package: String,
    pub imports: ImportSet,
    pub decls: Vec<Decl>,
}

/// Quote `value` as a Go interpreted string literal
pub fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote() {
        assert_eq!(quote("plain"), "\"plain\"");
        assert_eq!(quote("a\"b\\c\n"), "\"a\\\"b\\\\c\\n\"");
    }

    #[test]
    fn test_walk_qualifiers() {
        let ty = TypeExpr::Map {
            key: Box::new(TypeExpr::ident("string")),
            value: Box::new(TypeExpr::slice(TypeExpr::qualified("io", "Reader"))),
        };
        let body = vec![Stmt::Return(vec![Expr::Type(TypeExpr::qualified("time", "Duration"))
            .deref()])];
        let decl = Decl::Func {
            doc: None,
            receiver: None,
            name: "f".to_string(),
            ty: FuncType::new(vec![ParamDecl::named("m", ty)], vec![]),
            body,
        };

        let mut seen = Vec::new();
        decl.walk_qualifiers(&mut |m| seen.push(m));
        assert_eq!(seen, vec!["io", "time"]);
    }
}
