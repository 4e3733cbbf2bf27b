//! Go pretty printer
//!
//! Lays out the document tree the way gofmt would for the constructs the
//! generator produces: tab indentation, one blank line between
//! declarations, and aligned field types inside struct declarations.

use crate::ir::ChanDir;

use super::ast::{Decl, Expr, FieldDecl, File, FuncType, InterfaceMethod, ParamDecl, Stmt, TypeExpr};
use super::comment::wrap_for_level;
use super::imports::{Import, ImportSet};

/// Single-pass printer over the document tree
pub struct GoPrinter<'a> {
    imports: &'a ImportSet,
    out: String,
    indent: usize,
}

impl<'a> GoPrinter<'a> {
    pub fn new(imports: &'a ImportSet) -> Self {
        Self {
            imports,
            out: String::new(),
            indent: 0,
        }
    }

    pub fn finish(self) -> String {
        self.out
    }

    fn write(&mut self, s: &str) {
        self.out.push_str(s);
    }

    fn newline(&mut self) {
        self.out.push('\n');
    }

    fn tabs(&mut self) {
        for _ in 0..self.indent {
            self.out.push('\t');
        }
    }

    fn comment(&mut self, text: &str, level: usize) {
        for line in wrap_for_level(text, level) {
            self.tabs();
            if line.is_empty() {
                self.write("//");
            } else {
                self.write("// ");
                self.write(&line);
            }
            self.newline();
        }
    }

    // Types

    fn qualifier(&self, module: &str) -> String {
        match self.imports.alias(module) {
            Some(alias) => alias.to_string(),
            None => module.rsplit('/').next().unwrap_or(module).to_string(),
        }
    }

    pub fn ty(&mut self, ty: &TypeExpr) {
        match ty {
            TypeExpr::Ident(name) => self.write(name),
            TypeExpr::Qualified { module, name } => {
                let alias = self.qualifier(module);
                self.write(&alias);
                self.write(".");
                self.write(name);
            }
            TypeExpr::Instance { base, args } => {
                self.ty(base);
                self.write("[");
                self.type_list(args);
                self.write("]");
            }
            TypeExpr::Pointer(elem) => {
                self.write("*");
                self.ty(elem);
            }
            TypeExpr::Slice(elem) => {
                self.write("[]");
                self.ty(elem);
            }
            TypeExpr::Ellipsis(elem) => {
                self.write("...");
                self.ty(elem);
            }
            TypeExpr::Array { len, elem } => {
                self.write(&format!("[{}]", len));
                self.ty(elem);
            }
            TypeExpr::Map { key, value } => {
                self.write("map[");
                self.ty(key);
                self.write("]");
                self.ty(value);
            }
            TypeExpr::Chan { dir, elem } => {
                let needs_parens = *dir == ChanDir::Both
                    && matches!(elem.as_ref(), TypeExpr::Chan { dir: ChanDir::Recv, .. });
                self.write(match dir {
                    ChanDir::Both => "chan ",
                    ChanDir::Send => "chan<- ",
                    ChanDir::Recv => "<-chan ",
                });
                if needs_parens {
                    self.write("(");
                    self.ty(elem);
                    self.write(")");
                } else {
                    self.ty(elem);
                }
            }
            TypeExpr::Func(func) => {
                self.write("func");
                self.signature(func);
            }
            TypeExpr::Struct(fields) => self.inline_struct(fields),
            TypeExpr::Interface(methods) => self.inline_interface(methods),
        }
    }

    fn type_list(&mut self, types: &[TypeExpr]) {
        for (i, t) in types.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.ty(t);
        }
    }

    fn inline_struct(&mut self, fields: &[FieldDecl]) {
        if fields.is_empty() {
            self.write("struct{}");
            return;
        }
        self.write("struct{ ");
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                self.write("; ");
            }
            self.write(&field.name);
            self.write(" ");
            self.ty(&field.ty);
        }
        self.write(" }");
    }

    fn inline_interface(&mut self, methods: &[InterfaceMethod]) {
        if methods.is_empty() {
            self.write("interface{}");
            return;
        }
        self.write("interface{ ");
        for (i, method) in methods.iter().enumerate() {
            if i > 0 {
                self.write("; ");
            }
            self.write(&method.name);
            self.signature(&method.func);
        }
        self.write(" }");
    }

    fn params(&mut self, params: &[ParamDecl]) {
        for (i, p) in params.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            if let Some(name) = &p.name {
                self.write(name);
                self.write(" ");
            }
            self.ty(&p.ty);
        }
    }

    /// `(params) results` without the `func` keyword
    pub fn signature(&mut self, func: &FuncType) {
        self.write("(");
        self.params(&func.params);
        self.write(")");

        match func.results.as_slice() {
            [] => {}
            [single] if single.name.is_none() => {
                self.write(" ");
                self.ty(&single.ty);
            }
            results => {
                self.write(" (");
                self.params(results);
                self.write(")");
            }
        }
    }

    // Expressions

    pub fn expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Ident(name) | Expr::Lit(name) => self.write(name),
            Expr::Type(ty) => self.ty(ty),
            Expr::Selector(inner, name) => {
                self.expr(inner);
                self.write(".");
                self.write(name);
            }
            Expr::Call { func, args, spread } => {
                self.expr(func);
                self.write("(");
                self.expr_list(args);
                if *spread {
                    self.write("...");
                }
                self.write(")");
            }
            Expr::Index(inner, index) => {
                self.expr(inner);
                self.write("[");
                self.expr(index);
                self.write("]");
            }
            Expr::SliceFrom(inner, low) => {
                self.expr(inner);
                self.write("[");
                self.expr(low);
                self.write(":]");
            }
            Expr::Composite {
                ty,
                elements,
                multiline,
            } => {
                self.ty(ty);
                if *multiline && !elements.is_empty() {
                    self.write("{");
                    self.newline();
                    self.indent += 1;
                    for element in elements {
                        self.tabs();
                        if let Some(key) = &element.key {
                            self.write(key);
                            self.write(": ");
                        }
                        self.expr(&element.value);
                        self.write(",");
                        self.newline();
                    }
                    self.indent -= 1;
                    self.tabs();
                    self.write("}");
                } else {
                    self.write("{");
                    for (i, element) in elements.iter().enumerate() {
                        if i > 0 {
                            self.write(", ");
                        }
                        if let Some(key) = &element.key {
                            self.write(key);
                            self.write(": ");
                        }
                        self.expr(&element.value);
                    }
                    self.write("}");
                }
            }
            Expr::AddressOf(inner) => {
                self.write("&");
                self.expr(inner);
            }
            Expr::Deref(inner) => {
                self.write("*");
                self.expr(inner);
            }
            Expr::Binary { lhs, op, rhs } => {
                self.expr(lhs);
                self.write(" ");
                self.write(op);
                self.write(" ");
                self.expr(rhs);
            }
            Expr::FuncLit { ty, body } => {
                self.write("func");
                self.signature(ty);
                self.block(body);
            }
        }
    }

    fn expr_list(&mut self, exprs: &[Expr]) {
        for (i, e) in exprs.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.expr(e);
        }
    }

    // Statements

    /// ` {`, the indented body, then the closing brace on its own line
    fn block(&mut self, body: &[Stmt]) {
        self.write(" {");
        self.newline();
        self.indent += 1;
        for stmt in body {
            self.stmt(stmt);
        }
        self.indent -= 1;
        self.tabs();
        self.write("}");
    }

    pub fn stmt(&mut self, stmt: &Stmt) {
        if let Stmt::Blank = stmt {
            self.newline();
            return;
        }

        self.tabs();
        match stmt {
            Stmt::Expr(e) => self.expr(e),
            Stmt::Define { names, values } => {
                self.write(&names.join(", "));
                self.write(" := ");
                self.expr_list(values);
            }
            Stmt::Assign { targets, values } => {
                self.expr_list(targets);
                self.write(" = ");
                self.expr_list(values);
            }
            Stmt::Return(values) => {
                self.write("return");
                if !values.is_empty() {
                    self.write(" ");
                    self.expr_list(values);
                }
            }
            Stmt::Defer(e) => {
                self.write("defer ");
                self.expr(e);
            }
            Stmt::If { cond, body } => {
                self.write("if ");
                self.expr(cond);
                self.block(body);
            }
            Stmt::Range {
                key,
                value,
                expr,
                body,
            } => {
                self.write(&format!("for {}, {} := range ", key, value));
                self.expr(expr);
                self.block(body);
            }
            Stmt::Blank => {}
        }
        self.newline();
    }

    // Declarations

    pub fn decl(&mut self, decl: &Decl) {
        match decl {
            Decl::Type { doc, name, ty } => {
                if let Some(doc) = doc {
                    self.comment(doc, 1);
                }
                self.write("type ");
                self.write(name);
                self.write(" ");
                match ty {
                    TypeExpr::Struct(fields) if !fields.is_empty() => self.struct_body(fields),
                    TypeExpr::Interface(methods) if !methods.is_empty() => {
                        self.interface_body(methods)
                    }
                    other => self.ty(other),
                }
                self.newline();
            }
            Decl::Func {
                doc,
                receiver,
                name,
                ty,
                body,
            } => {
                if let Some(doc) = doc {
                    self.comment(doc, 1);
                }
                self.write("func ");
                if let Some(receiver) = receiver {
                    self.write("(");
                    self.write(&receiver.name);
                    self.write(" ");
                    self.ty(&receiver.ty);
                    self.write(") ");
                }
                self.write(name);
                self.signature(ty);
                self.block(body);
                self.newline();
            }
        }
    }

    /// Multi-line struct body. Field types are aligned within runs of fields
    /// not separated by a doc comment.
    fn struct_body(&mut self, fields: &[FieldDecl]) {
        self.write("struct {");
        self.newline();
        self.indent += 1;

        let mut runs: Vec<&[FieldDecl]> = Vec::new();
        let mut start = 0;
        for (i, field) in fields.iter().enumerate() {
            if i > start && field.doc.is_some() {
                runs.push(&fields[start..i]);
                start = i;
            }
        }
        runs.push(&fields[start..]);

        for run in runs {
            let width = run.iter().map(|f| f.name.len()).max().unwrap_or(0);
            for field in run {
                if let Some(doc) = &field.doc {
                    self.comment(doc, self.indent + 1);
                }
                self.tabs();
                self.write(&format!("{:<width$} ", field.name, width = width));
                self.ty(&field.ty);
                self.newline();
            }
        }

        self.indent -= 1;
        self.tabs();
        self.write("}");
    }

    fn interface_body(&mut self, methods: &[InterfaceMethod]) {
        self.write("interface {");
        self.newline();
        self.indent += 1;
        for method in methods {
            self.tabs();
            self.write(&method.name);
            self.signature(&method.func);
            self.newline();
        }
        self.indent -= 1;
        self.tabs();
        self.write("}");
    }

    fn import_line(&mut self, import: &Import) {
        self.write("\t");
        if import.needs_alias() {
            self.write(&import.alias);
            self.write(" ");
        }
        self.write(&super::ast::quote(&import.path));
        self.newline();
    }

    pub fn file(&mut self, file: &File) {
        for line in &file.header {
            if line.is_empty() {
                self.write("//");
            } else {
                self.write("// ");
                self.write(line);
            }
            self.newline();
        }
        if !file.header.is_empty() {
            self.newline();
        }

        self.write("package ");
        self.write(&file.package);
        self.newline();

        if !file.imports.is_empty() {
            let (std, other) = file.imports.imports();
            self.newline();
            self.write("import (");
            self.newline();
            for import in &std {
                self.import_line(import);
            }
            if !std.is_empty() && !other.is_empty() {
                self.newline();
            }
            for import in &other {
                self.import_line(import);
            }
            self.write(")");
            self.newline();
        }

        for decl in &file.decls {
            self.newline();
            self.decl(decl);
        }
    }
}

/// Print a type expression
pub fn print_type(ty: &TypeExpr, imports: &ImportSet) -> String {
    let mut printer = GoPrinter::new(imports);
    printer.ty(ty);
    printer.finish()
}

/// Print an expression at indentation zero
pub fn print_expr(expr: &Expr, imports: &ImportSet) -> String {
    let mut printer = GoPrinter::new(imports);
    printer.expr(expr);
    printer.finish()
}

/// Print one declaration, without the trailing newline
pub fn print_decl(decl: &Decl, imports: &ImportSet) -> String {
    let mut printer = GoPrinter::new(imports);
    printer.decl(decl);
    let mut out = printer.finish();
    out.truncate(out.trim_end().len());
    out
}

/// Print a whole file
pub fn print_file(file: &File) -> String {
    let mut printer = GoPrinter::new(&file.imports);
    printer.file(file);
    printer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::ast::{Element, Receiver};
    use pretty_assertions::assert_eq;

    fn no_imports() -> ImportSet {
        ImportSet::default()
    }

    #[test]
    fn test_struct_alignment() {
        let decl = Decl::Type {
            doc: Some("Pair holds two values.".to_string()),
            name: "Pair".to_string(),
            ty: TypeExpr::Struct(vec![
                FieldDecl::new("defaultBehavior", TypeExpr::ident("int")),
                FieldDecl::new("history", TypeExpr::slice(TypeExpr::ident("string"))),
                FieldDecl::new("Doc", TypeExpr::ident("bool")).doc("Doc is documented."),
                FieldDecl::new("X", TypeExpr::ident("int")),
            ]),
        };

        let expected = "\
// Pair holds two values.
type Pair struct {
\tdefaultBehavior int
\thistory         []string
\t// Doc is documented.
\tDoc bool
\tX   int
}";
        assert_eq!(print_decl(&decl, &no_imports()), expected);
    }

    #[test]
    fn test_func_decl_with_body() {
        let f = Expr::ident("f");
        let decl = Decl::Func {
            doc: None,
            receiver: Some(Receiver {
                name: "f".to_string(),
                ty: TypeExpr::pointer(TypeExpr::ident("T")),
            }),
            name: "next".to_string(),
            ty: FuncType::new(vec![], vec![ParamDecl::unnamed(TypeExpr::ident("int"))]),
            body: vec![
                Stmt::If {
                    cond: Expr::ident("len")
                        .call(vec![f.clone().dot("items")])
                        .binary("==", Expr::lit("0")),
                    body: vec![Stmt::Return(vec![Expr::lit("0")])],
                },
                Stmt::Blank,
                Stmt::Return(vec![f.dot("items").index(Expr::lit("0"))]),
            ],
        };

        let expected = "\
func (f *T) next() int {
\tif len(f.items) == 0 {
\t\treturn 0
\t}

\treturn f.items[0]
}";
        assert_eq!(print_decl(&decl, &no_imports()), expected);
    }

    #[test]
    fn test_multiline_composite() {
        let expr = Expr::keyed_composite(
            TypeExpr::ident("T"),
            vec![Element::keyed(
                "hook",
                Expr::FuncLit {
                    ty: FuncType::new(vec![], vec![]),
                    body: vec![Stmt::Return(vec![])],
                },
            )],
        )
        .address_of();

        let expected = "\
&T{
\thook: func() {
\t\treturn
\t},
}";
        assert_eq!(print_expr(&expr, &no_imports()), expected);
    }

    #[test]
    fn test_signature_results() {
        let imports = no_imports();
        let one = TypeExpr::Func(FuncType::new(
            vec![ParamDecl::unnamed(TypeExpr::ident("string"))],
            vec![ParamDecl::unnamed(TypeExpr::ident("bool"))],
        ));
        assert_eq!(print_type(&one, &imports), "func(string) bool");

        let named = TypeExpr::Func(FuncType::new(
            vec![],
            vec![ParamDecl::named("r0", TypeExpr::ident("bool"))],
        ));
        assert_eq!(print_type(&named, &imports), "func() (r0 bool)");
    }

    #[test]
    fn test_file_layout() {
        let decls = vec![Decl::Type {
            doc: None,
            name: "T".to_string(),
            ty: TypeExpr::Struct(vec![
                FieldDecl::new("mu", TypeExpr::qualified("sync", "Mutex")),
                FieldDecl::new("item", TypeExpr::qualified("example.com/store", "Item")),
            ]),
        }];
        let file = File {
            header: vec!["Code generated by mock-weld; DO NOT EDIT.".to_string()],
            package: "mocks".to_string(),
            imports: ImportSet::collect(&decls, &["sync"]),
            decls,
        };

        let expected = "\
// Code generated by mock-weld; DO NOT EDIT.

package mocks

import (
\t\"sync\"

\t\"example.com/store\"
)

type T struct {
\tmu   sync.Mutex
\titem store.Item
}
";
        assert_eq!(print_file(&file), expected);
    }
}
