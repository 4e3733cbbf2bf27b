//! Mock synthesis
//!
//! Builds the declarations of one mock from an extracted interface: the mock
//! struct and its constructors, then for every method a behavior controller,
//! the proxy method, the controller accessors and a call record type.
//!
//! All names come from the [`NamingStrategy`] handed to the generator and all
//! types from the [`TypeRenderer`], so the generator itself holds no state
//! between interfaces.

use serde::{Deserialize, Serialize};

use crate::error::RenderError;
use crate::ir::{Interface, Method, NamingStrategy};

use super::ast::{Decl, Element, Expr, FieldDecl, FuncType, InterfaceMethod, ParamDecl, Receiver, Stmt, TypeExpr};
use super::render::TypeRenderer;
use super::zero::zero_value;

/// Which constructors to emit for each mock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConstructorSet {
    /// `NewMockX()`: every method returns zero values
    pub zero: bool,
    /// `NewStrictMockX()`: every method panics until stubbed
    pub strict: bool,
    /// `NewMockXFrom(i)`: every method forwards to `i`
    pub delegating: bool,
}

impl Default for ConstructorSet {
    fn default() -> Self {
        Self {
            zero: true,
            strict: true,
            delegating: true,
        }
    }
}

/// Default behavior installed by a constructor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DefaultBehavior {
    Zero,
    Strict,
    Delegate,
}

/// Names shared by every declaration of one mock
struct MockNames {
    /// Interface name as declared
    interface: String,
    mock: String,
}

/// Names and types of one method's declarations
struct MethodParts<'m> {
    method: &'m Method,
    proxy_field: String,
    controller: String,
    call: String,
    /// Unnamed function type of the method, variadic tail spread
    func: FuncType,
}

impl MethodParts<'_> {
    fn behavior_type(&self) -> TypeExpr {
        TypeExpr::Func(self.func.clone())
    }

    fn controller_ptr(&self) -> TypeExpr {
        TypeExpr::pointer(TypeExpr::ident(&self.controller))
    }

    fn controller_receiver(&self) -> Option<Receiver> {
        Some(Receiver {
            name: "f".to_string(),
            ty: self.controller_ptr(),
        })
    }
}

/// Generates the declarations of one mock per interface
pub struct MockGenerator<'a> {
    naming: &'a NamingStrategy,
    renderer: TypeRenderer<'a>,
    constructors: ConstructorSet,
}

impl<'a> MockGenerator<'a> {
    pub fn new(naming: &'a NamingStrategy, output_module: &'a str) -> Self {
        Self {
            naming,
            renderer: TypeRenderer::new(output_module),
            constructors: ConstructorSet::default(),
        }
    }

    /// Restrict the emitted constructors
    pub fn constructors(mut self, constructors: ConstructorSet) -> Self {
        self.constructors = constructors;
        self
    }

    /// All declarations of the mock for `iface`, in emission order
    pub fn generate(&self, iface: &Interface) -> Result<Vec<Decl>, RenderError> {
        let title = iface.title_name();
        let names = MockNames {
            interface: iface.name.clone(),
            mock: self.naming.mock_struct(&title),
        };

        let parts = iface
            .methods
            .iter()
            .map(|method| {
                Ok(MethodParts {
                    method,
                    proxy_field: self.naming.proxy_field(&method.name),
                    controller: self.naming.controller_struct(&title, &method.name),
                    call: self.naming.call_struct(&title, &method.name),
                    func: self.renderer.method_func_type(method)?,
                })
            })
            .collect::<Result<Vec<_>, RenderError>>()?;

        let mut decls = vec![self.mock_struct(iface, &names, &parts)];

        if self.constructors.zero {
            decls.push(self.constructor(&names, &parts, DefaultBehavior::Zero, None)?);
        }
        if self.constructors.strict {
            decls.push(self.constructor(&names, &parts, DefaultBehavior::Strict, None)?);
        }
        if self.constructors.delegating {
            let param = if self.needs_surrogate(iface) {
                let surrogate = self.naming.surrogate_interface(&title);
                decls.push(self.surrogate(iface, &surrogate, &parts));
                TypeExpr::ident(surrogate)
            } else {
                self.interface_ref(iface)?
            };
            decls.push(self.constructor(&names, &parts, DefaultBehavior::Delegate, Some(param))?);
        }

        for part in &parts {
            decls.push(self.controller_struct(&names, part));
            decls.push(self.proxy_method(&names, part)?);
            decls.push(self.set_default_behavior(&names, part));
            decls.push(self.push_behavior(&names, part));
            decls.push(self.return_helper("SetDefaultReturn", "SetDefaultBehavior", part)?);
            decls.push(self.return_helper("PushReturn", "PushBehavior", part)?);
            decls.push(self.next_behavior(part));
            decls.push(self.append_call(part));
            decls.push(self.history(part));
            decls.push(self.call_struct(&names, part)?);
            decls.push(self.args_accessor(part));
            decls.push(self.results_accessor(part));
        }

        Ok(decls)
    }

    /// An unexported interface from another module cannot be named here
    fn needs_surrogate(&self, iface: &Interface) -> bool {
        !iface.is_exported() && iface.module != self.renderer.output_module()
    }

    fn interface_ref(&self, iface: &Interface) -> Result<TypeExpr, RenderError> {
        let base = self.renderer.named_ref(&iface.name, &iface.module)?;
        if iface.type_args.is_empty() {
            return Ok(base);
        }
        let args = iface
            .type_args
            .iter()
            .map(|t| self.renderer.render(t))
            .collect::<Result<_, _>>()?;
        Ok(TypeExpr::Instance {
            base: Box::new(base),
            args,
        })
    }

    fn mock_struct(&self, iface: &Interface, names: &MockNames, parts: &[MethodParts<'_>]) -> Decl {
        let fields = parts
            .iter()
            .map(|part| {
                FieldDecl::new(&part.proxy_field, part.controller_ptr()).doc(format!(
                    "{} is an instance of a mock function object controlling the behavior of the method {}.",
                    part.proxy_field, part.method.name
                ))
            })
            .collect();

        Decl::Type {
            doc: Some(format!(
                "{} is a mock implementation of the {} interface (from the package {}) used for unit testing.",
                names.mock, iface.name, iface.module
            )),
            name: names.mock.clone(),
            ty: TypeExpr::Struct(fields),
        }
    }

    fn surrogate(&self, iface: &Interface, name: &str, parts: &[MethodParts<'_>]) -> Decl {
        let methods = parts
            .iter()
            .map(|part| InterfaceMethod {
                name: part.method.name.clone(),
                func: part.func.clone(),
            })
            .collect();

        Decl::Type {
            doc: Some(format!(
                "{} is a copy of the {} interface (from the package {}). It is redefined here as it is unexported in the source package.",
                name, iface.name, iface.module
            )),
            name: name.to_string(),
            ty: TypeExpr::Interface(methods),
        }
    }

    fn constructor(
        &self,
        names: &MockNames,
        parts: &[MethodParts<'_>],
        behavior: DefaultBehavior,
        param: Option<TypeExpr>,
    ) -> Result<Decl, RenderError> {
        let (name, summary) = match behavior {
            DefaultBehavior::Zero => (
                self.naming.zero_constructor(&names.mock),
                "All methods return zero values for all results, unless overwritten.",
            ),
            DefaultBehavior::Strict => (
                self.naming.strict_constructor(&names.mock),
                "All methods panic on invocation, unless overwritten.",
            ),
            DefaultBehavior::Delegate => (
                self.naming.delegating_constructor(&names.mock),
                "All methods delegate to the given implementation, unless overwritten.",
            ),
        };

        let mut elements = Vec::with_capacity(parts.len());
        for part in parts {
            let default = match behavior {
                DefaultBehavior::Zero => {
                    let zeroes = part
                        .method
                        .results
                        .iter()
                        .map(|r| zero_value(r, &self.renderer))
                        .collect::<Result<Vec<_>, _>>()?;
                    Expr::FuncLit {
                        ty: part.func.clone(),
                        body: vec![Stmt::Return(zeroes)],
                    }
                }
                DefaultBehavior::Strict => Expr::FuncLit {
                    ty: part.func.clone(),
                    body: vec![Stmt::Expr(Expr::ident("panic").call(vec![Expr::string_lit(
                        &format!("unexpected invocation of {}.{}", names.mock, part.method.name),
                    )]))],
                },
                DefaultBehavior::Delegate => Expr::ident("i").dot(&part.method.name),
            };

            let controller = Expr::keyed_composite(
                TypeExpr::ident(&part.controller),
                vec![Element::keyed("defaultBehavior", default)],
            )
            .address_of();
            elements.push(Element::keyed(&part.proxy_field, controller));
        }

        let mock = Expr::keyed_composite(TypeExpr::ident(&names.mock), elements).address_of();

        Ok(Decl::Func {
            doc: Some(format!(
                "{} creates a new mock of the {} interface. {}",
                name, names.interface, summary
            )),
            receiver: None,
            name,
            ty: FuncType::new(
                param.map(|ty| ParamDecl::named("i", ty)).into_iter().collect(),
                vec![ParamDecl::unnamed(TypeExpr::pointer(TypeExpr::ident(&names.mock)))],
            ),
            body: vec![Stmt::Return(vec![mock])],
        })
    }

    fn controller_struct(&self, names: &MockNames, part: &MethodParts<'_>) -> Decl {
        Decl::Type {
            doc: Some(format!(
                "{} describes the behavior when the {} method of the parent {} instance is invoked.",
                part.controller, part.method.name, names.mock
            )),
            name: part.controller.clone(),
            ty: TypeExpr::Struct(vec![
                FieldDecl::new("defaultBehavior", part.behavior_type()),
                FieldDecl::new("behaviors", TypeExpr::slice(part.behavior_type())),
                FieldDecl::new("history", TypeExpr::slice(TypeExpr::ident(&part.call))),
                FieldDecl::new("mutex", TypeExpr::qualified("sync", "Mutex")),
            ]),
        }
    }

    fn proxy_method(&self, names: &MockNames, part: &MethodParts<'_>) -> Result<Decl, RenderError> {
        let method = part.method;
        let param_types = self.renderer.param_types(method)?;
        let arg_names: Vec<String> = (0..param_types.len()).map(|i| format!("v{i}")).collect();
        let result_names: Vec<String> = (0..method.results.len()).map(|i| format!("r{i}")).collect();

        let params = arg_names
            .iter()
            .zip(param_types)
            .map(|(name, ty)| ParamDecl::named(name, ty))
            .collect();

        let controller = Expr::ident("m").dot(&part.proxy_field);
        let args: Vec<Expr> = arg_names.iter().map(Expr::ident).collect();
        let behavior = controller.clone().dot("nextBehavior").call(vec![]);
        let invocation = if method.variadic {
            behavior.call_spread(args.clone())
        } else {
            behavior.call(args.clone())
        };

        let mut body = Vec::new();
        if result_names.is_empty() {
            body.push(Stmt::Expr(invocation));
        } else {
            body.push(Stmt::Define {
                names: result_names.clone(),
                values: vec![invocation],
            });
        }

        let record = Expr::composite(
            TypeExpr::ident(&part.call),
            args.into_iter()
                .chain(result_names.iter().map(Expr::ident))
                .collect(),
        );
        body.push(Stmt::Expr(controller.dot("appendCall").call(vec![record])));

        if !result_names.is_empty() {
            body.push(Stmt::Return(result_names.iter().map(Expr::ident).collect()));
        }

        Ok(Decl::Func {
            doc: Some(format!(
                "{} delegates to the next behavior function in the queue and stores the parameter and result values of this invocation.",
                method.name
            )),
            receiver: Some(Receiver {
                name: "m".to_string(),
                ty: TypeExpr::pointer(TypeExpr::ident(&names.mock)),
            }),
            name: method.name.clone(),
            ty: FuncType::new(params, part.func.results.clone()),
            body,
        })
    }

    fn set_default_behavior(&self, names: &MockNames, part: &MethodParts<'_>) -> Decl {
        Decl::Func {
            doc: Some(format!(
                "SetDefaultBehavior sets function that is called when the {} method of the parent {} instance is invoked and the behavior queue is empty.",
                part.method.name, names.mock
            )),
            receiver: part.controller_receiver(),
            name: "SetDefaultBehavior".to_string(),
            ty: FuncType::new(vec![ParamDecl::named("hook", part.behavior_type())], vec![]),
            body: locked(vec![Stmt::assign(
                Expr::ident("f").dot("defaultBehavior"),
                Expr::ident("hook"),
            )]),
        }
    }

    fn push_behavior(&self, names: &MockNames, part: &MethodParts<'_>) -> Decl {
        let behaviors = Expr::ident("f").dot("behaviors");
        Decl::Func {
            doc: Some(format!(
                "PushBehavior adds a function to the end of the behavior queue. Each invocation of the {} method of the parent {} instance invokes the behavior at the front of the queue and discards it. After the queue is empty, the default behavior function is invoked for any future action.",
                part.method.name, names.mock
            )),
            receiver: part.controller_receiver(),
            name: "PushBehavior".to_string(),
            ty: FuncType::new(vec![ParamDecl::named("hook", part.behavior_type())], vec![]),
            body: locked(vec![Stmt::assign(
                behaviors.clone(),
                Expr::ident("append").call(vec![behaviors, Expr::ident("hook")]),
            )]),
        }
    }

    /// `SetDefaultReturn` or `PushReturn`
    fn return_helper(&self, name: &str, target: &str, part: &MethodParts<'_>) -> Result<Decl, RenderError> {
        let results = self.renderer.result_types(part.method)?;
        let result_names: Vec<String> = (0..results.len()).map(|i| format!("r{i}")).collect();
        let params = result_names
            .iter()
            .zip(results)
            .map(|(name, ty)| ParamDecl::named(name, ty))
            .collect();

        let hook = Expr::FuncLit {
            ty: part.func.clone(),
            body: vec![Stmt::Return(result_names.iter().map(Expr::ident).collect())],
        };

        Ok(Decl::Func {
            doc: Some(format!(
                "{} calls {} with a function that returns the given values.",
                name, target
            )),
            receiver: part.controller_receiver(),
            name: name.to_string(),
            ty: FuncType::new(params, vec![]),
            body: vec![Stmt::Expr(Expr::ident("f").dot(target).call(vec![hook]))],
        })
    }

    fn next_behavior(&self, part: &MethodParts<'_>) -> Decl {
        let f = Expr::ident("f");
        let behaviors = f.clone().dot("behaviors");
        Decl::Func {
            doc: None,
            receiver: part.controller_receiver(),
            name: "nextBehavior".to_string(),
            ty: FuncType::new(vec![], vec![ParamDecl::unnamed(part.behavior_type())]),
            body: vec![
                Stmt::Expr(f.clone().dot("mutex").dot("Lock").call(vec![])),
                Stmt::Defer(f.clone().dot("mutex").dot("Unlock").call(vec![])),
                Stmt::Blank,
                Stmt::If {
                    cond: Expr::ident("len")
                        .call(vec![behaviors.clone()])
                        .binary("==", Expr::lit("0")),
                    body: vec![Stmt::Return(vec![f.dot("defaultBehavior")])],
                },
                Stmt::Blank,
                Stmt::define("behavior", behaviors.clone().index(Expr::lit("0"))),
                Stmt::assign(behaviors.clone(), behaviors.slice_from(Expr::lit("1"))),
                Stmt::Return(vec![Expr::ident("behavior")]),
            ],
        }
    }

    fn append_call(&self, part: &MethodParts<'_>) -> Decl {
        let history = Expr::ident("f").dot("history");
        Decl::Func {
            doc: None,
            receiver: part.controller_receiver(),
            name: "appendCall".to_string(),
            ty: FuncType::new(vec![ParamDecl::named("r0", TypeExpr::ident(&part.call))], vec![]),
            body: locked(vec![Stmt::assign(
                history.clone(),
                Expr::ident("append").call(vec![history, Expr::ident("r0")]),
            )]),
        }
    }

    fn history(&self, part: &MethodParts<'_>) -> Decl {
        let records = TypeExpr::slice(TypeExpr::ident(&part.call));
        let live = Expr::ident("f").dot("history");

        let mut body = locked(vec![
            Stmt::define(
                "history",
                Expr::ident("make").call(vec![
                    Expr::Type(records.clone()),
                    Expr::ident("len").call(vec![live.clone()]),
                ]),
            ),
            Stmt::Expr(Expr::ident("copy").call(vec![Expr::ident("history"), live])),
        ]);
        body.push(Stmt::Blank);
        body.push(Stmt::Return(vec![Expr::ident("history")]));

        Decl::Func {
            doc: Some(format!(
                "History returns a sequence of {} objects describing the invocations of this function.",
                part.call
            )),
            receiver: part.controller_receiver(),
            name: "History".to_string(),
            ty: FuncType::new(vec![], vec![ParamDecl::unnamed(records)]),
            body,
        }
    }

    fn call_struct(&self, names: &MockNames, part: &MethodParts<'_>) -> Result<Decl, RenderError> {
        let method = part.method;
        let mut fields = Vec::new();

        for (i, ty) in self.renderer.dotless_param_types(method)?.into_iter().enumerate() {
            let doc = if method.is_variadic_index(i) {
                format!(
                    "Arg{} is a slice containing the values of the variadic arguments passed to this method invocation.",
                    i
                )
            } else {
                format!(
                    "Arg{} is the value of the {} argument passed to this method invocation.",
                    i,
                    ordinal(i + 1)
                )
            };
            fields.push(FieldDecl::new(format!("Arg{i}"), ty).doc(doc));
        }

        for (i, ty) in self.renderer.result_types(method)?.into_iter().enumerate() {
            fields.push(FieldDecl::new(format!("Result{i}"), ty).doc(format!(
                "Result{} is the value of the {} result returned from this method invocation.",
                i,
                ordinal(i + 1)
            )));
        }

        Ok(Decl::Type {
            doc: Some(format!(
                "{} is an object that describes an invocation of method {} on an instance of {}.",
                part.call, method.name, names.mock
            )),
            name: part.call.clone(),
            ty: TypeExpr::Struct(fields),
        })
    }

    fn call_receiver(part: &MethodParts<'_>) -> Option<Receiver> {
        Some(Receiver {
            name: "c".to_string(),
            ty: TypeExpr::ident(&part.call),
        })
    }

    fn args_accessor(&self, part: &MethodParts<'_>) -> Decl {
        let method = part.method;
        let values = TypeExpr::slice(TypeExpr::empty_interface());
        let c = Expr::ident("c");

        let mut doc = "Args returns an interface slice containing the arguments of this invocation.".to_string();
        let body = if method.variadic {
            doc.push_str(" The variadic slice argument is flattened in this array such that one positional argument and three variadic arguments would result in a slice of four, not two.");

            let last = method.params.len().saturating_sub(1);
            let leading = (0..last).map(|i| c.clone().dot(format!("Arg{i}"))).collect();
            let trailing = Expr::ident("trailing");
            vec![
                Stmt::define("trailing", Expr::composite(values.clone(), vec![])),
                Stmt::Range {
                    key: "_".to_string(),
                    value: "val".to_string(),
                    expr: c.dot(format!("Arg{last}")),
                    body: vec![Stmt::assign(
                        trailing.clone(),
                        Expr::ident("append").call(vec![trailing.clone(), Expr::ident("val")]),
                    )],
                },
                Stmt::Blank,
                Stmt::Return(vec![Expr::ident("append")
                    .call_spread(vec![Expr::composite(values.clone(), leading), trailing])]),
            ]
        } else {
            let all = (0..method.params.len())
                .map(|i| c.clone().dot(format!("Arg{i}")))
                .collect();
            vec![Stmt::Return(vec![Expr::composite(values.clone(), all)])]
        };

        Decl::Func {
            doc: Some(doc),
            receiver: Self::call_receiver(part),
            name: "Args".to_string(),
            ty: FuncType::new(vec![], vec![ParamDecl::unnamed(values)]),
            body,
        }
    }

    fn results_accessor(&self, part: &MethodParts<'_>) -> Decl {
        let values = TypeExpr::slice(TypeExpr::empty_interface());
        let all = (0..part.method.results.len())
            .map(|i| Expr::ident("c").dot(format!("Result{i}")))
            .collect();

        Decl::Func {
            doc: Some("Results returns an interface slice containing the results of this invocation.".to_string()),
            receiver: Self::call_receiver(part),
            name: "Results".to_string(),
            ty: FuncType::new(vec![], vec![ParamDecl::unnamed(values.clone())]),
            body: vec![Stmt::Return(vec![Expr::composite(values, all)])],
        }
    }
}

/// Wrap `body` in `f.mutex.Lock()` / `f.mutex.Unlock()`
fn locked(body: Vec<Stmt>) -> Vec<Stmt> {
    let mutex = Expr::ident("f").dot("mutex");
    let mut stmts = vec![Stmt::Expr(mutex.clone().dot("Lock").call(vec![]))];
    stmts.extend(body);
    stmts.push(Stmt::Expr(mutex.dot("Unlock").call(vec![])));
    stmts
}

/// English ordinal: 1st, 2nd, 3rd, 4th, 11th, 21st
pub fn ordinal(n: usize) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}
