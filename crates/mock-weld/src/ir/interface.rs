//! Interface descriptors handed from the extractor to the mock generator

use serde::{Deserialize, Serialize};

use super::types::{Param, Signature, TypeDescriptor};

/// A method of an extracted interface
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Method {
    pub name: String,
    #[serde(default)]
    pub params: Vec<TypeDescriptor>,
    #[serde(default)]
    pub results: Vec<TypeDescriptor>,
    /// When set, the last parameter is a slice collecting the trailing arguments
    #[serde(default)]
    pub variadic: bool,
}

impl Method {
    /// Create a method with no parameters or results
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            results: Vec::new(),
            variadic: false,
        }
    }

    /// Add a parameter
    pub fn param(mut self, ty: TypeDescriptor) -> Self {
        self.params.push(ty);
        self
    }

    /// Add a trailing variadic parameter of element type `elem`
    pub fn variadic_param(mut self, elem: TypeDescriptor) -> Self {
        self.params.push(TypeDescriptor::slice(elem));
        self.variadic = true;
        self
    }

    /// Add a result
    pub fn returns(mut self, ty: TypeDescriptor) -> Self {
        self.results.push(ty);
        self
    }

    /// Build from a method signature, dropping parameter names
    pub fn from_signature(name: impl Into<String>, signature: &Signature) -> Self {
        Self {
            name: name.into(),
            params: signature.params.iter().map(|p| p.ty.clone()).collect(),
            results: signature.results.clone(),
            variadic: signature.variadic,
        }
    }

    /// The method as an unnamed function signature
    pub fn signature(&self) -> Signature {
        Signature {
            params: self.params.iter().cloned().map(Param::unnamed).collect(),
            results: self.results.clone(),
            variadic: self.variadic,
        }
    }

    /// Whether the last parameter collects variadic arguments
    pub fn is_variadic_index(&self, index: usize) -> bool {
        self.variadic && index + 1 == self.params.len()
    }
}

/// An interface selected for mocking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interface {
    pub name: String,
    /// Module path of the package declaring the interface
    pub module: String,
    /// Type arguments when the interface is a generic instantiation
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_args: Vec<TypeDescriptor>,
    /// Methods sorted by name
    pub methods: Vec<Method>,
}

impl Interface {
    /// Create an interface with no methods
    pub fn new(name: impl Into<String>, module: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            module: module.into(),
            type_args: Vec::new(),
            methods: Vec::new(),
        }
    }

    /// Add a method
    pub fn method(mut self, method: Method) -> Self {
        self.methods.push(method);
        self
    }

    /// Set type arguments
    pub fn type_args(mut self, args: Vec<TypeDescriptor>) -> Self {
        self.type_args = args;
        self
    }

    /// Whether the interface name is visible outside its package
    pub fn is_exported(&self) -> bool {
        is_exported(&self.name)
    }

    /// Interface name with the first character upper-cased
    pub fn title_name(&self) -> String {
        title(&self.name)
    }

    /// Sort methods by name
    pub fn sort_methods(&mut self) {
        self.methods.sort_by(|a, b| a.name.cmp(&b.name));
    }
}

/// A Go identifier is exported when its first character is an upper-case letter.
pub fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}

/// Upper-case the first character of `s`
pub fn title(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
