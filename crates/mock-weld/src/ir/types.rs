//! Type descriptors for Mock-Weld
//!
//! This module provides the closed set of type shapes that flow from the
//! package scanner, through extraction, into the renderer and the zero-value
//! synthesizer.
//!
//! # Shape Overview
//!
//! | Variant | Go syntax | Notes |
//! |---------|-----------|-------|
//! | `Basic` | `int`, `string`, ... | Predeclared scalar types |
//! | `Named` | `pkg.Name`, `Name[T]` | Declared types, optionally generic |
//! | `Pointer` | `*T` | |
//! | `Slice` | `[]T` | Spread as `...T` in variadic position |
//! | `Array` | `[N]T` | Fixed size |
//! | `Map` | `map[K]V` | Key must be comparable |
//! | `Channel` | `chan T`, `chan<- T`, `<-chan T` | |
//! | `Composite` | `struct{ ... }` | Anonymous struct |
//! | `Signature` | `func(...) ...` | Function values |
//! | `CapabilitySet` | `interface{ ... }` | Method sets |
//! | `TypeParam` | `T` | Substituted away during extraction |
//!
//! # Named Types
//!
//! A `Named` descriptor carries its owning module path and, optionally, its
//! underlying shape. The underlying shape is only consulted by the zero-value
//! synthesizer. Rendering always stops at the name, so self-referential types
//! such as `type Node struct { Next *Node }` terminate without a visited set.
//!
//! # JSON Form
//!
//! Descriptors are externally tagged by their snake_case variant name:
//!
//! ```json
//! { "slice": { "named": { "name": "Reader", "module": "io" } } }
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Predeclared Go scalar types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GoBasic {
    #[serde(rename = "bool")]
    Bool,
    #[serde(rename = "string")]
    String,
    #[serde(rename = "int")]
    Int,
    #[serde(rename = "int8")]
    Int8,
    #[serde(rename = "int16")]
    Int16,
    #[serde(rename = "int32")]
    Int32,
    #[serde(rename = "int64")]
    Int64,
    #[serde(rename = "uint")]
    Uint,
    #[serde(rename = "uint8")]
    Uint8,
    #[serde(rename = "uint16")]
    Uint16,
    #[serde(rename = "uint32")]
    Uint32,
    #[serde(rename = "uint64")]
    Uint64,
    #[serde(rename = "uintptr")]
    Uintptr,
    #[serde(rename = "float32")]
    Float32,
    #[serde(rename = "float64")]
    Float64,
    #[serde(rename = "complex64")]
    Complex64,
    #[serde(rename = "complex128")]
    Complex128,
    #[serde(rename = "byte")]
    Byte,
    #[serde(rename = "rune")]
    Rune,
    #[serde(rename = "unsafe.Pointer")]
    UnsafePointer,
}

impl GoBasic {
    /// Go spelling of the type
    pub fn as_go(&self) -> &'static str {
        match self {
            GoBasic::Bool => "bool",
            GoBasic::String => "string",
            GoBasic::Int => "int",
            GoBasic::Int8 => "int8",
            GoBasic::Int16 => "int16",
            GoBasic::Int32 => "int32",
            GoBasic::Int64 => "int64",
            GoBasic::Uint => "uint",
            GoBasic::Uint8 => "uint8",
            GoBasic::Uint16 => "uint16",
            GoBasic::Uint32 => "uint32",
            GoBasic::Uint64 => "uint64",
            GoBasic::Uintptr => "uintptr",
            GoBasic::Float32 => "float32",
            GoBasic::Float64 => "float64",
            GoBasic::Complex64 => "complex64",
            GoBasic::Complex128 => "complex128",
            GoBasic::Byte => "byte",
            GoBasic::Rune => "rune",
            GoBasic::UnsafePointer => "unsafe.Pointer",
        }
    }

    /// Parse from the Go spelling
    pub fn from_go(s: &str) -> Option<Self> {
        let basic = match s {
            "bool" => GoBasic::Bool,
            "string" => GoBasic::String,
            "int" => GoBasic::Int,
            "int8" => GoBasic::Int8,
            "int16" => GoBasic::Int16,
            "int32" => GoBasic::Int32,
            "int64" => GoBasic::Int64,
            "uint" => GoBasic::Uint,
            "uint8" => GoBasic::Uint8,
            "uint16" => GoBasic::Uint16,
            "uint32" => GoBasic::Uint32,
            "uint64" => GoBasic::Uint64,
            "uintptr" => GoBasic::Uintptr,
            "float32" => GoBasic::Float32,
            "float64" => GoBasic::Float64,
            "complex64" => GoBasic::Complex64,
            "complex128" => GoBasic::Complex128,
            "byte" => GoBasic::Byte,
            "rune" => GoBasic::Rune,
            "unsafe.Pointer" => GoBasic::UnsafePointer,
            _ => return None,
        };
        Some(basic)
    }

    /// Every numeric kind, including complex numbers
    pub fn is_numeric(&self) -> bool {
        !matches!(
            self,
            GoBasic::Bool | GoBasic::String | GoBasic::UnsafePointer
        )
    }
}

impl fmt::Display for GoBasic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_go())
    }
}

/// Direction of a channel type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ChanDir {
    /// chan T
    #[default]
    Both,
    /// chan<- T
    Send,
    /// <-chan T
    Recv,
}

/// Field of an anonymous struct
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub ty: TypeDescriptor,
}

/// Parameter of a function signature
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Param {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub ty: TypeDescriptor,
}

impl Param {
    pub fn unnamed(ty: TypeDescriptor) -> Self {
        Self { name: None, ty }
    }

    pub fn named(name: impl Into<String>, ty: TypeDescriptor) -> Self {
        Self {
            name: Some(name.into()),
            ty,
        }
    }
}

/// Function type. When `variadic` is set the last parameter is a slice.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Signature {
    #[serde(default)]
    pub params: Vec<Param>,
    #[serde(default)]
    pub results: Vec<TypeDescriptor>,
    #[serde(default)]
    pub variadic: bool,
}

/// Method entry of a capability set
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MethodSig {
    pub name: String,
    pub signature: Signature,
}

/// Type shapes understood by the generator
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeDescriptor {
    /// Predeclared scalar
    Basic(GoBasic),

    /// Declared type, referenced by name
    Named {
        name: String,
        /// Owning module path, empty for universe types such as `error`
        #[serde(default)]
        module: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        type_args: Vec<TypeDescriptor>,
        /// Absent when the shape was not expanded
        #[serde(default, skip_serializing_if = "Option::is_none")]
        underlying: Option<Box<TypeDescriptor>>,
    },

    /// *T
    Pointer(Box<TypeDescriptor>),

    /// []T
    Slice(Box<TypeDescriptor>),

    /// [N]T
    Array { elem: Box<TypeDescriptor>, len: u64 },

    /// map[K]V
    Map {
        key: Box<TypeDescriptor>,
        elem: Box<TypeDescriptor>,
    },

    /// chan T
    Channel {
        elem: Box<TypeDescriptor>,
        #[serde(default)]
        dir: ChanDir,
    },

    /// struct{ ... }
    Composite(Vec<Field>),

    /// func(...) ...
    Signature(Signature),

    /// interface{ ... }
    CapabilitySet(Vec<MethodSig>),

    /// Reference to a type parameter of a generic declaration
    TypeParam(String),
}

impl TypeDescriptor {
    /// Create a basic type
    pub fn basic(basic: GoBasic) -> Self {
        TypeDescriptor::Basic(basic)
    }

    /// Create a string type
    pub fn string() -> Self {
        TypeDescriptor::Basic(GoBasic::String)
    }

    /// Create a boolean type
    pub fn bool() -> Self {
        TypeDescriptor::Basic(GoBasic::Bool)
    }

    /// Create an int type
    pub fn int() -> Self {
        TypeDescriptor::Basic(GoBasic::Int)
    }

    /// The universe `error` type
    pub fn error() -> Self {
        TypeDescriptor::named("error", "")
    }

    /// Create a reference to a declared type without its underlying shape
    pub fn named(name: impl Into<String>, module: impl Into<String>) -> Self {
        TypeDescriptor::Named {
            name: name.into(),
            module: module.into(),
            type_args: Vec::new(),
            underlying: None,
        }
    }

    /// Create a reference to a declared type with its underlying shape
    pub fn named_with(
        name: impl Into<String>,
        module: impl Into<String>,
        underlying: TypeDescriptor,
    ) -> Self {
        TypeDescriptor::Named {
            name: name.into(),
            module: module.into(),
            type_args: Vec::new(),
            underlying: Some(Box::new(underlying)),
        }
    }

    /// Create a *T type
    pub fn pointer(elem: TypeDescriptor) -> Self {
        TypeDescriptor::Pointer(Box::new(elem))
    }

    /// Create a []T type
    pub fn slice(elem: TypeDescriptor) -> Self {
        TypeDescriptor::Slice(Box::new(elem))
    }

    /// Create a [N]T type
    pub fn array(elem: TypeDescriptor, len: u64) -> Self {
        TypeDescriptor::Array {
            elem: Box::new(elem),
            len,
        }
    }

    /// Create a map[K]V type
    pub fn map(key: TypeDescriptor, elem: TypeDescriptor) -> Self {
        TypeDescriptor::Map {
            key: Box::new(key),
            elem: Box::new(elem),
        }
    }

    /// Create a channel type
    pub fn channel(elem: TypeDescriptor, dir: ChanDir) -> Self {
        TypeDescriptor::Channel {
            elem: Box::new(elem),
            dir,
        }
    }

    /// Check if this is a slice type
    pub fn is_slice(&self) -> bool {
        matches!(self, TypeDescriptor::Slice(_))
    }

    /// Replace every type parameter found in `bindings`.
    ///
    /// Unbound parameters are left in place; the renderer reports them.
    pub fn substitute(&self, bindings: &[(String, TypeDescriptor)]) -> TypeDescriptor {
        let sub = |t: &TypeDescriptor| t.substitute(bindings);
        let sub_box = |t: &TypeDescriptor| Box::new(t.substitute(bindings));

        match self {
            TypeDescriptor::TypeParam(name) => bindings
                .iter()
                .find(|(param, _)| param == name)
                .map(|(_, ty)| ty.clone())
                .unwrap_or_else(|| self.clone()),

            TypeDescriptor::Basic(_) => self.clone(),

            TypeDescriptor::Named {
                name,
                module,
                type_args,
                underlying,
            } => TypeDescriptor::Named {
                name: name.clone(),
                module: module.clone(),
                type_args: type_args.iter().map(sub).collect(),
                underlying: underlying.as_deref().map(sub_box),
            },

            TypeDescriptor::Pointer(elem) => TypeDescriptor::Pointer(sub_box(elem)),
            TypeDescriptor::Slice(elem) => TypeDescriptor::Slice(sub_box(elem)),
            TypeDescriptor::Array { elem, len } => TypeDescriptor::Array {
                elem: sub_box(elem),
                len: *len,
            },
            TypeDescriptor::Map { key, elem } => TypeDescriptor::Map {
                key: sub_box(key),
                elem: sub_box(elem),
            },
            TypeDescriptor::Channel { elem, dir } => TypeDescriptor::Channel {
                elem: sub_box(elem),
                dir: *dir,
            },
            TypeDescriptor::Composite(fields) => TypeDescriptor::Composite(
                fields
                    .iter()
                    .map(|f| Field {
                        name: f.name.clone(),
                        ty: sub(&f.ty),
                    })
                    .collect(),
            ),
            TypeDescriptor::Signature(sig) => TypeDescriptor::Signature(sig.substitute(bindings)),
            TypeDescriptor::CapabilitySet(methods) => TypeDescriptor::CapabilitySet(
                methods
                    .iter()
                    .map(|m| MethodSig {
                        name: m.name.clone(),
                        signature: m.signature.substitute(bindings),
                    })
                    .collect(),
            ),
        }
    }
}

impl Signature {
    pub fn substitute(&self, bindings: &[(String, TypeDescriptor)]) -> Signature {
        Signature {
            params: self
                .params
                .iter()
                .map(|p| Param {
                    name: p.name.clone(),
                    ty: p.ty.substitute(bindings),
                })
                .collect(),
            results: self.results.iter().map(|r| r.substitute(bindings)).collect(),
            variadic: self.variadic,
        }
    }
}
