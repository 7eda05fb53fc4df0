//! Type descriptors for schema structs and their fields

use serde::Serialize;
use std::fmt;

/// A type referenced by a schema field.
///
/// Descriptors are structural: two fields declared with the same type produce
/// equal descriptors, so they can key maps the way the original type identity
/// would.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SchemaType {
    /// Builtin type such as `String`, `bool` or `i64`.
    Scalar { name: String },

    /// A user type: a struct when the catalog defines it, opaque otherwise.
    Named { package: String, name: String },

    /// `Option<T>`
    Option { elem: Box<SchemaType> },

    /// `Box<T>`
    Boxed { elem: Box<SchemaType> },

    /// `Vec<T>`
    Vec { elem: Box<SchemaType> },

    /// `BTreeMap<K, V>` (ordered) or `HashMap<K, V>`
    Map {
        ordered: bool,
        key: Box<SchemaType>,
        value: Box<SchemaType>,
    },

    /// `dyn Trait`, only ever found behind a `Box`.
    Dyn { package: String, name: String },
}

/// Coarse classification of a [`SchemaType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Scalar,
    Struct,
    Pointer,
    Slice,
    Map,
    Interface,
    Opaque,
}

const SCALARS: &[&str] = &[
    "String", "bool", "char", "i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16", "u32",
    "u64", "u128", "usize", "f32", "f64",
];

/// Whether a builtin is `Copy`, i.e. every scalar except `String`.
pub fn is_copy_scalar(name: &str) -> bool {
    name != "String" && SCALARS.contains(&name)
}

impl SchemaType {
    pub fn scalar(name: impl Into<String>) -> Self {
        SchemaType::Scalar { name: name.into() }
    }

    pub fn named(package: impl Into<String>, name: impl Into<String>) -> Self {
        SchemaType::Named {
            package: package.into(),
            name: name.into(),
        }
    }

    pub fn option(elem: SchemaType) -> Self {
        SchemaType::Option {
            elem: Box::new(elem),
        }
    }

    pub fn boxed(elem: SchemaType) -> Self {
        SchemaType::Boxed {
            elem: Box::new(elem),
        }
    }

    pub fn vec(elem: SchemaType) -> Self {
        SchemaType::Vec {
            elem: Box::new(elem),
        }
    }

    pub fn map(ordered: bool, key: SchemaType, value: SchemaType) -> Self {
        SchemaType::Map {
            ordered,
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    /// Whether `name` is one of the builtin scalar idents.
    pub fn is_builtin(name: &str) -> bool {
        SCALARS.contains(&name)
    }

    /// Originating package; empty for builtins and containers.
    pub fn package(&self) -> &str {
        match self {
            SchemaType::Named { package, .. } | SchemaType::Dyn { package, .. } => package,
            _ => "",
        }
    }

    /// Bare type name; empty for containers.
    pub fn name(&self) -> &str {
        match self {
            SchemaType::Scalar { name }
            | SchemaType::Named { name, .. }
            | SchemaType::Dyn { name, .. } => name,
            _ => "",
        }
    }

    /// Element type of a pointer, slice or map value.
    pub fn elem(&self) -> Option<&SchemaType> {
        match self {
            SchemaType::Option { elem } | SchemaType::Boxed { elem } | SchemaType::Vec { elem } => {
                Some(elem)
            }
            SchemaType::Map { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Whether this is a `Named` type declared in `package`.
    pub fn is_in_package(&self, package: &str) -> bool {
        matches!(self, SchemaType::Named { package: p, .. } if p == package)
    }

    /// Whether any part of this type is a trait object.
    pub fn contains_dyn(&self) -> bool {
        match self {
            SchemaType::Dyn { .. } => true,
            SchemaType::Option { elem } | SchemaType::Boxed { elem } | SchemaType::Vec { elem } => {
                elem.contains_dyn()
            }
            SchemaType::Map { key, value, .. } => key.contains_dyn() || value.contains_dyn(),
            _ => false,
        }
    }
}

impl fmt::Display for SchemaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaType::Scalar { name } => write!(f, "{name}"),
            SchemaType::Named { package, name } if package.is_empty() => write!(f, "{name}"),
            SchemaType::Named { package, name } => write!(f, "{package}::{name}"),
            SchemaType::Option { elem } => write!(f, "Option<{elem}>"),
            SchemaType::Boxed { elem } => write!(f, "Box<{elem}>"),
            SchemaType::Vec { elem } => write!(f, "Vec<{elem}>"),
            SchemaType::Map {
                ordered,
                key,
                value,
            } => {
                let map = if *ordered { "BTreeMap" } else { "HashMap" };
                write!(f, "{map}<{key}, {value}>")
            }
            SchemaType::Dyn { package, name } if package.is_empty() => write!(f, "dyn {name}"),
            SchemaType::Dyn { package, name } => write!(f, "dyn {package}::{name}"),
        }
    }
}

/// A field of a schema struct.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDescriptor {
    /// Field name without any raw-identifier prefix.
    pub name: String,

    /// Declared type.
    pub ty: SchemaType,

    /// Whether the field is `#[serde(flatten)]`.
    pub embedded: bool,

    /// Documentation comments.
    pub docs: Vec<String>,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, ty: SchemaType) -> Self {
        Self {
            name: name.into(),
            ty,
            embedded: false,
            docs: Vec::new(),
        }
    }

    /// Mark the field as embedded (flattened).
    pub fn embedded(mut self) -> Self {
        self.embedded = true;
        self
    }
}

/// A schema struct definition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructDef {
    pub package: String,
    pub name: String,
    pub docs: Vec<String>,
    pub fields: Vec<FieldDescriptor>,
}

impl StructDef {
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            name: name.into(),
            docs: Vec::new(),
            fields: Vec::new(),
        }
    }

    /// Append a field, builder style.
    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// The descriptor naming this struct.
    pub fn schema_type(&self) -> SchemaType {
        SchemaType::named(&self.package, &self.name)
    }
}
