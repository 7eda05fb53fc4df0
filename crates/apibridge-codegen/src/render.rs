//! Type rendering and field classification for one generated file

use crate::error::GenResult;
use crate::naming::ImportTable;
use crate::registry::AbstractionRegistry;
use apibridge_schema::{SchemaCatalog, SchemaType, is_copy_scalar};
use std::collections::BTreeSet;

/// Argument type of an abstracted struct value passed through a trait.
pub const ERASED_VALUE: &str = "apibridge_runtime::ErasedValue";

/// How a field is exposed through accessors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldShape {
    /// Copy scalar, returned by value.
    Copy,
    /// `String`, viewed as `&str`.
    Str,
    /// `Vec<T>` without an abstraction, viewed as `&[T]`.
    Slice,
    /// `Option<String>`, viewed as `Option<&str>`.
    OptStr,
    /// `Option` of a copy scalar, returned by value.
    OptCopy,
    /// Any other `Option`, viewed as `Option<&T>`.
    OptRef,
    /// Anything else without an abstraction, viewed as `&T`.
    Ref,
    /// A catalog struct without an abstraction, handed out as `&mut T`.
    External,
    /// An abstracted struct, possibly boxed.
    Abstract { name: String, boxed: bool },
    /// `Option` of an abstracted struct, possibly boxed.
    OptAbstract { name: String, boxed: bool },
    /// A collection with its own abstraction.
    Collection { name: String },
}

impl FieldShape {
    /// Fields whose declared type is itself a struct are mutated through their
    /// getter and get no setter. Boxed and optional structs keep one.
    pub fn is_struct_valued(&self) -> bool {
        matches!(self, FieldShape::External | FieldShape::Abstract { boxed: false, .. })
    }

    pub fn is_abstracted(&self) -> bool {
        matches!(
            self,
            FieldShape::Abstract { .. } | FieldShape::OptAbstract { .. } | FieldShape::Collection { .. }
        )
    }

    pub fn is_optional(&self) -> bool {
        matches!(self, FieldShape::OptStr | FieldShape::OptCopy | FieldShape::OptRef)
    }
}

/// How an abstraction is referred to from generated code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbstractRef {
    /// Through its canonical trait, as a boxed trait object.
    Trait(String),
    /// Through the concrete adapter type, for abstractions without a trait.
    Adapter(String),
}

impl AbstractRef {
    /// The type a borrowing accessor returns.
    pub fn borrowed(&self) -> String {
        match self {
            AbstractRef::Trait(path) => format!("Box<dyn {path} + '_>"),
            AbstractRef::Adapter(name) => format!("{name}<'_>"),
        }
    }

    /// The type of a value that owns its storage.
    pub fn owned(&self) -> String {
        match self {
            AbstractRef::Trait(path) => format!("Box<dyn {path}>"),
            AbstractRef::Adapter(name) => format!("{name}<'static>"),
        }
    }

    /// Wrap an adapter construction expression into this reference type.
    pub fn wrap(&self, adapter_expr: &str) -> String {
        match self {
            AbstractRef::Trait(_) => format!("Box::new({adapter_expr})"),
            AbstractRef::Adapter(_) => adapter_expr.to_string(),
        }
    }

    pub fn has_trait(&self) -> bool {
        matches!(self, AbstractRef::Trait(_))
    }
}

/// Renders schema types as Rust source for one file and one API family.
pub struct Renderer<'a> {
    pub catalog: &'a SchemaCatalog,
    pub registry: &'a AbstractionRegistry,
    /// Module the generated file is compiled as.
    pub my_package: &'a str,
    pub imports: &'a mut ImportTable,
    /// Abstract names that have a canonical trait.
    pub traits: &'a BTreeSet<String>,
    /// Alias qualifying trait names, when traits live in another module.
    pub trait_qualifier: Option<String>,
    /// Prefix of adapter names, e.g. `V1alpha1`.
    pub adapter_prefix: String,
}

impl Renderer<'_> {
    /// Concrete Rust spelling of `ty`.
    pub fn ty(&mut self, ty: &SchemaType) -> GenResult<String> {
        Ok(match ty {
            SchemaType::Scalar { name } => name.clone(),
            SchemaType::Named { package, name } => self.qualify(package, name)?,
            SchemaType::Option { elem } => format!("Option<{}>", self.ty(elem)?),
            SchemaType::Boxed { elem } => format!("Box<{}>", self.ty(elem)?),
            SchemaType::Vec { elem } => format!("Vec<{}>", self.ty(elem)?),
            SchemaType::Map {
                ordered,
                key,
                value,
            } => {
                let map = if *ordered { "BTreeMap" } else { "HashMap" };
                format!("std::collections::{map}<{}, {}>", self.ty(key)?, self.ty(value)?)
            }
            SchemaType::Dyn { package, name } => format!("dyn {}", self.qualify(package, name)?),
        })
    }

    /// `name` as seen from the generated file.
    pub fn qualify(&mut self, package: &str, name: &str) -> GenResult<String> {
        if package.is_empty() || package == self.my_package {
            return Ok(name.to_string());
        }
        let alias = self.imports.alias_for(package)?;
        Ok(format!("{alias}::{name}"))
    }

    /// Generated adapter name for an abstraction.
    pub fn adapter_name(&self, abstract_name: &str) -> String {
        format!("{}{abstract_name}", self.adapter_prefix)
    }

    /// Trait path of an abstraction, if it has a canonical trait.
    pub fn trait_path(&self, abstract_name: &str) -> Option<String> {
        if !self.traits.contains(abstract_name) {
            return None;
        }
        Some(match &self.trait_qualifier {
            Some(alias) => format!("{alias}::{abstract_name}"),
            None => abstract_name.to_string(),
        })
    }

    pub fn abstract_ref(&self, abstract_name: &str) -> AbstractRef {
        match self.trait_path(abstract_name) {
            Some(path) => AbstractRef::Trait(path),
            None => AbstractRef::Adapter(self.adapter_name(abstract_name)),
        }
    }

    /// Classify a field type against the family's registry.
    pub fn shape(&self, ty: &SchemaType) -> FieldShape {
        if let Some(name) = self.registry.name_of(ty) {
            let name = name.to_string();
            return match ty {
                SchemaType::Vec { .. } => FieldShape::Collection { name },
                _ => FieldShape::Abstract { name, boxed: false },
            };
        }

        match ty {
            SchemaType::Scalar { name } if is_copy_scalar(name) => FieldShape::Copy,
            SchemaType::Scalar { .. } => FieldShape::Str,
            SchemaType::Boxed { elem } => match self.struct_abstraction(elem) {
                Some(name) => FieldShape::Abstract { name, boxed: true },
                None => FieldShape::Ref,
            },
            SchemaType::Vec { .. } => FieldShape::Slice,
            SchemaType::Option { elem } => match elem.as_ref() {
                SchemaType::Scalar { name } if is_copy_scalar(name) => FieldShape::OptCopy,
                SchemaType::Scalar { .. } => FieldShape::OptStr,
                SchemaType::Boxed { elem } => match self.struct_abstraction(elem) {
                    Some(name) => FieldShape::OptAbstract { name, boxed: true },
                    None => FieldShape::OptRef,
                },
                inner => match self.struct_abstraction(inner) {
                    Some(name) => FieldShape::OptAbstract { name, boxed: false },
                    None => FieldShape::OptRef,
                },
            },
            SchemaType::Named { .. } if self.catalog.struct_def(ty).is_some() => FieldShape::External,
            _ => FieldShape::Ref,
        }
    }

    fn struct_abstraction(&self, ty: &SchemaType) -> Option<String> {
        match ty {
            SchemaType::Named { .. } => self.registry.name_of(ty).map(str::to_string),
            _ => None,
        }
    }

    /// Whether a field can take part in key comparisons.
    pub fn is_comparable(&self, ty: &SchemaType) -> bool {
        !self.shape(ty).is_abstracted() && !ty.contains_dyn()
    }

    /// Borrowed view of a non-abstracted field, as getters return it.
    pub fn view(&mut self, shape: &FieldShape, ty: &SchemaType) -> GenResult<String> {
        Ok(match (shape, ty) {
            (FieldShape::Copy | FieldShape::OptCopy, _) => self.ty(ty)?,
            (FieldShape::Str, _) => "&str".to_string(),
            (FieldShape::OptStr, _) => "Option<&str>".to_string(),
            (FieldShape::Slice, SchemaType::Vec { elem }) => format!("&[{}]", self.ty(elem)?),
            (FieldShape::OptRef, SchemaType::Option { elem }) => format!("Option<&{}>", self.ty(elem)?),
            (FieldShape::External, _) => format!("&mut {}", self.ty(ty)?),
            _ => format!("&{}", self.ty(ty)?),
        })
    }

    /// Owned argument type for a field and the expression turning argument
    /// `ident` into the stored value.
    ///
    /// Abstracted values cross a trait boundary erased, since the trait cannot
    /// name the concrete type of every version.
    pub fn owned_arg(&mut self, shape: &FieldShape, ty: &SchemaType, ident: &str) -> GenResult<(String, String)> {
        Ok(match shape {
            FieldShape::Collection { name } => {
                let aref = self.abstract_ref(name);
                let value = if aref.has_trait() {
                    format!("apibridge_runtime::unwrap_elts({ident}.into_elts())")
                } else {
                    format!("{ident}.0.into_owned()")
                };
                (aref.borrowed(), value)
            }
            FieldShape::Abstract { name, boxed } if self.traits.contains(name) => {
                let value = if *boxed {
                    format!("Box::new(apibridge_runtime::unwrap_value({ident}))")
                } else {
                    format!("apibridge_runtime::unwrap_value({ident})")
                };
                (ERASED_VALUE.to_string(), value)
            }
            FieldShape::OptAbstract { name, boxed } if self.traits.contains(name) => {
                let value = if *boxed {
                    format!("{ident}.map(|v| Box::new(apibridge_runtime::unwrap_value(v)))")
                } else {
                    format!("{ident}.map(apibridge_runtime::unwrap_value)")
                };
                (format!("Option<{ERASED_VALUE}>"), value)
            }
            _ => (self.ty(ty)?, ident.to_string()),
        })
    }

    /// View used for key arguments; struct fields are compared by shared reference.
    pub fn key_view(&mut self, shape: &FieldShape, ty: &SchemaType) -> GenResult<String> {
        match shape {
            FieldShape::External => Ok(format!("&{}", self.ty(ty)?)),
            _ => self.view(shape, ty),
        }
    }
}

/// Expression converting an owned argument into its key view.
pub fn owned_to_view(shape: &FieldShape, ident: &str) -> String {
    match shape {
        FieldShape::Copy | FieldShape::OptCopy => ident.to_string(),
        FieldShape::OptStr => format!("{ident}.as_deref()"),
        FieldShape::OptRef => format!("{ident}.as_ref()"),
        _ => format!("&{ident}"),
    }
}

/// Statements skipping the loop iteration unless `stored` equals `arg`.
///
/// Optional keys use a three-way branch: present values compare, two absent
/// values match, and a present value never matches an absent one.
pub fn key_mismatch(shape: &FieldShape, stored: &str, arg: &str) -> Vec<String> {
    let stored_view = match shape {
        FieldShape::OptStr => format!("{stored}.as_deref()"),
        FieldShape::OptRef => format!("{stored}.as_ref()"),
        FieldShape::OptCopy => stored.to_string(),
        FieldShape::Ref | FieldShape::External => format!("&{stored}"),
        _ => stored.to_string(),
    };

    if shape.is_optional() {
        return vec![
            format!("match ({stored_view}, {arg}) {{"),
            "    (Some(v), Some(arg)) => {".to_string(),
            "        if v != arg {".to_string(),
            "            continue;".to_string(),
            "        }".to_string(),
            "    }".to_string(),
            "    (None, None) => {}".to_string(),
            "    _ => continue,".to_string(),
            "}".to_string(),
        ];
    }

    vec![
        format!("if {stored_view} != {arg} {{"),
        "    continue;".to_string(),
        "}".to_string(),
    ]
}
