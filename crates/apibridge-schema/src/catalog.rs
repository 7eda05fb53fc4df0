//! The set of parsed schema structs

use crate::error::{SchemaError, SchemaResult};
use crate::parse;
use crate::types::{SchemaType, StructDef, TypeKind};
use std::collections::BTreeMap;
use std::path::Path;

/// Every schema struct known to a generation run, keyed by package and name.
///
/// Built once by loading sources, then only read.
#[derive(Debug, Clone, Default)]
pub struct SchemaCatalog {
    structs: BTreeMap<(String, String), StructDef>,
}

impl SchemaCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a schema source file declaring `package`.
    pub fn load_file(&mut self, package: &str, path: &Path) -> SchemaResult<usize> {
        let source = std::fs::read_to_string(path).map_err(|source| SchemaError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.load_source(package, &source)
    }

    /// Parse Rust source declaring `package` and add its schema structs.
    ///
    /// Returns the number of structs added.
    pub fn load_source(&mut self, package: &str, source: &str) -> SchemaResult<usize> {
        let defs = parse::parse_source(package, source)?;
        let count = defs.len();
        for def in defs {
            self.insert(def)?;
        }
        tracing::debug!("Loaded {} schema structs from {}", count, package);
        Ok(count)
    }

    /// Add a single definition.
    pub fn insert(&mut self, def: StructDef) -> SchemaResult<()> {
        let key = (def.package.clone(), def.name.clone());
        if self.structs.contains_key(&key) {
            return Err(SchemaError::Duplicate {
                package: def.package,
                name: def.name,
            });
        }
        self.structs.insert(key, def);
        Ok(())
    }

    /// Look up a struct by package and name
    pub fn get(&self, package: &str, name: &str) -> Option<&StructDef> {
        self.structs.get(&(package.to_string(), name.to_string()))
    }

    /// The struct definition a `Named` descriptor refers to, if any.
    pub fn struct_def(&self, ty: &SchemaType) -> Option<&StructDef> {
        match ty {
            SchemaType::Named { package, name } => self.get(package, name),
            _ => None,
        }
    }

    /// Classify a descriptor against this catalog.
    pub fn kind_of(&self, ty: &SchemaType) -> TypeKind {
        match ty {
            SchemaType::Scalar { .. } => TypeKind::Scalar,
            SchemaType::Named { .. } if self.struct_def(ty).is_some() => TypeKind::Struct,
            SchemaType::Named { .. } => TypeKind::Opaque,
            SchemaType::Option { .. } | SchemaType::Boxed { .. } => TypeKind::Pointer,
            SchemaType::Vec { .. } => TypeKind::Slice,
            SchemaType::Map { .. } => TypeKind::Map,
            SchemaType::Dyn { .. } => TypeKind::Interface,
        }
    }

    /// Whether `ty` names a struct of `package`.
    pub fn is_package_struct(&self, ty: &SchemaType, package: &str) -> bool {
        ty.is_in_package(package) && self.struct_def(ty).is_some()
    }

    /// All definitions of one package, sorted by name.
    pub fn package_structs<'a>(&'a self, package: &'a str) -> impl Iterator<Item = &'a StructDef> {
        self.structs
            .iter()
            .filter(move |((p, _), _)| p == package)
            .map(|(_, def)| def)
    }

    /// Number of definitions.
    pub fn len(&self) -> usize {
        self.structs.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.structs.is_empty()
    }
}
