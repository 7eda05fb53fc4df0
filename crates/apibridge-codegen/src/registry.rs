//! Types that receive a generated abstraction

use apibridge_schema::SchemaType;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Schema type to abstract name, for one generation pass.
///
/// Struct types map to their bare name and collections to `{Elem}Slice`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AbstractionRegistry {
    entries: BTreeMap<SchemaType, String>,
}

/// Flattened registry entry for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistryEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    pub collection: bool,
}

impl AbstractionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `ty` under `name`. Returns false if it was already present.
    pub fn register(&mut self, ty: SchemaType, name: impl Into<String>) -> bool {
        if self.entries.contains_key(&ty) {
            return false;
        }
        let name = name.into();
        tracing::debug!("Registered abstraction {} for {}", name, ty);
        self.entries.insert(ty, name);
        true
    }

    pub fn name_of(&self, ty: &SchemaType) -> Option<&str> {
        self.entries.get(ty).map(String::as_str)
    }

    pub fn contains(&self, ty: &SchemaType) -> bool {
        self.entries.contains_key(ty)
    }

    /// Entries in type order.
    pub fn iter(&self) -> impl Iterator<Item = (&SchemaType, &str)> {
        self.entries.iter().map(|(ty, name)| (ty, name.as_str()))
    }

    /// Every abstract name.
    pub fn names(&self) -> BTreeSet<String> {
        self.entries.values().cloned().collect()
    }

    pub fn entries(&self) -> Vec<RegistryEntry> {
        let mut entries: Vec<RegistryEntry> = self
            .iter()
            .map(|(ty, name)| RegistryEntry {
                name: name.to_string(),
                ty: ty.to_string(),
                collection: matches!(ty, SchemaType::Vec { .. }),
            })
            .collect();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
