//! Generator configuration (`apibridge.toml`)

use crate::error::{GenError, GenResult};
use crate::overrides::OverrideSet;
use apibridge_schema::SchemaCatalog;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

/// Header text used when the configuration carries none.
pub const DEFAULT_LICENSE: &str = "SPDX-License-Identifier: MIT OR Apache-2.0";

/// apibridge.toml structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// License text placed at the top of every generated file.
    #[serde(default)]
    pub license: Option<String>,

    /// The family whose traits are canonical.
    pub interface_api: String,

    /// Schema source files to load.
    #[serde(default)]
    pub sources: Vec<SourceEntry>,

    /// API families by name.
    #[serde(default)]
    pub api: BTreeMap<String, GenerationOptions>,

    /// Directory relative paths are resolved against.
    #[serde(skip)]
    pub base_dir: PathBuf,
}

/// One schema source file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceEntry {
    /// Module path the file is compiled as, e.g. `crate::schema::v1beta1`.
    pub package: String,

    /// File path, relative to the configuration file.
    pub path: PathBuf,
}

/// Generation options for one API family.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Schema package of the family.
    pub package: String,

    /// Root types, as bare names in `package` or fully qualified paths.
    #[serde(default)]
    pub roots: Vec<String>,

    /// Type name to fields dropped from its trait and adapter.
    #[serde(default)]
    pub omit_fields: BTreeMap<String, BTreeSet<String>>,

    /// Abstract name to fields or methods the generated adapter leaves out.
    #[serde(default)]
    pub omit_implementations: BTreeMap<String, BTreeSet<String>>,

    /// Element type name to the fields used as collection keys.
    #[serde(default)]
    pub slice_keys: BTreeMap<String, Vec<String>>,

    /// Rust file with hand-written adapter methods.
    #[serde(default)]
    pub overrides: Option<PathBuf>,
}

impl GenerationOptions {
    /// Options for `package` with the given roots
    pub fn new<I, S>(package: impl Into<String>, roots: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            package: package.into(),
            roots: roots.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Whether `field` of `type_name` is dropped from traits and adapters.
    pub fn is_field_omitted(&self, type_name: &str, field: &str) -> bool {
        self.omit_fields
            .get(type_name)
            .is_some_and(|fields| fields.contains(field))
    }

    /// Whether the generated adapter for `abstract_name` leaves out `method`.
    ///
    /// Entries name either the method or the field it accesses.
    pub fn is_implementation_omitted(&self, abstract_name: &str, field: Option<&str>, method: &str) -> bool {
        self.omit_implementations
            .get(abstract_name)
            .is_some_and(|names| names.contains(method) || field.is_some_and(|f| names.contains(f)))
    }

    /// Explicit key fields configured for an element type.
    pub fn slice_keys_for(&self, element: &str) -> Option<&[String]> {
        self.slice_keys
            .get(element)
            .map(Vec::as_slice)
            .filter(|keys| !keys.is_empty())
    }
}

impl GeneratorConfig {
    /// Load configuration from a file
    pub fn from_file(path: impl AsRef<Path>) -> GenResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| GenError::io(path, e))?;
        let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();

        Self::from_toml_str(&content, base_dir)
    }

    /// Parse configuration from a string
    pub fn from_toml_str(content: &str, base_dir: impl Into<PathBuf>) -> GenResult<Self> {
        let mut config: GeneratorConfig =
            toml::from_str(content).map_err(|e| GenError::Config(e.to_string()))?;
        config.base_dir = base_dir.into();
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> GenResult<()> {
        if !self.api.contains_key(&self.interface_api) {
            return Err(GenError::Config(format!(
                "interface_api {} is not a configured API family",
                self.interface_api
            )));
        }

        for source in &self.sources {
            if source.package.is_empty() {
                return Err(GenError::Config(format!(
                    "source {:?} has an empty package",
                    source.path
                )));
            }
        }

        for (name, family) in &self.api {
            if family.package.is_empty() {
                return Err(GenError::Config(format!("API family {name} has an empty package")));
            }
            if family.roots.is_empty() {
                return Err(GenError::Config(format!("API family {name} has no roots")));
            }
            if !self.sources.iter().any(|s| s.package == family.package) {
                return Err(GenError::Config(format!(
                    "API family {name} uses package {} but no source declares it",
                    family.package
                )));
            }
        }

        Ok(())
    }

    /// Options of one API family
    pub fn family(&self, api: &str) -> GenResult<&GenerationOptions> {
        self.api
            .get(api)
            .ok_or_else(|| GenError::UnknownApi(api.to_string()))
    }

    /// License text for generated headers
    pub fn license(&self) -> &str {
        self.license.as_deref().unwrap_or(DEFAULT_LICENSE)
    }

    /// Resolve a configured path against the configuration directory.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        self.base_dir.join(path)
    }

    /// Parse every configured source into a catalog.
    pub fn load_catalog(&self) -> GenResult<SchemaCatalog> {
        let mut catalog = SchemaCatalog::new();
        for source in &self.sources {
            let path = self.resolve(&source.path);
            catalog.load_file(&source.package, &path)?;
        }
        tracing::info!(
            "Loaded {} schema structs from {} sources",
            catalog.len(),
            self.sources.len()
        );
        Ok(catalog)
    }

    /// The override set of one family; empty when none is configured.
    pub fn load_overrides(&self, api: &str) -> GenResult<OverrideSet> {
        match &self.family(api)?.overrides {
            Some(path) => OverrideSet::from_file(&self.resolve(path)),
            None => Ok(OverrideSet::new()),
        }
    }
}
