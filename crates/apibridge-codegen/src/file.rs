//! Generated file assembly

use crate::adapter::make_adapters;
use crate::decl::Decl;
use crate::error::{GenError, GenResult};
use crate::interface::make_traits;
use crate::naming::{ImportTable, capitalize};
use crate::options::GeneratorConfig;
use crate::render::Renderer;
use crate::walker::discover;
use apibridge_schema::SchemaCatalog;
use std::fmt;
use std::str::FromStr;

/// What a generated file contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// Canonical traits of the interface family.
    Interface,
    /// Adapters of one family, implementing the canonical traits.
    Implementation,
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileKind::Interface => write!(f, "interface"),
            FileKind::Implementation => write!(f, "implementation"),
        }
    }
}

impl FromStr for FileKind {
    type Err = GenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "interface" => Ok(FileKind::Interface),
            "implementation" | "impl" => Ok(FileKind::Implementation),
            other => Err(GenError::Config(format!(
                "unknown file kind {other}, expected interface or implementation"
            ))),
        }
    }
}

/// One file to generate.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// API family the file is generated for.
    pub api: String,
    pub kind: FileKind,
    /// Module path the file is compiled as.
    pub my_package: String,
    /// Module holding the canonical traits; defaults to `my_package`.
    pub interface_package: Option<String>,
    /// Command line recorded in the header.
    pub invocation: String,
}

impl GenerateRequest {
    pub fn new(api: impl Into<String>, kind: FileKind, my_package: impl Into<String>) -> Self {
        Self {
            api: api.into(),
            kind,
            my_package: my_package.into(),
            interface_package: None,
            invocation: String::new(),
        }
    }

    pub fn interface_package(mut self, package: impl Into<String>) -> Self {
        self.interface_package = Some(package.into());
        self
    }

    pub fn invocation(mut self, invocation: impl Into<String>) -> Self {
        self.invocation = invocation.into();
        self
    }
}

/// Generate one file. The output is deterministic for a given configuration,
/// catalog and request.
pub fn generate_file(config: &GeneratorConfig, catalog: &SchemaCatalog, request: &GenerateRequest) -> GenResult<String> {
    let options = config.family(&request.api)?;
    let registry = discover(catalog, &request.api, options)?;
    let my_package = request.my_package.as_str();

    let mut imports = ImportTable::new();
    let prefix = capitalize(&imports.alias_for(my_package)?);

    let mut decls = Vec::new();
    let mut helpers = Vec::new();

    match request.kind {
        FileKind::Interface => {
            let traits = registry.names();
            let mut r = Renderer {
                catalog,
                registry: &registry,
                my_package,
                imports: &mut imports,
                traits: &traits,
                trait_qualifier: None,
                adapter_prefix: prefix,
            };
            decls.extend(make_traits(&mut r, options)?.into_values().map(Decl::Trait));
        }
        FileKind::Implementation => {
            let iface_options = config.family(&config.interface_api)?;
            let iface_registry = discover(catalog, &config.interface_api, iface_options)?;
            let traits = iface_registry.names();

            let interface_package = request.interface_package.as_deref().unwrap_or(my_package);
            let trait_qualifier = if interface_package == my_package {
                None
            } else {
                Some(imports.alias_for(interface_package)?)
            };

            let canonical = {
                let mut r = Renderer {
                    catalog,
                    registry: &iface_registry,
                    my_package,
                    imports: &mut imports,
                    traits: &traits,
                    trait_qualifier: trait_qualifier.clone(),
                    adapter_prefix: prefix.clone(),
                };
                make_traits(&mut r, iface_options)?
            };

            let overrides = config.load_overrides(&request.api)?;
            let mut r = Renderer {
                catalog,
                registry: &registry,
                my_package,
                imports: &mut imports,
                traits: &traits,
                trait_qualifier,
                adapter_prefix: prefix,
            };
            decls.extend(
                make_adapters(&mut r, options, &canonical, &overrides)?
                    .into_iter()
                    .map(Decl::Adapter),
            );
            helpers.extend(overrides.helpers().iter().cloned());
        }
    }

    decls.sort_by(|a, b| a.name().cmp(b.name()));

    let mut out = String::new();
    for line in config.license().lines() {
        if line.is_empty() {
            out.push_str("//\n");
        } else {
            out.push_str(&format!("// {line}\n"));
        }
    }
    out.push('\n');
    out.push_str(&format!(
        "// Code generated by apibridge {}. DO NOT EDIT.\n",
        request.invocation.trim()
    ));
    out.push_str(&format!("// Module: {my_package}\n"));

    let uses = imports.use_block(my_package);
    if !uses.is_empty() {
        out.push('\n');
        out.push_str(&uses);
    }

    for decl in &decls {
        out.push('\n');
        decl.write(&mut out);
    }
    for helper in &helpers {
        out.push('\n');
        out.push_str(helper);
        out.push('\n');
    }

    tracing::info!(
        "Generated {} file for {} with {} declarations",
        request.kind,
        request.api,
        decls.len()
    );
    Ok(out)
}

#[cfg(test)]
#[path = "file/file_tests.rs"]
mod file_tests;
