//! The generate, check and registry commands

use anyhow::{Context, Result};
use apibridge_codegen::{FileKind, GenerateRequest, GeneratorConfig, discover, generate_file};
use std::path::{Path, PathBuf};

/// Arguments of `apibridge generate`.
#[derive(Debug, Clone)]
pub struct GenerateArgs {
    pub config: PathBuf,
    pub api: String,
    pub interface: bool,
    pub out: PathBuf,
    pub my_package: String,
    pub interface_package: Option<String>,
    /// Arguments as typed, recorded in the file header.
    pub invocation: String,
}

impl GenerateArgs {
    fn request(&self) -> GenerateRequest {
        let kind = if self.interface {
            FileKind::Interface
        } else {
            FileKind::Implementation
        };
        let mut request = GenerateRequest::new(&self.api, kind, &self.my_package).invocation(&self.invocation);
        if let Some(package) = &self.interface_package {
            request = request.interface_package(package);
        }
        request
    }
}

/// Run the generate command: the output file is only written on success.
pub fn run(args: &GenerateArgs) -> Result<()> {
    let config = load_config(&args.config)?;
    let catalog = config.load_catalog().context("Failed to load schema sources")?;

    let request = args.request();
    tracing::info!("Generating {} file for {} as {}", request.kind, args.api, args.my_package);
    let source = generate_file(&config, &catalog, &request)
        .with_context(|| format!("Failed to generate {} file for {}", request.kind, args.api))?;

    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_context(|| format!("Failed to create directory {parent:?}"))?;
    }
    std::fs::write(&args.out, &source).with_context(|| format!("Failed to write {:?}", args.out))?;
    tracing::info!("Wrote {} bytes to {:?}", source.len(), args.out);

    println!("Generated {}", args.out.display());
    Ok(())
}

/// Run the check command.
pub fn check(config_path: &Path) -> Result<()> {
    for line in check_report(config_path)? {
        println!("{line}");
    }
    Ok(())
}

/// One summary line per family, after discovery succeeded for all of them.
pub fn check_report(config_path: &Path) -> Result<Vec<String>> {
    let config = load_config(config_path)?;
    let catalog = config.load_catalog().context("Failed to load schema sources")?;

    let mut lines = vec![format!("{} schema structs loaded", catalog.len())];
    for (api, options) in &config.api {
        let registry = discover(&catalog, api, options).with_context(|| format!("Discovery failed for {api}"))?;
        tracing::info!("Checked {}: {} abstractions", api, registry.len());
        let marker = if *api == config.interface_api { " (interface)" } else { "" };
        lines.push(format!("{api}{marker}: {} abstractions", registry.len()));
    }
    Ok(lines)
}

/// Run the registry command.
pub fn registry(config_path: &Path, api: &str) -> Result<()> {
    println!("{}", registry_json(config_path, api)?);
    Ok(())
}

pub fn registry_json(config_path: &Path, api: &str) -> Result<String> {
    let config = load_config(config_path)?;
    let catalog = config.load_catalog().context("Failed to load schema sources")?;
    let options = config.family(api)?;

    let registry = discover(&catalog, api, options)?;
    tracing::info!("Listing {} abstractions of {}", registry.len(), api);
    serde_json::to_string_pretty(&registry.entries()).context("Failed to serialize registry")
}

fn load_config(path: &Path) -> Result<GeneratorConfig> {
    let config =
        GeneratorConfig::from_file(path).with_context(|| format!("Failed to load configuration {path:?}"))?;
    tracing::info!("Loaded configuration {:?}: {} families", path, config.api.len());
    Ok(config)
}
