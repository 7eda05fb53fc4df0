//! Generates the canonical traits and both adapter families into `OUT_DIR`.

use apibridge_codegen::{FileKind, GenerateRequest, GeneratorConfig, generate_file};
use std::error::Error;
use std::path::PathBuf;

/// (api, kind, module the file is included as, output file)
const OUTPUTS: &[(&str, FileKind, &str, &str)] = &[
    ("v1beta1", FileKind::Interface, "crate::generic", "generic.rs"),
    ("v1beta1", FileKind::Implementation, "crate::adapters::v1beta1", "v1beta1.rs"),
    ("v1alpha1", FileKind::Implementation, "crate::adapters::v1alpha1", "v1alpha1.rs"),
];

fn main() -> Result<(), Box<dyn Error>> {
    let manifest_dir = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR")?);
    let out_dir = PathBuf::from(std::env::var("OUT_DIR")?);

    let config_path = manifest_dir.join("apibridge.toml");
    println!("cargo:rerun-if-changed={}", config_path.display());

    let config = GeneratorConfig::from_file(&config_path)?;
    for source in &config.sources {
        println!("cargo:rerun-if-changed={}", config.resolve(&source.path).display());
    }
    for family in config.api.values() {
        if let Some(overrides) = &family.overrides {
            println!("cargo:rerun-if-changed={}", config.resolve(overrides).display());
        }
    }

    let catalog = config.load_catalog()?;
    for (api, kind, my_package, file) in OUTPUTS {
        let mut request = GenerateRequest::new(*api, *kind, *my_package)
            .invocation(format!("build.rs --api {api} --kind {kind}"));
        if *kind == FileKind::Implementation {
            request = request.interface_package("crate::generic");
        }
        let source = generate_file(&config, &catalog, &request)?;
        std::fs::write(out_dir.join(file), source)?;
    }

    Ok(())
}
