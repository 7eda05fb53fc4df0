//! apibridge-codegen - Version-bridging trait and adapter generator
//!
//! This crate turns a [`SchemaCatalog`](apibridge_schema::SchemaCatalog) and a
//! [`GeneratorConfig`] into Rust source:
//! - an interface file holding one canonical trait per abstraction of the
//!   interface family
//! - one implementation file per family, with an adapter per abstraction that
//!   implements the canonical trait over that family's concrete structs
//!
//! The pipeline per file is [`discover`] (which types need abstractions), then
//! trait and adapter construction, then rendering with deterministic ordering.
//! [`generate_file`] runs all of it:
//!
//! ```rust,no_run
//! use apibridge_codegen::{FileKind, GenerateRequest, GeneratorConfig, generate_file};
//!
//! let config = GeneratorConfig::from_file("apibridge.toml")?;
//! let catalog = config.load_catalog()?;
//! let request = GenerateRequest::new("v1alpha1", FileKind::Implementation, "crate::adapters::v1alpha1")
//!     .interface_package("crate::generic");
//! let source = generate_file(&config, &catalog, &request)?;
//! # Ok::<(), apibridge_codegen::GenError>(())
//! ```

pub mod adapter;
pub mod collection;
pub mod decl;
mod error;
mod file;
pub mod interface;
pub mod naming;
mod options;
pub mod overrides;
pub mod projector;
mod registry;
pub mod render;
pub mod walker;

pub use apibridge_schema;
pub use error::{GenError, GenResult};
pub use file::{FileKind, GenerateRequest, generate_file};
pub use options::{DEFAULT_LICENSE, GenerationOptions, GeneratorConfig, SourceEntry};
pub use overrides::OverrideSet;
pub use registry::{AbstractionRegistry, RegistryEntry};
pub use walker::discover;
