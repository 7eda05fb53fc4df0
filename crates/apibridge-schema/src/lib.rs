//! apibridge-schema - Schema description model
//!
//! This crate provides the data structures the generator works on:
//! - [`SchemaType`] for type descriptors (scalars, named types, containers)
//! - [`StructDef`] and [`FieldDescriptor`] for struct definitions
//! - [`SchemaCatalog`] for every struct parsed from a set of schema packages
//! - [`SchemaError`] for error handling
//!
//! Schema structs are discovered by parsing Rust source with [`syn`]. A struct
//! takes part when it derives both `Serialize` and `Deserialize`:
//!
//! ```rust
//! use apibridge_schema::SchemaCatalog;
//!
//! let mut catalog = SchemaCatalog::new();
//! catalog
//!     .load_source(
//!         "crate::schema::v1",
//!         r#"
//!             #[derive(Serialize, Deserialize)]
//!             pub struct Route {
//!                 pub name: String,
//!                 pub traffic: Vec<TrafficTarget>,
//!             }
//!
//!             #[derive(Serialize, Deserialize)]
//!             pub struct TrafficTarget {
//!                 pub tag: String,
//!                 pub percent: i64,
//!             }
//!         "#,
//!     )
//!     .unwrap();
//!
//! assert!(catalog.get("crate::schema::v1", "Route").is_some());
//! ```

mod catalog;
mod error;
mod parse;
mod types;

pub use catalog::SchemaCatalog;
pub use error::{SchemaError, SchemaResult};
pub use types::{FieldDescriptor, SchemaType, StructDef, TypeKind, is_copy_scalar};

/// Separator between the segments of a package path.
pub const PATH_SEPARATOR: &str = "::";

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        FieldDescriptor, SchemaCatalog, SchemaError, SchemaResult, SchemaType, StructDef, TypeKind,
    };
}
