//! Error types for schema loading

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Error type for schema loading and parsing
#[derive(Error, Debug)]
pub enum SchemaError {
    /// A schema source file could not be read
    #[error("failed to read schema source {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The source is not valid Rust
    #[error("failed to parse schema source for {package}: {message}")]
    Parse { package: String, message: String },

    /// Tuple structs have no field names to generate accessors from
    #[error("tuple struct {0} is not supported as a schema struct")]
    TupleStruct(String),

    #[error("struct {0} has a field without a name")]
    UnnamedField(String),

    /// A field type the model cannot describe
    #[error("unsupported type for field {field} of {owner}: {ty}")]
    UnsupportedType {
        owner: String,
        field: String,
        ty: String,
    },

    /// The same struct was loaded twice
    #[error("duplicate schema struct {package}::{name}")]
    Duplicate { package: String, name: String },
}
