//! Error types for generation passes

use apibridge_schema::SchemaError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for generation
pub type GenResult<T> = Result<T, GenError>;

/// Error type for generation passes.
///
/// Every variant aborts the pass; no partial output is produced.
#[derive(Error, Debug)]
pub enum GenError {
    /// The requested API family is not configured
    #[error("unknown API family: {0}")]
    UnknownApi(String),

    /// A configured root does not name a loaded schema struct
    #[error("root {root} of API family {api} is not a known schema struct")]
    UnknownRoot { api: String, root: String },

    /// A package path was empty where an import alias is needed
    #[error("cannot derive an import alias for an empty package path")]
    EmptyPackage,

    /// A package path has no segment usable as an alias
    #[error("cannot derive an import alias for package {0}")]
    InvalidPackage(String),

    /// Every suffix of the package path collides with another alias
    #[error("no unused import alias left for package {0}")]
    AliasExhausted(String),

    /// A trait method is neither generated nor overridden
    #[error("adapter {adapter} does not implement {method} required by trait {trait_name}")]
    MissingImplementation {
        adapter: String,
        trait_name: String,
        method: String,
    },

    /// A generated method does not match the trait's declaration
    #[error("adapter {adapter} method {method} has signature `{found}`, trait expects `{expected}`")]
    SignatureMismatch {
        adapter: String,
        method: String,
        expected: String,
        found: String,
    },

    /// A configured key field is missing or cannot be compared
    #[error("field {field} of {element} cannot be used as a collection key")]
    UnsupportedKeyField { element: String, field: String },

    /// The override file is malformed
    #[error("invalid override source: {0}")]
    OverrideParse(String),

    /// An override targets an adapter the pass does not generate
    #[error("override for {method} targets unknown adapter {adapter}")]
    OrphanOverride { adapter: String, method: String },

    /// The configuration file is invalid
    #[error("configuration error: {0}")]
    Config(String),

    /// A file could not be read
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Loading the schema catalog failed
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

impl GenError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GenError::Io {
            path: path.into(),
            source,
        }
    }
}
