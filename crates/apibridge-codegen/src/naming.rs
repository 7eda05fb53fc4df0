//! Import aliases and generated identifiers.
//!
//! | Input | Function | Output |
//! |-------|----------|--------|
//! | `crate::schema::v1alpha1` | [`ImportTable::alias_for`] | `v1alpha1`, or `schemav1alpha1` when taken |
//! | `snake_case` | [`to_pascal_case`] | `SnakeCase` |
//! | `word` | [`capitalize`] | `Word` |
//! | `type` | [`escape_ident`] | `r#type` |

use crate::error::{GenError, GenResult};
use apibridge_schema::PATH_SEPARATOR;
use std::collections::{BTreeMap, BTreeSet};

const KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "dyn", "else", "enum", "extern", "false",
    "fn", "for", "gen", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub",
    "ref", "return", "static", "struct", "trait", "true", "type", "unsafe", "use", "where",
    "while", "abstract", "become", "box", "do", "final", "macro", "override", "priv", "try",
    "typeof", "unsized", "virtual", "yield",
];

/// Path roots that cannot serve as an alias on their own.
const PATH_ROOTS: &[&str] = &["crate", "self", "super", "Self"];

/// Package path to import alias, for one generated file.
#[derive(Debug, Clone, Default)]
pub struct ImportTable {
    aliases: BTreeMap<String, String>,
}

impl ImportTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The alias of `path`, assigning one on first request.
    ///
    /// Candidates are suffixes of the path, shortest first, with their
    /// segments concatenated. The first one no other package holds wins.
    pub fn alias_for(&mut self, path: &str) -> GenResult<String> {
        if let Some(alias) = self.aliases.get(path) {
            return Ok(alias.clone());
        }

        let segments: Vec<&str> = path.split(PATH_SEPARATOR).collect();
        if path.is_empty() || segments.iter().any(|s| s.is_empty()) {
            return Err(GenError::EmptyPackage);
        }
        if segments.iter().all(|s| PATH_ROOTS.contains(s)) {
            return Err(GenError::InvalidPackage(path.to_string()));
        }

        let taken: BTreeSet<&str> = self.aliases.values().map(String::as_str).collect();
        let candidate = (1..=segments.len())
            .map(|n| segments[segments.len() - n..].concat())
            .find(|c| !taken.contains(c.as_str()) && !is_keyword(c) && !PATH_ROOTS.contains(&c.as_str()));

        let Some(alias) = candidate else {
            return Err(GenError::AliasExhausted(path.to_string()));
        };

        tracing::debug!("Assigned import alias {} to {}", alias, path);
        self.aliases.insert(path.to_string(), alias.clone());
        Ok(alias)
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.aliases.get(path).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    /// `use` items for every package except `my_package`, sorted by path.
    pub fn use_block(&self, my_package: &str) -> String {
        let mut out = String::new();
        for (path, alias) in &self.aliases {
            if path == my_package {
                continue;
            }
            let last = path.rsplit(PATH_SEPARATOR).next().unwrap_or_default();
            if last == alias {
                out.push_str(&format!("use {path};\n"));
            } else {
                out.push_str(&format!("use {path} as {alias};\n"));
            }
        }
        out
    }
}

/// Whether `s` is a Rust keyword that needs a raw identifier.
pub fn is_keyword(s: &str) -> bool {
    KEYWORDS.contains(&s)
}

/// Escape a field or parameter name for use as an identifier.
pub fn escape_ident(s: &str) -> String {
    if is_keyword(s) {
        format!("r#{s}")
    } else {
        s.to_string()
    }
}

/// Convert snake_case to PascalCase.
///
/// # Examples
///
/// ```
/// use apibridge_codegen::naming::to_pascal_case;
///
/// assert_eq!(to_pascal_case("object_meta"), "ObjectMeta");
/// assert_eq!(to_pascal_case("route_status_fields"), "RouteStatusFields");
/// ```
pub fn to_pascal_case(s: &str) -> String {
    s.split('_').map(capitalize).collect()
}

/// Capitalize the first letter of a string.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}
