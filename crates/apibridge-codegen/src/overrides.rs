//! Hand-written adapter methods
//!
//! An override file is ordinary Rust source. Each inherent `impl` block
//! contributes its methods to the adapter named by the block's self type:
//!
//! ```rust,ignore
//! impl V1alpha1ServiceSpec<'_> {
//!     fn get_template(&mut self) -> Box<dyn generic::RevisionTemplateSpec + '_> {
//!         resolve_template(self.0)
//!     }
//! }
//!
//! fn resolve_template(spec: &mut v1alpha1::ServiceSpec) -> Box<dyn generic::RevisionTemplateSpec + '_> {
//!     // ...
//! }
//! ```
//!
//! Every other item except `use` declarations is copied verbatim after the
//! generated declarations. Generated `use` items already cover the aliases an
//! override file refers to, so its own imports only serve editor tooling.

use crate::error::{GenError, GenResult};
use proc_macro2::{LineColumn, Span, TokenStream};
use quote::ToTokens;
use std::collections::BTreeMap;
use std::path::Path;
use syn::{ImplItem, Item, Type};

/// Overrides of one API family.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverrideSet {
    /// (adapter, method) to method text without visibility.
    methods: BTreeMap<(String, String), String>,
    /// Free items, in file order.
    helpers: Vec<String>,
}

impl OverrideSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read and parse an override file.
    pub fn from_file(path: &Path) -> GenResult<Self> {
        let source = std::fs::read_to_string(path).map_err(|e| GenError::io(path, e))?;
        let set = Self::from_source(&source)?;
        tracing::debug!(
            "Loaded {} override methods and {} helpers from {}",
            set.methods.len(),
            set.helpers.len(),
            path.display()
        );
        Ok(set)
    }

    pub fn from_source(source: &str) -> GenResult<Self> {
        let file = syn::parse_file(source).map_err(|e| GenError::OverrideParse(e.to_string()))?;
        let text = SourceText::new(source);
        let mut set = Self::new();

        for item in &file.items {
            match item {
                Item::Use(_) => {}
                Item::Impl(block) if block.trait_.is_none() => {
                    let adapter = adapter_name(&block.self_ty)?;
                    for impl_item in &block.items {
                        let ImplItem::Fn(method) = impl_item else {
                            return Err(GenError::OverrideParse(format!(
                                "impl block for {adapter} may only contain methods"
                            )));
                        };
                        let start = first_span(method.sig.to_token_stream())
                            .unwrap_or_else(|| method.sig.ident.span())
                            .start();
                        let end = method.block.brace_token.span.close().end();
                        set.insert(&adapter, &method.sig.ident.to_string(), text.slice(start, end));
                    }
                }
                other => {
                    let tokens = other.to_token_stream();
                    let (Some(first), Some(last)) = (first_span(tokens.clone()), last_span(tokens)) else {
                        continue;
                    };
                    set.add_helper(text.slice(first.start(), last.end()));
                }
            }
        }

        Ok(set)
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty() && self.helpers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    /// Register a method; a later entry for the same method replaces the earlier one.
    pub fn insert(&mut self, adapter: &str, method: &str, text: impl Into<String>) {
        self.methods
            .insert((adapter.to_string(), method.to_string()), text.into());
    }

    pub fn add_helper(&mut self, text: impl Into<String>) {
        self.helpers.push(text.into());
    }

    pub fn get(&self, adapter: &str, method: &str) -> Option<&str> {
        self.methods
            .get(&(adapter.to_string(), method.to_string()))
            .map(String::as_str)
    }

    /// Overridden methods in (adapter, method) order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &str)> {
        self.methods
            .iter()
            .map(|((adapter, method), text)| (adapter.as_str(), method.as_str(), text.as_str()))
    }

    pub fn helpers(&self) -> &[String] {
        &self.helpers
    }
}

fn adapter_name(ty: &Type) -> GenResult<String> {
    match ty {
        Type::Path(path) => path
            .path
            .segments
            .last()
            .map(|segment| segment.ident.to_string())
            .ok_or_else(|| GenError::OverrideParse("impl block without a self type".to_string())),
        other => Err(GenError::OverrideParse(format!(
            "impl block for unsupported type `{}`",
            other.to_token_stream()
        ))),
    }
}

fn first_span(tokens: TokenStream) -> Option<Span> {
    tokens.into_iter().next().map(|token| token.span())
}

fn last_span(tokens: TokenStream) -> Option<Span> {
    tokens.into_iter().last().map(|token| token.span())
}

/// Source lines, addressed by 1-based line and 0-based char column.
struct SourceText<'a> {
    lines: Vec<&'a str>,
}

impl<'a> SourceText<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            lines: source.lines().collect(),
        }
    }

    /// Text between two positions, dedented by the first line's indentation.
    fn slice(&self, start: LineColumn, end: LineColumn) -> String {
        let first = start.line.saturating_sub(1);
        let last = end.line.saturating_sub(1).min(self.lines.len().saturating_sub(1));
        let indent = self
            .lines
            .get(first)
            .map(|line| line.chars().take_while(|c| c.is_whitespace()).count())
            .unwrap_or(0);

        let mut out = Vec::new();
        for index in first..=last {
            let Some(line) = self.lines.get(index) else {
                break;
            };
            let from = if index == first { start.column } else { 0 };
            let to = if index == last { end.column } else { line.chars().count() };
            let piece: String = line.chars().skip(from).take(to.saturating_sub(from)).collect();
            out.push(if index == first { piece } else { dedent(&piece, indent) });
        }
        out.join("\n")
    }
}

fn dedent(line: &str, indent: usize) -> String {
    let strip = line
        .chars()
        .take(indent)
        .take_while(|c| c.is_whitespace())
        .count();
    line.chars().skip(strip).collect()
}
