//! Schema struct discovery over Rust source.
//!
//! A source file is parsed with [`syn`] and every struct deriving both
//! `Serialize` and `Deserialize` becomes a [`StructDef`]. Field types are
//! resolved to absolute package paths through the file's `use` items, so a
//! field declared as `ObjectMeta` after `use super::meta::ObjectMeta;` in
//! package `crate::schema::v1` is recorded as `crate::schema::meta::ObjectMeta`.
//!
//! # Limitations
//!
//! - Tuple structs are rejected (accessors need field names)
//! - Only `Option`, `Box`, `Vec`, `BTreeMap` and `HashMap` generics are understood
//! - References, tuples, arrays and qualified paths are rejected
//! - Glob imports are ignored

use crate::error::{SchemaError, SchemaResult};
use crate::types::{FieldDescriptor, SchemaType, StructDef};
use std::collections::{BTreeMap, BTreeSet};
use syn::ext::IdentExt;
use syn::punctuated::Punctuated;
use syn::{Attribute, Fields, GenericArgument, Item, Meta, PathArguments, Type, UseTree};

/// Parse `source`, declared as `package`, into its schema structs.
pub(crate) fn parse_source(package: &str, source: &str) -> SchemaResult<Vec<StructDef>> {
    let file = syn::parse_file(source).map_err(|e| SchemaError::Parse {
        package: package.to_string(),
        message: e.to_string(),
    })?;

    let resolver = Resolver::new(package, &file.items);

    let mut defs = Vec::new();
    for item in &file.items {
        if let Item::Struct(s) = item
            && is_schema_struct(&s.attrs)
        {
            defs.push(resolver.struct_def(s)?);
        }
    }

    tracing::trace!("Parsed {} schema structs in {}", defs.len(), package);
    Ok(defs)
}

/// Resolves type paths in one source file to absolute packages.
struct Resolver<'a> {
    package: &'a str,

    /// Types declared at the top level of the file.
    locals: BTreeSet<String>,

    /// Imported ident to absolute path segments.
    uses: BTreeMap<String, Vec<String>>,
}

impl<'a> Resolver<'a> {
    fn new(package: &'a str, items: &[Item]) -> Self {
        let mut resolver = Self {
            package,
            locals: BTreeSet::new(),
            uses: BTreeMap::new(),
        };

        for item in items {
            match item {
                Item::Struct(s) => {
                    resolver.locals.insert(s.ident.to_string());
                }
                Item::Enum(e) => {
                    resolver.locals.insert(e.ident.to_string());
                }
                Item::Type(t) => {
                    resolver.locals.insert(t.ident.to_string());
                }
                Item::Use(u) => {
                    let mut imports = Vec::new();
                    collect_uses(&u.tree, Vec::new(), &mut imports);
                    for (ident, segments) in imports {
                        let absolute = resolver.absolute(&segments);
                        resolver.uses.insert(ident, absolute);
                    }
                }
                _ => {}
            }
        }

        resolver
    }

    fn struct_def(&self, s: &syn::ItemStruct) -> SchemaResult<StructDef> {
        let name = s.ident.to_string();
        let mut def = StructDef::new(self.package, &name);
        def.docs = extract_docs(&s.attrs);

        match &s.fields {
            Fields::Named(fields) => {
                for f in &fields.named {
                    let field_name = f
                        .ident
                        .as_ref()
                        .map(|i| i.unraw().to_string())
                        .ok_or_else(|| SchemaError::UnnamedField(name.clone()))?;

                    let ty = self.parse_type(&name, &field_name, &f.ty)?;
                    let mut field = FieldDescriptor::new(field_name, ty);
                    field.embedded = is_flattened(&f.attrs);
                    field.docs = extract_docs(&f.attrs);
                    def.fields.push(field);
                }
            }
            Fields::Unnamed(_) => return Err(SchemaError::TupleStruct(name)),
            Fields::Unit => {}
        }

        Ok(def)
    }

    fn parse_type(&self, owner: &str, field: &str, ty: &Type) -> SchemaResult<SchemaType> {
        match ty {
            Type::Paren(p) => self.parse_type(owner, field, &p.elem),
            Type::Group(g) => self.parse_type(owner, field, &g.elem),
            Type::Path(tp) if tp.qself.is_none() => self.parse_path_type(owner, field, ty, &tp.path),
            _ => Err(unsupported(owner, field, ty)),
        }
    }

    fn parse_path_type(
        &self,
        owner: &str,
        field: &str,
        ty: &Type,
        path: &syn::Path,
    ) -> SchemaResult<SchemaType> {
        let Some(last) = path.segments.last() else {
            return Err(unsupported(owner, field, ty));
        };
        let ident = last.ident.to_string();

        match &last.arguments {
            PathArguments::None => {
                if path.segments.len() == 1
                    && SchemaType::is_builtin(&ident)
                    && !self.locals.contains(&ident)
                {
                    return Ok(SchemaType::scalar(ident));
                }
                let (package, name) = self.resolve(path);
                Ok(SchemaType::named(package, name))
            }
            PathArguments::AngleBracketed(args) => {
                let params: Vec<&Type> = args
                    .args
                    .iter()
                    .filter_map(|a| match a {
                        GenericArgument::Type(t) => Some(t),
                        _ => None,
                    })
                    .collect();

                match (ident.as_str(), params.as_slice()) {
                    ("Option", [elem]) => Ok(SchemaType::option(self.parse_type(owner, field, elem)?)),
                    ("Box", [elem]) => Ok(SchemaType::boxed(self.parse_boxed(owner, field, elem)?)),
                    ("Vec", [elem]) => Ok(SchemaType::vec(self.parse_type(owner, field, elem)?)),
                    ("BTreeMap", [key, value]) => Ok(SchemaType::map(
                        true,
                        self.parse_type(owner, field, key)?,
                        self.parse_type(owner, field, value)?,
                    )),
                    ("HashMap", [key, value]) => Ok(SchemaType::map(
                        false,
                        self.parse_type(owner, field, key)?,
                        self.parse_type(owner, field, value)?,
                    )),
                    _ => Err(unsupported(owner, field, ty)),
                }
            }
            PathArguments::Parenthesized(_) => Err(unsupported(owner, field, ty)),
        }
    }

    /// `Box<dyn Trait>` is the only place a trait object may appear.
    fn parse_boxed(&self, owner: &str, field: &str, elem: &Type) -> SchemaResult<SchemaType> {
        if let Type::TraitObject(obj) = elem {
            let trait_path = obj.bounds.iter().find_map(|b| match b {
                syn::TypeParamBound::Trait(t) => Some(&t.path),
                _ => None,
            });
            return match trait_path {
                Some(path) => {
                    let (package, name) = self.resolve(path);
                    Ok(SchemaType::Dyn { package, name })
                }
                None => Err(unsupported(owner, field, elem)),
            };
        }
        self.parse_type(owner, field, elem)
    }

    /// Split a type path into (absolute package, name).
    fn resolve(&self, path: &syn::Path) -> (String, String) {
        let segments: Vec<String> = path.segments.iter().map(|s| s.ident.to_string()).collect();

        let absolute = match segments.as_slice() {
            [name] if self.locals.contains(name) => {
                return (self.package.to_string(), name.clone());
            }
            [name] => match self.uses.get(name) {
                Some(imported) => imported.clone(),
                None => return (String::new(), name.clone()),
            },
            _ if path.leading_colon.is_some() => segments,
            [first, rest @ ..] => match self.uses.get(first) {
                Some(imported) if !is_relative_keyword(first) => {
                    imported.iter().chain(rest.iter()).cloned().collect()
                }
                _ => self.absolute(&segments),
            },
            [] => segments,
        };

        split_last(absolute)
    }

    /// Resolve a leading `self`/`super` against this file's package.
    fn absolute(&self, segments: &[String]) -> Vec<String> {
        match segments.first().map(String::as_str) {
            Some("self") => package_segments(self.package)
                .chain(segments[1..].iter().cloned())
                .collect(),
            Some("super") => {
                let mut base: Vec<String> = package_segments(self.package).collect();
                let mut rest = segments;
                while rest.first().is_some_and(|s| s == "super") {
                    base.pop();
                    rest = &rest[1..];
                }
                base.extend(rest.iter().cloned());
                base
            }
            _ => segments.to_vec(),
        }
    }
}

fn package_segments(package: &str) -> impl Iterator<Item = String> + '_ {
    package
        .split(crate::PATH_SEPARATOR)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn is_relative_keyword(segment: &str) -> bool {
    matches!(segment, "crate" | "self" | "super")
}

fn split_last(mut segments: Vec<String>) -> (String, String) {
    let name = segments.pop().unwrap_or_default();
    (segments.join(crate::PATH_SEPARATOR), name)
}

/// Flatten a `use` tree into (visible ident, path segments) pairs.
fn collect_uses(tree: &UseTree, prefix: Vec<String>, out: &mut Vec<(String, Vec<String>)>) {
    match tree {
        UseTree::Path(p) => {
            let mut prefix = prefix;
            prefix.push(p.ident.to_string());
            collect_uses(&p.tree, prefix, out);
        }
        UseTree::Name(n) if n.ident == "self" => {
            if let Some(last) = prefix.last() {
                out.push((last.clone(), prefix.clone()));
            }
        }
        UseTree::Name(n) => {
            let mut path = prefix;
            path.push(n.ident.to_string());
            out.push((n.ident.to_string(), path));
        }
        UseTree::Rename(r) => {
            let mut path = prefix;
            if r.ident != "self" {
                path.push(r.ident.to_string());
            }
            out.push((r.rename.to_string(), path));
        }
        UseTree::Group(g) => {
            for item in &g.items {
                collect_uses(item, prefix.clone(), out);
            }
        }
        UseTree::Glob(_) => {}
    }
}

fn unsupported(owner: &str, field: &str, ty: &Type) -> SchemaError {
    SchemaError::UnsupportedType {
        owner: owner.to_string(),
        field: field.to_string(),
        ty: quote::quote!(#ty).to_string(),
    }
}

/// Check if a struct derives both `Serialize` and `Deserialize`.
fn is_schema_struct(attrs: &[Attribute]) -> bool {
    let mut serialize = false;
    let mut deserialize = false;

    for attr in attrs.iter().filter(|a| a.path().is_ident("derive")) {
        let Ok(paths) = attr.parse_args_with(Punctuated::<syn::Path, syn::Token![,]>::parse_terminated)
        else {
            continue;
        };
        for path in paths {
            if let Some(last) = path.segments.last() {
                serialize |= last.ident == "Serialize";
                deserialize |= last.ident == "Deserialize";
            }
        }
    }

    serialize && deserialize
}

/// Whether a field carries `#[serde(flatten)]`.
fn is_flattened(attrs: &[Attribute]) -> bool {
    let mut flatten = false;

    for attr in attrs.iter().filter(|a| a.path().is_ident("serde")) {
        // Unrelated serde options are skipped; malformed ones are rustc's problem.
        let _ = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("flatten") {
                flatten = true;
            } else if meta.input.peek(syn::Token![=]) {
                meta.value()?.parse::<syn::Expr>()?;
            } else if meta.input.peek(syn::token::Paren) {
                let _nested;
                syn::parenthesized!(_nested in meta.input);
            }
            Ok(())
        });
    }

    flatten
}

/// Extract documentation comments from attributes.
fn extract_docs(attrs: &[Attribute]) -> Vec<String> {
    let mut docs = Vec::new();

    for attr in attrs {
        if attr.path().is_ident("doc")
            && let Meta::NameValue(meta) = &attr.meta
            && let syn::Expr::Lit(expr_lit) = &meta.value
            && let syn::Lit::Str(lit_str) = &expr_lit.lit
        {
            let doc = lit_str.value();
            let doc = doc.trim();
            if !doc.is_empty() {
                docs.push(doc.to_string());
            }
        }
    }

    docs
}
