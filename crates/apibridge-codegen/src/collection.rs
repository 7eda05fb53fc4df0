//! Ordered, keyed collection abstractions.
//!
//! A collection trait `{E}Slice` exposes, in order: `iter`, `index`, `get`,
//! `find`, `filter`, `upsert`, one `matches_{key}` per key field, `len`,
//! `is_empty` and `into_elts`.
//!
//! Key fields are the configured `slice_keys` of the element type, in the
//! configured order, or every comparable field when none are configured.
//! `upsert` takes the keys first and the remaining fields in name order.
//! Optional keys compare with a three-way branch: two present values compare,
//! two absent values match, and present never matches absent.

use crate::decl::{Function, Receiver, TraitDecl};
use crate::error::{GenError, GenResult};
use crate::interface::is_skipped;
use crate::naming::escape_ident;
use crate::options::GenerationOptions;
use crate::projector::{ProjectedField, inlined_struct, projected_fields};
use crate::render::{AbstractRef, FieldShape, Renderer, key_mismatch, owned_to_view};
use apibridge_schema::{SchemaType, StructDef};
use std::collections::BTreeMap;

/// The trait for a collection abstraction.
pub fn make_slice_interface(
    r: &mut Renderer<'_>,
    elem: &SchemaType,
    slice_name: &str,
    options: &GenerationOptions,
) -> GenResult<TraitDecl> {
    let methods = slice_methods(r, elem, slice_name, options, &|_| true)?;
    Ok(TraitDecl {
        name: slice_name.to_string(),
        docs: vec![format!("Ordered collection of `{}` elements.", elem.name())],
        methods,
    })
}

/// Collection methods with adapter bodies, restricted to those `wanted` accepts.
pub fn slice_methods(
    r: &mut Renderer<'_>,
    elem: &SchemaType,
    slice_name: &str,
    options: &GenerationOptions,
    wanted: &dyn Fn(&str) -> bool,
) -> GenResult<Vec<Function>> {
    let catalog = r.catalog;
    let Some(def) = catalog.struct_def(elem) else {
        return Ok(Vec::new());
    };
    let elem_name = r.registry.name_of(elem).unwrap_or(&def.name).to_string();

    let fields: Vec<ProjectedField<'_>> = projected_fields(catalog, def)
        .into_iter()
        .filter(|f| !is_skipped(options, &def.name, f.name()))
        .collect();
    let keys = key_fields(r, def, &fields, options)?;

    let ctx = SliceContext {
        elem_ref: r.abstract_ref(&elem_name),
        elem_adapter: r.adapter_name(&elem_name),
        slice_ref: r.abstract_ref(slice_name),
        slice_adapter: r.adapter_name(slice_name),
    };

    let mut key_params = Vec::new();
    for key in &keys {
        let shape = r.shape(&key.field.ty);
        let view = r.key_view(&shape, &key.field.ty)?;
        key_params.push((escape_ident(key.name()), view, shape, key.access()));
    }

    let mut methods = Vec::new();

    if wanted("iter") {
        methods.push(ctx.iter());
    }

    if wanted("index") {
        let mut f = Function::new("index", Receiver::Ref).returns("Option<usize>");
        for (ident, view, _, _) in &key_params {
            f = f.param(ident, view);
        }
        if key_params.is_empty() {
            f = f.line("(!self.0.is_empty()).then_some(0)");
        } else {
            f = f.line("for (i, elt) in self.0.iter().enumerate() {");
            for (ident, _, shape, access) in &key_params {
                f = f.lines(indent(key_mismatch(shape, &format!("elt.{access}"), ident)));
            }
            f = f.line("    return Some(i);").line("}").line("None");
        }
        methods.push(f);
    }

    if wanted("get") {
        methods.push(
            Function::new("get", Receiver::Mut)
                .param("i", "usize")
                .returns(ctx.elem_ref.borrowed())
                .line(ctx.elem_ref.wrap(&format!("{}(&mut self.0[i])", ctx.elem_adapter))),
        );
    }

    if wanted("find") {
        let args: Vec<&str> = key_params.iter().map(|(ident, ..)| ident.as_str()).collect();
        let mut f = Function::new("find", Receiver::Mut).returns(format!("Option<{}>", ctx.elem_ref.borrowed()));
        for (ident, view, _, _) in &key_params {
            f = f.param(ident, view);
        }
        f = f
            .line(format!("let i = {}?;", ctx.call("index", &args)))
            .line(format!("Some({})", ctx.call("get", &["i"])));
        methods.push(f);
    }

    if wanted("filter") {
        let predicate = match &ctx.elem_ref {
            AbstractRef::Trait(path) => format!("&mut dyn FnMut(&mut dyn {path}) -> bool"),
            AbstractRef::Adapter(name) => format!("&mut dyn FnMut(&mut {name}<'_>) -> bool"),
        };
        let owned = ctx
            .slice_ref
            .wrap(&format!("{}(apibridge_runtime::Slot::Owned(kept))", ctx.slice_adapter));
        methods.push(
            Function::new("filter", Receiver::Ref)
                .param("predicate", predicate)
                .returns(ctx.slice_ref.owned())
                .lines([
                    "let mut kept = Vec::new();".to_string(),
                    "for elt in self.0.iter() {".to_string(),
                    "    let mut candidate = elt.clone();".to_string(),
                    format!("    if predicate(&mut {}(&mut candidate)) {{", ctx.elem_adapter),
                    "        kept.push(candidate);".to_string(),
                    "    }".to_string(),
                    "}".to_string(),
                    owned,
                ]),
        );
    }

    if wanted("upsert") {
        methods.push(upsert(r, &ctx, def, &fields, &keys, &key_params)?);
    }

    for (ident, view, shape, access) in &key_params {
        let name = format!("matches_{}", ident.trim_start_matches("r#"));
        if !wanted(&name) {
            continue;
        }
        let push = match &ctx.elem_ref {
            AbstractRef::Trait(path) => {
                format!("    found.push(Box::new({}(elt)) as Box<dyn {path} + '_>);", ctx.elem_adapter)
            }
            AbstractRef::Adapter(_) => format!("    found.push({}(elt));", ctx.elem_adapter),
        };
        methods.push(
            Function::new(name, Receiver::Mut)
                .param(ident, view)
                .returns(format!("Vec<{}>", ctx.elem_ref.borrowed()))
                .line("let mut found = Vec::new();")
                .line("for elt in self.0.iter_mut() {")
                .lines(indent(key_mismatch(shape, &format!("elt.{access}"), ident)))
                .line(push)
                .line("}")
                .line("found"),
        );
    }

    if wanted("len") {
        methods.push(Function::new("len", Receiver::Ref).returns("usize").line("self.0.len()"));
    }
    if wanted("is_empty") {
        methods.push(
            Function::new("is_empty", Receiver::Ref)
                .returns("bool")
                .line("self.0.is_empty()"),
        );
    }
    if wanted("into_elts") {
        methods.push(
            Function::new("into_elts", Receiver::Boxed)
                .returns("apibridge_runtime::ErasedElts")
                .line("let this = *self;")
                .line("apibridge_runtime::erase(this.0.into_owned())"),
        );
    }

    Ok(methods)
}

struct SliceContext {
    elem_ref: AbstractRef,
    elem_adapter: String,
    slice_ref: AbstractRef,
    slice_adapter: String,
}

impl SliceContext {
    /// Call a collection method from inside an impl; trait methods go through
    /// the trait path since the trait need not be in scope.
    fn call(&self, method: &str, args: &[&str]) -> String {
        match &self.slice_ref {
            AbstractRef::Trait(path) => {
                let mut all = vec!["self"];
                all.extend_from_slice(args);
                format!("{path}::{method}({})", all.join(", "))
            }
            AbstractRef::Adapter(_) => format!("self.{method}({})", args.join(", ")),
        }
    }

    fn iter(&self) -> Function {
        let item = self.elem_ref.borrowed();
        let body = match &self.elem_ref {
            AbstractRef::Trait(_) => format!(
                "Box::new(self.0.iter_mut().map(|e| Box::new({}(e)) as {item}))",
                self.elem_adapter
            ),
            AbstractRef::Adapter(_) => format!("Box::new(self.0.iter_mut().map({}))", self.elem_adapter),
        };
        Function::new("iter", Receiver::Mut)
            .returns(format!("Box<dyn Iterator<Item = {item}> + '_>"))
            .line(body)
    }
}

/// Key fields of an element: the configured ones in configured order, else
/// every comparable field in field order.
fn key_fields<'a>(
    r: &Renderer<'_>,
    def: &StructDef,
    fields: &[ProjectedField<'a>],
    options: &GenerationOptions,
) -> GenResult<Vec<ProjectedField<'a>>> {
    let Some(explicit) = options.slice_keys_for(&def.name) else {
        return Ok(fields
            .iter()
            .filter(|f| r.is_comparable(&f.field.ty))
            .cloned()
            .collect());
    };

    let mut keys = Vec::with_capacity(explicit.len());
    for key in explicit {
        match fields.iter().find(|f| f.name() == key.as_str()) {
            Some(field) if r.is_comparable(&field.field.ty) => keys.push(field.clone()),
            _ => {
                return Err(GenError::UnsupportedKeyField {
                    element: def.name.clone(),
                    field: key.clone(),
                });
            }
        }
    }
    Ok(keys)
}

type KeyParam = (String, String, FieldShape, String);

fn upsert(
    r: &mut Renderer<'_>,
    ctx: &SliceContext,
    def: &StructDef,
    fields: &[ProjectedField<'_>],
    keys: &[ProjectedField<'_>],
    key_params: &[KeyParam],
) -> GenResult<Function> {
    let mut f = Function::new("upsert", Receiver::Mut).returns(ctx.elem_ref.borrowed());
    let mut values: BTreeMap<Vec<String>, String> = BTreeMap::new();

    for field in upsert_order(fields, keys) {
        let ident = escape_ident(field.name());
        let shape = r.shape(&field.field.ty);
        let (ty, value) = r.owned_arg(&shape, &field.field.ty, &ident)?;
        f = f.param(&ident, ty);
        values.insert(field.path.iter().map(|s| s.to_string()).collect(), value);
    }

    let views: Vec<String> = key_params
        .iter()
        .map(|(ident, _, shape, _)| owned_to_view(shape, ident))
        .collect();
    let views: Vec<&str> = views.iter().map(String::as_str).collect();

    let mut literal = Vec::new();
    struct_literal(r, def, &mut Vec::new(), &values, &mut vec![def.name.clone()], &mut literal)?;
    if let Some(first) = literal.first_mut() {
        *first = format!("let elt = {first}");
    }
    if let Some(last) = literal.last_mut() {
        last.push(';');
    }

    f = f
        .line(format!("let found = {};", ctx.call("index", &views)))
        .lines(literal)
        .lines([
            "let i = match found {",
            "    Some(i) => {",
            "        self.0[i] = elt;",
            "        i",
            "    }",
            "    None => {",
            "        self.0.push(elt);",
            "        self.0.len() - 1",
            "    }",
            "};",
        ])
        .line(ctx.call("get", &["i"]));
    Ok(f)
}

/// `upsert` parameters: the keys in key order, then the other fields by name.
///
/// Versions that reorder fields still agree on the signature.
fn upsert_order<'f, 'a>(fields: &'f [ProjectedField<'a>], keys: &'f [ProjectedField<'a>]) -> Vec<&'f ProjectedField<'a>> {
    let mut rest: Vec<&ProjectedField<'a>> = fields
        .iter()
        .filter(|f| !keys.iter().any(|k| k.name() == f.name()))
        .collect();
    rest.sort_by(|a, b| a.name().cmp(b.name()));
    keys.iter().chain(rest).collect()
}

/// By-name struct literal for `def`, nesting inlined embedded structs.
///
/// Fields without a value are filled from `Default`.
fn struct_literal(
    r: &mut Renderer<'_>,
    def: &StructDef,
    prefix: &mut Vec<String>,
    values: &BTreeMap<Vec<String>, String>,
    stack: &mut Vec<String>,
    out: &mut Vec<String>,
) -> GenResult<()> {
    out.push(format!("{} {{", r.ty(&def.schema_type())?));
    let mut incomplete = false;

    for field in &def.fields {
        let ident = escape_ident(&field.name);
        prefix.push(field.name.clone());

        let catalog = r.catalog;
        match inlined_struct(catalog, field) {
            Some(inner) if !stack.contains(&inner.name) => {
                stack.push(inner.name.clone());
                let mut nested = Vec::new();
                struct_literal(r, inner, prefix, values, stack, &mut nested)?;
                stack.pop();
                if let Some(first) = nested.first_mut() {
                    *first = format!("{ident}: {first}");
                }
                if let Some(last) = nested.last_mut() {
                    last.push(',');
                }
                out.extend(indent(nested));
            }
            _ => match values.get(prefix.as_slice()) {
                Some(value) if *value == ident => out.push(format!("    {ident},")),
                Some(value) => out.push(format!("    {ident}: {value},")),
                None => incomplete = true,
            },
        }

        prefix.pop();
    }

    if incomplete {
        out.push("    ..Default::default()".to_string());
    }
    out.push("}".to_string());
    Ok(())
}

fn indent(lines: Vec<String>) -> Vec<String> {
    lines
        .into_iter()
        .map(|line| if line.is_empty() { line } else { format!("    {line}") })
        .collect()
}

#[cfg(test)]
#[path = "collection/collection_tests.rs"]
mod collection_tests;
