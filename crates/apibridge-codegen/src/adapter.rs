//! Adapters for one API family and their conformance to the canonical traits

use crate::collection::slice_methods;
use crate::decl::{AdapterDecl, Function, MethodSource, TraitDecl, Wrapped};
use crate::error::{GenError, GenResult};
use crate::interface::{field_methods, is_skipped};
use crate::options::GenerationOptions;
use crate::overrides::OverrideSet;
use crate::projector::projected_fields;
use crate::render::Renderer;
use apibridge_schema::SchemaType;
use std::collections::{BTreeMap, BTreeSet};

/// Build an adapter for every abstraction in `r.registry`.
///
/// An adapter implements the canonical trait of the same name, if there is
/// one. Each trait method is taken from `overrides` when present, else from
/// the generated method with the identical signature. Methods the trait does
/// not declare go to an inherent impl.
pub fn make_adapters(
    r: &mut Renderer<'_>,
    options: &GenerationOptions,
    canonical: &BTreeMap<String, TraitDecl>,
    overrides: &OverrideSet,
) -> GenResult<Vec<AdapterDecl>> {
    let registry = r.registry;
    let mut adapters = Vec::with_capacity(registry.len());

    for (ty, name) in registry.iter() {
        let adapter_name = r.adapter_name(name);
        let (wrapped, mut generated) = generated_methods(r, ty, name, &adapter_name, options, overrides)?;
        let mut adapter = AdapterDecl::new(&adapter_name, name, wrapped);
        let mut implemented = BTreeSet::new();

        if let Some(decl) = canonical.get(name) {
            adapter.trait_path = r.trait_path(name);
            for expected in &decl.methods {
                let source = conform(&adapter_name, &decl.name, expected, &mut generated, overrides)?;
                implemented.insert(expected.name.clone());
                adapter.trait_methods.push(source);
            }
        }

        // Leftovers keep their generated order; overrides follow in name order.
        adapter.inherent.extend(generated.into_iter().map(MethodSource::Generated));
        for (target, method, text) in overrides.iter() {
            if target == adapter_name && !implemented.contains(method) {
                adapter.inherent.push(MethodSource::Override {
                    name: method.to_string(),
                    text: text.to_string(),
                });
            }
        }

        tracing::debug!(
            "Adapter {}: {} trait methods, {} inherent",
            adapter.name,
            adapter.trait_methods.len(),
            adapter.inherent.len()
        );
        adapters.push(adapter);
    }

    let known: BTreeSet<&str> = adapters.iter().map(|a| a.name.as_str()).collect();
    if let Some((adapter, method, _)) = overrides.iter().find(|(adapter, ..)| !known.contains(adapter)) {
        return Err(GenError::OrphanOverride {
            adapter: adapter.to_string(),
            method: method.to_string(),
        });
    }

    Ok(adapters)
}

/// Generated methods not removed by omissions or overrides, in declaration order.
fn generated_methods(
    r: &mut Renderer<'_>,
    ty: &SchemaType,
    name: &str,
    adapter_name: &str,
    options: &GenerationOptions,
    overrides: &OverrideSet,
) -> GenResult<(Wrapped, Vec<Function>)> {
    let keep = |field: Option<&str>, method: &str| {
        !options.is_implementation_omitted(name, field, method) && overrides.get(adapter_name, method).is_none()
    };

    if let SchemaType::Vec { elem } = ty {
        let wrapped = Wrapped::Collection(r.ty(elem)?);
        let methods = slice_methods(r, elem, name, options, &|method| keep(None, method))?;
        return Ok((wrapped, methods));
    }

    let wrapped = Wrapped::Struct(r.ty(ty)?);
    let catalog = r.catalog;
    let Some(def) = catalog.struct_def(ty) else {
        return Ok((wrapped, Vec::new()));
    };

    let mut methods = Vec::new();
    for projected in projected_fields(catalog, def) {
        if is_skipped(options, &def.name, projected.name()) {
            continue;
        }
        for f in field_methods(r, &projected)? {
            if keep(Some(projected.name()), &f.name) {
                methods.push(f);
            }
        }
    }
    Ok((wrapped, methods))
}

fn conform(
    adapter: &str,
    trait_name: &str,
    expected: &Function,
    generated: &mut Vec<Function>,
    overrides: &OverrideSet,
) -> GenResult<MethodSource> {
    if let Some(text) = overrides.get(adapter, &expected.name) {
        return Ok(MethodSource::Override {
            name: expected.name.clone(),
            text: text.to_string(),
        });
    }

    let Some(position) = generated.iter().position(|f| f.name == expected.name) else {
        return Err(GenError::MissingImplementation {
            adapter: adapter.to_string(),
            trait_name: trait_name.to_string(),
            method: expected.name.clone(),
        });
    };

    let found = generated.remove(position);
    if found.signature() != expected.signature() {
        return Err(GenError::SignatureMismatch {
            adapter: adapter.to_string(),
            method: expected.name.clone(),
            expected: expected.signature(),
            found: found.signature(),
        });
    }
    Ok(MethodSource::Generated(found))
}

#[cfg(test)]
#[path = "adapter/adapter_tests.rs"]
mod adapter_tests;
