//! Discovery of the types that need an abstraction

use crate::error::{GenError, GenResult};
use crate::options::GenerationOptions;
use crate::projector::projected_fields;
use crate::registry::AbstractionRegistry;
use apibridge_schema::{PATH_SEPARATOR, SchemaCatalog, SchemaType};

/// Build the registry of an API family from its roots.
pub fn discover(catalog: &SchemaCatalog, api: &str, options: &GenerationOptions) -> GenResult<AbstractionRegistry> {
    let mut registry = AbstractionRegistry::new();

    for root in &options.roots {
        let ty = resolve_root(catalog, api, options, root)?;
        if !ty.is_in_package(&options.package) {
            tracing::debug!("Root {} is outside package {}, skipping", root, options.package);
            continue;
        }
        walk(catalog, &options.package, &ty, &mut registry);
    }

    tracing::debug!("API family {} has {} abstractions", api, registry.len());
    Ok(registry)
}

fn resolve_root(catalog: &SchemaCatalog, api: &str, options: &GenerationOptions, root: &str) -> GenResult<SchemaType> {
    let ty = match root.rsplit_once(PATH_SEPARATOR) {
        Some((package, name)) => SchemaType::named(package, name),
        None => SchemaType::named(&options.package, root),
    };

    if ty.is_in_package(&options.package) && catalog.struct_def(&ty).is_none() {
        return Err(GenError::UnknownRoot {
            api: api.to_string(),
            root: root.to_string(),
        });
    }
    Ok(ty)
}

/// Register `ty` and everything in `package` reachable from it.
///
/// Registered types are not re-entered, so cyclic graphs terminate.
pub fn walk(catalog: &SchemaCatalog, package: &str, ty: &SchemaType, registry: &mut AbstractionRegistry) {
    match ty {
        SchemaType::Named { name, .. } => {
            let Some(def) = catalog.struct_def(ty).filter(|_| ty.is_in_package(package)) else {
                return;
            };
            if !registry.register(ty.clone(), name.clone()) {
                return;
            }
            for projected in projected_fields(catalog, def) {
                walk(catalog, package, &projected.field.ty, registry);
            }
        }
        SchemaType::Option { elem } | SchemaType::Boxed { elem } => walk(catalog, package, elem, registry),
        SchemaType::Vec { elem } => {
            if catalog.is_package_struct(elem, package) {
                registry.register(ty.clone(), format!("{}Slice", elem.name()));
            }
            walk(catalog, package, elem, registry);
        }
        SchemaType::Map { key, value, .. } => {
            walk(catalog, package, key, registry);
            walk(catalog, package, value, registry);
        }
        SchemaType::Scalar { .. } | SchemaType::Dyn { .. } => {}
    }
}
