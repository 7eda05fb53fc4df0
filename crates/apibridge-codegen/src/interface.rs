//! Capability traits for struct abstractions

use crate::collection::make_slice_interface;
use crate::decl::{Function, Receiver, TraitDecl};
use crate::error::GenResult;
use crate::options::GenerationOptions;
use crate::projector::{ProjectedField, projected_fields};
use crate::render::{AbstractRef, FieldShape, Renderer};
use apibridge_schema::{SchemaType, StructDef};
use std::collections::BTreeMap;

/// Field names with this prefix never get accessors.
pub const DEPRECATED_PREFIX: &str = "deprecated_";

/// Whether a projected field of `type_name` is left out of traits and adapters.
pub fn is_skipped(options: &GenerationOptions, type_name: &str, field: &str) -> bool {
    field.starts_with(DEPRECATED_PREFIX) || options.is_field_omitted(type_name, field)
}

/// The trait for a struct abstraction: one getter per projected field, and a
/// setter unless the field is struct-valued.
pub fn make_interface(r: &mut Renderer<'_>, def: &StructDef, options: &GenerationOptions) -> GenResult<TraitDecl> {
    let mut methods = Vec::new();
    for projected in projected_fields(r.catalog, def) {
        if is_skipped(options, &def.name, projected.name()) {
            continue;
        }
        methods.extend(field_methods(r, &projected)?);
    }

    Ok(TraitDecl {
        name: def.name.clone(),
        docs: def.docs.clone(),
        methods,
    })
}

/// Traits for every abstraction in `r.registry`, by abstract name.
pub fn make_traits(r: &mut Renderer<'_>, options: &GenerationOptions) -> GenResult<BTreeMap<String, TraitDecl>> {
    let registry = r.registry;
    let catalog = r.catalog;
    let mut traits = BTreeMap::new();

    for (ty, name) in registry.iter() {
        let decl = match ty {
            SchemaType::Vec { elem } => make_slice_interface(r, elem, name, options)?,
            _ => match catalog.struct_def(ty) {
                Some(def) => make_interface(r, def, options)?,
                None => continue,
            },
        };
        traits.insert(name.to_string(), decl);
    }

    Ok(traits)
}

/// Getter and setter of one field, with adapter bodies.
///
/// Every field gets a setter unless its declared type is a struct, which is
/// mutated through the getter instead.
pub fn field_methods(r: &mut Renderer<'_>, projected: &ProjectedField<'_>) -> GenResult<Vec<Function>> {
    let field = projected.field;
    let access = format!("self.0.{}", projected.access());
    let shape = r.shape(&field.ty);

    tracing::trace!("Generating accessors for {} ({:?})", field.name, shape);

    // Views into struct storage need a unique borrow.
    let receiver = if shape.is_abstracted() || shape == FieldShape::External {
        Receiver::Mut
    } else {
        Receiver::Ref
    };
    let getter = Function::new(format!("get_{}", field.name), receiver).docs(&field.docs);
    let getter = match &shape {
        FieldShape::Abstract { name, boxed } => {
            let aref = r.abstract_ref(name);
            let target = if *boxed {
                format!("&mut *{access}")
            } else {
                format!("&mut {access}")
            };
            let body = aref.wrap(&format!("{}({target})", r.adapter_name(name)));
            getter.returns(aref.borrowed()).line(body)
        }
        FieldShape::OptAbstract { name, boxed } => {
            let aref = r.abstract_ref(name);
            let adapter = r.adapter_name(name);
            let body = match (&aref, boxed) {
                (AbstractRef::Trait(path), true) => {
                    format!("{access}.as_mut().map(|v| Box::new({adapter}(&mut **v)) as Box<dyn {path} + '_>)")
                }
                (AbstractRef::Trait(path), false) => {
                    format!("{access}.as_mut().map(|v| Box::new({adapter}(v)) as Box<dyn {path} + '_>)")
                }
                (AbstractRef::Adapter(_), true) => format!("{access}.as_mut().map(|v| {adapter}(&mut **v))"),
                (AbstractRef::Adapter(_), false) => format!("{access}.as_mut().map({adapter})"),
            };
            getter.returns(format!("Option<{}>", aref.borrowed())).line(body)
        }
        FieldShape::Collection { name } => {
            let aref = r.abstract_ref(name);
            let adapter = r.adapter_name(name);
            getter
                .returns(aref.borrowed())
                .line(aref.wrap(&format!("{adapter}(apibridge_runtime::Slot::Borrowed(&mut {access}))")))
        }
        FieldShape::External => getter.returns(r.view(&shape, &field.ty)?).line(format!("&mut {access}")),
        _ => {
            let body = match &shape {
                FieldShape::Copy | FieldShape::OptCopy => access.clone(),
                FieldShape::OptStr => format!("{access}.as_deref()"),
                FieldShape::OptRef => format!("{access}.as_ref()"),
                _ => format!("&{access}"),
            };
            getter.returns(r.view(&shape, &field.ty)?).line(body)
        }
    };

    let mut methods = vec![getter];
    if !shape.is_struct_valued() {
        let (ty, value) = r.owned_arg(&shape, &field.ty, "o")?;
        methods.push(
            Function::new(format!("set_{}", field.name), Receiver::Mut)
                .param("o", ty)
                .line(format!("{access} = {value};")),
        );
    }
    Ok(methods)
}
