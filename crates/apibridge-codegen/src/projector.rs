//! Flattened field lists with embedded structs inlined

use crate::naming::{escape_ident, to_pascal_case};
use apibridge_schema::{FieldDescriptor, SchemaCatalog, StructDef};

/// A field as seen from the struct it was projected for.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedField<'a> {
    pub field: &'a FieldDescriptor,

    /// Field names from the projected struct down to this field.
    pub path: Vec<&'a str>,
}

impl ProjectedField<'_> {
    pub fn name(&self) -> &str {
        &self.field.name
    }

    /// Rust access expression relative to the struct, e.g. `configuration_spec.template`.
    pub fn access(&self) -> String {
        self.path
            .iter()
            .map(|segment| escape_ident(segment))
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Whether this field was promoted out of an embedded struct.
    pub fn is_promoted(&self) -> bool {
        self.path.len() > 1
    }
}

/// The struct an embedded field is inlined from, if it is inlined at all.
///
/// Inlining needs a `#[serde(flatten)]` field of a catalog struct whose
/// PascalCase field name equals the type name.
pub fn inlined_struct<'a>(catalog: &'a SchemaCatalog, field: &FieldDescriptor) -> Option<&'a StructDef> {
    if !field.embedded {
        return None;
    }
    let def = catalog.struct_def(&field.ty)?;
    (to_pascal_case(&field.name) == def.name).then_some(def)
}

/// Project the fields of `def` in declaration order.
pub fn projected_fields<'a>(catalog: &'a SchemaCatalog, def: &'a StructDef) -> Vec<ProjectedField<'a>> {
    let mut out = Vec::new();
    let mut stack = vec![def];
    project_into(catalog, def, &mut Vec::new(), &mut stack, &mut out);
    out
}

fn project_into<'a>(
    catalog: &'a SchemaCatalog,
    def: &'a StructDef,
    prefix: &mut Vec<&'a str>,
    stack: &mut Vec<&'a StructDef>,
    out: &mut Vec<ProjectedField<'a>>,
) {
    for field in &def.fields {
        prefix.push(&field.name);

        match inlined_struct(catalog, field) {
            // A struct already being inlined is kept as a reference.
            Some(inner) if !stack.iter().any(|s| std::ptr::eq(*s, inner)) => {
                stack.push(inner);
                project_into(catalog, inner, prefix, stack, out);
                stack.pop();
            }
            _ => out.push(ProjectedField {
                field,
                path: prefix.clone(),
            }),
        }

        prefix.pop();
    }
}
