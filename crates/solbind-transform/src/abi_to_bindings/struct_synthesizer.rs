/*! Deduplicate tuple shapes into named struct definitions.
 *
 * Tuples are interned during resolution and named only afterwards. Interning is keyed on the shape
 * (ordered component names plus their wire kinds) and allocates ids in first-seen order, which is
 * depth-first over the declaration list, so inner tuples always receive smaller ids than the tuples
 * containing them. Naming runs once every shape is known: first each shape tries its preferred name,
 * then the losers of a clash take numbered names. That keeps the outcome independent of which
 * declaration happens to mention a tuple first.
 */

use super::naming::{type_ident, value_ident, NameScope};
use indexmap::IndexMap;
use solbind_core::{Diagnostic, Parameter, ResolvedType, StructDefinition, StructField, StructId, WireKind};

type ShapeKey = Vec<(String, WireKind)>;

#[derive(Debug, Clone)]
struct PendingStruct {
    preferred: Option<String>,
    origin: String,
    fields: Vec<(String, ResolvedType)>,
    is_dynamic: bool,
}

#[derive(Debug, Default)]
pub struct StructSynthesizer {
    shapes: IndexMap<ShapeKey, PendingStruct>,
}

impl StructSynthesizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Returns the id of the shape formed by `fields`, allocating one on first sight.
    ///
    /// `param` supplies the preferred name; `origin` labels the declaration for diagnostics.
    pub fn intern(
        &mut self,
        param: &Parameter,
        fields: Vec<(String, ResolvedType)>,
        origin: &str,
    ) -> StructId {
        let key: ShapeKey = fields
            .iter()
            .map(|(name, ty)| (name.clone(), ty.wire.clone()))
            .collect();

        if let Some(index) = self.shapes.get_index_of(&key) {
            let pending = &mut self.shapes[index];
            if pending.preferred.is_none() {
                pending.preferred = preferred_name(param);
            }
            return StructId(index as u32);
        }

        let is_dynamic = fields.iter().any(|(_, ty)| ty.is_dynamic);
        let (index, _) = self.shapes.insert_full(
            key,
            PendingStruct {
                preferred: preferred_name(param),
                origin: origin.to_string(),
                fields,
                is_dynamic,
            },
        );
        StructId(index as u32)
    }

    /// Assigns final names to every shape and reports renames through `report`.
    ///
    /// `scope` holds the type names already in use in the generated module, including
    /// `contract_type`, the name of the contract handle.
    pub fn finalize(
        self,
        scope: &mut NameScope,
        contract_type: &str,
        report: &mut dyn FnMut(Diagnostic),
    ) -> Vec<StructDefinition> {
        let pending: Vec<PendingStruct> = self.shapes.into_values().collect();

        let wanted: Vec<String> = pending
            .iter()
            .enumerate()
            .map(|(index, shape)| {
                let fallback = || format!("Struct{}", index);
                match &shape.preferred {
                    Some(name) => type_ident(name, fallback),
                    None => fallback(),
                }
            })
            .collect();

        let mut names: Vec<Option<String>> = wanted
            .iter()
            .map(|name| scope.try_claim(name).then(|| name.clone()))
            .collect();

        for index in 0..names.len() {
            if names[index].is_some() {
                continue;
            }
            let taken = &wanted[index];
            let holder = if taken == contract_type {
                "the contract handle"
            } else if names.iter().any(|name| name.as_ref() == Some(taken)) {
                "a different tuple shape"
            } else {
                "a name the generated module imports"
            };
            let renamed = scope.claim_numbered(taken, "");
            report(Diagnostic::name_collision(
                taken,
                holder,
                &renamed,
                &pending[index].origin,
            ));
            names[index] = Some(renamed);
        }

        pending
            .into_iter()
            .zip(names)
            .enumerate()
            .map(|(index, (shape, name))| {
                let name = name.unwrap_or_else(|| wanted[index].clone());
                let fields = name_fields(&name, shape.fields, report);
                StructDefinition {
                    id: StructId(index as u32),
                    name,
                    fields,
                    is_dynamic: shape.is_dynamic,
                }
            })
            .collect()
    }
}

fn name_fields(
    owner: &str,
    fields: Vec<(String, ResolvedType)>,
    report: &mut dyn FnMut(Diagnostic),
) -> Vec<StructField> {
    let mut scope = NameScope::new();
    fields
        .into_iter()
        .enumerate()
        .map(|(position, (abi_name, ty))| {
            let base = value_ident(&abi_name, || format!("field{}", position));
            let (name, renamed) = scope.claim_positional(&base, position);
            if renamed {
                report(Diagnostic::duplicate_field(
                    &format!("struct `{}`", owner),
                    &base,
                    &name,
                ));
            }
            StructField { name, abi_name, ty }
        })
        .collect()
}

/// Struct name hinted by a tuple parameter: the last path segment of `struct A.B[]`, else the
/// parameter name.
pub fn preferred_name(param: &Parameter) -> Option<String> {
    let from_internal = param.internal_type.as_deref().and_then(|internal| {
        let name = internal.strip_prefix("struct ")?.trim();
        let name = name.split('[').next()?;
        let name = name.rsplit('.').next()?;
        (!name.is_empty()).then(|| name.to_string())
    });

    from_internal.or_else(|| (!param.name.is_empty()).then(|| param.name.clone()))
}
