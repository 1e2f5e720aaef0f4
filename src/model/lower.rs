//! Lowering of a parsed [`ModelSource`] into a [`ModelGraph`].
//!
//! Names are resolved here, so the graph never holds dangling references. Cycles and
//! conflicting role declarations are accepted as-is; the resolver reports them.

use std::collections::{HashMap, HashSet};

use super::role::{default_role_name, AssociationRole, Navigability, RoleOrigin};
use super::{ModelGraph, TypeDecl, TypeId, TypeKind};
use crate::diagnostics::CompileError;
use crate::parser::ast::{ModelSource, TypeDefKind};

pub fn build_model(source: &ModelSource) -> Result<ModelGraph, CompileError> {
    let by_name = register_type_names(source)?;
    let mut types = resolve_generalizations(source, &by_name)?;
    attach_roles(source, &by_name, &mut types)?;

    Ok(ModelGraph {
        namespace: source.namespace.as_ref().map(|ns| ns.node.clone()),
        types,
        by_name,
    })
}

fn register_type_names(source: &ModelSource) -> Result<HashMap<String, TypeId>, CompileError> {
    let mut by_name = HashMap::new();
    for (index, def) in source.types.iter().enumerate() {
        let name = &def.node.name;
        if by_name.insert(name.node.clone(), TypeId(index as u32)).is_some() {
            return Err(CompileError::model(format!("duplicate type '{}'", name.node), name.span));
        }
    }
    Ok(by_name)
}

fn resolve_generalizations(
    source: &ModelSource,
    by_name: &HashMap<String, TypeId>,
) -> Result<Vec<TypeDecl>, CompileError> {
    let kinds: Vec<TypeDefKind> = source.types.iter().map(|t| t.node.kind).collect();
    let mut types = Vec::with_capacity(source.types.len());

    for (index, def) in source.types.iter().enumerate() {
        let d = &def.node;
        let type_name = &d.name.node;
        let mut superclass: Option<(TypeId, &str)> = None;
        let mut parents = Vec::new();
        let mut seen = HashSet::new();

        for parent in &d.is_a {
            let parent_id = *by_name.get(&parent.node).ok_or_else(|| {
                CompileError::model(
                    format!("unknown type '{}' in isA list of '{}'", parent.node, type_name),
                    parent.span,
                )
            })?;
            if !seen.insert(parent_id) {
                return Err(CompileError::model(
                    format!("type '{}' appears multiple times in isA list of '{}'", parent.node, type_name),
                    parent.span,
                ));
            }

            match (d.kind, kinds[parent_id.index()]) {
                (TypeDefKind::Class, TypeDefKind::Class) => {
                    if let Some((_, existing)) = superclass {
                        return Err(CompileError::model(
                            format!(
                                "class '{}' cannot extend both '{}' and '{}'",
                                type_name, existing, parent.node
                            ),
                            parent.span,
                        ));
                    }
                    superclass = Some((parent_id, parent.node.as_str()));
                }
                (TypeDefKind::Interface, TypeDefKind::Class) => {
                    return Err(CompileError::model(
                        format!("interface '{}' cannot extend class '{}'", type_name, parent.node),
                        parent.span,
                    ));
                }
                (_, TypeDefKind::Interface) => parents.push(parent_id),
            }
        }

        let kind = match d.kind {
            TypeDefKind::Class => TypeKind::Class {
                superclass: superclass.map(|(id, _)| id),
                interfaces: parents,
            },
            TypeDefKind::Interface => TypeKind::Interface { extends: parents },
        };

        types.push(TypeDecl {
            id: TypeId(index as u32),
            name: type_name.clone(),
            kind,
            roles: Vec::new(),
            span: def.span,
            name_span: d.name.span,
        });
    }

    Ok(types)
}

fn attach_roles(
    source: &ModelSource,
    by_name: &HashMap<String, TypeId>,
    types: &mut [TypeDecl],
) -> Result<(), CompileError> {
    let mut opposite_ends: Vec<(TypeId, AssociationRole)> = Vec::new();

    for (index, def) in source.types.iter().enumerate() {
        let owner = TypeId(index as u32);
        for assoc in &def.node.associations {
            let a = &assoc.node;
            let target = *by_name.get(&a.target.node).ok_or_else(|| {
                CompileError::model(
                    format!("unknown type '{}' in association of '{}'", a.target.node, def.node.name.node),
                    a.target.span,
                )
            })?;

            let multiplicity = a.target_bound.node.multiplicity();
            let name = match &a.target_role {
                Some(role) => role.node.clone(),
                None => default_role_name(&a.target.node, multiplicity),
            };
            types[owner.index()].roles.push(AssociationRole {
                name,
                target,
                bounds: a.target_bound.node,
                multiplicity,
                navigability: Navigability::from_flag(a.direction.owner_navigable()),
                declared_in: owner,
                origin: RoleOrigin::Declared,
                span: assoc.span,
            });

            // The far end only gets accessors when it can navigate back and is a class.
            if a.direction.target_navigable() && types[target.index()].kind.is_class() {
                let multiplicity = a.owner_bound.node.multiplicity();
                let name = match &a.owner_role {
                    Some(role) => role.node.clone(),
                    None => default_role_name(&def.node.name.node, multiplicity),
                };
                opposite_ends.push((
                    target,
                    AssociationRole {
                        name,
                        target: owner,
                        bounds: a.owner_bound.node,
                        multiplicity,
                        navigability: Navigability::Navigable,
                        declared_in: target,
                        origin: RoleOrigin::OppositeEnd { declared_in: owner },
                        span: assoc.span,
                    },
                ));
            }
        }
    }

    for (holder, role) in opposite_ends {
        types[holder.index()].roles.push(role);
    }
    Ok(())
}
