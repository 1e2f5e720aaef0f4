//! Method descriptor synthesis: which accessors a resolved role declaration calls for.

use std::fmt;

use serde::Serialize;

use crate::model::{ModelGraph, Multiplicity, Navigability, TypeId};
use crate::provenance::Provenance;
use crate::resolve::{RoleDeclaration, RoleResolution};
use crate::span::Span;

/// Declaration order of this enum is the emission order within a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MethodKind {
    Get,
    Set,
    Add,
    Remove,
}

impl MethodKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MethodKind::Get => "get",
            MethodKind::Set => "set",
            MethodKind::Add => "add",
            MethodKind::Remove => "remove",
        }
    }
}

impl fmt::Display for MethodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "shape", content = "type", rename_all = "lowercase")]
pub enum ValueShape {
    Bool,
    One(TypeId),
    Many(TypeId),
}

impl ValueShape {
    pub fn describe(self, graph: &ModelGraph) -> String {
        match self {
            ValueShape::Bool => "bool".to_string(),
            ValueShape::One(t) => format!("one {}", graph.name(t)),
            ValueShape::Many(t) => format!("many {}", graph.name(t)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct MethodShape {
    pub params: Vec<ValueShape>,
    pub returns: ValueShape,
}

impl MethodShape {
    /// `(one Course) -> bool`
    pub fn describe(&self, graph: &ModelGraph) -> String {
        let params: Vec<String> = self.params.iter().map(|p| p.describe(graph)).collect();
        format!("({}) -> {}", params.join(", "), self.returns.describe(graph))
    }
}

/// Identity of a generated method within the output for one owning type.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct CanonicalKey {
    pub owner: TypeId,
    pub role: String,
    pub kind: MethodKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodDescriptor {
    pub owner: TypeId,
    pub kind: MethodKind,
    pub role: String,
    pub target: TypeId,
    pub multiplicity: Multiplicity,
    pub shape: MethodShape,
    pub provenance: Provenance,
    /// Span of the role declaration this descriptor was first synthesized from.
    #[serde(skip)]
    pub span: Span,
}

impl MethodDescriptor {
    pub fn canonical_key(&self) -> CanonicalKey {
        CanonicalKey { owner: self.owner, role: self.role.clone(), kind: self.kind }
    }
}

/// Accessor kinds required for a role with the given multiplicity and navigability.
pub fn method_kinds(multiplicity: Multiplicity, navigability: Navigability) -> &'static [MethodKind] {
    match (navigability, multiplicity) {
        (Navigability::NonNavigable, _) => &[],
        (Navigability::Navigable, Multiplicity::One) => &[MethodKind::Get, MethodKind::Set],
        (Navigability::Navigable, Multiplicity::Many) => &[MethodKind::Get, MethodKind::Add, MethodKind::Remove],
    }
}

pub fn method_shape(kind: MethodKind, multiplicity: Multiplicity, target: TypeId) -> MethodShape {
    match kind {
        MethodKind::Get => MethodShape {
            params: Vec::new(),
            returns: match multiplicity {
                Multiplicity::One => ValueShape::One(target),
                Multiplicity::Many => ValueShape::Many(target),
            },
        },
        MethodKind::Set | MethodKind::Add | MethodKind::Remove => MethodShape {
            params: vec![ValueShape::One(target)],
            returns: ValueShape::Bool,
        },
    }
}

pub fn synthesize(owner: TypeId, declaration: &RoleDeclaration) -> Vec<MethodDescriptor> {
    let role = &declaration.role;
    method_kinds(role.multiplicity, role.navigability)
        .iter()
        .map(|&kind| MethodDescriptor {
            owner,
            kind,
            role: role.name.clone(),
            target: role.target,
            multiplicity: role.multiplicity,
            shape: method_shape(kind, role.multiplicity, role.target),
            provenance: declaration.provenance.clone(),
            span: role.span,
        })
        .collect()
}

/// Every descriptor candidate for a resolved type, duplicates included.
pub fn synthesize_all(resolution: &RoleResolution) -> Vec<MethodDescriptor> {
    resolution
        .roles
        .iter()
        .flat_map(|role| role.declarations.iter())
        .flat_map(|decl| synthesize(resolution.owner, decl))
        .collect()
}
