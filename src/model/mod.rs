//! The model graph: classes, interfaces, their association roles and generalization edges.
//!
//! A graph is built once per run (from source via [`lower::build_model`] or through
//! [`ModelGraphBuilder`]) and is read-only afterwards. Types refer to each other by
//! [`TypeId`] only, so malformed models with inheritance cycles are representable.

pub mod builder;
pub mod lower;
pub mod role;

pub use builder::ModelGraphBuilder;
pub use role::{default_role_name, AssociationRole, Bounds, Multiplicity, Navigability, RoleOrigin};

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::span::Span;

/// Index of a type within its [`ModelGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct TypeId(u32);

impl TypeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TypeKind {
    Class {
        superclass: Option<TypeId>,
        interfaces: Vec<TypeId>,
    },
    Interface {
        extends: Vec<TypeId>,
    },
}

impl TypeKind {
    pub fn is_class(&self) -> bool {
        matches!(self, TypeKind::Class { .. })
    }

    pub fn is_interface(&self) -> bool {
        matches!(self, TypeKind::Interface { .. })
    }

    pub fn label(&self) -> &'static str {
        match self {
            TypeKind::Class { .. } => "class",
            TypeKind::Interface { .. } => "interface",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeDecl {
    pub id: TypeId,
    pub name: String,
    pub kind: TypeKind,
    /// Directly held roles: those written in the body first, then implied opposite ends.
    pub roles: Vec<AssociationRole>,
    pub span: Span,
    pub name_span: Span,
}

impl TypeDecl {
    /// Generalization edges in traversal order: superclass first, then interfaces as written.
    pub fn parents(&self) -> impl Iterator<Item = TypeId> + '_ {
        let (first, rest): (Option<TypeId>, &[TypeId]) = match &self.kind {
            TypeKind::Class { superclass, interfaces } => (*superclass, interfaces),
            TypeKind::Interface { extends } => (None, extends),
        };
        first.into_iter().chain(rest.iter().copied())
    }
}

#[derive(Debug, Clone, Default)]
pub struct ModelGraph {
    namespace: Option<String>,
    types: Vec<TypeDecl>,
    by_name: HashMap<String, TypeId>,
}

impl ModelGraph {
    pub fn builder() -> ModelGraphBuilder {
        ModelGraphBuilder::new()
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn types(&self) -> &[TypeDecl] {
        &self.types
    }

    pub fn type_ids(&self) -> impl Iterator<Item = TypeId> + '_ {
        self.types.iter().map(|t| t.id)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Panics if `id` was not issued by this graph.
    pub fn get(&self, id: TypeId) -> &TypeDecl {
        &self.types[id.index()]
    }

    pub fn name(&self, id: TypeId) -> &str {
        &self.get(id).name
    }

    pub fn lookup(&self, name: &str) -> Option<TypeId> {
        self.by_name.get(name).copied()
    }

    pub fn by_name(&self, name: &str) -> Option<&TypeDecl> {
        self.lookup(name).map(|id| self.get(id))
    }
}
