//! Declaration paths recorded on resolved roles and method descriptors.
//!
//! Provenance is carried for diagnostics only. It never takes part in deciding whether two
//! descriptors are the same method.

use serde::Serialize;

use crate::model::{Bounds, ModelGraph, Multiplicity, RoleOrigin, TypeId};

/// The chain of types from the owning type down to the type holding a role declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeclPath {
    /// Owner first, holder last. A role held directly by the owner has a single entry.
    pub types: Vec<TypeId>,
    pub origin: RoleOrigin,
}

impl DeclPath {
    pub fn new(types: Vec<TypeId>, origin: RoleOrigin) -> Self {
        debug_assert!(!types.is_empty());
        Self { types, origin }
    }

    pub fn holder(&self) -> TypeId {
        self.types[self.types.len() - 1]
    }

    pub fn is_direct(&self) -> bool {
        self.types.len() == 1
    }

    /// `Student -> Registrable`, with a note for implied opposite ends.
    pub fn describe(&self, graph: &ModelGraph) -> String {
        let chain = self
            .types
            .iter()
            .map(|&id| graph.name(id))
            .collect::<Vec<_>>()
            .join(" -> ");
        match self.origin {
            RoleOrigin::Declared => chain,
            RoleOrigin::OppositeEnd { declared_in } => {
                format!("{chain} (opposite end of association in {})", graph.name(declared_in))
            }
        }
    }
}

/// A realizing declaration that lost a multiplicity tie-break.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Discarded {
    pub path: DeclPath,
    pub bounds: Bounds,
    pub multiplicity: Multiplicity,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Provenance {
    pub paths: Vec<DeclPath>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub discarded: Vec<Discarded>,
}

impl Provenance {
    pub fn from_path(path: DeclPath) -> Self {
        Self { paths: vec![path], discarded: Vec::new() }
    }

    pub fn add_path(&mut self, path: DeclPath) {
        if !self.paths.contains(&path) {
            self.paths.push(path);
        }
    }

    /// Appends `other`'s paths and discarded alternatives not already present, keeping first-seen order.
    pub fn merge(&mut self, other: Provenance) {
        for path in other.paths {
            self.add_path(path);
        }
        for discarded in other.discarded {
            if !self.discarded.contains(&discarded) {
                self.discarded.push(discarded);
            }
        }
    }

    pub fn describe(&self, graph: &ModelGraph) -> Vec<String> {
        self.paths.iter().map(|p| p.describe(graph)).collect()
    }
}
