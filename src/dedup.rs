//! Duplicate elimination: one descriptor per canonical key, or a structural conflict.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::diagnostics::Diagnostic;
use crate::model::{ModelGraph, TypeId};
use crate::synth::{CanonicalKey, MethodDescriptor};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deduplicated {
    /// Ordered by role order, then get/set/add/remove. Roles in conflict are absent.
    pub descriptors: Vec<MethodDescriptor>,
    /// One structural conflict per conflicting role.
    pub conflicts: Vec<Diagnostic>,
}

impl Deduplicated {
    pub fn is_clean(&self) -> bool {
        self.conflicts.is_empty()
    }
}

pub fn eliminate_duplicates(
    graph: &ModelGraph,
    owner: TypeId,
    role_order: &[&str],
    descriptors: Vec<MethodDescriptor>,
) -> Deduplicated {
    let candidates = descriptors.len();
    let mut kept: Vec<MethodDescriptor> = Vec::new();
    let mut index: HashMap<CanonicalKey, usize> = HashMap::new();
    let mut conflicted: HashSet<String> = HashSet::new();
    let mut conflicts = Vec::new();

    for descriptor in descriptors {
        let key = descriptor.canonical_key();
        let Some(&i) = index.get(&key) else {
            index.insert(key, kept.len());
            kept.push(descriptor);
            continue;
        };

        let existing = &mut kept[i];
        if existing.shape == descriptor.shape {
            existing.provenance.merge(descriptor.provenance);
        } else if conflicted.insert(descriptor.role.clone()) {
            conflicts.push(Diagnostic::structural_conflict(
                graph.name(owner),
                &descriptor.role,
                descriptor.kind.as_str(),
                (existing.provenance.describe(graph).join(", "), existing.shape.describe(graph)),
                (descriptor.provenance.describe(graph).join(", "), descriptor.shape.describe(graph)),
                Some(descriptor.span),
            ));
        }
    }

    kept.retain(|d| !conflicted.contains(&d.role));

    let position: HashMap<&str, usize> = role_order.iter().enumerate().map(|(i, r)| (*r, i)).collect();
    kept.sort_by_key(|d| (position.get(d.role.as_str()).copied().unwrap_or(usize::MAX), d.kind));

    debug!(
        owner = graph.name(owner),
        candidates,
        kept = kept.len(),
        conflicts = conflicts.len(),
        "eliminated duplicate methods"
    );

    Deduplicated { descriptors: kept, conflicts }
}
