//! Generation driver: resolve, synthesize and deduplicate every type of a model.

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::dedup::eliminate_duplicates;
use crate::diagnostics::{Diagnostic, Severity};
use crate::model::{ModelGraph, TypeId};
use crate::resolve::resolve_roles;
use crate::synth::{synthesize_all, MethodDescriptor};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Process types on the rayon thread pool.
    pub parallel: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self { parallel: true }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeReport {
    pub owner: TypeId,
    /// `None` when generation failed for this type because of a structural conflict.
    pub descriptors: Option<Vec<MethodDescriptor>>,
    /// Resolution warnings followed by structural conflicts.
    pub diagnostics: Vec<Diagnostic>,
}

impl TypeReport {
    pub fn is_failed(&self) -> bool {
        self.descriptors.is_none()
    }

    pub fn methods(&self) -> &[MethodDescriptor] {
        self.descriptors.as_deref().unwrap_or(&[])
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    /// One entry per type, in model declaration order.
    pub types: Vec<TypeReport>,
}

impl GenerationReport {
    pub fn get(&self, owner: TypeId) -> Option<&TypeReport> {
        self.types.iter().find(|t| t.owner == owner)
    }

    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.types.iter().flat_map(|t| t.diagnostics.iter())
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics().any(|d| d.severity() == Severity::Error)
    }

    pub fn has_warnings(&self) -> bool {
        self.diagnostics().any(|d| d.severity() == Severity::Warning)
    }

    pub fn failed(&self) -> impl Iterator<Item = &TypeReport> {
        self.types.iter().filter(|t| t.is_failed())
    }
}

/// Runs the whole pipeline for one type. Never fails; problems end up in the report.
pub fn generate_type(graph: &ModelGraph, owner: TypeId) -> TypeReport {
    let resolution = resolve_roles(graph, owner);
    let candidates = synthesize_all(&resolution);
    debug!(owner = graph.name(owner), candidates = candidates.len(), "synthesized method candidates");

    let deduplicated = eliminate_duplicates(graph, owner, &resolution.role_order(), candidates);

    let mut diagnostics = resolution.diagnostics;
    let descriptors = if deduplicated.is_clean() {
        Some(deduplicated.descriptors)
    } else {
        warn!(
            owner = graph.name(owner),
            conflicts = deduplicated.conflicts.len(),
            "generation failed for type"
        );
        None
    };
    diagnostics.extend(deduplicated.conflicts);

    TypeReport { owner, descriptors, diagnostics }
}

pub fn generate(graph: &ModelGraph, options: &GenerateOptions) -> GenerationReport {
    let ids: Vec<TypeId> = graph.type_ids().collect();
    let types: Vec<TypeReport> = if options.parallel {
        ids.par_iter().map(|&id| generate_type(graph, id)).collect()
    } else {
        ids.iter().map(|&id| generate_type(graph, id)).collect()
    };
    GenerationReport { types }
}
