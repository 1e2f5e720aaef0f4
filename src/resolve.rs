//! Association role resolution.
//!
//! For one owning type, collects every role it must support: the roles it holds itself and
//! those held by each ancestor reachable through superclass, implemented-interface and
//! extended-interface edges. Candidates naming the same role for the same target are one
//! logical association and are merged into a single [`ResolvedRole`].
//!
//! Declarations from the owner's own family (the owner and its superclasses, or every
//! ancestor when the owner is an interface) collapse into one realizing declaration; the
//! most-derived one wins a multiplicity disagreement. Interface declarations seen from a
//! class are contracts and are kept separate so that duplicate elimination can check their
//! method shapes against the realization.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::diagnostics::Diagnostic;
use crate::model::{AssociationRole, ModelGraph, TypeId};
use crate::provenance::{DeclPath, Discarded, Provenance};

/// One declaration of a role that survives resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleDeclaration {
    pub role: AssociationRole,
    pub provenance: Provenance,
    /// Declared on an interface and seen from a class.
    pub contract: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRole {
    pub name: String,
    pub target: TypeId,
    /// The realizing declaration (if any) first, then contracts in traversal order.
    pub declarations: Vec<RoleDeclaration>,
}

impl ResolvedRole {
    pub fn effective(&self) -> &RoleDeclaration {
        &self.declarations[0]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleResolution {
    pub owner: TypeId,
    /// In order of first appearance during traversal, the owner's own roles first.
    pub roles: Vec<ResolvedRole>,
    pub diagnostics: Vec<Diagnostic>,
}

impl RoleResolution {
    /// Role names in resolution order; a name shared by two targets appears once.
    pub fn role_order(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.roles
            .iter()
            .map(|r| r.name.as_str())
            .filter(|name| seen.insert(*name))
            .collect()
    }
}

struct Candidate {
    role: AssociationRole,
    path: DeclPath,
}

struct Collector<'g> {
    graph: &'g ModelGraph,
    owner: TypeId,
    visited: HashSet<TypeId>,
    stack: Vec<TypeId>,
    candidates: Vec<Candidate>,
    diagnostics: Vec<Diagnostic>,
}

impl Collector<'_> {
    fn visit(&mut self, id: TypeId) {
        let graph = self.graph;
        self.visited.insert(id);
        self.stack.push(id);

        let decl = graph.get(id);
        for role in &decl.roles {
            self.candidates.push(Candidate {
                role: role.clone(),
                path: DeclPath::new(self.stack.clone(), role.origin),
            });
        }

        for parent in decl.parents() {
            if let Some(pos) = self.stack.iter().position(|&t| t == parent) {
                let mut cycle: Vec<&str> = self.stack[pos..].iter().map(|&t| graph.name(t)).collect();
                cycle.push(graph.name(parent));
                self.diagnostics.push(Diagnostic::cyclic_inheritance(
                    graph.name(self.owner),
                    &cycle,
                    Some(decl.name_span),
                ));
                continue;
            }
            if self.visited.contains(&parent) {
                continue;
            }
            self.visit(parent);
        }

        self.stack.pop();
    }
}

pub fn resolve_roles(graph: &ModelGraph, owner: TypeId) -> RoleResolution {
    let mut collector = Collector {
        graph,
        owner,
        visited: HashSet::new(),
        stack: Vec::new(),
        candidates: Vec::new(),
        diagnostics: Vec::new(),
    };
    collector.visit(owner);
    let Collector { candidates, mut diagnostics, visited, .. } = collector;

    let mut groups: Vec<Vec<Candidate>> = Vec::new();
    let mut index: HashMap<(String, TypeId), usize> = HashMap::new();
    for candidate in candidates {
        let key = (candidate.role.name.clone(), candidate.role.target);
        match index.get(&key) {
            Some(&i) => groups[i].push(candidate),
            None => {
                index.insert(key, groups.len());
                groups.push(vec![candidate]);
            }
        }
    }

    let owner_is_class = graph.get(owner).kind.is_class();
    let roles: Vec<ResolvedRole> = groups
        .into_iter()
        .map(|group| merge_group(graph, owner, owner_is_class, group, &mut diagnostics))
        .collect();

    debug!(
        owner = graph.name(owner),
        ancestors = visited.len() - 1,
        roles = roles.len(),
        "resolved association roles"
    );

    RoleResolution { owner, roles, diagnostics }
}

fn merge_group(
    graph: &ModelGraph,
    owner: TypeId,
    owner_is_class: bool,
    group: Vec<Candidate>,
    diagnostics: &mut Vec<Diagnostic>,
) -> ResolvedRole {
    let name = group[0].role.name.clone();
    let target = group[0].role.target;

    let (contracts, realizing): (Vec<Candidate>, Vec<Candidate>) = group
        .into_iter()
        .partition(|c| owner_is_class && graph.get(c.path.holder()).kind.is_interface());

    let mut declarations = Vec::new();
    let mut realizing = realizing.into_iter();
    if let Some(winner) = realizing.next() {
        let mut provenance = Provenance::from_path(winner.path.clone());
        for other in realizing {
            if other.role.multiplicity != winner.role.multiplicity {
                diagnostics.push(Diagnostic::multiplicity_tie_break(
                    graph.name(owner),
                    &name,
                    (winner.path.describe(graph).as_str(), bounds_label(&winner.role).as_str()),
                    (other.path.describe(graph).as_str(), bounds_label(&other.role).as_str()),
                    Some(other.role.span),
                ));
                provenance.discarded.push(Discarded {
                    path: other.path.clone(),
                    bounds: other.role.bounds,
                    multiplicity: other.role.multiplicity,
                });
            }
            provenance.add_path(other.path);
        }
        declarations.push(RoleDeclaration { role: winner.role, provenance, contract: false });
    }

    for contract in contracts {
        declarations.push(RoleDeclaration {
            role: contract.role,
            provenance: Provenance::from_path(contract.path),
            contract: true,
        });
    }

    ResolvedRole { name, target, declarations }
}

fn bounds_label(role: &AssociationRole) -> String {
    format!("{} ({})", role.multiplicity, role.bounds)
}
