use crate::model::Bounds;
use crate::span::Spanned;

/// A parsed model source file, before names are resolved into a graph.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelSource {
    pub namespace: Option<Spanned<String>>,
    pub types: Vec<Spanned<TypeDef>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeDefKind {
    Class,
    Interface,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeDef {
    pub kind: TypeDefKind,
    pub name: Spanned<String>,
    /// Every name listed in `isA` clauses, in source order.
    pub is_a: Vec<Spanned<String>>,
    pub associations: Vec<Spanned<AssociationDecl>>,
}

/// Which ends of an association can be navigated to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// `--`
    Both,
    /// `->`: owner to target only
    Forward,
    /// `<-`: target to owner only
    Backward,
}

impl Direction {
    pub fn owner_navigable(self) -> bool {
        matches!(self, Direction::Both | Direction::Forward)
    }

    pub fn target_navigable(self) -> bool {
        matches!(self, Direction::Both | Direction::Backward)
    }
}

/// `<owner_bound> [owner_role] <arrow> <target_bound> Target [target_role];`
#[derive(Debug, Clone, PartialEq)]
pub struct AssociationDecl {
    pub owner_bound: Spanned<Bounds>,
    pub owner_role: Option<Spanned<String>>,
    pub direction: Direction,
    pub target_bound: Spanned<Bounds>,
    pub target: Spanned<String>,
    pub target_role: Option<Spanned<String>>,
}
