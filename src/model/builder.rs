//! Programmatic construction of a [`ModelGraph`] without going through source text.

use super::lower::build_model;
use super::role::Bounds;
use super::ModelGraph;
use crate::diagnostics::CompileError;
use crate::lexer::is_keyword;
use crate::parser::ast::{AssociationDecl, Direction, ModelSource, TypeDef, TypeDefKind};
use crate::span::Spanned;

#[derive(Debug, Default)]
pub struct ModelGraphBuilder {
    source: ModelSource,
}

impl ModelGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn namespace(&mut self, namespace: &str) -> &mut Self {
        self.source.namespace = Some(Spanned::dummy(namespace.to_string()));
        self
    }

    pub fn class(&mut self, name: &str) -> TypeBuilder<'_> {
        self.add(TypeDefKind::Class, name)
    }

    pub fn interface(&mut self, name: &str) -> TypeBuilder<'_> {
        self.add(TypeDefKind::Interface, name)
    }

    fn add(&mut self, kind: TypeDefKind, name: &str) -> TypeBuilder<'_> {
        self.source.types.push(Spanned::dummy(TypeDef {
            kind,
            name: Spanned::dummy(name.to_string()),
            is_a: Vec::new(),
            associations: Vec::new(),
        }));
        let last = self.source.types.len() - 1;
        TypeBuilder { def: &mut self.source.types[last].node }
    }

    /// Resolves names exactly like source lowering does. Type names must be
    /// writable in model source, so keywords are rejected.
    pub fn build(&self) -> Result<ModelGraph, CompileError> {
        if let Some(def) = self.source.types.iter().find(|t| is_keyword(&t.node.name.node)) {
            let name = &def.node.name;
            return Err(CompileError::model(
                format!("'{}' is a keyword and cannot name a type", name.node),
                name.span,
            ));
        }
        build_model(&self.source)
    }
}

pub struct TypeBuilder<'b> {
    def: &'b mut TypeDef,
}

impl TypeBuilder<'_> {
    pub fn is_a(self, parent: &str) -> Self {
        self.def.is_a.push(Spanned::dummy(parent.to_string()));
        self
    }

    /// A role navigable only from this type: `1 -> bounds Target name;`
    pub fn role(self, name: &str, target: &str, bounds: Bounds) -> Self {
        self.association(AssociationDecl {
            owner_bound: Spanned::dummy(Bounds::one()),
            owner_role: None,
            direction: Direction::Forward,
            target_bound: Spanned::dummy(bounds),
            target: Spanned::dummy(target.to_string()),
            target_role: Some(Spanned::dummy(name.to_string())),
        })
    }

    pub fn association(self, decl: AssociationDecl) -> Self {
        self.def.associations.push(Spanned::dummy(decl));
        self
    }
}
