//! Advisory records produced while resolving, deduplicating and emitting a single type.

use std::fmt;

use serde::Serialize;

use crate::span::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticKind {
    /// A generalization edge leads back onto the traversal stack.
    CyclicInheritance,
    /// Inherited declarations of one role disagree on multiplicity; the most-derived won.
    MultiplicityTieBreak,
    /// Two declarations of one canonical key produce different method shapes.
    StructuralConflict,
    /// Two roles render to the same method name in one backend.
    NameCollision,
}

impl DiagnosticKind {
    pub fn severity(self) -> Severity {
        match self {
            DiagnosticKind::CyclicInheritance | DiagnosticKind::MultiplicityTieBreak => Severity::Warning,
            DiagnosticKind::StructuralConflict | DiagnosticKind::NameCollision => Severity::Error,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DiagnosticKind::CyclicInheritance => "cyclic-inheritance",
            DiagnosticKind::MultiplicityTieBreak => "multiplicity-tie-break",
            DiagnosticKind::StructuralConflict => "structural-conflict",
            DiagnosticKind::NameCollision => "name-collision",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => f.write_str("warning"),
            Severity::Error => f.write_str("error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Name of the type being generated when the problem was found.
    pub owner: String,
    pub role: Option<String>,
    pub kind: DiagnosticKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
    /// Declaration paths involved, rendered as `A -> B -> C`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub chains: Vec<String>,
}

impl Diagnostic {
    pub fn cyclic_inheritance(owner: &str, cycle: &[&str], span: Option<Span>) -> Self {
        Self {
            owner: owner.to_string(),
            role: None,
            kind: DiagnosticKind::CyclicInheritance,
            message: format!("inheritance cycle {}", cycle.join(" -> ")),
            span,
            chains: Vec::new(),
        }
    }

    pub fn multiplicity_tie_break(
        owner: &str,
        role: &str,
        kept: (&str, &str),
        discarded: (&str, &str),
        span: Option<Span>,
    ) -> Self {
        Self {
            owner: owner.to_string(),
            role: Some(role.to_string()),
            kind: DiagnosticKind::MultiplicityTieBreak,
            message: format!(
                "role '{}' is declared with multiplicity {} via {} and {} via {}; using {}",
                role, kept.1, kept.0, discarded.1, discarded.0, kept.1
            ),
            span,
            chains: vec![kept.0.to_string(), discarded.0.to_string()],
        }
    }

    pub fn structural_conflict(
        owner: &str,
        role: &str,
        method: &str,
        first: (String, String),
        second: (String, String),
        span: Option<Span>,
    ) -> Self {
        Self {
            owner: owner.to_string(),
            role: Some(role.to_string()),
            kind: DiagnosticKind::StructuralConflict,
            message: format!(
                "conflicting declarations of role '{}': method '{}' is {} via {} but {} via {}",
                role, method, first.1, first.0, second.1, second.0
            ),
            span,
            chains: vec![first.0, second.0],
        }
    }

    pub fn name_collision(
        owner: &str,
        backend: &str,
        method: &str,
        first_role: &str,
        second_role: &str,
        span: Option<Span>,
    ) -> Self {
        Self {
            owner: owner.to_string(),
            role: Some(second_role.to_string()),
            kind: DiagnosticKind::NameCollision,
            message: format!(
                "{backend} method '{method}' would be generated for both role '{first_role}' and role '{second_role}'"
            ),
            span,
            chains: Vec::new(),
        }
    }

    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }

    pub fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}] {}: {}", self.severity(), self.kind, self.owner, self.message)
    }
}
