use std::fmt;

use serde::Serialize;

use super::TypeId;
use crate::span::Span;

/// Written multiplicity bounds of one association end, e.g. `0..1` or `1..*`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Bounds {
    pub lower: u32,
    /// `None` is the unbounded `*`.
    pub upper: Option<u32>,
}

impl Bounds {
    pub fn new(lower: u32, upper: Option<u32>) -> Self {
        Self { lower, upper }
    }

    pub fn one() -> Self {
        Self::new(1, Some(1))
    }

    pub fn optional() -> Self {
        Self::new(0, Some(1))
    }

    pub fn many() -> Self {
        Self::new(0, None)
    }

    pub fn multiplicity(self) -> Multiplicity {
        match self.upper {
            Some(upper) if upper <= 1 => Multiplicity::One,
            _ => Multiplicity::Many,
        }
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.lower, self.upper) {
            (0, None) => write!(f, "*"),
            (lower, None) => write!(f, "{lower}..*"),
            (lower, Some(upper)) if lower == upper => write!(f, "{lower}"),
            (lower, Some(upper)) => write!(f, "{lower}..{upper}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Multiplicity {
    One,
    Many,
}

impl fmt::Display for Multiplicity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Multiplicity::One => f.write_str("one"),
            Multiplicity::Many => f.write_str("many"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Navigability {
    Navigable,
    NonNavigable,
}

impl Navigability {
    pub fn from_flag(navigable: bool) -> Self {
        if navigable { Navigability::Navigable } else { Navigability::NonNavigable }
    }
}

/// Where a role came from when it is attached to its holding type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoleOrigin {
    /// Written in the body of the holding type.
    Declared,
    /// Implied by a bidirectional association written in another type.
    OppositeEnd { declared_in: TypeId },
}

/// One endpoint of an association as seen from the type holding it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssociationRole {
    pub name: String,
    pub target: TypeId,
    pub bounds: Bounds,
    pub multiplicity: Multiplicity,
    pub navigability: Navigability,
    /// The type whose role list holds this role; inheriting types see it through their ancestors.
    pub declared_in: TypeId,
    pub origin: RoleOrigin,
    pub span: Span,
}

impl AssociationRole {
    pub fn is_navigable(&self) -> bool {
        self.navigability == Navigability::Navigable
    }
}

/// `Course` -> `course`, or `courses` when many-valued.
pub fn default_role_name(type_name: &str, multiplicity: Multiplicity) -> String {
    let mut chars = type_name.chars();
    let mut name = match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect::<String>(),
        None => String::new(),
    };
    if multiplicity == Multiplicity::Many {
        name.push('s');
    }
    name
}
