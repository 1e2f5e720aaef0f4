//! Backend emission: turns deduplicated method descriptors into target-language source.
//!
//! Renderers only ever see the final descriptor set of a type, so a method can reach the
//! output at most once no matter how many modeling paths produced it. Distinct roles can
//! still render to one method name (`course` and `courses` both give `add_course`); such
//! types are reported and left unwritten.

pub mod java;
pub mod python;

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::PathBuf;

use tracing::warn;

use crate::diagnostics::Diagnostic;
use crate::generate::GenerationReport;
use crate::model::{ModelGraph, TypeDecl};
use crate::synth::MethodDescriptor;

pub trait Backend: Send + Sync {
    fn kind(&self) -> BackendKind;

    fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// Directory tag for generated files and per-backend fixtures, e.g. `py`.
    fn language_path(&self) -> &'static str;

    fn file_name(&self, ty: &TypeDecl) -> String;

    /// Name of the emitted method for a descriptor, e.g. `add_course` or `addCourse`.
    fn method_name(&self, method: &MethodDescriptor) -> String;

    fn render(&self, graph: &ModelGraph, ty: &TypeDecl, methods: &[MethodDescriptor]) -> String;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    Python,
    Java,
}

impl BackendKind {
    pub const ALL: [BackendKind; 2] = [BackendKind::Python, BackendKind::Java];

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "python" | "py" => Some(BackendKind::Python),
            "java" => Some(BackendKind::Java),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            BackendKind::Python => "python",
            BackendKind::Java => "java",
        }
    }

    pub fn backend(self) -> &'static dyn Backend {
        match self {
            BackendKind::Python => &python::PythonBackend,
            BackendKind::Java => &java::JavaBackend,
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub backend: BackendKind,
    /// Relative to the output directory: `<language_path>/<file_name>`.
    pub path: PathBuf,
    pub contents: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Emission {
    pub files: Vec<GeneratedFile>,
    /// Method name collisions. Types listed here have no file.
    pub diagnostics: Vec<Diagnostic>,
}

impl Emission {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Renders every successfully generated type. Types that failed generation, or whose
/// methods collide by name in this backend, produce no file.
pub fn emit(graph: &ModelGraph, report: &GenerationReport, backend: &dyn Backend) -> Emission {
    let mut emission = Emission::default();
    for type_report in &report.types {
        let Some(methods) = type_report.descriptors.as_deref() else {
            continue;
        };
        let ty = graph.get(type_report.owner);

        let collisions = name_collisions(backend, ty, methods);
        if !collisions.is_empty() {
            warn!(
                owner = ty.name.as_str(),
                backend = backend.name(),
                collisions = collisions.len(),
                "method names collide, type not emitted"
            );
            emission.diagnostics.extend(collisions);
            continue;
        }

        emission.files.push(GeneratedFile {
            backend: backend.kind(),
            path: PathBuf::from(backend.language_path()).join(backend.file_name(ty)),
            contents: backend.render(graph, ty, methods),
        });
    }
    emission
}

/// One diagnostic per rendered name claimed by more than one role.
fn name_collisions(backend: &dyn Backend, ty: &TypeDecl, methods: &[MethodDescriptor]) -> Vec<Diagnostic> {
    let mut seen: HashMap<String, &MethodDescriptor> = HashMap::new();
    let mut reported = HashSet::new();
    let mut collisions = Vec::new();
    for method in methods {
        let name = backend.method_name(method);
        match seen.get(&name).copied() {
            Some(first) if first.role != method.role => {
                if reported.insert(name.clone()) {
                    collisions.push(Diagnostic::name_collision(
                        &ty.name,
                        backend.name(),
                        &name,
                        &first.role,
                        &method.role,
                        Some(method.span),
                    ));
                }
            }
            Some(_) => {}
            None => {
                seen.insert(name, method);
            }
        }
    }
    collisions
}

/// Looks a backend up by its configuration name (`python`, `py` or `java`).
pub fn from_name(name: &str) -> Option<&'static dyn Backend> {
    BackendKind::from_name(name).map(BackendKind::backend)
}

// ---- Naming helpers shared by renderers ----

/// `courses` -> `course`, `categories` -> `category`. Names that do not look plural are kept.
pub fn singular(name: &str) -> String {
    if let Some(stem) = name.strip_suffix("ies") {
        if !stem.is_empty() {
            return format!("{stem}y");
        }
    }
    match name.strip_suffix('s') {
        Some(stem) if !stem.is_empty() && !stem.ends_with('s') => stem.to_string(),
        _ => name.to_string(),
    }
}

pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `GraduateStudent` -> `graduate_student`, `IStudent` -> `i_student`.
pub fn snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            let prev = if i > 0 { Some(chars[i - 1]) } else { None };
            let next = chars.get(i + 1).copied();
            let boundary = match prev {
                Some(p) if p.is_lowercase() || p.is_ascii_digit() => true,
                Some(p) if p.is_uppercase() => next.is_some_and(|n| n.is_lowercase()),
                _ => false,
            };
            if boundary {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}
