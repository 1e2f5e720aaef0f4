pub mod span;
pub mod diagnostics;
pub mod lexer;
pub mod parser;
pub mod model;
pub mod provenance;
pub mod resolve;
pub mod synth;
pub mod dedup;
pub mod generate;
pub mod backend;
pub mod config;

use std::path::{Path, PathBuf};

use serde::Serialize;

use backend::{Backend, Emission, GeneratedFile};
use diagnostics::{CompileError, Diagnostic};
use generate::{GenerateOptions, GenerationReport};
use model::{ModelGraph, TypeDecl};
use parser::ast::ModelSource;
use synth::MethodDescriptor;

/// Lex and parse model source text into its syntax tree.
pub fn parse_model(source: &str) -> Result<ModelSource, CompileError> {
    let tokens = lexer::lex(source)?;
    let mut parser = parser::Parser::new(&tokens, source);
    parser.parse_model()
}

/// Parse model source text and lower it into a [`ModelGraph`].
pub fn build_model(source: &str) -> Result<ModelGraph, CompileError> {
    let ast = parse_model(source)?;
    model::lower::build_model(&ast)
}

/// A built model together with its generation report.
pub struct Compilation {
    pub graph: ModelGraph,
    pub report: GenerationReport,
}

/// Front end plus generation for every type (lex -> parse -> lower -> resolve -> synthesize -> dedup).
pub fn compile_model(source: &str, options: &GenerateOptions) -> Result<Compilation, CompileError> {
    let graph = build_model(source)?;
    let report = generate::generate(&graph, options);
    Ok(Compilation { graph, report })
}

#[derive(Serialize)]
struct TypeJson<'a> {
    #[serde(flatten)]
    decl: &'a TypeDecl,
    failed: bool,
    methods: &'a [MethodDescriptor],
    diagnostics: &'a [Diagnostic],
}

#[derive(Serialize)]
struct CompilationJson<'a> {
    namespace: Option<&'a str>,
    types: Vec<TypeJson<'a>>,
}

impl Compilation {
    /// Machine-readable view of every type's methods and diagnostics.
    pub fn to_json(&self) -> Result<String, CompileError> {
        let types = self
            .report
            .types
            .iter()
            .map(|t| {
                TypeJson {
                    decl: self.graph.get(t.owner),
                    failed: t.is_failed(),
                    methods: t.methods(),
                    diagnostics: &t.diagnostics,
                }
            })
            .collect();
        let view = CompilationJson { namespace: self.graph.namespace(), types };
        serde_json::to_string_pretty(&view).map_err(|e| CompileError::io(format!("failed to serialize report: {e}")))
    }

    /// Files for one backend, plus any method name collisions that kept a type unwritten.
    pub fn emit(&self, backend: &dyn Backend) -> Emission {
        backend::emit(&self.graph, &self.report, backend)
    }
}

/// Write generated files under `output_dir`, creating directories as needed.
/// Returns the written paths in emission order.
pub fn write_files(output_dir: &Path, files: &[GeneratedFile]) -> Result<Vec<PathBuf>, CompileError> {
    let mut written = Vec::with_capacity(files.len());
    for file in files {
        let path = output_dir.join(&file.path);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| CompileError::io(format!("failed to create {}: {e}", parent.display())))?;
        }
        std::fs::write(&path, &file.contents)
            .map_err(|e| CompileError::io(format!("failed to write {}: {e}", path.display())))?;
        written.push(path);
    }
    Ok(written)
}
