#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use modelc::generate::GenerateOptions;
use modelc::Compilation;

pub fn modelc() -> Command {
    Command::new(env!("CARGO_BIN_EXE_modelc"))
}

pub fn fixture(relative: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(relative)
}

pub fn compile(source: &str) -> Compilation {
    match modelc::compile_model(source, &GenerateOptions::default()) {
        Ok(compilation) => compilation,
        Err(err) => panic!("model failed to build: {err}"),
    }
}

/// `kind:role` for every method generated for `type_name`.
pub fn methods_of(compilation: &Compilation, type_name: &str) -> Vec<String> {
    let id = compilation.graph.lookup(type_name).unwrap();
    compilation
        .report
        .get(id)
        .unwrap()
        .methods()
        .iter()
        .map(|m| format!("{}:{}", m.kind, m.role))
        .collect()
}

/// Write `source` to a model file in a fresh temp dir and return both.
pub fn model_file(source: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.ump");
    std::fs::write(&path, source).unwrap();
    (dir, path)
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}
