use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::backend::BackendKind;
use crate::diagnostics::CompileError;

pub const CONFIG_FILE: &str = "modelc.toml";

/// Resolved run configuration. Paths are absolute or relative to the working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub backends: Vec<BackendKind>,
    pub output: PathBuf,
    pub parallel: bool,
    pub deny_warnings: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backends: vec![BackendKind::Python],
            output: PathBuf::from("generated"),
            parallel: true,
            deny_warnings: false,
        }
    }
}

// ---- TOML deserialization types ----

#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct TomlConfig {
    #[serde(default)]
    generate: TomlGenerate,
    #[serde(default)]
    diagnostics: TomlDiagnostics,
}

#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct TomlGenerate {
    backends: Option<Vec<String>>,
    output: Option<String>,
    parallel: Option<bool>,
}

#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct TomlDiagnostics {
    #[serde(default)]
    deny_warnings: bool,
}

fn unknown_backend(name: &str) -> String {
    let expected: Vec<&str> = BackendKind::ALL.iter().map(|b| b.name()).collect();
    format!("unknown backend '{name}'; expected one of {}", expected.join(", "))
}

/// Parse config text. `base_dir` anchors a relative `output` path.
pub fn parse_config(text: &str, path: &Path, base_dir: &Path) -> Result<Config, CompileError> {
    let raw: TomlConfig = toml::from_str(text)
        .map_err(|e| CompileError::config(format!("invalid {CONFIG_FILE}: {}", e.message()), path.to_path_buf()))?;

    let mut config = Config::default();
    if let Some(names) = raw.generate.backends {
        if names.is_empty() {
            return Err(CompileError::config("at least one backend must be listed", path.to_path_buf()));
        }
        let mut backends = Vec::with_capacity(names.len());
        for name in &names {
            let kind = BackendKind::from_name(name)
                .ok_or_else(|| CompileError::config(unknown_backend(name), path.to_path_buf()))?;
            if !backends.contains(&kind) {
                backends.push(kind);
            }
        }
        config.backends = backends;
    }
    config.output = base_dir.join(raw.generate.output.as_deref().unwrap_or("generated"));
    if let Some(parallel) = raw.generate.parallel {
        config.parallel = parallel;
    }
    config.deny_warnings = raw.diagnostics.deny_warnings;
    Ok(config)
}

pub fn load_config(path: &Path) -> Result<Config, CompileError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| CompileError::config(format!("cannot read {}: {e}", path.display()), path.to_path_buf()))?;
    let base_dir = path.parent().unwrap_or(Path::new("."));
    parse_config(&text, path, base_dir)
}

/// `modelc.toml` in the model file's directory, if present.
pub fn find_config(model_path: &Path) -> Option<PathBuf> {
    let dir = model_path.parent().unwrap_or(Path::new("."));
    let candidate = dir.join(CONFIG_FILE);
    candidate.is_file().then_some(candidate)
}

/// Explicit `--config` wins, then a config next to the model, then defaults
/// (output directory next to the model).
pub fn resolve_config(model_path: &Path, explicit: Option<&Path>) -> Result<Config, CompileError> {
    if let Some(path) = explicit {
        return load_config(path);
    }
    match find_config(model_path) {
        Some(path) => load_config(&path),
        None => {
            let dir = model_path.parent().unwrap_or(Path::new("."));
            Ok(Config { output: dir.join("generated"), ..Config::default() })
        }
    }
}
