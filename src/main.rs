use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{debug, info};

use modelc::backend::BackendKind;
use modelc::config::{self, Config};
use modelc::diagnostics::{self, CompileError, Diagnostic};
use modelc::generate::GenerateOptions;
use modelc::Compilation;

#[derive(Parser)]
#[command(name = "modelc", version, about = "Generate accessor code from class/interface models")]
struct Cli {
    /// Log pipeline progress to stderr
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate source files for every type of a model
    Generate {
        /// Model file path
        model: PathBuf,
        /// Backend to emit (repeatable): python, py or java
        #[arg(short, long = "backend", value_parser = parse_backend_arg)]
        backends: Vec<BackendKind>,
        /// Output directory
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Configuration file (defaults to modelc.toml next to the model)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Process types one at a time
        #[arg(long)]
        sequential: bool,
    },
    /// Resolve a model and print the methods of every type
    Check {
        /// Model file path
        model: PathBuf,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
        /// Configuration file (defaults to modelc.toml next to the model)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn parse_backend_arg(s: &str) -> Result<BackendKind, String> {
    BackendKind::from_name(s).ok_or_else(|| format!("unknown backend '{s}'; expected 'python' or 'java'"))
}

fn init_tracing(verbose: bool) {
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::WARN };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_max_level(level)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Generate { model, backends, output, config, sequential } => {
            let result = load(&model, config.as_deref()).and_then(|(source, mut cfg)| {
                if !backends.is_empty() {
                    cfg.backends = backends;
                }
                if let Some(output) = output {
                    cfg.output = output;
                }
                if sequential {
                    cfg.parallel = false;
                }
                run_generate(&model, &source, &cfg)
            });
            finish(&model, result)
        }
        Commands::Check { model, json, config } => {
            let result = load(&model, config.as_deref()).and_then(|(source, cfg)| run_check(&source, &cfg, json));
            finish(&model, result)
        }
    }
}

/// Outcome of a run that got past the front end.
struct Outcome {
    source: String,
    compilation: Compilation,
    /// Method name collisions found by the configured backends.
    collisions: Vec<Diagnostic>,
    deny_warnings: bool,
}

fn load(model: &Path, explicit_config: Option<&Path>) -> Result<(String, Config), (Option<String>, CompileError)> {
    let cfg = config::resolve_config(model, explicit_config).map_err(|e| (None, e))?;
    let source = std::fs::read_to_string(model)
        .map_err(|e| (None, CompileError::io(format!("cannot read {}: {e}", model.display()))))?;
    debug!(model = %model.display(), backends = cfg.backends.len(), "loaded model");
    Ok((source, cfg))
}

fn compile(source: String, cfg: &Config) -> Result<Outcome, (Option<String>, CompileError)> {
    match modelc::compile_model(&source, &GenerateOptions { parallel: cfg.parallel }) {
        Ok(compilation) => {
            Ok(Outcome { source, compilation, collisions: Vec::new(), deny_warnings: cfg.deny_warnings })
        }
        Err(err) => Err((Some(source), err)),
    }
}

fn run_generate(model: &Path, source: &str, cfg: &Config) -> Result<Outcome, (Option<String>, CompileError)> {
    let mut outcome = compile(source.to_string(), cfg)?;
    for kind in &cfg.backends {
        let emission = outcome.compilation.emit(kind.backend());
        outcome.collisions.extend(emission.diagnostics);
        let written = modelc::write_files(&cfg.output, &emission.files).map_err(|e| (None, e))?;
        for path in &written {
            info!(model = %model.display(), path = %path.display(), "wrote file");
        }
        eprintln!("{kind}: {} file(s) written to {}", written.len(), cfg.output.display());
    }
    Ok(outcome)
}

fn run_check(source: &str, cfg: &Config, json: bool) -> Result<Outcome, (Option<String>, CompileError)> {
    let mut outcome = compile(source.to_string(), cfg)?;
    for kind in &cfg.backends {
        let emission = outcome.compilation.emit(kind.backend());
        outcome.collisions.extend(emission.diagnostics);
    }
    let compilation = &outcome.compilation;
    if json {
        println!("{}", compilation.to_json().map_err(|e| (None, e))?);
        return Ok(outcome);
    }

    let graph = &compilation.graph;
    for report in &compilation.report.types {
        let decl = graph.get(report.owner);
        if report.is_failed() {
            println!("{} {} (failed)", decl.kind.label(), decl.name);
            continue;
        }
        println!("{} {}", decl.kind.label(), decl.name);
        for method in report.methods() {
            println!(
                "  {} {}: {}  [{}]",
                method.kind,
                method.role,
                method.shape.describe(graph),
                method.provenance.describe(graph).join(", ")
            );
        }
    }
    Ok(outcome)
}

fn finish(model: &Path, result: Result<Outcome, (Option<String>, CompileError)>) -> ExitCode {
    let filename = model.display().to_string();
    match result {
        Ok(outcome) => {
            let report = &outcome.compilation.report;
            for diag in report.diagnostics().chain(&outcome.collisions) {
                diagnostics::render_diagnostic(&outcome.source, diag);
            }
            let failed: Vec<&str> = report.failed().map(|t| outcome.compilation.graph.name(t.owner)).collect();
            if !failed.is_empty() {
                eprintln!("error: generation failed for {}", failed.join(", "));
                return ExitCode::FAILURE;
            }
            if !outcome.collisions.is_empty() {
                let count = outcome.collisions.len();
                eprintln!("error: {count} method name collision(s); affected types were not written");
                return ExitCode::FAILURE;
            }
            if outcome.deny_warnings && report.has_warnings() {
                eprintln!("error: warnings are denied by configuration");
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
        Err((source, err)) => {
            match source {
                Some(source) => diagnostics::render_error(&source, &filename, &err),
                None => eprintln!("error: {err}"),
            }
            ExitCode::FAILURE
        }
    }
}
