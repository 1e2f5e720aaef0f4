pub mod record;

pub use record::{Diagnostic, DiagnosticKind, Severity};

use crate::span::Span;
use std::path::PathBuf;
use thiserror::Error;

/// Failures that abort a run before or after generation proper.
///
/// Problems found while resolving a well-formed model are never `CompileError`s;
/// they are reported as [`Diagnostic`] records attached to the affected type.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("Syntax error: {msg}")]
    Syntax { msg: String, span: Span },

    #[error("Model error: {msg}")]
    Model { msg: String, span: Span },

    #[error("Config error: {msg}")]
    Config { msg: String, path: PathBuf },

    #[error("I/O error: {msg}")]
    Io { msg: String },
}

impl CompileError {
    pub fn syntax(msg: impl Into<String>, span: Span) -> Self {
        Self::Syntax { msg: msg.into(), span }
    }

    pub fn model(msg: impl Into<String>, span: Span) -> Self {
        Self::Model { msg: msg.into(), span }
    }

    pub fn config(msg: impl Into<String>, path: PathBuf) -> Self {
        Self::Config { msg: msg.into(), path }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self::Io { msg: msg.into() }
    }

    pub fn span(&self) -> Option<Span> {
        match self {
            CompileError::Syntax { span, .. } | CompileError::Model { span, .. } => Some(*span),
            _ => None,
        }
    }
}

/// Render a CompileError with ariadne for nice terminal output.
pub fn render_error(source: &str, filename: &str, err: &CompileError) {
    use ariadne::{Config, Label, Report, ReportKind, Source};

    match err {
        CompileError::Syntax { msg, span } | CompileError::Model { msg, span } => {
            let kind_str = match err {
                CompileError::Syntax { .. } => "syntax",
                _ => "model",
            };
            let _ = Report::build(ReportKind::Error, (), span.start)
                .with_config(Config::default().with_color(false))
                .with_message(format!("{kind_str} error in {filename}"))
                .with_label(Label::new(span.start..span.end).with_message(msg))
                .finish()
                .eprint(Source::from(source));
        }
        CompileError::Config { msg, path } => {
            eprintln!("error[config]: {msg}");
            eprintln!("  --> {}", path.display());
        }
        CompileError::Io { msg } => {
            eprintln!("error: {msg}");
        }
    }
}

/// Render a generation diagnostic, pointing at the offending declaration when it has a span.
pub fn render_diagnostic(source: &str, diag: &Diagnostic) {
    use ariadne::{Config, Label, Report, ReportKind, Source};

    let Some(span) = diag.span else {
        eprintln!("{diag}");
        for chain in &diag.chains {
            eprintln!("  = via {chain}");
        }
        return;
    };

    let kind = match diag.kind.severity() {
        Severity::Warning => ReportKind::Warning,
        Severity::Error => ReportKind::Error,
    };
    let mut report = Report::build(kind, (), span.start)
        .with_config(Config::default().with_color(false))
        .with_message(format!("[{}] {}", diag.kind, diag.owner))
        .with_label(Label::new(span.start..span.end).with_message(&diag.message));
    for chain in &diag.chains {
        report = report.with_note(format!("via {chain}"));
    }
    let _ = report.finish().eprint(Source::from(source));
}
