use crate::model::{ModelGraph, Multiplicity, TypeDecl};
use crate::synth::{MethodDescriptor, MethodKind};

use super::{singular, snake_case, Backend, BackendKind};

pub struct PythonBackend;

const HEADER: &str = "# Generated by modelc. Do not edit.\n";
const INDENT: &str = "    ";

/// Reserved words that can come out of `snake_case`, which never yields `None`, `True` or `False`.
const KEYWORDS: &[&str] = &[
    "and", "as", "assert", "async", "await", "break", "class", "continue", "def", "del", "elif", "else", "except",
    "finally", "for", "from", "global", "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass",
    "raise", "return", "try", "while", "with", "yield",
];

impl Backend for PythonBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Python
    }

    fn language_path(&self) -> &'static str {
        "py"
    }

    fn file_name(&self, ty: &TypeDecl) -> String {
        format!("{}.py", snake_case(&ty.name))
    }

    fn method_name(&self, method: &MethodDescriptor) -> String {
        method_name(method)
    }

    fn render(&self, graph: &ModelGraph, ty: &TypeDecl, methods: &[MethodDescriptor]) -> String {
        let interface = ty.kind.is_interface();
        let parents: Vec<&str> = ty.parents().map(|p| graph.name(p)).collect();

        let mut imports = Vec::new();
        if interface {
            imports.push("from abc import ABC, abstractmethod".to_string());
        }
        for parent in &parents {
            imports.push(format!("from {} import {parent}", snake_case(parent)));
        }

        let bases = if !parents.is_empty() {
            format!("({})", parents.join(", "))
        } else if interface {
            "(ABC)".to_string()
        } else {
            String::new()
        };

        let mut blocks = Vec::new();
        if !interface {
            if let Some(init) = init_block(methods) {
                blocks.push(init);
            }
        }
        for method in methods {
            blocks.push(if interface { abstract_method(method) } else { concrete_method(method) });
        }

        let mut out = String::from(HEADER);
        if !imports.is_empty() {
            out.push('\n');
            for import in &imports {
                out.push_str(import);
                out.push('\n');
            }
        }
        out.push_str(&format!("\n\nclass {}{bases}:\n", ty.name));
        if blocks.is_empty() {
            out.push_str(INDENT);
            out.push_str("pass\n");
        } else {
            out.push_str(&blocks.join("\n\n"));
            out.push('\n');
        }
        out
    }
}

fn field(method: &MethodDescriptor) -> String {
    format!("self._{}", snake_case(&method.role))
}

fn method_name(method: &MethodDescriptor) -> String {
    match method.kind {
        MethodKind::Get | MethodKind::Set => format!("{}_{}", method.kind, snake_case(&method.role)),
        MethodKind::Add | MethodKind::Remove => format!("{}_{}", method.kind, snake_case(&singular(&method.role))),
    }
}

fn param_name(method: &MethodDescriptor) -> String {
    let name = match method.kind {
        MethodKind::Add | MethodKind::Remove => snake_case(&singular(&method.role)),
        _ => snake_case(&method.role),
    };
    if KEYWORDS.contains(&name.as_str()) { format!("{name}_") } else { name }
}

fn signature(method: &MethodDescriptor) -> String {
    if method.shape.params.is_empty() {
        format!("{INDENT}def {}(self):", method_name(method))
    } else {
        format!("{INDENT}def {}(self, {}):", method_name(method), param_name(method))
    }
}

fn init_block(methods: &[MethodDescriptor]) -> Option<String> {
    let fields: Vec<String> = methods
        .iter()
        .filter(|m| m.kind == MethodKind::Get)
        .map(|m| {
            let initial = match m.multiplicity {
                Multiplicity::One => "None",
                Multiplicity::Many => "[]",
            };
            format!("{INDENT}{INDENT}{} = {initial}", field(m))
        })
        .collect();
    if fields.is_empty() {
        return None;
    }
    Some(format!("{INDENT}def __init__(self):\n{}", fields.join("\n")))
}

fn abstract_method(method: &MethodDescriptor) -> String {
    format!("{INDENT}@abstractmethod\n{}\n{INDENT}{INDENT}pass", signature(method))
}

fn concrete_method(method: &MethodDescriptor) -> String {
    let field = field(method);
    let param = param_name(method);
    let body: Vec<String> = match (method.kind, method.multiplicity) {
        (MethodKind::Get, Multiplicity::One) => vec![format!("return {field}")],
        (MethodKind::Get, Multiplicity::Many) => vec![format!("return tuple({field})")],
        (MethodKind::Set, _) => vec![format!("{field} = {param}"), "return True".to_string()],
        (MethodKind::Add, _) => vec![
            format!("if {param} in {field}:"),
            format!("{INDENT}return False"),
            format!("{field}.append({param})"),
            "return True".to_string(),
        ],
        (MethodKind::Remove, _) => vec![
            format!("if {param} not in {field}:"),
            format!("{INDENT}return False"),
            format!("{field}.remove({param})"),
            "return True".to_string(),
        ],
    };
    let mut out = signature(method);
    for line in body {
        out.push('\n');
        out.push_str(INDENT);
        out.push_str(INDENT);
        out.push_str(&line);
    }
    out
}
