use crate::model::{ModelGraph, Multiplicity, TypeDecl, TypeId, TypeKind};
use crate::synth::{MethodDescriptor, MethodKind};

use super::{capitalize, singular, Backend, BackendKind};

pub struct JavaBackend;

const HEADER: &str = "// Generated by modelc. Do not edit.\n";
const INDENT: &str = "  ";

const KEYWORDS: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const", "continue",
    "default", "do", "double", "else", "enum", "extends", "false", "final", "finally", "float", "for", "goto", "if",
    "implements", "import", "instanceof", "int", "interface", "long", "native", "new", "null", "package", "private",
    "protected", "public", "return", "short", "static", "strictfp", "super", "switch", "synchronized", "this",
    "throw", "throws", "transient", "true", "try", "void", "volatile", "while",
];

impl Backend for JavaBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Java
    }

    fn language_path(&self) -> &'static str {
        "java"
    }

    fn file_name(&self, ty: &TypeDecl) -> String {
        format!("{}.java", ty.name)
    }

    fn method_name(&self, method: &MethodDescriptor) -> String {
        method_name(method)
    }

    fn render(&self, graph: &ModelGraph, ty: &TypeDecl, methods: &[MethodDescriptor]) -> String {
        let interface = ty.kind.is_interface();
        let has_many = methods.iter().any(|m| m.kind == MethodKind::Get && m.multiplicity == Multiplicity::Many);

        let imports: &[&str] = match (has_many, interface) {
            (false, _) => &[],
            (true, true) => &["java.util.List"],
            (true, false) => &["java.util.ArrayList", "java.util.Collections", "java.util.List"],
        };

        let mut out = String::from(HEADER);
        if let Some(namespace) = graph.namespace() {
            out.push_str(&format!("package {namespace};\n"));
        }
        if !imports.is_empty() {
            out.push('\n');
            for import in imports {
                out.push_str(&format!("import {import};\n"));
            }
        }
        out.push('\n');
        out.push_str(&declaration(graph, ty));
        out.push_str("\n{\n");

        let blocks: Vec<String> = if interface {
            methods.iter().map(|m| format!("{INDENT}{};", signature(graph, m))).collect()
        } else {
            class_blocks(graph, ty, methods)
        };
        if !blocks.is_empty() {
            out.push_str(&blocks.join("\n\n"));
            out.push('\n');
        }
        out.push_str("}\n");
        out
    }
}

fn join_names(graph: &ModelGraph, ids: &[TypeId]) -> String {
    ids.iter().map(|&id| graph.name(id)).collect::<Vec<_>>().join(", ")
}

fn declaration(graph: &ModelGraph, ty: &TypeDecl) -> String {
    match &ty.kind {
        TypeKind::Class { superclass, interfaces } => {
            let mut decl = format!("public class {}", ty.name);
            if let Some(superclass) = superclass {
                decl.push_str(&format!(" extends {}", graph.name(*superclass)));
            }
            if !interfaces.is_empty() {
                decl.push_str(&format!(" implements {}", join_names(graph, interfaces)));
            }
            decl
        }
        TypeKind::Interface { extends } if extends.is_empty() => format!("public interface {}", ty.name),
        TypeKind::Interface { extends } => format!("public interface {} extends {}", ty.name, join_names(graph, extends)),
    }
}

fn value_type(graph: &ModelGraph, method: &MethodDescriptor) -> String {
    let target = graph.name(method.target);
    match method.multiplicity {
        Multiplicity::One => target.to_string(),
        Multiplicity::Many => format!("List<{target}>"),
    }
}

/// Backing field for a role; reserved words get a trailing underscore.
fn field_name(method: &MethodDescriptor) -> String {
    if KEYWORDS.contains(&method.role.as_str()) {
        format!("{}_", method.role)
    } else {
        method.role.clone()
    }
}

fn method_name(method: &MethodDescriptor) -> String {
    match method.kind {
        MethodKind::Get | MethodKind::Set => format!("{}{}", method.kind, capitalize(&method.role)),
        MethodKind::Add | MethodKind::Remove => format!("{}{}", method.kind, capitalize(&singular(&method.role))),
    }
}

fn param_name(method: &MethodDescriptor) -> String {
    match method.kind {
        MethodKind::Add | MethodKind::Remove => format!("a{}", capitalize(&singular(&method.role))),
        _ => format!("a{}", capitalize(&method.role)),
    }
}

/// Return type, name and parameters, without modifiers.
fn signature(graph: &ModelGraph, method: &MethodDescriptor) -> String {
    match method.kind {
        MethodKind::Get => format!("{} {}()", value_type(graph, method), method_name(method)),
        _ => format!(
            "boolean {}({} {})",
            method_name(method),
            graph.name(method.target),
            param_name(method)
        ),
    }
}

fn class_blocks(graph: &ModelGraph, ty: &TypeDecl, methods: &[MethodDescriptor]) -> Vec<String> {
    let getters: Vec<&MethodDescriptor> = methods.iter().filter(|m| m.kind == MethodKind::Get).collect();
    let mut blocks = Vec::new();
    if !getters.is_empty() {
        let fields: Vec<String> = getters
            .iter()
            .map(|m| format!("{INDENT}private {} {};", value_type(graph, m), field_name(m)))
            .collect();
        blocks.push(fields.join("\n"));
    }

    let initializers: Vec<String> = getters
        .iter()
        .filter(|m| m.multiplicity == Multiplicity::Many)
        .map(|m| format!("{INDENT}{INDENT}{} = new ArrayList<{}>();", field_name(m), graph.name(m.target)))
        .collect();
    if !initializers.is_empty() {
        blocks.push(format!(
            "{INDENT}public {}()\n{INDENT}{{\n{}\n{INDENT}}}",
            ty.name,
            initializers.join("\n")
        ));
    }

    for method in methods {
        let body = method_body(method);
        let lines: Vec<String> = body.iter().map(|l| format!("{INDENT}{INDENT}{l}")).collect();
        blocks.push(format!(
            "{INDENT}public {}\n{INDENT}{{\n{}\n{INDENT}}}",
            signature(graph, method),
            lines.join("\n")
        ));
    }
    blocks
}

fn method_body(method: &MethodDescriptor) -> Vec<String> {
    let field = field_name(method);
    let param = param_name(method);
    match (method.kind, method.multiplicity) {
        (MethodKind::Get, Multiplicity::One) => vec![format!("return {field};")],
        (MethodKind::Get, Multiplicity::Many) => vec![format!("return Collections.unmodifiableList({field});")],
        (MethodKind::Set, _) => vec![format!("{field} = {param};"), "return true;".to_string()],
        (MethodKind::Add, _) => vec![
            format!("if ({field}.contains({param}))"),
            "{".to_string(),
            format!("{INDENT}return false;"),
            "}".to_string(),
            format!("{field}.add({param});"),
            "return true;".to_string(),
        ],
        (MethodKind::Remove, _) => vec![format!("return {field}.remove({param});")],
    }
}
