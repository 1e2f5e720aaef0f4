// Property tests for the generation pipeline.
//
// Models are generated from a small vocabulary so that role names, targets and
// inheritance edges collide often. Interfaces may extend each other in cycles.

use std::collections::HashSet;

use proptest::prelude::*;

use modelc::generate::{generate, GenerateOptions};
use modelc::model::ModelGraph;

const ROLE_NAMES: &[&str] = &["items", "owner", "tags"];
const BOUNDS: &[&str] = &["1", "0..1", "*", "1..*", "2..5"];
const ARROWS: &[&str] = &["--", "->", "<-"];

#[derive(Debug, Clone)]
struct TypeSpec {
    interface: bool,
    parents: Vec<usize>,
    roles: Vec<(usize, usize, usize, usize)>,
}

fn type_spec(count: usize) -> impl Strategy<Value = TypeSpec> {
    (
        any::<bool>(),
        prop::collection::vec(0..count, 0..3),
        prop::collection::vec((0..ROLE_NAMES.len(), 0..count, 0..BOUNDS.len(), 0..ARROWS.len()), 0..4),
    )
        .prop_map(|(interface, parents, roles)| TypeSpec { interface, parents, roles })
}

fn model_source() -> impl Strategy<Value = String> {
    (2usize..7).prop_flat_map(|count| prop::collection::vec(type_spec(count), count)).prop_map(render_model)
}

/// Drops isA edges the front end would reject so every generated model builds.
fn render_model(specs: Vec<TypeSpec>) -> String {
    let name = |i: usize| format!("T{i}");
    let mut out = String::new();
    for (i, spec) in specs.iter().enumerate() {
        let mut parents = Vec::new();
        let mut has_superclass = false;
        for &p in &spec.parents {
            if p == i || parents.contains(&p) {
                continue;
            }
            let parent_is_class = !specs[p].interface;
            if parent_is_class && (spec.interface || has_superclass) {
                continue;
            }
            has_superclass |= parent_is_class;
            parents.push(p);
        }

        out.push_str(if spec.interface { "interface " } else { "class " });
        out.push_str(&name(i));
        out.push_str(" {\n");
        if !parents.is_empty() {
            let list: Vec<String> = parents.iter().map(|&p| name(p)).collect();
            out.push_str(&format!("  isA {};\n", list.join(", ")));
        }
        for &(role, target, bound, arrow) in &spec.roles {
            out.push_str(&format!(
                "  1 {} {} {} {};\n",
                ARROWS[arrow],
                BOUNDS[bound],
                name(target),
                ROLE_NAMES[role]
            ));
        }
        out.push_str("}\n");
    }
    out
}

fn build(source: &str) -> ModelGraph {
    match modelc::build_model(source) {
        Ok(graph) => graph,
        Err(err) => panic!("generated model failed to build: {err}\n{source}"),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Every successfully generated type has at most one method per canonical key.
    #[test]
    fn prop_canonical_keys_are_unique(source in model_source()) {
        let graph = build(&source);
        let report = generate(&graph, &GenerateOptions::default());
        for type_report in &report.types {
            let Some(descriptors) = &type_report.descriptors else { continue };
            let mut keys = HashSet::new();
            for d in descriptors {
                prop_assert_eq!(d.owner, type_report.owner);
                prop_assert!(keys.insert(d.canonical_key()), "duplicate {} {} in\n{}", d.kind, d.role, source);
            }
        }
    }

    /// Failed types carry an error; successful ones never do.
    #[test]
    fn prop_failure_iff_structural_conflict(source in model_source()) {
        let graph = build(&source);
        let report = generate(&graph, &GenerateOptions::default());
        for type_report in &report.types {
            let has_error = type_report.diagnostics.iter().any(|d| d.is_error());
            prop_assert_eq!(type_report.is_failed(), has_error);
        }
    }

    /// Runs are deterministic, and thread scheduling does not change the result.
    #[test]
    fn prop_generation_is_idempotent(source in model_source()) {
        let graph = build(&source);
        let first = generate(&graph, &GenerateOptions { parallel: true });
        let second = generate(&graph, &GenerateOptions { parallel: true });
        let sequential = generate(&graph, &GenerateOptions { parallel: false });
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(&first, &sequential);
    }

    /// Methods of one role are contiguous and in get/set/add/remove order.
    #[test]
    fn prop_methods_grouped_by_role_in_kind_order(source in model_source()) {
        let graph = build(&source);
        let report = generate(&graph, &GenerateOptions::default());
        for type_report in &report.types {
            let methods = type_report.methods();
            let mut finished: HashSet<&str> = HashSet::new();
            for pair in methods.windows(2) {
                if pair[0].role == pair[1].role {
                    prop_assert!(pair[0].kind < pair[1].kind);
                } else {
                    finished.insert(pair[0].role.as_str());
                    prop_assert!(!finished.contains(pair[1].role.as_str()));
                }
            }
        }
    }
}
