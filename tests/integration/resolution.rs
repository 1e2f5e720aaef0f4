mod common;

use common::{compile, methods_of};
use modelc::diagnostics::DiagnosticKind;

#[test]
fn class_and_interface_declaring_same_role_yield_one_pair() {
    let c = compile(
        "interface Registrable { * -> 0..1 Mentor mentor; }
         class Student { isA Registrable; * -> 0..1 Mentor mentor; }
         class Mentor {}",
    );
    assert_eq!(methods_of(&c, "Student"), vec!["get:mentor", "set:mentor"]);

    let student = c.graph.lookup("Student").unwrap();
    let report = c.report.get(student).unwrap();
    assert!(report.diagnostics.is_empty());
    for method in report.methods() {
        assert_eq!(method.provenance.describe(&c.graph), vec!["Student", "Student -> Registrable"]);
    }
}

#[test]
fn roles_inherited_from_interface_alone_are_generated() {
    let c = compile(
        "interface Registrable { 1 -> * Course courses; }
         class Student { isA Registrable; }
         class Course {}",
    );
    assert_eq!(methods_of(&c, "Student"), vec!["get:courses", "add:courses", "remove:courses"]);
    assert_eq!(methods_of(&c, "Registrable"), vec!["get:courses", "add:courses", "remove:courses"]);
}

#[test]
fn diamond_contributes_each_role_once() {
    let c = compile(
        "interface Named { 1 -> 1 Label label; }
         interface Left { isA Named; }
         interface Right { isA Named; }
         class Item { isA Left, Right; }
         class Label {}",
    );
    assert_eq!(methods_of(&c, "Item"), vec!["get:label", "set:label"]);
    let item = c.graph.lookup("Item").unwrap();
    let get = &c.report.get(item).unwrap().methods()[0];
    assert_eq!(get.provenance.describe(&c.graph), vec!["Item -> Left -> Named"]);
}

#[test]
fn superclass_chain_is_followed_before_interfaces() {
    let c = compile(
        "interface Tagged { 1 -> * Tag tags; }
         class Person { 1 -> 0..1 Address home; }
         class Student { isA Tagged, Person; 1 -> * Course courses; }
         class Address {} class Tag {} class Course {}",
    );
    assert_eq!(
        methods_of(&c, "Student"),
        vec![
            "get:courses",
            "add:courses",
            "remove:courses",
            "get:home",
            "set:home",
            "get:tags",
            "add:tags",
            "remove:tags",
        ]
    );
}

#[test]
fn non_navigable_roles_produce_no_methods() {
    let c = compile("class Order { 1 <- * Line lines; } class Line {}");
    assert!(methods_of(&c, "Order").is_empty());
    // the reverse-navigable association puts a navigable role on Line
    assert_eq!(methods_of(&c, "Line"), vec!["get:order", "set:order"]);
}

#[test]
fn bidirectional_association_gives_both_ends_accessors() {
    let c = compile("class Mentor { 0..1 -- * Student students; } class Student {}");
    assert_eq!(methods_of(&c, "Mentor"), vec!["get:students", "add:students", "remove:students"]);
    assert_eq!(methods_of(&c, "Student"), vec!["get:mentor", "set:mentor"]);

    let student = c.graph.lookup("Student").unwrap();
    let get = &c.report.get(student).unwrap().methods()[0];
    assert_eq!(
        get.provenance.describe(&c.graph),
        vec!["Student (opposite end of association in Mentor)"]
    );
}

#[test]
fn subclass_multiplicity_wins_tie_break_with_warning() {
    let c = compile(
        "class Base { 1 -> * M ms; }
         class Sub { isA Base; 1 -> 0..1 M ms; }
         class M {}",
    );
    assert_eq!(methods_of(&c, "Sub"), vec!["get:ms", "set:ms"]);

    let sub = c.graph.lookup("Sub").unwrap();
    let report = c.report.get(sub).unwrap();
    assert!(!report.is_failed());
    assert_eq!(report.diagnostics.len(), 1);
    let warning = &report.diagnostics[0];
    assert_eq!(warning.kind, DiagnosticKind::MultiplicityTieBreak);
    insta::assert_snapshot!(
        warning.message,
        @"role 'ms' is declared with multiplicity one (0..1) via Sub and many (*) via Sub -> Base; using one (0..1)"
    );
    let discarded = &report.methods()[0].provenance.discarded;
    assert_eq!(discarded.len(), 1);
    assert_eq!(discarded[0].path.describe(&c.graph), "Sub -> Base");
}

#[test]
fn cyclic_inheritance_terminates_with_warning_for_each_type() {
    let c = compile("interface A { isA B; 1 -> 1 T a; } interface B { isA A; 1 -> 1 T b; } class T {}");
    assert_eq!(methods_of(&c, "A"), vec!["get:a", "set:a", "get:b", "set:b"]);
    assert_eq!(methods_of(&c, "B"), vec!["get:b", "set:b", "get:a", "set:a"]);

    for (name, cycle) in [("A", "inheritance cycle A -> B -> A"), ("B", "inheritance cycle B -> A -> B")] {
        let id = c.graph.lookup(name).unwrap();
        let diagnostics = &c.report.get(id).unwrap().diagnostics;
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind, DiagnosticKind::CyclicInheritance);
        assert_eq!(diagnostics[0].message, cycle);
    }
    assert!(!c.report.has_errors());
}

#[test]
fn repeated_runs_are_identical() {
    let src = "interface I { 1 -> * M ms; } class C { isA I; 1 -> 1 M m; 1 -> * M ms; } class M {}";
    let first = compile(src);
    let second = compile(src);
    assert_eq!(first.report, second.report);
}
