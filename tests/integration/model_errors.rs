use modelc::diagnostics::CompileError;

fn model_error(source: &str) -> String {
    match modelc::build_model(source) {
        Err(err @ CompileError::Model { .. }) => err.to_string(),
        Err(other) => panic!("expected a model error, got {other}"),
        Ok(_) => panic!("model unexpectedly built"),
    }
}

fn syntax_error(source: &str) -> String {
    match modelc::build_model(source) {
        Err(err @ CompileError::Syntax { .. }) => err.to_string(),
        Err(other) => panic!("expected a syntax error, got {other}"),
        Ok(_) => panic!("model unexpectedly built"),
    }
}

#[test]
fn duplicate_type() {
    assert_eq!(model_error("class A {} interface A {}"), "Model error: duplicate type 'A'");
}

#[test]
fn unknown_parent() {
    assert_eq!(model_error("class A { isA B; }"), "Model error: unknown type 'B' in isA list of 'A'");
}

#[test]
fn unknown_association_target() {
    assert_eq!(
        model_error("class A { 1 -> * Course courses; }"),
        "Model error: unknown type 'Course' in association of 'A'"
    );
}

#[test]
fn two_superclasses() {
    assert_eq!(
        model_error("class A {} class B {} class C { isA A, B; }"),
        "Model error: class 'C' cannot extend both 'A' and 'B'"
    );
}

#[test]
fn interface_extending_class() {
    assert_eq!(
        model_error("class A {} interface I { isA A; }"),
        "Model error: interface 'I' cannot extend class 'A'"
    );
}

#[test]
fn repeated_parent() {
    assert_eq!(
        model_error("interface I {} class C { isA I, I; }"),
        "Model error: type 'I' appears multiple times in isA list of 'C'"
    );
}

#[test]
fn bad_bounds() {
    assert_eq!(syntax_error("class A { 1 -> 0 A a; }"), "Syntax error: upper bound must be at least 1");
    assert_eq!(
        syntax_error("class A { 1 -> 3..2 A a; }"),
        "Syntax error: lower bound 3 exceeds upper bound 2"
    );
}

#[test]
fn missing_arrow() {
    assert!(syntax_error("class A { 1 * A a; }").starts_with("Syntax error: expected association arrow"));
}

#[test]
fn errors_carry_spans() {
    let source = "class A { isA Missing; }";
    let err = modelc::build_model(source).unwrap_err();
    let span = err.span().unwrap();
    assert_eq!(&source[span.start..span.end], "Missing");
}
