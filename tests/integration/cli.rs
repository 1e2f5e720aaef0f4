mod common;

use common::{fixture, model_file, modelc, stderr, stdout};

const SCHOOL: &str = "namespace school;
interface Registrable { 1 -> * Course courses; }
class Student { isA Registrable; 1 -> * Course courses; }
class Course {}
";

#[test]
fn generate_writes_one_file_per_type_and_backend() {
    let (dir, model) = model_file(SCHOOL);
    let out = dir.path().join("out");
    let output = modelc()
        .arg("generate")
        .arg(&model)
        .args(["-b", "python", "-b", "java", "-o"])
        .arg(&out)
        .output()
        .unwrap();
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    for file in ["py/registrable.py", "py/student.py", "py/course.py"] {
        assert!(out.join(file).is_file(), "missing {file}");
    }
    for file in ["java/Registrable.java", "java/Student.java", "java/Course.java"] {
        assert!(out.join(file).is_file(), "missing {file}");
    }
    let student = std::fs::read_to_string(out.join("py/student.py")).unwrap();
    assert_eq!(student.matches("def add_course(").count(), 1);
}

#[test]
fn generate_uses_config_next_to_model() {
    let (dir, model) = model_file(SCHOOL);
    std::fs::write(
        dir.path().join("modelc.toml"),
        "[generate]\nbackends = [\"java\"]\noutput = \"src-gen\"\nparallel = false\n",
    )
    .unwrap();
    let output = modelc().arg("generate").arg(&model).output().unwrap();
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(dir.path().join("src-gen/java/Student.java").is_file());
    assert!(!dir.path().join("src-gen/py").exists());
}

#[test]
fn structural_conflict_exits_non_zero_and_names_type() {
    let (dir, model) = model_file(
        "interface Registrable { 1 -> 0..1 Course courses; }
         class Student { isA Registrable; 1 -> * Course courses; }
         class Course {}",
    );
    let out = dir.path().join("out");
    let output = modelc().arg("generate").arg(&model).arg("-o").arg(&out).output().unwrap();
    assert_eq!(output.status.code(), Some(1));

    let err = stderr(&output);
    assert!(err.contains("structural-conflict"), "stderr: {err}");
    assert!(err.contains("Student -> Registrable"), "stderr: {err}");
    assert!(err.contains("generation failed for Student"), "stderr: {err}");
    assert!(!out.join("py/student.py").exists());
    assert!(out.join("py/course.py").is_file());
}

#[test]
fn method_name_collision_exits_non_zero() {
    let (dir, model) = model_file("class School { 1 -> * Course course; 1 -> * Course courses; } class Course {}");
    let out = dir.path().join("out");
    let output = modelc().arg("generate").arg(&model).arg("-o").arg(&out).output().unwrap();
    assert_eq!(output.status.code(), Some(1));

    let err = stderr(&output);
    assert!(err.contains("name-collision"), "stderr: {err}");
    assert!(err.contains("add_course"), "stderr: {err}");
    assert!(!out.join("py/school.py").exists());
    assert!(out.join("py/course.py").is_file());

    let output = modelc().arg("check").arg(&model).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn warnings_pass_unless_denied() {
    let source = "interface A { isA B; } interface B { isA A; }";
    let (dir, model) = model_file(source);
    let output = modelc().arg("check").arg(&model).output().unwrap();
    assert!(output.status.success());
    assert!(stderr(&output).contains("cyclic-inheritance"));

    std::fs::write(dir.path().join("modelc.toml"), "[diagnostics]\ndeny_warnings = true\n").unwrap();
    let output = modelc().arg("check").arg(&model).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn check_prints_methods_with_provenance() {
    let (_dir, model) = model_file(SCHOOL);
    let output = modelc().arg("check").arg(&model).output().unwrap();
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("class Student\n"));
    assert!(text.contains("  get courses: () -> many Course  [Student, Student -> Registrable]\n"));
    assert!(text.contains("  add courses: (one Course) -> bool  [Student, Student -> Registrable]\n"));
}

#[test]
fn check_json_reports_every_type() {
    let output = modelc()
        .arg("check")
        .arg(fixture("implementation/duplicate_interface_association_methods.ump"))
        .arg("--json")
        .output()
        .unwrap();
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["namespace"], "example");
    let types = json["types"].as_array().unwrap();
    assert_eq!(types.len(), 5);
    let student = types.iter().find(|t| t["name"] == "Student").unwrap();
    assert_eq!(student["failed"], false);
    assert_eq!(student["methods"].as_array().unwrap().len(), 5);
    assert_eq!(student["methods"][0]["kind"], "get");
    assert_eq!(student["methods"][0]["role"], "mentor");
}

#[test]
fn syntax_error_is_reported() {
    let (_dir, model) = model_file("class A { 1 -> }");
    let output = modelc().arg("check").arg(&model).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("syntax error"));
}

#[test]
fn unknown_backend_in_config_is_reported() {
    let (dir, model) = model_file(SCHOOL);
    std::fs::write(dir.path().join("modelc.toml"), "[generate]\nbackends = [\"cobol\"]\n").unwrap();
    let output = modelc().arg("generate").arg(&model).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("unknown backend 'cobol'"));
}

#[test]
fn missing_model_file() {
    let dir = tempfile::tempdir().unwrap();
    let output = modelc().arg("check").arg(dir.path().join("nope.ump")).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("cannot read"));
}
