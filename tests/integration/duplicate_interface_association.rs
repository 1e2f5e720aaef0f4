mod common;

use common::{compile, fixture};
use modelc::backend::{self, Backend};

/// (backend name, fixture directory, expected file for `Student`, accessor names expected once in it)
const BACKENDS: &[(&str, &str, &str, &[&str])] = &[
    (
        "python",
        "py",
        "student.py",
        &["def get_mentor(", "def set_mentor(", "def get_courses(", "def add_course(", "def remove_course("],
    ),
    (
        "java",
        "java",
        "Student.java",
        &[" getMentor(", " setMentor(", " getCourses(", " addCourse(", " removeCourse("],
    ),
];

#[test]
fn duplicate_interface_association_methods() {
    let source = std::fs::read_to_string(fixture("implementation/duplicate_interface_association_methods.ump")).unwrap();
    let compilation = compile(&source);
    assert!(!compilation.report.has_errors());
    assert!(!compilation.report.has_warnings());

    for &(name, language_path, expected_file, accessors) in BACKENDS {
        let backend: &dyn Backend = backend::from_name(name).unwrap();
        assert_eq!(backend.language_path(), language_path);

        let emission = compilation.emit(backend);
        assert!(emission.is_clean(), "{name}: {:?}", emission.diagnostics);
        let files = emission.files;
        assert_eq!(files.len(), 5, "{name}: one file per type");

        for file in &files {
            for accessor in accessors {
                let count = file.contents.matches(accessor).count();
                assert!(count <= 1, "{name}: {accessor} appears {count} times in {}", file.path.display());
            }
        }

        let student = files
            .iter()
            .find(|f| f.path.file_name().is_some_and(|n| n == expected_file))
            .unwrap_or_else(|| panic!("{name}: no {expected_file} generated"));
        for accessor in accessors {
            assert_eq!(student.contents.matches(accessor).count(), 1, "{name}: {accessor}");
        }

        let expected =
            std::fs::read_to_string(fixture(&format!("implementation/{language_path}/{expected_file}"))).unwrap();
        assert_eq!(student.contents, expected, "{name}: generated {expected_file} differs from fixture");
    }
}
