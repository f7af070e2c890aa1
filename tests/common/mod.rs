#![allow(dead_code)]

use assert_cmd::Command;
use std::path::Path;

pub fn academia_cmd() -> Command {
    let mut cmd = Command::cargo_bin("academia").unwrap();
    cmd.env_remove("ACADEMIA_ROOT");
    cmd.env_remove("ACADEMIA_LOG");
    cmd
}

/// Run a command inside `root` and return its trimmed stdout
pub fn run_in(root: &Path, args: &[&str]) -> String {
    let output = academia_cmd()
        .current_dir(root)
        .args(args)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "command {:?} failed:\n{}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).unwrap().trim().to_string()
}

/// Enroll a student and return the generated record id
pub fn add_student(root: &Path, name: &str, email: &str, student_id: &str, class: &str) -> String {
    let stdout = run_in(
        root,
        &[
            "student",
            "add",
            "--name",
            name,
            "--email",
            email,
            "--student-id",
            student_id,
            "--class",
            class,
        ],
    );
    // "Added student <name> (<id>)"
    stdout
        .rsplit('(')
        .next()
        .unwrap()
        .trim_end_matches(')')
        .to_string()
}

/// Add a teacher for class 10A and log in as them, so attendance and marks
/// can be recorded
pub fn login_teacher(root: &Path) {
    run_in(
        root,
        &[
            "teacher",
            "add",
            "--name",
            "Tess",
            "--email",
            "tess@x.com",
            "--teacher-id",
            "T0",
            "--department",
            "Math",
            "--classes",
            "10A",
        ],
    );
    run_in(root, &["login", "--email", "tess@x.com", "--role", "teacher"]);
}
