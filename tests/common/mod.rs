use assert_cmd::Command;
use std::path::Path;

pub fn survey_cmd() -> Command {
    let mut cmd = Command::cargo_bin("survey").unwrap();
    cmd.env_remove("SURVEY_ROOT");
    cmd.env_remove("SURVEY_BACKEND");
    cmd.env_remove("SURVEY_LOG");
    cmd
}

/// Initialize a workspace at `path` with the given backend
#[allow(dead_code)]
pub fn init_workspace(path: &Path, backend: &str) {
    survey_cmd()
        .arg("init")
        .arg(path)
        .arg("--backend")
        .arg(backend)
        .assert()
        .success();
}

/// Run `survey add` inside `path`
#[allow(dead_code)]
pub fn add(path: &Path, email: &str, flag: &str, number: &str) -> assert_cmd::assert::Assert {
    survey_cmd()
        .current_dir(path)
        .args(["add", email, flag, number])
        .assert()
}
