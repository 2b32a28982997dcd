use std::io::Write;
use std::process::Command;

fn binary() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_todo-timer"));
    command.env("RUST_LOG", "error");
    command
}

#[test]
fn dry_run_with_demo_config_succeeds() {
    let config_path = format!("{}/../../demos/config.yaml", env!("CARGO_MANIFEST_DIR"));

    let output = binary()
        .args(["--mode", "cli", "--dry-run", "--config"])
        .arg(config_path)
        .output()
        .expect("Failed to start todo-timer binary");

    assert!(
        output.status.success(),
        "Process exited with non-zero status: {}\nStdout: {}\nStderr: {}",
        output.status,
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn dry_run_rejects_invalid_config() {
    let mut file = tempfile::NamedTempFile::new().expect("tempfile");
    writeln!(file, "timer:\n  duration_secs: 0").expect("write");

    let output = binary()
        .args(["--dry-run", "--config"])
        .arg(file.path())
        .output()
        .expect("Failed to start todo-timer binary");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("duration_secs"), "stderr: {stderr}");
}

#[test]
fn dry_run_rejects_missing_explicit_config() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = binary()
        .args(["--dry-run", "--config"])
        .arg(dir.path().join("missing.yaml"))
        .output()
        .expect("Failed to start todo-timer binary");

    assert!(!output.status.success());
}
