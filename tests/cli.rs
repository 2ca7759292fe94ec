use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn doodler_cmd() -> Command {
    let mut cmd = Command::cargo_bin("doodler").expect("binary exists");
    cmd.env_remove("RUST_LOG");
    cmd
}

fn write_script(dir: &TempDir, text: &str) -> std::path::PathBuf {
    let path = dir.path().join("strokes.txt");
    std::fs::write(&path, text).unwrap();
    path
}

#[test]
fn doodler_help_prints_usage() {
    doodler_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Freehand drawing engine with undo/redo history",
        ));
}

#[test]
fn script_argument_is_required() {
    doodler_cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "required arguments were not provided",
        ));
}

#[test]
fn replay_prints_summary_and_writes_png() {
    let temp = TempDir::new().unwrap();
    let script = write_script(
        &temp,
        "# two strokes, one undone\n\
         width 5\n\
         color red\n\
         down 4 4\nmove 20 20\nup 40 40\n\
         alpha 128\n\
         down 4 40\nup 40 4\n\
         undo\n",
    );
    let output = temp.path().join("canvas.png");

    doodler_cmd()
        .env("XDG_CONFIG_HOME", temp.path())
        .arg(&script)
        .args(["--width", "48", "--height", "48", "--output"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Canvas 48x48: 1 visible stroke(s)"))
        .stdout(predicate::str::contains("History: 1 undo, 1 redo"))
        .stdout(predicate::str::contains("alpha 128, color Red"));

    let bytes = std::fs::read(&output).unwrap();
    assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"));
}

#[test]
fn explicit_config_sets_brush_defaults() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("doodler.toml");
    std::fs::write(
        &config,
        "[drawing]\ndefault_width = 3.0\ndefault_color = \"blue\"\n\n[surface]\nwidth = 32\nheight = 16\n",
    )
    .unwrap();
    let script = write_script(&temp, "down 1 1\nup 10 10\n");

    doodler_cmd()
        .arg(&script)
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Canvas 32x16: 1 visible stroke(s)"))
        .stdout(predicate::str::contains("width 3.0, alpha 255, color Blue"));
}

#[test]
fn bad_script_line_is_reported() {
    let temp = TempDir::new().unwrap();
    let script = write_script(&temp, "down 1 1\nup 2 2\nsmudge 3 3\n");

    doodler_cmd()
        .env("XDG_CONFIG_HOME", temp.path())
        .arg(&script)
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 3: unknown command 'smudge'"));
}

#[test]
fn missing_script_fails() {
    let temp = TempDir::new().unwrap();

    doodler_cmd()
        .env("XDG_CONFIG_HOME", temp.path())
        .arg(temp.path().join("nope.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read script"));
}

#[test]
fn schema_dump_lists_sections() {
    Command::cargo_bin("dump_config_schema")
        .expect("binary exists")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"drawing\""))
        .stdout(predicate::str::contains("\"history\""));
}
