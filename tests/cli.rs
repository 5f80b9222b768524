use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::tempdir;

const SOURCE: &str = "a\nfunction foo() {\n  return 1;\n}\nb\n";

fn fnsplice(args: &[&str], cwd: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_fnsplice"))
        .args(args)
        .current_dir(cwd)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn setup(dir: &Path) {
    fs::write(dir.join("game.ts"), SOURCE).unwrap();
    fs::write(dir.join("block.ts"), "function foo() { return 2; }\n").unwrap();
}

#[test]
fn test_replaced_exits_zero() {
    let dir = tempdir().unwrap();
    setup(dir.path());

    let out = fnsplice(
        &["-t", "game.ts", "-m", "function foo", "-r", "block.ts"],
        dir.path(),
    );

    assert!(out.status.success());
    assert_eq!(
        String::from_utf8_lossy(&out.stdout),
        "Replaced function from line 2 to 4\n"
    );
    assert_eq!(
        fs::read_to_string(dir.path().join("game.ts")).unwrap(),
        "a\nfunction foo() { return 2; }\nb\n"
    );
}

#[test]
fn test_not_found_exits_zero_and_explains_when_verbose() {
    let dir = tempdir().unwrap();
    setup(dir.path());

    let out = fnsplice(
        &["-t", "game.ts", "-m", "function nope", "-r", "block.ts", "--verbose"],
        dir.path(),
    );

    assert!(out.status.success());
    assert_eq!(
        String::from_utf8_lossy(&out.stdout),
        "Function not found\nmarker 'function nope' does not occur in the document\n"
    );
    assert_eq!(fs::read_to_string(dir.path().join("game.ts")).unwrap(), SOURCE);
}

#[test]
fn test_missing_target_exits_non_zero() {
    let dir = tempdir().unwrap();
    setup(dir.path());

    let out = fnsplice(
        &["-t", "absent.ts", "-m", "function foo", "-r", "block.ts"],
        dir.path(),
    );

    assert!(!out.status.success());
    assert!(out.stdout.is_empty());
    assert!(String::from_utf8_lossy(&out.stderr).contains("Failed to patch"));
}

#[test]
fn test_bad_recipe_exits_non_zero() {
    let dir = tempdir().unwrap();
    setup(dir.path());
    fs::write(dir.path().join("fix.toml"), "target = \"game.ts\"\n").unwrap();

    let out = fnsplice(&["fix.toml"], dir.path());

    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("Failed to load patch recipe"));
}

#[test]
fn test_json_replaces_text_output() {
    let dir = tempdir().unwrap();
    setup(dir.path());

    let out = fnsplice(
        &["-t", "game.ts", "-m", "function foo", "-r", "block.ts", "--json", "--dry-run"],
        dir.path(),
    );

    assert!(out.status.success());
    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(json["outcome"], "replaced");
    assert_eq!(json["dry_run"], true);
    assert_eq!(json["written"], false);
    assert_eq!(fs::read_to_string(dir.path().join("game.ts")).unwrap(), SOURCE);
}
