use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn span(line: usize, col: usize) -> serde_json::Value {
    json!({ "start": 0, "end": 0, "line": line, "col": col })
}

/// A module directory with an api/ history and one generic package.
fn module(go_mod: Option<&str>) -> TempDir {
    let dir = TempDir::new().unwrap();
    let api = dir.path().join("api");
    fs::create_dir(&api).unwrap();
    fs::write(api.join("go1.16.txt"), "pkg io/fs, func ValidPath(string) bool\n").unwrap();
    fs::write(api.join("go1.18.txt"), "pkg net/netip, type Addr struct\n").unwrap();

    let package = json!({
        "path": "example.com/m",
        "module": "example.com/m",
        "units": [{
            "filename": "main.go",
            "decls": [{
                "decl": "Func",
                "span": span(3, 1),
                "name": { "id": 0, "span": span(3, 6), "name": "F" },
                "ty": {
                    "type_params": [{
                        "names": [{ "id": 1, "span": span(3, 8), "name": "T" }],
                        "ty": { "id": 2, "span": span(3, 10), "kind": { "expr": "Ident", "name": "any" } }
                    }]
                },
                "body": {
                    "span": span(3, 25),
                    "stmts": [{ "span": span(4, 2), "kind": { "stmt": "Return" } }]
                }
            }]
        }]
    });
    let pkg_dir = dir.path().join("pkg");
    fs::create_dir(&pkg_dir).unwrap();
    fs::write(pkg_dir.join("m.gomin.json"), package.to_string()).unwrap();

    if let Some(go_mod) = go_mod {
        fs::write(dir.path().join("go.mod"), go_mod).unwrap();
    }
    dir
}

fn lookup(dir: &Path, package: &str, name: &str) -> Command {
    let mut cmd = Command::cargo_bin("gomin").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd.arg("lookup")
        .arg(package)
        .arg(name)
        .arg("--api")
        .arg(dir.join("api"))
        .arg("--release")
        .arg("18");
    cmd
}

fn scan(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("gomin").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd.arg("scan")
        .arg(dir)
        .arg("--api")
        .arg(dir.join("api"))
        .arg("--release")
        .arg("18")
        .arg("--deps")
        .arg("none");
    cmd
}

#[test]
fn test_cli_scan_reports_version_and_evidence() {
    let dir = module(None);
    scan(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("go 1.18"))
        .stdout(predicate::str::contains("main.go:3:1: generic func decl"));
}

#[test]
fn test_cli_scan_json() {
    let dir = module(None);
    let output = scan(dir.path()).arg("--json").output().unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["version"], 18);
    assert_eq!(value["evidence"]["description"], "generic func decl");
}

#[test]
fn test_cli_scan_explain() {
    let dir = module(None);
    scan(dir.path())
        .arg("--explain")
        .assert()
        .success()
        .stdout(predicate::str::contains("example.com/m"))
        .stdout(predicate::str::contains("(module)"))
        .stdout(predicate::str::contains("1.18"));
}

#[test]
fn test_cli_scan_empty_directory() {
    let dir = module(None);
    fs::remove_dir_all(dir.path().join("pkg")).unwrap();
    scan(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("go 1.0"));
}

#[test]
fn test_cli_check_passes_with_newer_declared_version() {
    let dir = module(Some("module example.com/m\n\ngo 1.20\n"));
    scan(dir.path()).arg("--check").assert().success();
}

#[test]
fn test_cli_check_fails_with_older_declared_version() {
    let dir = module(Some("module example.com/m\n\ngo 1.16\n"));
    scan(dir.path())
        .arg("--check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("1.16"))
        .stderr(predicate::str::contains("1.18"));
}

#[test]
fn test_cli_strict_check() {
    let dir = module(Some("module example.com/m\n\ngo 1.20\n"));
    scan(dir.path()).arg("--strict").assert().failure();

    let dir = module(Some("module example.com/m\n\ngo 1.18\n"));
    scan(dir.path()).arg("--strict").assert().success();
}

#[test]
fn test_cli_check_without_go_mod() {
    let dir = module(None);
    scan(dir.path())
        .arg("--check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("needs a go.mod"));
}

#[test]
fn test_cli_invalid_go_mod() {
    let dir = module(Some("module example.com/m\ngo banana\n"));
    scan(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid go version 'banana'"));
}

#[test]
fn test_cli_stale_history() {
    let dir = module(None);
    let mut cmd = Command::cargo_bin("gomin").unwrap();
    cmd.arg("scan")
        .arg(dir.path())
        .arg("--api")
        .arg(dir.path().join("api"))
        .arg("--release")
        .arg("19");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains(
            "History is for Go 1.18 but the current release is Go 1.19",
        ));
}

#[test]
fn test_cli_lookup() {
    let dir = module(None);
    lookup(dir.path(), "io/fs", "ValidPath")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"io/fs\".ValidPath: go 1.16"));
}

#[test]
fn test_cli_lookup_unknown_symbol() {
    let dir = module(None);
    lookup(dir.path(), "io/fs", "Nope")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not in the history"));
}
