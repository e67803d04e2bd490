#![recursion_limit = "256"]

use gomin::*;
use serde_json::{json, Value};

fn span(line: usize, col: usize) -> Value {
    json!({ "start": 0, "end": 0, "line": line, "col": col })
}

fn ident(id: u64, line: usize, name: &str) -> Value {
    json!({ "id": id, "span": span(line, 6), "kind": { "expr": "Ident", "name": name } })
}

/// `func F[T comparable]() { return }` as a loader would emit it.
fn generic_func_package() -> Value {
    json!({
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
                        "ty": ident(2, 3, "comparable")
                    }]
                },
                "body": {
                    "span": span(3, 25),
                    "stmts": [{ "span": span(4, 2), "kind": { "stmt": "Return" } }]
                }
            }]
        }]
    })
}

#[test]
fn test_end_to_end_generic_function() {
    let package: Package = serde_json::from_value(generic_func_package()).unwrap();
    let history = History::default();

    let finding = scan(&package.units, &history).unwrap();
    assert_eq!(finding.version, 18);
    assert_eq!(finding.to_string(), "main.go:3:1: 18 (generic func decl)");
}

#[test]
fn test_unknown_node_kind_is_rejected() {
    let mut package = generic_func_package();
    package["units"][0]["decls"][0]["body"]["stmts"][0]["kind"] = json!({ "stmt": "Unless" });
    package["units"][0]["decls"][0]["ty"] = json!({});

    let package: Package = serde_json::from_value(package).unwrap();
    let err = scan(&package.units, &History::default()).unwrap_err();
    assert_eq!(err.to_string(), "Unknown statement shape at main.go:4:2");
}

#[test]
fn test_history_symbol_through_json() {
    // var x = fs.ValidPath
    let mut b = UnitBuilder::new("main.go");
    let pkg = b.use_of(
        "fs",
        Symbol::package_level("example.com/m", "fs", SymbolKind::PkgName { path: "io/fs".into() }),
    );
    let sel = b.selector(
        pkg,
        "ValidPath",
        Some(Symbol::package_level("io/fs", "ValidPath", SymbolKind::Func)),
    );
    b.set_type(&sel, TypeAndValue::value(Type::signature()));
    let call = b.call(sel, vec![]);
    b.var("x", None, vec![call]);
    let unit = b.build();

    let json = serde_json::to_string(&unit).unwrap();
    let unit: Unit = serde_json::from_str(&json).unwrap();

    let history = History::from_releases([(16, "pkg io/fs, func ValidPath(string) bool\n")], 16).unwrap();
    let finding = scan(&[unit], &history).unwrap();
    assert_eq!(finding.version, 16);
    assert_eq!(finding.description(), Some("\"io/fs\".ValidPath"));
}

#[test]
fn test_finding_serializes_with_evidence() {
    let finding = Finding::annotated(21, "a.go", Span::at(2, 3), "use of min builtin");
    let value = serde_json::to_value(&finding).unwrap();
    assert_eq!(value["version"], 21);
    assert_eq!(value["evidence"]["file"], "a.go");
    assert_eq!(value["evidence"]["description"], "use of min builtin");

    let bare = serde_json::to_value(Finding::bare(4)).unwrap();
    assert_eq!(bare, json!({ "version": 4 }));
}

struct FixedFetcher(std::path::PathBuf);

impl Fetcher for FixedFetcher {
    fn fetch(&self, _requirement: &Requirement) -> GominResult<std::path::PathBuf> {
        Ok(self.0.clone())
    }
}

#[test]
fn test_scan_with_deps() {
    let dir = tempfile::tempdir().unwrap();
    let go_mod = dir.path().join("go.mod");
    std::fs::write(&go_mod, "module example.com/dep\n\ngo 1.22.0\n").unwrap();
    let fetcher = FixedFetcher(go_mod);

    let manifest = Manifest::parse(
        "module example.com/m\ngo 1.22\nrequire example.com/dep v1.0.0 // indirect\n",
        "go.mod",
    )
    .unwrap();
    let package: Package = serde_json::from_value(generic_func_package()).unwrap();
    let history = History::default();

    let all = scan_with_deps(
        &package.units,
        &history,
        &fetcher,
        &manifest,
        DepsMode::All,
        None,
    )
    .unwrap();
    assert_eq!(all.version, 22);

    let direct = scan_with_deps(
        &package.units,
        &history,
        &fetcher,
        &manifest,
        DepsMode::Direct,
        None,
    )
    .unwrap();
    assert_eq!(direct.version, 18);
}

#[test]
fn test_dependency_floor_alone() {
    let dir = tempfile::tempdir().unwrap();
    let go_mod = dir.path().join("go.mod");
    std::fs::write(&go_mod, "module example.com/dep\ngo 1.16\n").unwrap();
    let fetcher = FixedFetcher(go_mod);

    let manifest =
        Manifest::parse("module example.com/m\nrequire example.com/dep v0.1.0\n", "go.mod").unwrap();
    let finding =
        scan_with_deps(&[], &History::default(), &fetcher, &manifest, DepsMode::All, None).unwrap();
    assert_eq!(finding.version, 16);
    assert!(finding.evidence.is_none());
}

/// ```go
/// func main() {
///     outer: for {
///         x <<= s
///         for range xs { continue outer }
///         n++
///     }
///     return
/// }
/// ```
fn loop_package() -> Value {
    let int = json!({ "type": "basic", "kind": "int" });
    json!({
        "path": "example.com/m",
        "units": [{
            "filename": "main.go",
            "decls": [{
                "decl": "Func",
                "span": span(3, 1),
                "name": { "id": 0, "span": span(3, 6), "name": "main" },
                "ty": {},
                "body": {
                    "span": span(3, 13),
                    "stmts": [
                        {
                            "span": span(4, 2),
                            "kind": {
                                "stmt": "Labeled",
                                "label": { "id": 1, "span": span(4, 2), "name": "outer" },
                                "body": {
                                    "span": span(4, 9),
                                    "kind": {
                                        "stmt": "For",
                                        "body": {
                                            "span": span(4, 13),
                                            "stmts": [
                                                {
                                                    "span": span(5, 3),
                                                    "kind": {
                                                        "stmt": "Assign",
                                                        "lhs": [ident(2, 5, "x")],
                                                        "op": "<<=",
                                                        "rhs": [ident(3, 5, "s")]
                                                    }
                                                },
                                                {
                                                    "span": span(6, 3),
                                                    "kind": {
                                                        "stmt": "Range",
                                                        "x": ident(4, 6, "xs"),
                                                        "body": {
                                                            "span": span(6, 18),
                                                            "stmts": [{
                                                                "span": span(6, 20),
                                                                "kind": {
                                                                    "stmt": "Branch",
                                                                    "tok": "continue",
                                                                    "label": { "id": 5, "span": span(6, 29), "name": "outer" }
                                                                }
                                                            }]
                                                        }
                                                    }
                                                },
                                                {
                                                    "span": span(7, 3),
                                                    "kind": { "stmt": "IncDec", "x": ident(6, 7, "n"), "inc": true }
                                                }
                                            ]
                                        }
                                    }
                                }
                            }
                        },
                        { "span": span(9, 2), "kind": { "stmt": "Return" } }
                    ]
                }
            }],
            "info": {
                "types": {
                    "3": { "mode": "value", "ty": int.clone() },
                    "4": { "mode": "value", "ty": { "type": "slice", "elem": int } }
                }
            }
        }]
    })
}

#[test]
fn test_end_to_end_statements() {
    let package: Package = serde_json::from_value(loop_package()).unwrap();

    let finding = scan(&package.units, &History::default()).unwrap();
    assert_eq!(finding.version, 13);
    let evidence = finding.evidence.unwrap();
    assert_eq!(evidence.description, "signed shift count");
    assert_eq!(evidence.span.line, 5);
}

#[test]
fn test_labeled_statement_json_shape() {
    let package: Package = serde_json::from_value(loop_package()).unwrap();
    let value = serde_json::to_value(&package.units[0]).unwrap();
    let labeled = &value["decls"][0]["body"]["stmts"][0]["kind"];
    assert_eq!(labeled["stmt"], "Labeled");
    assert_eq!(labeled["label"]["name"], "outer");
    assert_eq!(labeled["body"]["kind"]["stmt"], "For");

    let unit: Unit = serde_json::from_value(value).unwrap();
    assert_eq!(unit, package.units[0]);
}

#[test]
fn test_unsigned_shift_leaves_the_range() {
    // With an unsigned count only the variable-free range remains.
    let mut package = loop_package();
    package["units"][0]["info"]["types"]["3"]["ty"]["kind"] = json!("uint");
    let package: Package = serde_json::from_value(package).unwrap();

    let finding = scan(&package.units, &History::default()).unwrap();
    assert_eq!(finding.version, 4);
    assert_eq!(finding.evidence.unwrap().span.line, 6);
}

#[test]
fn test_scan_with_deps_checks_declared_version() {
    // var x = fs.ValidPath, declared go 1.18, needs 1.16
    let mut b = UnitBuilder::new("main.go");
    let pkg = b.use_of(
        "fs",
        Symbol::package_level("example.com/m", "fs", SymbolKind::PkgName { path: "io/fs".into() }),
    );
    let sel = b.selector(
        pkg,
        "ValidPath",
        Some(Symbol::package_level("io/fs", "ValidPath", SymbolKind::Func)),
    );
    b.set_type(&sel, TypeAndValue::value(Type::signature()));
    let call = b.call(sel, vec![]);
    b.var("x", None, vec![call]);
    let units = vec![b.build()];

    let history =
        History::from_releases([(16, "pkg io/fs, func ValidPath(string) bool\n")], 16).unwrap();
    let manifest = Manifest::parse("module example.com/m\n\ngo 1.18\n", "go.mod").unwrap();
    let fetcher = FixedFetcher(std::path::PathBuf::from("unused"));

    let lenient = scan_with_deps(
        &units,
        &history,
        &fetcher,
        &manifest,
        DepsMode::All,
        Some(CheckMode::Lenient),
    )
    .unwrap();
    assert_eq!(lenient.version, 16);

    let err = scan_with_deps(
        &units,
        &history,
        &fetcher,
        &manifest,
        DepsMode::All,
        Some(CheckMode::Strict),
    )
    .unwrap_err();
    match err {
        GominError::VersionMismatch { computed, declared } => {
            assert_eq!(computed.version, 16);
            assert_eq!(declared, 18);
        }
        other => panic!("expected VersionMismatch, got {:?}", other),
    }
}
