use gomin::*;
use proptest::prelude::*;

/// Declarations with a known floor.
const SNIPPETS: usize = 7;

fn add_snippet(b: &mut UnitBuilder, snippet: usize) -> u32 {
    match snippet {
        0 => {
            let lit = b.lit(LitKind::Int, "1000");
            b.var("plain", None, vec![lit]);
            0
        }
        1 => {
            let work = b.ident("work");
            let stmt = b.stmt(StmtKind::Expr { x: work });
            b.func("run", FuncType::default(), vec![stmt]);
            1
        }
        2 => {
            let ty = b.ident("int");
            b.type_decl("Alias", vec![], true, ty);
            9
        }
        3 => {
            let lit = b.lit(LitKind::Int, "1_000");
            b.var("big", None, vec![lit]);
            13
        }
        4 => {
            let constraint = b.ident("any");
            let params = vec![b.field(&["T"], constraint)];
            let ty = b.ident("T");
            b.type_decl("Box", params, false, ty);
            18
        }
        5 => {
            let constraint = b.ident("comparable");
            let params = vec![b.field(&["K"], constraint)];
            let ty = b.ident("K");
            b.type_decl("Key", params, true, ty);
            24
        }
        _ => {
            let constraint = b.ident("Node");
            let params = vec![b.field(&["T"], constraint)];
            let ty = b.ident("int");
            b.type_decl("Node", params, false, ty);
            26
        }
    }
}

/// Builds one unit per inner list and returns the highest floor used.
fn build(layout: &[Vec<usize>]) -> (Vec<Unit>, u32) {
    let mut expected = BASELINE;
    let units = layout
        .iter()
        .enumerate()
        .map(|(i, snippets)| {
            let mut b = UnitBuilder::new(format!("f{}.go", i));
            for &snippet in snippets {
                expected = expected.max(add_snippet(&mut b, snippet));
            }
            b.build()
        })
        .collect();
    (units, expected)
}

fn scan_with(units: &[Unit], short_circuit: bool) -> Finding {
    let history = History::default();
    let options = ScanOptions {
        short_circuit,
        ..ScanOptions::default()
    };
    Scanner::new(&history, options).scan_units(units).unwrap()
}

fn layouts() -> impl Strategy<Value = Vec<Vec<usize>>> {
    prop::collection::vec(prop::collection::vec(0..SNIPPETS, 0..5), 0..5)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 100,
        ..ProptestConfig::default()
    })]

    #[test]
    fn prop_result_is_highest_floor(layout in layouts()) {
        let (units, expected) = build(&layout);
        prop_assert_eq!(scan_with(&units, true).version, expected);
    }

    #[test]
    fn prop_scan_is_deterministic(layout in layouts()) {
        let (units, _) = build(&layout);
        let first = scan_with(&units, true);
        let second = scan_with(&units, true);
        prop_assert_eq!(first.version, second.version);
        prop_assert_eq!(first.evidence, second.evidence);
    }

    #[test]
    fn prop_short_circuit_does_not_change_result(layout in layouts()) {
        let (units, _) = build(&layout);
        let fast = scan_with(&units, true);
        let full = scan_with(&units, false);
        prop_assert_eq!(fast.version, full.version);
        prop_assert_eq!(fast.evidence, full.evidence);
    }

    #[test]
    fn prop_adding_units_never_lowers(layout in layouts(), extra in prop::collection::vec(0..SNIPPETS, 0..5)) {
        let (units, _) = build(&layout);
        let before = scan_with(&units, true).version;

        let mut grown = layout.clone();
        grown.push(extra);
        let (units, _) = build(&grown);
        prop_assert!(scan_with(&units, true).version >= before);
    }

    #[test]
    fn prop_go_versions_parse(minor in 0u32..100, patch in 0u32..20) {
        prop_assert_eq!(parse_go_version(&format!("1.{}", minor)).unwrap(), minor);
        prop_assert_eq!(parse_go_version(&format!("1.{}.{}", minor, patch)).unwrap(), minor);
        prop_assert_eq!(parse_go_version(&format!("go1.{}rc{}", minor, patch + 1)).unwrap(), minor);
    }
}
