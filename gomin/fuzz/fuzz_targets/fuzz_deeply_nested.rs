#![no_main]

use gomin::{ExprKind, LitKind, UnitBuilder};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|depth: u8| {
    let depth = (depth as usize % 50) + 1;

    let mut b = UnitBuilder::new("nested.go");
    let mut expr = b.lit(LitKind::Int, "0x1");
    for _ in 0..depth {
        expr = b.expr(ExprKind::Paren { x: Box::new(expr) });
    }
    b.var("x", None, vec![expr]);

    let finding = gomin::scan(&[b.build()], &gomin::History::default());
    assert_eq!(finding.map(|f| f.version).ok(), Some(13));
});
