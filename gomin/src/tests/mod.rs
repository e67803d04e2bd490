use crate::builder::UnitBuilder;
use crate::finding::Finding;
use crate::history::History;
use crate::scanner::Scanner;
use crate::options::ScanOptions;

// History tests
mod history;






/// Scans one unit against `history` with the default options.
pub(crate) fn scan_unit(builder: UnitBuilder, history: &History) -> Finding {
    let unit = builder.build();
    Scanner::new(history, ScanOptions::default())
        .scan_units(std::slice::from_ref(&unit))
        .unwrap()
}

/// Scans one unit against an empty history.
pub(crate) fn scan_bare(builder: UnitBuilder) -> Finding {
    scan_unit(builder, &History::default())
}
