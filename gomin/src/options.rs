use crate::check::CheckMode;
use serde::{Deserialize, Serialize};

/// Which requirements of the module contribute their declared floor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DepsMode {
    /// Ignore dependencies
    None,
    /// Requirements without the `// indirect` marker
    Direct,
    /// Every requirement
    #[default]
    All,
}

/// Knobs for one scan
///
/// The defaults suit a command-line run over a whole module.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Which dependencies to fold in
    pub deps: DepsMode,

    /// Compare the result against the module's `go` directive
    pub check: Option<CheckMode>,

    /// Stop walking once the ceiling is reached.
    /// Turning this off only costs time; the result is the same.
    pub short_circuit: bool,

    /// Scan packages on the rayon pool
    pub parallel: bool,

    /// Concurrent dependency fetches
    pub fetch_workers: usize,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            deps: DepsMode::All,
            check: None,
            short_circuit: true,
            parallel: true,
            fetch_workers: 4,
        }
    }
}

impl ScanOptions {
    pub fn new() -> Self {
        Self::default()
    }
}
