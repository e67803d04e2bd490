//! # gomin
//!
//! **The oldest Go release that can build your code**
//!
//! gomin walks the annotated syntax tree of a Go program and reports the
//! lowest Go 1.x release that supports every language construct and
//! standard-library symbol the program uses, together with the position
//! that forced it.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gomin::{scan, GominError, GominResult, History, Package};
//! use std::path::Path;
//!
//! fn main() -> GominResult<()> {
//!     // The api files shipped with the toolchain, for Go 1.22
//!     let history = History::from_dir(Path::new("/usr/local/go/api"), 22)?;
//!
//!     // A package as emitted by a loader
//!     let json = std::fs::read_to_string("example.gomin.json")
//!         .map_err(|e| GominError::io("example.gomin.json", e))?;
//!     let package: Package = serde_json::from_str(&json)?;
//!
//!     let finding = scan(&package.units, &history)?;
//!     println!("go 1.{}", finding.version);
//!     Ok(())
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### History
//! The release each exported standard-library symbol first appeared in,
//! read from `$GOROOT/api/go1.N.txt`.
//!
//! ### Findings
//! A version plus the evidence for it. Scans only ever raise a finding,
//! and stop early once nothing can raise it further.
//!
//! ### Dependencies
//! A module can never build with an older Go than its requirements
//! declare, so their `go` directives are folded into the result.

pub mod ast;
pub mod builder;
pub mod check;
pub mod deps;
pub mod error;
pub mod finding;
pub mod history;
pub mod manifest;
pub mod options;
pub mod scanner;
pub mod tree;
pub mod walker;

pub use ast::{NodeId, NodeIdGenerator, Span};
pub use builder::UnitBuilder;
pub use check::{check, check_manifest, parse_go_version, CheckMode};
pub use deps::{fold_dependencies, DependencyFolder, Fetcher, GoModDownload};
pub use error::{ErrorDetails, GominError};
pub use finding::{Evidence, Finding, BASELINE};
pub use history::{History, PackageHistory};
pub use manifest::{Manifest, Requirement};
pub use options::{DepsMode, ScanOptions};
pub use scanner::Scanner;
pub use tree::*;
pub use walker::{Construct, ScanState};

/// Result type for gomin operations
pub type GominResult<T> = Result<T, GominError>;

/// Computes the minimum Go release for the units of one package.
pub fn scan(units: &[Unit], history: &History) -> GominResult<Finding> {
    Scanner::new(history, ScanOptions::default()).scan_units(units)
}

/// Like [`scan`], then raises the result to the declared floor of every
/// requirement of `manifest` that `deps` selects. With a `check_mode`, the
/// result must also satisfy the manifest's `go` directive.
pub fn scan_with_deps(
    units: &[Unit],
    history: &History,
    fetcher: &dyn Fetcher,
    manifest: &Manifest,
    deps: DepsMode,
    check_mode: Option<CheckMode>,
) -> GominResult<Finding> {
    let mut finding = scan(units, history)?;
    let workers = ScanOptions::default().fetch_workers;
    fold_dependencies(&mut finding, manifest, fetcher, deps, workers)?;
    if let Some(mode) = check_mode {
        check_manifest(&finding, manifest, mode)?;
    }
    Ok(finding)
}

#[cfg(test)]
mod tests;
