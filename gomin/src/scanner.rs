use crate::check::check_manifest;
use crate::deps::{DependencyFolder, Fetcher};
use crate::error::GominError;
use crate::finding::Finding;
use crate::history::History;
use crate::manifest::Manifest;
use crate::options::ScanOptions;
use crate::tree::{LoadError, Package, Unit};
use crate::walker::{walk_unit, ScanState};
use crate::GominResult;
use rayon::prelude::*;
use std::collections::BTreeSet;
use tracing::info;

/// Computes minimum Go versions against one history.
///
/// A scanner holds no per-scan state; it can be reused and shared across
/// threads.
pub struct Scanner<'h> {
    history: &'h History,
    options: ScanOptions,
}

impl<'h> Scanner<'h> {
    pub fn new(history: &'h History, options: ScanOptions) -> Self {
        Self { history, options }
    }

    pub fn options(&self) -> &ScanOptions {
        &self.options
    }

    pub fn history(&self) -> &'h History {
        self.history
    }

    /// Scans the units of one package in order.
    pub fn scan_units(&self, units: &[Unit]) -> GominResult<Finding> {
        let mut state = ScanState::new(self.history, self.options.short_circuit);
        for unit in units {
            if walk_unit(unit, &mut state)?.is_break() {
                break;
            }
        }
        Ok(state.into_finding())
    }

    pub fn scan_package(&self, package: &Package) -> GominResult<Finding> {
        let finding = self.scan_units(&package.units)?;
        info!(package = %package.path, version = finding.version, "scanned package");
        Ok(finding)
    }

    /// Scans a set of packages from one module.
    ///
    /// Load errors of all packages are reported together before anything
    /// is scanned. Per-package results are folded in input order, so the
    /// evidence does not depend on scheduling.
    pub fn scan_packages(&self, packages: &[Package]) -> GominResult<Finding> {
        let errors = load_errors(packages);
        if !errors.is_empty() {
            return Err(GominError::Load(errors));
        }

        let modules: BTreeSet<&str> = packages
            .iter()
            .filter_map(|p| p.module.as_deref())
            .collect();
        if modules.len() > 1 {
            let modules: Vec<&str> = modules.into_iter().collect();
            return Err(GominError::Engine(format!(
                "Packages span more than one module: {}",
                modules.join(", ")
            )));
        }

        let results: Vec<GominResult<Finding>> = if self.options.parallel {
            packages.par_iter().map(|p| self.scan_package(p)).collect()
        } else {
            packages.iter().map(|p| self.scan_package(p)).collect()
        };

        let ceiling = ScanState::ceiling_for(self.history);
        let mut finding = Finding::baseline();
        for result in results {
            finding.merge(result?, ceiling);
        }
        Ok(finding)
    }

    /// Scans a module's packages, folds in its dependencies and, if asked
    /// to, checks the result against the module's `go` directive.
    pub fn scan_module(
        &self,
        packages: &[Package],
        manifest: &Manifest,
        fetcher: &dyn Fetcher,
    ) -> GominResult<Finding> {
        let mut finding = self.scan_packages(packages)?;

        DependencyFolder::new(fetcher, self.options.fetch_workers).fold(
            &mut finding,
            manifest,
            self.options.deps,
        )?;

        if let Some(mode) = self.options.check {
            check_manifest(&finding, manifest, mode)?;
        }

        Ok(finding)
    }
}

/// Every load error of every package, each tagged with its package path.
fn load_errors(packages: &[Package]) -> Vec<LoadError> {
    packages
        .iter()
        .flat_map(|package| {
            package.errors.iter().map(move |error| LoadError {
                package: if error.package.is_empty() {
                    package.path.clone()
                } else {
                    error.package.clone()
                },
                ..error.clone()
            })
        })
        .collect()
}
