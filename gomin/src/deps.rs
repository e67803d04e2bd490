//! Folding the declared floors of required modules into a finding.

use crate::error::GominError;
use crate::finding::Finding;
use crate::manifest::{Manifest, Requirement};
use crate::options::DepsMode;
use crate::GominResult;
use rayon::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;
use std::process::Command;
use std::sync::Mutex;
use tracing::debug;

/// Makes a required module's `go.mod` available on disk.
pub trait Fetcher: Sync {
    /// The path of the requirement's `go.mod` file.
    fn fetch(&self, requirement: &Requirement) -> GominResult<PathBuf>;
}

/// Fetches through the module cache with `go mod download -json`.
#[derive(Debug, Clone)]
pub struct GoModDownload {
    go: PathBuf,
    dir: Option<PathBuf>,
}

impl Default for GoModDownload {
    fn default() -> Self {
        Self {
            go: PathBuf::from("go"),
            dir: None,
        }
    }
}

impl GoModDownload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `go` from `dir`, so that module's settings apply.
    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = Some(dir.into());
        self
    }

    /// Uses a `go` binary other than the one on `PATH`.
    pub fn with_go(mut self, go: impl Into<PathBuf>) -> Self {
        self.go = go.into();
        self
    }
}

#[derive(Debug, Deserialize)]
struct DownloadReply {
    #[serde(rename = "GoMod", default)]
    go_mod: Option<String>,
    #[serde(rename = "Error", default)]
    error: Option<String>,
}

impl Fetcher for GoModDownload {
    fn fetch(&self, requirement: &Requirement) -> GominResult<PathBuf> {
        let mut command = Command::new(&self.go);
        command.args(["mod", "download", "-json", requirement.coordinate().as_str()]);
        if let Some(dir) = &self.dir {
            command.current_dir(dir);
        }
        let output = command
            .output()
            .map_err(|e| GominError::io(self.go.display(), e))?;

        // A failed download still prints a reply, with its reason in `Error`.
        let reply: Result<DownloadReply, _> = serde_json::from_slice(&output.stdout);
        if let Ok(DownloadReply {
            error: Some(error), ..
        }) = &reply
        {
            return Err(GominError::Engine(error.clone()));
        }
        if !output.status.success() {
            return Err(GominError::Engine(format!(
                "go mod download exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        reply?
            .go_mod
            .map(PathBuf::from)
            .ok_or_else(|| GominError::Engine("go mod download reported no GoMod path".to_string()))
    }
}

/// Resolves requirement floors, caching each one for the folder's lifetime.
pub struct DependencyFolder<'f> {
    fetcher: &'f dyn Fetcher,
    workers: usize,
    cache: Mutex<HashMap<Requirement, u32>>,
}

impl<'f> DependencyFolder<'f> {
    pub fn new(fetcher: &'f dyn Fetcher, workers: usize) -> Self {
        Self {
            fetcher,
            workers: workers.max(1),
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// The Go release `requirement` declares in its own `go.mod`.
    pub fn floor(&self, requirement: &Requirement) -> GominResult<u32> {
        if let Some(floor) = self.cached(requirement) {
            return Ok(floor);
        }

        let floor = self
            .resolve(requirement)
            .map_err(|e| GominError::dependency(requirement.coordinate(), e))?;
        debug!(module = %requirement, floor, "resolved dependency floor");

        self.cache
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(requirement.clone(), floor);
        Ok(floor)
    }

    fn cached(&self, requirement: &Requirement) -> Option<u32> {
        self.cache
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(requirement)
            .copied()
    }

    fn resolve(&self, requirement: &Requirement) -> GominResult<u32> {
        let path = self.fetcher.fetch(requirement)?;
        let manifest = Manifest::read(&path)?;
        manifest.declared_version()?.ok_or_else(|| {
            GominError::Engine(format!("{} has no go directive", path.display()))
        })
    }

    /// Resolves every requirement on a pool of `workers` threads. The
    /// first failure in requirement order is returned.
    pub fn floors(&self, requirements: &[&Requirement]) -> GominResult<Vec<u32>> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .build()
            .map_err(|e| GominError::Engine(format!("Failed to start fetch pool: {}", e)))?;

        let results: Vec<GominResult<u32>> =
            pool.install(|| requirements.par_iter().map(|r| self.floor(r)).collect());
        results.into_iter().collect()
    }

    /// Raises `finding` to the floor of every requirement `mode` selects.
    pub fn fold(
        &self,
        finding: &mut Finding,
        manifest: &Manifest,
        mode: DepsMode,
    ) -> GominResult<()> {
        let requirements: Vec<&Requirement> = match mode {
            DepsMode::None => return Ok(()),
            DepsMode::Direct => manifest.direct_requires().collect(),
            DepsMode::All => manifest.requires.iter().collect(),
        };

        for floor in self.floors(&requirements)? {
            finding.merge(Finding::bare(floor), u32::MAX);
        }
        Ok(())
    }
}

/// Folds dependency floors into `finding` with a one-off folder.
pub fn fold_dependencies(
    finding: &mut Finding,
    manifest: &Manifest,
    fetcher: &dyn Fetcher,
    mode: DepsMode,
    workers: usize,
) -> GominResult<()> {
    DependencyFolder::new(fetcher, workers).fold(finding, manifest, mode)
}
