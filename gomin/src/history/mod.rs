//! The history of the Go standard library API.
//!
//! Built from the `go1.N.txt` files in `$GOROOT/api`, one per release.
//! Each file lists the symbols that release added; a symbol is recorded at
//! the first release that mentions it and never overwritten afterwards.

mod shapes;

use crate::error::GominError;
use shapes::LineShapes;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Maps package paths to the introduction release of their symbols.
#[derive(Debug, Clone, Default)]
pub struct History {
    packages: HashMap<String, PackageHistory>,
    latest: u32,
}

/// The history of a single package.
#[derive(Debug, Clone, Default)]
pub struct PackageHistory {
    /// Top-level identifiers
    idents: HashMap<String, u32>,
    /// Methods and struct fields, keyed by owner type name, then member name
    members: HashMap<String, HashMap<String, u32>>,
}

impl PackageHistory {
    fn register(&mut self, owner: Option<&str>, name: &str, release: u32) {
        let table = match owner {
            None => &mut self.idents,
            Some(owner) => self.members.entry(owner.to_string()).or_default(),
        };
        table.entry(name.to_string()).or_insert(release);
    }

    pub fn lookup(&self, name: &str, owner: Option<&str>) -> Option<u32> {
        match owner {
            None => self.idents.get(name).copied(),
            Some(owner) => self.members.get(owner)?.get(name).copied(),
        }
    }

    pub fn len(&self) -> usize {
        self.idents.len() + self.members.values().map(HashMap::len).sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads every `go1.N.txt` file in `dir` in ascending release order
    /// and checks that the newest one is `current`.
    pub fn from_dir(dir: &Path, current: u32) -> Result<Self, GominError> {
        let entries = fs::read_dir(dir).map_err(|e| GominError::io(dir.display(), e))?;

        let mut files: Vec<(u32, PathBuf)> = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| GominError::io(dir.display(), e))?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let release = path
                .file_name()
                .and_then(|name| name.to_str())
                .and_then(release_of);
            if let Some(release) = release {
                files.push((release, path));
            }
        }
        files.sort();

        let shapes = LineShapes::new()?;
        let mut history = Self::new();
        for (release, path) in files {
            let text = fs::read_to_string(&path).map_err(|e| GominError::io(path.display(), e))?;
            history.parse_release(&shapes, release, &text, &path.display().to_string())?;
        }

        history.verify_current(current)?;
        Ok(history)
    }

    /// Builds a history from in-memory release texts. The releases are
    /// processed in ascending order whatever order they are given in.
    pub fn from_releases<I, S>(releases: I, current: u32) -> Result<Self, GominError>
    where
        I: IntoIterator<Item = (u32, S)>,
        S: AsRef<str>,
    {
        let mut releases: Vec<(u32, S)> = releases.into_iter().collect();
        releases.sort_by_key(|(release, _)| *release);

        let shapes = LineShapes::new()?;
        let mut history = Self::new();
        for (release, text) in &releases {
            let file = format!("go1.{}.txt", release);
            history.parse_release(&shapes, *release, text.as_ref(), &file)?;
        }

        history.verify_current(current)?;
        Ok(history)
    }

    /// Adds one release file's worth of symbols. Releases must be added in
    /// ascending order for earliest-wins to hold.
    pub fn add_release(&mut self, release: u32, text: &str, file: &str) -> Result<(), GominError> {
        let shapes = LineShapes::new()?;
        self.parse_release(&shapes, release, text, file)
    }

    fn parse_release(
        &mut self,
        shapes: &LineShapes,
        release: u32,
        text: &str,
        file: &str,
    ) -> Result<(), GominError> {
        self.latest = self.latest.max(release);

        let mut count = 0;
        for (index, line) in text.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.contains("//deprecated") {
                continue;
            }
            let entries = shapes
                .classify(trimmed)
                .ok_or_else(|| GominError::MalformedHistory {
                    file: file.to_string(),
                    line: index + 1,
                    text: line.to_string(),
                })?;
            for entry in entries {
                self.register(entry.package, entry.owner, entry.name, release);
                count += 1;
            }
        }

        debug!(release, file, symbols = count, "read history release");
        Ok(())
    }

    /// Records `name` at `release` unless an earlier release already has it.
    /// The history then covers at least `release`.
    pub fn register(&mut self, package: &str, owner: Option<&str>, name: &str, release: u32) {
        self.latest = self.latest.max(release);
        self.packages
            .entry(package.to_string())
            .or_default()
            .register(owner, name, release);
    }

    /// Fails unless the newest release in the history is `current`. A
    /// mismatch means the history is stale (or from the future) and would
    /// misreport new symbols.
    pub fn verify_current(&self, current: u32) -> Result<(), GominError> {
        if self.latest != current {
            return Err(GominError::HistoryVersionMismatch {
                history: self.latest,
                current,
            });
        }
        Ok(())
    }

    /// The release that introduced `name` (or `owner.name`) in `package`.
    pub fn lookup(&self, package: &str, name: &str, owner: Option<&str>) -> Option<u32> {
        self.packages.get(package)?.lookup(name, owner)
    }

    /// The newest release the history covers.
    pub fn latest(&self) -> u32 {
        self.latest
    }

    pub fn package(&self, path: &str) -> Option<&PackageHistory> {
        self.packages.get(path)
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

/// The release number encoded in a `go1.N.txt` file name.
pub fn release_of(filename: &str) -> Option<u32> {
    let digits = filename.strip_prefix("go1.")?.strip_suffix(".txt")?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}
