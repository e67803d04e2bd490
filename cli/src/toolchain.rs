//! Asking the installed `go` command about itself.

use anyhow::{bail, Context, Result};
use gomin::parse_go_version;
use std::path::PathBuf;
use std::process::Command;

fn go_env(var: &str) -> Result<String> {
    let output = Command::new("go")
        .args(["env", var])
        .output()
        .context("running `go env`; pass --api and --release to work without a toolchain")?;
    if !output.status.success() {
        bail!(
            "go env {} failed: {}",
            var,
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

pub fn goroot() -> Result<PathBuf> {
    let root = go_env("GOROOT")?;
    if root.is_empty() {
        bail!("go env GOROOT is empty");
    }
    Ok(PathBuf::from(root))
}

/// The minor release of the installed toolchain, e.g. 22 for `go1.22.3`.
pub fn current_release() -> Result<u32> {
    let version = go_env("GOVERSION")?;
    // Development builds report e.g. `go1.23-abcdef X:nocoverageredesign`
    let version = version
        .split(|c: char| c.is_whitespace() || c == '-')
        .next()
        .unwrap_or_default();
    Ok(parse_go_version(version)?)
}
