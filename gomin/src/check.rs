//! Comparing a computed minimum against the module's declared one.

use crate::error::GominError;
use crate::finding::Finding;
use crate::manifest::Manifest;
use serde::{Deserialize, Serialize};

/// How strictly the declared version must match the computed one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckMode {
    /// Declaring a newer release than needed is fine.
    #[default]
    Lenient,
    /// The declared release must be exactly the computed one.
    Strict,
}

/// Fails with [`GominError::VersionMismatch`] when `declared` does not
/// satisfy `computed` under `mode`.
pub fn check(computed: &Finding, declared: u32, mode: CheckMode) -> Result<(), GominError> {
    let ok = match mode {
        CheckMode::Lenient => declared >= computed.version,
        CheckMode::Strict => declared == computed.version,
    };
    if ok {
        return Ok(());
    }
    Err(GominError::VersionMismatch {
        computed: computed.clone(),
        declared,
    })
}

/// [`check`] against the `go` directive of `manifest`, which must have one.
pub fn check_manifest(
    computed: &Finding,
    manifest: &Manifest,
    mode: CheckMode,
) -> Result<(), GominError> {
    let declared = manifest.declared_version()?.ok_or_else(|| {
        GominError::Engine("go.mod has no go directive to check against".to_string())
    })?;
    check(computed, declared, mode)
}

/// Parses a `go` directive value (`1.21`, `1.21.3`, `1.21rc2`) into its
/// minor release number.
pub fn parse_go_version(version: &str) -> Result<u32, GominError> {
    let invalid = || GominError::Engine(format!("Invalid Go version '{}'", version));

    let rest = version.trim().strip_prefix("go").unwrap_or(version.trim());
    let (major, rest) = rest.split_once('.').ok_or_else(invalid)?;
    if major != "1" {
        return Err(invalid());
    }

    let digits: &str = &rest[..rest.bytes().take_while(u8::is_ascii_digit).count()];
    if digits.is_empty() {
        return Err(invalid());
    }
    let suffix = &rest[digits.len()..];
    let well_formed = suffix.is_empty()
        || suffix
            .strip_prefix('.')
            .or_else(|| suffix.strip_prefix("rc"))
            .or_else(|| suffix.strip_prefix("beta"))
            .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()));
    if !well_formed {
        return Err(invalid());
    }

    digits.parse().map_err(|_| invalid())
}
