//! Findings and the keep-greater merge.
//!
//! A [`Finding`] is the answer to "which Go 1.x release is needed, and
//! why". Scans start from a bare baseline and fold in every rule firing
//! with [`Finding::merge`], which only ever raises the version.

use crate::ast::Span;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// The oldest tracked release; every scan starts here.
pub const BASELINE: u32 = 0;

/// Where and why a version was required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evidence {
    pub file: String,
    pub span: Span,
    pub description: String,
}

/// A minimum Go 1.x minor version, optionally with the evidence for it.
///
/// Findings compare by version only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    pub version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence: Option<Evidence>,
}

impl Finding {
    /// A version with no position attached: baselines and dependency floors.
    pub fn bare(version: u32) -> Self {
        Self {
            version,
            evidence: None,
        }
    }

    /// A version required by something at a position in a file.
    pub fn annotated(
        version: u32,
        file: impl Into<String>,
        span: Span,
        description: impl Into<String>,
    ) -> Self {
        Self {
            version,
            evidence: Some(Evidence {
                file: file.into(),
                span,
                description: description.into(),
            }),
        }
    }

    pub fn baseline() -> Self {
        Self::bare(BASELINE)
    }

    /// Keeps `candidate` if it requires a strictly newer release. Returns
    /// whether the ceiling has been reached, after which no later
    /// candidate can change the version.
    pub fn merge(&mut self, candidate: Finding, ceiling: u32) -> bool {
        if candidate.version > self.version {
            *self = candidate;
        }
        self.version >= ceiling
    }

    pub fn description(&self) -> Option<&str> {
        self.evidence.as_ref().map(|e| e.description.as_str())
    }
}

impl Default for Finding {
    fn default() -> Self {
        Self::baseline()
    }
}

impl PartialEq for Finding {
    fn eq(&self, other: &Self) -> bool {
        self.version == other.version
    }
}

impl Eq for Finding {}

impl PartialOrd for Finding {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Finding {
    fn cmp(&self, other: &Self) -> Ordering {
        self.version.cmp(&other.version)
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.evidence {
            None => write!(f, "{}", self.version),
            Some(evidence) => {
                write!(
                    f,
                    "{}:{}: {}",
                    evidence.file, evidence.span, self.version
                )?;
                if !evidence.description.is_empty() {
                    write!(f, " ({})", evidence.description)?;
                }
                Ok(())
            }
        }
    }
}
