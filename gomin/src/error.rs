use crate::ast::Span;
use crate::finding::Finding;
use crate::tree::LoadError;
use std::fmt;
use std::sync::Arc;

/// Detailed error information with source location
#[derive(Debug, Clone)]
pub struct ErrorDetails {
    pub message: String,
    pub span: Span,
    pub source_id: String,
    pub source_text: Arc<str>,
}

/// Error types for history loading, scanning and checking
#[derive(Debug, Clone)]
pub enum GominError {
    /// A line in a release file matched none of the known shapes
    MalformedHistory {
        file: String,
        line: usize,
        text: String,
    },

    /// The newest release in the history is not the release the caller runs
    HistoryVersionMismatch { history: u32, current: u32 },

    /// The loader reported parse or type errors; every one of them
    Load(Vec<LoadError>),

    /// The loader produced a node kind outside the closed set
    UnknownNodeShape {
        category: &'static str,
        file: String,
        span: Option<Span>,
    },

    /// A type fact needed to decide a rule is absent
    MissingTypeInfo {
        what: &'static str,
        file: String,
        span: Span,
    },

    /// Resolving one requirement's declared version failed
    DependencyResolution {
        module: String,
        source: Box<GominError>,
    },

    /// The module declares a version that disagrees with the computed one
    VersionMismatch { computed: Finding, declared: u32 },

    /// A go.mod file could not be parsed
    Manifest(Box<ErrorDetails>),

    /// Reading from the file system failed
    Io { path: String, message: String },

    /// Setup or protocol error without a more specific home
    Engine(String),
}

impl GominError {
    /// Create a manifest parse error with source information
    pub fn manifest(
        message: impl Into<String>,
        span: Span,
        source_id: impl Into<String>,
        source_text: Arc<str>,
    ) -> Self {
        Self::Manifest(Box::new(ErrorDetails {
            message: message.into(),
            span,
            source_id: source_id.into(),
            source_text,
        }))
    }

    pub fn io(path: impl fmt::Display, err: std::io::Error) -> Self {
        Self::Io {
            path: path.to_string(),
            message: err.to_string(),
        }
    }

    pub fn dependency(module: impl Into<String>, source: GominError) -> Self {
        Self::DependencyResolution {
            module: module.into(),
            source: Box::new(source),
        }
    }
}

impl fmt::Display for GominError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GominError::MalformedHistory { file, line, text } => {
                write!(f, "Malformed history: {}:{}: unrecognized line {}", file, line, text)
            }
            GominError::HistoryVersionMismatch { history, current } => write!(
                f,
                "History is for Go 1.{} but the current release is Go 1.{}",
                history, current
            ),
            GominError::Load(errors) => {
                write!(f, "Loading package(s) failed:")?;
                for error in errors {
                    write!(f, "\n  {}", error)?;
                }
                Ok(())
            }
            GominError::UnknownNodeShape {
                category,
                file,
                span,
            } => match span {
                Some(span) => write!(f, "Unknown {} shape at {}:{}", category, file, span),
                None => write!(f, "Unknown {} shape in {}", category, file),
            },
            GominError::MissingTypeInfo { what, file, span } => {
                write!(f, "No type info for {} at {}:{}", what, file, span)
            }
            GominError::DependencyResolution { module, source } => {
                write!(f, "Resolving dependency {}: {}", module, source)
            }
            GominError::VersionMismatch { computed, declared } => write!(
                f,
                "go.mod declares version 1.{} but computed minimum is 1.{} [{}]",
                declared, computed.version, computed
            ),
            GominError::Manifest(details) => write!(
                f,
                "Manifest error: {} at {}:{}:{}",
                details.message, details.source_id, details.span.line, details.span.col
            ),
            GominError::Io { path, message } => write!(f, "I/O error on {}: {}", path, message),
            GominError::Engine(msg) => write!(f, "Engine error: {}", msg),
        }
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.position {
            Some(position) => write!(f, "{}: {}: {}", self.package, position, self.message),
            None => write!(f, "{}: {}", self.package, self.message),
        }
    }
}

impl std::error::Error for GominError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GominError::DependencyResolution { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for GominError {
    fn from(err: serde_json::Error) -> Self {
        GominError::Engine(format!("JSON error: {}", err))
    }
}
