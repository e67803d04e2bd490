//! `go.mod` parsing.

use crate::ast::Span;
use crate::check::parse_go_version;
use crate::error::GominError;
use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::Arc;

#[derive(Parser)]
#[grammar = "src/manifest/gomod.pest"]
struct GoModParser;

/// The parts of a `go.mod` file the scanner needs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub module: Option<String>,
    /// The `go` directive, verbatim
    pub go: Option<String>,
    pub toolchain: Option<String>,
    #[serde(default)]
    pub requires: Vec<Requirement>,
}

/// A required module version.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Requirement {
    pub path: String,
    pub version: String,
    #[serde(default)]
    pub indirect: bool,
}

impl Requirement {
    pub fn new(path: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            version: version.into(),
            indirect: false,
        }
    }

    pub fn indirect(mut self) -> Self {
        self.indirect = true;
        self
    }

    /// `path@version`, the form `go mod download` takes.
    pub fn coordinate(&self) -> String {
        format!("{}@{}", self.path, self.version)
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.path, self.version)
    }
}

impl Manifest {
    /// Parses `go.mod` text. `source_id` names the file in errors.
    pub fn parse(text: &str, source_id: &str) -> Result<Self, GominError> {
        let source_text: Arc<str> = Arc::from(text);
        let error = |message: String, span: Span| {
            GominError::manifest(message, span, source_id, source_text.clone())
        };

        let pairs = GoModParser::parse(Rule::gomod, text).map_err(|e| {
            let (start, end) = match e.location {
                pest::error::InputLocation::Pos(pos) => (pos, pos),
                pest::error::InputLocation::Span((start, end)) => (start, end),
            };
            let (line, col) = match e.line_col {
                pest::error::LineColLocation::Pos(pos) => pos,
                pest::error::LineColLocation::Span(pos, _) => pos,
            };
            error(
                format!("Parse error: {}", e.variant.message()),
                Span::new(start, end, line, col),
            )
        })?;

        let mut manifest = Manifest::default();
        for pair in pairs.flatten() {
            match pair.as_rule() {
                Rule::module_directive => {
                    let span = span_of(&pair);
                    let path = unquote(last_inner(pair, Rule::path).unwrap_or_default());
                    if manifest.module.replace(path).is_some() {
                        return Err(error("repeated module directive".to_string(), span));
                    }
                }
                Rule::go_directive => {
                    let span = span_of(&pair);
                    let version = last_inner(pair, Rule::token).unwrap_or_default();
                    if parse_go_version(&version).is_err() {
                        return Err(error(format!("invalid go version '{}'", version), span));
                    }
                    if manifest.go.replace(version).is_some() {
                        return Err(error("repeated go directive".to_string(), span));
                    }
                }
                Rule::toolchain_directive => {
                    manifest.toolchain = last_inner(pair, Rule::token);
                }
                Rule::require_spec => manifest.requires.push(parse_require(pair)),
                _ => {}
            }
        }

        Ok(manifest)
    }

    /// Reads and parses a `go.mod` file.
    pub fn read(path: &Path) -> Result<Self, GominError> {
        let text = fs::read_to_string(path).map_err(|e| GominError::io(path.display(), e))?;
        Self::parse(&text, &path.display().to_string())
    }

    /// The declared minimum Go 1.x release, if there is a `go` directive.
    pub fn declared_version(&self) -> Result<Option<u32>, GominError> {
        self.go.as_deref().map(parse_go_version).transpose()
    }

    /// Requirements without the `// indirect` marker.
    pub fn direct_requires(&self) -> impl Iterator<Item = &Requirement> {
        self.requires.iter().filter(|r| !r.indirect)
    }
}

fn parse_require(pair: Pair<Rule>) -> Requirement {
    let mut path = String::new();
    let mut version = String::new();
    let mut indirect = false;
    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::path => path = unquote(inner.as_str().to_string()),
            Rule::token => version = inner.as_str().to_string(),
            Rule::indirect => indirect = true,
            _ => {}
        }
    }
    Requirement {
        path,
        version,
        indirect,
    }
}

/// Text of the last direct child of `pair` with the given rule.
fn last_inner(pair: Pair<Rule>, rule: Rule) -> Option<String> {
    pair.into_inner()
        .filter(|inner| inner.as_rule() == rule)
        .last()
        .map(|inner| inner.as_str().to_string())
}

fn unquote(text: String) -> String {
    match text.strip_prefix('"').and_then(|t| t.strip_suffix('"')) {
        Some(inner) => inner.to_string(),
        None => text,
    }
}

fn span_of(pair: &Pair<Rule>) -> Span {
    let span = pair.as_span();
    let (line, col) = span.start_pos().line_col();
    Span::new(span.start(), span.end(), line, col)
}
