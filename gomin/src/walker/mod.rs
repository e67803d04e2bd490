//! Recursive descent over one compilation unit.
//!
//! Each node kind has one visit method. Children are visited in source
//! order; after every child the walker checks whether the finding reached
//! the ceiling and, if so, unwinds without looking at anything else.
//! Rules attached to a node fire through [`Walker::record`] and history
//! lookups through [`Walker::use_of`], both of which fold into the shared
//! [`ScanState`].

use crate::ast::{NodeId, Span};
use crate::error::GominError;
use crate::finding::Finding;
use crate::history::History;
use crate::tree::{Symbol, SymbolKind, TypeInfo, Unit};
use std::ops::ControlFlow;
use tracing::debug;

/// Continue or stop the traversal. `Break` means the ceiling was reached.
pub type Walk = ControlFlow<()>;

/// Result of visiting one node.
pub(crate) type Step = Result<Walk, GominError>;

pub(crate) const CONTINUE: Walk = ControlFlow::Continue(());

/// Visits a child and returns early from the caller if it hit the ceiling.
macro_rules! descend {
    ($step:expr) => {
        if let std::ops::ControlFlow::Break(()) = $step? {
            return Ok(std::ops::ControlFlow::Break(()));
        }
    };
}

/// Returns early from the caller if a rule firing hit the ceiling.
macro_rules! halt {
    ($walk:expr) => {
        if let std::ops::ControlFlow::Break(()) = $walk {
            return Ok(std::ops::ControlFlow::Break(()));
        }
    };
}

mod decl;
mod expr;
pub mod rules;
mod stmt;

pub use rules::Construct;

/// The running result of a scan, shared by every unit of a package.
#[derive(Debug, Clone)]
pub struct ScanState<'h> {
    finding: Finding,
    history: &'h History,
    ceiling: u32,
    short_circuit: bool,
}

impl<'h> ScanState<'h> {
    pub fn new(history: &'h History, short_circuit: bool) -> Self {
        Self {
            finding: Finding::baseline(),
            history,
            ceiling: Self::ceiling_for(history),
            short_circuit,
        }
    }

    /// The highest version any rule or history entry can report.
    pub fn ceiling_for(history: &History) -> u32 {
        history.latest().max(Construct::LATEST)
    }

    pub fn ceiling(&self) -> u32 {
        self.ceiling
    }

    pub fn finding(&self) -> &Finding {
        &self.finding
    }

    pub fn into_finding(self) -> Finding {
        self.finding
    }

    pub fn history(&self) -> &'h History {
        self.history
    }

    /// Merges a candidate and reports whether the walk may stop.
    pub fn fold(&mut self, candidate: Finding) -> Walk {
        let improved = candidate.version > self.finding.version;
        let at_ceiling = self.finding.merge(candidate, self.ceiling);
        if improved {
            debug!(finding = %self.finding, "raised minimum version");
        }
        if at_ceiling && self.short_circuit {
            ControlFlow::Break(())
        } else {
            CONTINUE
        }
    }
}

/// Walks the declarations of one unit.
pub fn walk_unit(unit: &Unit, state: &mut ScanState<'_>) -> Step {
    let mut walker = Walker { unit, state };
    for decl in &unit.decls {
        descend!(walker.decl(decl));
    }
    Ok(CONTINUE)
}

pub(crate) struct Walker<'a, 'h> {
    unit: &'a Unit,
    state: &'a mut ScanState<'h>,
}

impl<'a, 'h> Walker<'a, 'h> {
    fn file(&self) -> &'a str {
        &self.unit.filename
    }

    fn info(&self) -> &'a TypeInfo {
        &self.unit.info
    }

    /// Folds in the floor of a construct found at `span`.
    fn record(&mut self, construct: Construct, span: Span) -> Walk {
        let finding = Finding::annotated(
            construct.floor(),
            self.file(),
            span,
            construct.description(),
        );
        self.state.fold(finding)
    }

    /// Folds in the introduction release of the symbol `id` resolves to,
    /// if the history knows it.
    fn use_of(&mut self, id: NodeId, span: Span) -> Walk {
        let Some(symbol) = self.info().symbol(id) else {
            return CONTINUE;
        };
        match history_key(symbol) {
            Some((package, owner)) => {
                let Some(version) = self.state.history().lookup(package, &symbol.name, owner)
                else {
                    return CONTINUE;
                };
                let description = match owner {
                    Some(owner) => format!("\"{}\".{}.{}", package, owner, symbol.name),
                    None => format!("\"{}\".{}", package, symbol.name),
                };
                let finding = Finding::annotated(version, self.file(), span, description);
                self.state.fold(finding)
            }
            None => CONTINUE,
        }
    }

    fn unknown(&self, category: &'static str, span: Option<Span>) -> GominError {
        GominError::UnknownNodeShape {
            category,
            file: self.file().to_string(),
            span,
        }
    }

    fn missing(&self, what: &'static str, span: Span) -> GominError {
        GominError::MissingTypeInfo {
            what,
            file: self.file().to_string(),
            span,
        }
    }
}

/// The history key of a symbol: its package path and, for members, the
/// owner type name. `None` for symbols the history never lists.
fn history_key(symbol: &Symbol) -> Option<(&str, Option<&str>)> {
    if !symbol.exported || matches!(symbol.kind, SymbolKind::PkgName { .. }) {
        return None;
    }
    let package = symbol.package.as_deref()?;
    let owner = match &symbol.owner {
        Some(owner) => Some(owner.owner_name()?),
        None => None,
    };
    Some((package, owner))
}
