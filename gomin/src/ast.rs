//! Tree infrastructure types
//!
//! This module contains metadata types shared by every syntax node:
//! - `Span` for tracking source code locations
//! - `NodeId` for keying the loader's symbol and type tables
//! - `NodeIdGenerator` for handing out unique IDs while building a unit

use serde::{Deserialize, Serialize};
use std::fmt;

/// Span representing a location in source code
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub col: usize,
}

impl Span {
    pub fn new(start: usize, end: usize, line: usize, col: usize) -> Self {
        Self {
            start,
            end,
            line,
            col,
        }
    }

    /// A span that only knows its line and column.
    pub fn at(line: usize, col: usize) -> Self {
        Self {
            start: 0,
            end: 0,
            line,
            col,
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

/// Unique identifier for each expression and identifier in a unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(u64);

impl NodeId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node_{}", self.0)
    }
}

/// Counter for generating unique node IDs
#[derive(Debug, Default)]
pub struct NodeIdGenerator {
    next_id: u64,
}

impl NodeIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }
}
