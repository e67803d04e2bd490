//! Line shapes of the `$GOROOT/api/go1.N.txt` files.

use crate::error::GominError;
use regex::{Captures, Regex};

/// One symbol a line registers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Entry<'l> {
    pub package: &'l str,
    pub owner: Option<&'l str>,
    pub name: &'l str,
}

/// The compiled line patterns, tried in declaration order.
pub(crate) struct LineShapes {
    constant: Regex,
    field: Regex,
    func: Regex,
    method: Regex,
    iface_list: Regex,
    iface_unexported: Regex,
    iface_single: Regex,
    var: Regex,
    bare_type: Regex,
}

impl LineShapes {
    pub fn new() -> Result<Self, GominError> {
        let compile = |pattern: &str| {
            Regex::new(pattern)
                .map_err(|e| GominError::Engine(format!("Invalid history pattern {}: {}", pattern, e)))
        };

        Ok(Self {
            constant: compile(r"^pkg (\S+)( \(\S+\))?, const (\w+)")?,
            field: compile(r"^pkg (\S+)( \(\S+\))?, type (\w+)(\[[^\[\]]+\])? struct, (\w+)")?,
            func: compile(r"^pkg (\S+)( \(\S+\))?, func (\w+)")?,
            method: compile(r"^pkg (\S+)( \(\S+\))?, method \(\*?(\w+)(\[[^\[\]]+\])?\) (\w+)")?,
            iface_list: compile(r"^pkg (\S+)( \(\S+\))?, type (\w+) interface \{ (.+) \}")?,
            iface_unexported: compile(
                r"^pkg (\S+)( \(\S+\))?, type (\w+) interface, unexported methods",
            )?,
            iface_single: compile(r"^pkg (\S+)( \(\S+\))?, type (\w+) interface, (\w+)")?,
            var: compile(r"^pkg (\S+)( \(\S+\))?, var (\w+)")?,
            // Must come last: it also matches every other `type` line.
            bare_type: compile(r"^pkg (\S+)( \(\S+\))?, type (\w+)")?,
        })
    }

    /// The symbols a line registers, or `None` if it matches no shape.
    pub fn classify<'l>(&self, line: &'l str) -> Option<Vec<Entry<'l>>> {
        if let Some(m) = self.constant.captures(line) {
            return Some(vec![ident(&m, 3)]);
        }
        if let Some(m) = self.field.captures(line) {
            return Some(vec![member(&m, 3, 5)]);
        }
        if let Some(m) = self.func.captures(line) {
            return Some(vec![ident(&m, 3)]);
        }
        if let Some(m) = self.method.captures(line) {
            return Some(vec![member(&m, 3, 5)]);
        }
        if let Some(m) = self.iface_list.captures(line) {
            let mut entries = vec![ident(&m, 3)];
            let package = group(&m, 1);
            let owner = group(&m, 3);
            entries.extend(group(&m, 4).split(',').map(str::trim).map(|name| Entry {
                package,
                owner: Some(owner),
                name,
            }));
            return Some(entries);
        }
        if let Some(m) = self.iface_unexported.captures(line) {
            return Some(vec![ident(&m, 3)]);
        }
        if let Some(m) = self.iface_single.captures(line) {
            return Some(vec![ident(&m, 3), member(&m, 3, 4)]);
        }
        if let Some(m) = self.var.captures(line) {
            return Some(vec![ident(&m, 3)]);
        }
        if let Some(m) = self.bare_type.captures(line) {
            return Some(vec![ident(&m, 3)]);
        }
        None
    }
}

fn group<'l>(m: &Captures<'l>, i: usize) -> &'l str {
    m.get(i).map_or("", |g| g.as_str())
}

fn ident<'l>(m: &Captures<'l>, name: usize) -> Entry<'l> {
    Entry {
        package: group(m, 1),
        owner: None,
        name: group(m, name),
    }
}

fn member<'l>(m: &Captures<'l>, owner: usize, name: usize) -> Entry<'l> {
    Entry {
        package: group(m, 1),
        owner: Some(group(m, owner)),
        name: group(m, name),
    }
}
