//! Loader for the textual target-definition format.
//!
//! The format is line oriented. Variable assignments (`NAME=value`) come
//! first, then target headers (`name: dep1 dep2`) each followed by
//! indented action lines. `$(NAME)` references in action lines are
//! substituted at load time, so the graph only ever holds fully-resolved
//! command strings.

use crate::graph::Graph;
use crate::types::{BuildError, TargetId};
use log::debug;
use std::collections::HashMap;

/// A loader error, tagged with the 1-based line it occurred on.
#[derive(Debug)]
pub struct LoadError {
    pub line: usize,
    pub kind: LoadErrorKind,
}

#[derive(Debug)]
pub enum LoadErrorKind {
    /// The line is neither an assignment, a target header, nor an action.
    UnknownLine,
    /// An action line appeared before any target definition.
    ActionBeforeTarget,
    /// A variable assignment appeared after the first target definition.
    VariableAfterTarget,
    /// The same variable name was assigned twice.
    DuplicateVariable(String),
    /// A `$` not followed by a well-formed `(NAME)`.
    MalformedVariableRef,
    /// A `$(NAME)` reference to a variable that was never assigned.
    UnknownVariable(String),
    /// A graph-level error raised while defining a target.
    Definition(BuildError),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            LoadErrorKind::UnknownLine => write!(f, "unknown type of line"),
            LoadErrorKind::ActionBeforeTarget => {
                write!(f, "action appears before any target definition")
            }
            LoadErrorKind::VariableAfterTarget => {
                write!(f, "variable assignment appears after a target definition")
            }
            LoadErrorKind::DuplicateVariable(name) => {
                write!(f, "variable \"{}\" is defined more than once", name)
            }
            LoadErrorKind::MalformedVariableRef => {
                write!(f, "malformed variable reference, expected $(NAME)")
            }
            LoadErrorKind::UnknownVariable(name) => {
                write!(f, "unknown variable \"{}\"", name)
            }
            LoadErrorKind::Definition(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            LoadErrorKind::Definition(err) => Some(err),
            _ => None,
        }
    }
}

/// Structured classification of one input line.
#[derive(Debug, PartialEq)]
enum Line<'a> {
    Blank,
    Action(&'a str),
    Assignment { name: &'a str, value: &'a str },
    TargetHeader { name: &'a str, deps: Vec<&'a str> },
}

/// Classify a raw line without mutating any state.
fn classify(line: &str) -> Result<Line<'_>, LoadErrorKind> {
    if line.trim().is_empty() {
        return Ok(Line::Blank);
    }
    if line.starts_with([' ', '\t']) {
        return Ok(Line::Action(line.trim_start()));
    }

    // `=` before any `:` (or no `:` at all) means assignment
    match (line.find('='), line.find(':')) {
        (None, None) => Err(LoadErrorKind::UnknownLine),
        (Some(e), None) => Ok(assignment(line, e)),
        (Some(e), Some(c)) if e < c => Ok(assignment(line, e)),
        (_, Some(c)) => Ok(Line::TargetHeader {
            name: &line[..c],
            deps: line[c + 1..].split_whitespace().collect(),
        }),
    }
}

fn assignment(line: &str, equals: usize) -> Line<'_> {
    Line::Assignment {
        name: &line[..equals],
        value: &line[equals + 1..],
    }
}

/// Accumulates the variable table and the graph under construction.
#[derive(Default)]
struct Loader {
    graph: Graph,
    variables: HashMap<String, String>,
    /// The most recently defined target; action lines attach to it.
    current: Option<TargetId>,
}

impl Loader {
    fn feed(&mut self, line: &str) -> Result<(), LoadErrorKind> {
        match classify(line)? {
            Line::Blank => Ok(()),
            Line::Assignment { name, value } => {
                if self.current.is_some() {
                    return Err(LoadErrorKind::VariableAfterTarget);
                }
                if self.variables.contains_key(name) {
                    return Err(LoadErrorKind::DuplicateVariable(name.to_string()));
                }
                self.variables.insert(name.to_string(), value.to_string());
                Ok(())
            }
            Line::TargetHeader { name, deps } => {
                let id = self
                    .graph
                    .define(name, &deps, vec![])
                    .map_err(LoadErrorKind::Definition)?;
                debug!("defined target '{}' with {} dependencies", name, deps.len());
                self.current = Some(id);
                Ok(())
            }
            Line::Action(raw) => {
                let Some(current) = self.current else {
                    return Err(LoadErrorKind::ActionBeforeTarget);
                };
                let action = self.substitute(raw)?;
                self.graph.push_action(current, action);
                Ok(())
            }
        }
    }

    /// Replace every `$(NAME)` with the variable's value. Substitution is
    /// non-recursive.
    fn substitute(&self, s: &str) -> Result<String, LoadErrorKind> {
        let mut out = String::with_capacity(s.len());
        let mut rest = s;
        while let Some(pos) = rest.find('$') {
            out.push_str(&rest[..pos]);
            let after = &rest[pos + 1..];
            if !after.starts_with('(') {
                return Err(LoadErrorKind::MalformedVariableRef);
            }
            let Some(close) = after.find(')') else {
                return Err(LoadErrorKind::MalformedVariableRef);
            };
            let name = &after[1..close];
            match self.variables.get(name) {
                Some(value) => out.push_str(value),
                None => return Err(LoadErrorKind::UnknownVariable(name.to_string())),
            }
            rest = &after[close + 1..];
        }
        out.push_str(rest);
        Ok(out)
    }
}

/// Load a complete definition text into a graph.
///
/// Raw duplicate dependency edges are kept; callers run
/// [`Graph::dedupe_edges`] once after loading.
pub fn load_str(input: &str) -> Result<Graph, LoadError> {
    let mut loader = Loader::default();
    for (idx, line) in input.lines().enumerate() {
        loader
            .feed(line)
            .map_err(|kind| LoadError { line: idx + 1, kind })?;
    }
    Ok(loader.graph)
}
