//! Core data types for the minimake dependency graph.

use std::io;

/// Index of a target in the graph's flat storage.
///
/// Ids are assigned in first-reference order and are stable for the
/// lifetime of the graph. Dependency links are non-owning ids, never
/// back-references.
pub type TargetId = usize;

/// The unit of build work: a named node with dependencies and actions.
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    /// Position in the graph's target table.
    pub id: TargetId,

    /// Unique name; the graph maintains a name -> id bijection.
    pub name: String,

    /// Ordered dependency ids. May contain duplicates until the graph's
    /// global dedupe pass runs.
    pub dependencies: Vec<TargetId>,

    /// Fully-substituted shell command strings, in declared order.
    pub actions: Vec<String>,

    /// True once the target's own header was processed. A target that is
    /// only ever referenced as a dependency stays undefined indefinitely.
    pub defined: bool,
}

impl Target {
    /// Create an undefined stub with the given id and name.
    pub(crate) fn stub(id: TargetId, name: String) -> Self {
        Self {
            id,
            name,
            dependencies: Vec::new(),
            actions: Vec::new(),
            defined: false,
        }
    }
}

/// Errors raised while building or running the dependency graph.
///
/// The whole run is fail-fast: the first error aborts everything, so at
/// most one of these ever surfaces per invocation.
#[derive(Debug)]
pub enum BuildError {
    /// A target's header appeared more than once.
    DuplicateDefinition(String),
    /// A target was required to run but never got a definition.
    UndefinedTarget(String),
    /// Two targets depend on each other, directly or transitively.
    MutualDependency(String, String),
    /// The requested goal target does not exist in the graph.
    UnknownGoalTarget(String),
    /// A target's joined action command exited nonzero.
    ActionFailure { target: String, code: i32 },
    /// The shell itself could not be launched.
    Spawn { target: String, source: io::Error },
}

impl std::fmt::Display for BuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildError::DuplicateDefinition(name) => {
                write!(f, "target \"{}\" has multiple definitions", name)
            }
            BuildError::UndefinedTarget(name) => {
                write!(f, "target \"{}\" has no definition", name)
            }
            BuildError::MutualDependency(a, b) => {
                write!(f, "mutual dependency between \"{}\" and \"{}\"", a, b)
            }
            BuildError::UnknownGoalTarget(name) => {
                write!(f, "no such goal target: \"{}\"", name)
            }
            BuildError::ActionFailure { target, code } => {
                write!(f, "target \"{}\" failed with exit code {}", target, code)
            }
            BuildError::Spawn { target, source } => {
                write!(f, "failed to launch shell for target \"{}\": {}", target, source)
            }
        }
    }
}

impl std::error::Error for BuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BuildError::Spawn { source, .. } => Some(source),
            _ => None,
        }
    }
}
