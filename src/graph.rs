//! The target graph: flat indexed storage plus a name index.

use crate::types::{BuildError, Target, TargetId};
use std::collections::HashMap;

/// Owns every target record for the lifetime of a run.
///
/// Targets live in a flat `Vec` keyed by [`TargetId`]; dependency edges are
/// plain ids into that table. Records are created lazily on first mention,
/// either by their own header or as someone else's dependency.
#[derive(Debug, Default)]
pub struct Graph {
    targets: Vec<Target>,
    names: HashMap<String, TargetId>,
}

impl Graph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the id for `name`, creating an undefined stub on first
    /// reference.
    pub fn resolve(&mut self, name: &str) -> TargetId {
        if let Some(&id) = self.names.get(name) {
            return id;
        }
        let id = self.targets.len();
        self.targets.push(Target::stub(id, name.to_string()));
        self.names.insert(name.to_string(), id);
        id
    }

    /// Define a target: record its dependencies (order preserved, stubs
    /// created for forward references) and initial actions, and mark it
    /// defined.
    ///
    /// Fails with [`BuildError::DuplicateDefinition`] if the target already
    /// has a definition.
    pub fn define(
        &mut self,
        name: &str,
        dep_names: &[&str],
        actions: Vec<String>,
    ) -> Result<TargetId, BuildError> {
        let id = self.resolve(name);
        if self.targets[id].defined {
            return Err(BuildError::DuplicateDefinition(name.to_string()));
        }

        let deps: Vec<TargetId> = dep_names.iter().map(|dep| self.resolve(dep)).collect();

        let target = &mut self.targets[id];
        target.dependencies = deps;
        target.actions = actions;
        target.defined = true;
        Ok(id)
    }

    /// Append one action to an existing target.
    pub fn push_action(&mut self, id: TargetId, action: String) {
        self.targets[id].actions.push(action);
    }

    /// Look up a target id by name, without creating a stub.
    pub fn lookup(&self, name: &str) -> Option<TargetId> {
        self.names.get(name).copied()
    }

    /// Borrow a target record.
    pub fn target(&self, id: TargetId) -> &Target {
        &self.targets[id]
    }

    /// Number of target records, stubs included.
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// True if no target has ever been mentioned.
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Drop duplicate dependency edges from every target, keeping first
    /// occurrence order.
    ///
    /// Applied once after all definitions are loaded. Execution correctness
    /// does not depend on it (the scheduler's Done state already prevents
    /// re-running a target); it keeps adjacency lists well-formed.
    pub fn dedupe_edges(&mut self) {
        let mut seen = vec![false; self.targets.len()];
        for target in &mut self.targets {
            target.dependencies = dedupe_first_occurrence(&target.dependencies, &mut seen);
        }
    }
}

/// Return the subsequence of `ids` with duplicates removed, first
/// occurrence kept. `seen` is a scratch table at least as long as the
/// largest id; it is reset before use.
fn dedupe_first_occurrence(ids: &[TargetId], seen: &mut [bool]) -> Vec<TargetId> {
    seen.fill(false);
    let mut out = Vec::with_capacity(ids.len());
    for &id in ids {
        if !seen[id] {
            seen[id] = true;
            out.push(id);
        }
    }
    out
}
