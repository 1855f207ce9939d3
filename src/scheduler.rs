//! Dependency-respecting traversal: cycle detection and ordered execution.
//!
//! The same iterative depth-first walk serves two purposes. The validation
//! run only detects cycles reachable from the goal. The execution run
//! additionally invokes the [`ActionRunner`] for every target as it
//! finishes, so each target runs exactly once, strictly after all of its
//! dependencies.

use crate::graph::Graph;
use crate::runner::ActionRunner;
use crate::types::{BuildError, TargetId};

/// Per-target visitation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    Unvisited,
    InProgress,
    Done,
}

/// Validation run: walk the subgraph reachable from `goal` and fail on the
/// first cycle. Never invokes any action and never checks whether a target
/// is defined.
pub fn validate(graph: &Graph, goal: TargetId) -> Result<(), BuildError> {
    walk(graph, goal, None)
}

/// Execution run: walk the subgraph reachable from `goal` and hand every
/// target to `runner` as it finishes (post-order). The goal target finishes
/// last. The first error aborts the walk and discards the remaining stack.
pub fn execute(
    graph: &Graph,
    goal: TargetId,
    runner: &mut dyn ActionRunner,
) -> Result<(), BuildError> {
    walk(graph, goal, Some(runner))
}

/// The shared walk. Iterative with an explicit stack of
/// `(target, next dependency index)` resume pairs, so graph depth is
/// bounded only by memory.
fn walk(
    graph: &Graph,
    goal: TargetId,
    mut runner: Option<&mut dyn ActionRunner>,
) -> Result<(), BuildError> {
    let mut state = vec![Visit::Unvisited; graph.len()];
    let mut stack: Vec<(TargetId, usize)> = Vec::new();

    state[goal] = Visit::InProgress;
    stack.push((goal, 0));

    while let Some((v, i)) = stack.pop() {
        let deps = &graph.target(v).dependencies;

        if i >= deps.len() {
            // Every dependency of v has finished
            state[v] = Visit::Done;
            if let Some(runner) = runner.as_deref_mut() {
                runner.run(graph.target(v))?;
            }
            continue;
        }

        let d = deps[i];
        stack.push((v, i + 1));

        match state[d] {
            Visit::InProgress => {
                return Err(BuildError::MutualDependency(
                    graph.target(v).name.clone(),
                    graph.target(d).name.clone(),
                ));
            }
            Visit::Unvisited => {
                state[d] = Visit::InProgress;
                stack.push((d, 0));
            }
            Visit::Done => {}
        }
    }

    Ok(())
}
