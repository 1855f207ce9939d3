//! Minimake: a minimal make-style build orchestrator.
//!
//! Given named targets, each with dependency targets and an ordered list of
//! shell actions, minimake validates the dependency graph (no cycles) and
//! executes every transitively required target's actions exactly once, in
//! an order that respects dependencies, halting on the first failure.
//!
//! The run is single-threaded and fully synchronous; the only blocking
//! point is the shell invocation itself.
//!
//! # Example
//!
//! ```no_run
//! use minimake::{Graph, ShellRunner, scheduler};
//!
//! let mut graph = Graph::new();
//! graph.define("all", &["compile"], vec![]).unwrap();
//! graph.define("compile", &[], vec!["cc -c main.c".to_string()]).unwrap();
//! graph.dedupe_edges();
//!
//! let goal = graph.lookup("all").unwrap();
//! scheduler::validate(&graph, goal).unwrap();
//!
//! let mut runner = ShellRunner::new();
//! scheduler::execute(&graph, goal, &mut runner).unwrap();
//! ```

mod graph;
mod runner;
mod types;

pub mod loader;
pub mod scheduler;

// Re-export public API
pub use graph::Graph;
pub use loader::{LoadError, LoadErrorKind, load_str};
pub use runner::{ActionRunner, ShellRunner};
pub use types::{BuildError, Target, TargetId};
