//! Shared test infrastructure for minimake integration tests.
//!
//! Each test writes a definition file into a temp directory and drives the
//! full pipeline (load, dedupe, validate, execute). Shell actions append to
//! a log file inside the same directory, so execution order and
//! exactly-once semantics are observable from the file contents.

#![allow(dead_code)]

use eyre::{Result, eyre};
use minimake::{BuildError, ShellRunner, loader, scheduler};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Test environment with automatic cleanup.
pub struct TestEnv {
    pub temp_dir: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir }
    }

    /// Path of the log file shell actions append to.
    pub fn log_path(&self) -> PathBuf {
        self.temp_dir.path().join("run.log")
    }

    /// An action that appends `word` to the log file.
    pub fn echo(&self, word: &str) -> String {
        format!("echo {} >> {}", word, self.log_path().display())
    }

    /// Run the full pipeline: load, dedupe edges, resolve goal, validation
    /// run, execution run. Mirrors the binary's orchestration order.
    pub fn run(&self, definitions: &str, goal: &str) -> Result<()> {
        let mut graph = loader::load_str(definitions)?;
        graph.dedupe_edges();
        let goal = graph
            .lookup(goal)
            .ok_or_else(|| eyre!(BuildError::UnknownGoalTarget(goal.to_string())))?;
        scheduler::validate(&graph, goal)?;
        let mut runner = ShellRunner::new();
        scheduler::execute(&graph, goal, &mut runner)?;
        Ok(())
    }

    /// Load and validate only; never executes any action.
    pub fn validate_only(&self, definitions: &str, goal: &str) -> Result<()> {
        let mut graph = loader::load_str(definitions)?;
        graph.dedupe_edges();
        let goal = graph
            .lookup(goal)
            .ok_or_else(|| eyre!(BuildError::UnknownGoalTarget(goal.to_string())))?;
        scheduler::validate(&graph, goal)?;
        Ok(())
    }

    /// Lines appended to the log, in execution order. Empty if no action
    /// ever ran.
    pub fn log_lines(&self) -> Vec<String> {
        match fs::read_to_string(self.log_path()) {
            Ok(contents) => contents.lines().map(String::from).collect(),
            Err(_) => Vec::new(),
        }
    }

    /// Position of `word` in the log, panicking if it never ran.
    pub fn log_position(&self, word: &str) -> usize {
        let lines = self.log_lines();
        lines
            .iter()
            .position(|l| l == word)
            .unwrap_or_else(|| panic!("{} never ran, log: {:?}", word, lines))
    }

    /// How many times `word` was appended to the log.
    pub fn log_count(&self, word: &str) -> usize {
        self.log_lines().iter().filter(|l| *l == word).count()
    }

    /// Assert that no action ever spawned a process.
    pub fn assert_nothing_ran(&self) {
        assert!(
            !self.log_path().exists(),
            "expected zero invocations, log: {:?}",
            self.log_lines()
        );
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
