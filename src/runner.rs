//! Action execution: one shell invocation per finished target.

use crate::types::{BuildError, Target};
use colored::*;
use log::info;
use std::process::Command;

/// Runs one target's action sequence. The scheduler calls this exactly
/// once per target, after all of the target's dependencies have finished.
pub trait ActionRunner {
    fn run(&mut self, target: &Target) -> Result<(), BuildError>;
}

/// The real runner: joins a target's actions into a single short-circuiting
/// shell command and waits for it.
#[derive(Debug, Default)]
pub struct ShellRunner;

impl ShellRunner {
    pub fn new() -> Self {
        Self
    }
}

impl ActionRunner for ShellRunner {
    fn run(&mut self, target: &Target) -> Result<(), BuildError> {
        if !target.defined {
            return Err(BuildError::UndefinedTarget(target.name.clone()));
        }

        if target.actions.is_empty() {
            println!("{} {} (no actions)", "✓".green(), target.name);
            info!("target '{}' finished: empty action list", target.name);
            return Ok(());
        }

        // "&&" stops the chain at the first failing action; the overall
        // exit status is all the runner observes
        let command = target.actions.join(" && ");
        println!("{} {}", "→".blue(), target.name);
        info!("target '{}' running: {}", target.name, command);

        let status = shell_command(&command)
            .status()
            .map_err(|source| BuildError::Spawn {
                target: target.name.clone(),
                source,
            })?;

        if !status.success() {
            let code = status.code().unwrap_or(-1);
            info!("target '{}' failed with exit code {}", target.name, code);
            return Err(BuildError::ActionFailure {
                target: target.name.clone(),
                code,
            });
        }

        println!("{} {}", "✓".green(), target.name);
        info!("target '{}' finished", target.name);
        Ok(())
    }
}

#[cfg(unix)]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command);
    cmd
}

#[cfg(windows)]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg(command);
    cmd
}
