//! minimake CLI - a minimal make-style build orchestrator.

use clap::Parser;
use colored::*;
use eyre::{Context, Result, eyre};
use log::info;
use minimake::{BuildError, LoadError, ShellRunner, loader, scheduler};
use std::fs;
use std::path::PathBuf;

mod cli;

use cli::Cli;

fn setup_logging() -> Result<()> {
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("minimake")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("minimake.log");

    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let text = fs::read_to_string(&cli.file)
        .with_context(|| format!("Failed to read definition file {}", cli.file.display()))?;

    // Fixed orchestration order: load, dedupe edges, resolve the goal,
    // validation run, execution run
    let mut graph = loader::load_str(&text)?;
    graph.dedupe_edges();
    info!(
        "loaded {} targets from {}",
        graph.len(),
        cli.file.display()
    );

    let goal = graph
        .lookup(&cli.goal)
        .ok_or_else(|| eyre!(BuildError::UnknownGoalTarget(cli.goal.clone())))?;

    scheduler::validate(&graph, goal)?;

    let mut runner = ShellRunner::new();
    scheduler::execute(&graph, goal, &mut runner)?;

    Ok(())
}

fn main() -> Result<()> {
    setup_logging().context("Failed to setup logging")?;

    let cli = Cli::parse();
    info!("Command: {:?}", std::env::args().collect::<Vec<_>>());

    if let Err(e) = run(cli) {
        if let Some(load) = e.downcast_ref::<LoadError>() {
            eprintln!("Error line: {}", load.line);
        }
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }

    println!("{} All targets finished.", "✓".green());
    Ok(())
}
