//! CLI argument parsing for minimake.

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "mk",
    about = "Minimal make-style build orchestrator",
    version,
    after_help = "Logs are written to: ~/.local/share/minimake/logs/minimake.log"
)]
pub struct Cli {
    /// Name of the goal target to build
    pub goal: String,

    /// Path to the definition file
    #[arg(short, long, default_value = "a.in")]
    pub file: PathBuf,
}
