use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;

/// File-backed team workflow dashboard.
/// State lives under ~/.workflow-hub or a directory passed via --data.
#[derive(Parser)]
#[command(name = "hub", version, about = "Team workflow dashboard CLI")]
pub struct Cli {
    /// Directory holding the persisted collections.
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}
