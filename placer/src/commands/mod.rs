mod check;
mod completions;
mod explain;
mod plan;

use std::path::PathBuf;

use check::CheckCommand;
use clap::{Args, Parser, Subcommand};
use completions::CompletionsCommand;
use eyre::Result;
use explain::ExplainCommand;
use plan::PlanCommand;

use crate::ops::Project;

/// Extension trait for exiting on manifest errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for placer_manifest::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "placer")]
#[command(version)]
#[command(about = "Plan the file and package layout of a generated Go SDK")]
pub(crate) struct Cli {
    /// Log planning decisions (overridden by RUST_LOG)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Plan(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::Explain(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Plan the layout and print where everything goes
    Plan(PlanCommand),

    /// Validate placer.toml and the IR without printing a plan
    Check(CheckCommand),

    /// Show the pipeline and the corrections it applies
    Explain(ExplainCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

/// Options shared by every command that reads a project.
#[derive(Args)]
pub struct ProjectArgs {
    /// Path to placer.toml (defaults to ./placer.toml)
    #[arg(short, long, default_value = "placer.toml")]
    pub config: PathBuf,

    /// IR snapshot (overrides placer.toml)
    #[arg(long)]
    pub ir: Option<PathBuf>,

    /// Base import path (overrides placer.toml)
    #[arg(long)]
    pub import_path: Option<String>,
}

impl ProjectArgs {
    /// Load the manifest and IR, exiting with a report on manifest errors.
    pub fn load(&self) -> Project {
        Project::load(&self.config, self.ir.as_deref(), self.import_path.as_deref())
            .unwrap_or_exit()
    }
}
