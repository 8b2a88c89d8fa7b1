use std::path::PathBuf;

use clap::Args;
use eyre::Result;

use super::ProjectArgs;
use crate::{
    ops::{self, PlanOptions},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct PlanCommand {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Write the plan as JSON to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write per-phase snapshots to .placer/debug/
    #[arg(long)]
    pub visualize: bool,
}

impl PlanCommand {
    pub fn run(&self) -> Result<()> {
        let project = self.project.load();
        let report = ops::plan(
            &project,
            PlanOptions {
                output: self.output.as_deref(),
                visualize: self.visualize,
            },
        )?;
        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
