use clap::Args;
use eyre::Result;

use super::ProjectArgs;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct ExplainCommand {
    #[command(flatten)]
    pub project: ProjectArgs,
}

impl ExplainCommand {
    pub fn run(&self) -> Result<()> {
        let project = self.project.load();
        ops::explain(&project)?.render(&mut TerminalOutput::new());
        Ok(())
    }
}
