//! Resolve-cycles phase - relocates types out of package cycles.

use eyre::Result;

use crate::{
    pipeline::{CompilationContext, Diagnostic, Phase},
    resolve_cycles,
};

pub struct ResolveCyclesPhase;

impl Phase for ResolveCyclesPhase {
    fn name(&self) -> &'static str {
        "resolve-cycles"
    }

    fn description(&self) -> &'static str {
        "Move leaf types out of package import cycles"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        let (corrected, report) = resolve_cycles(&ctx.ir, &ctx.config.import_path)?;

        for relocation in &report.relocations {
            ctx.add_diagnostic(
                Diagnostic::info(
                    self.name(),
                    format!(
                        "moved from {} to {} to break the cycle {}",
                        relocation.from,
                        relocation.to,
                        relocation.cycle.join(" -> ")
                    ),
                )
                .at(&relocation.type_id),
            );
        }

        ctx.corrected = Some(corrected);
        ctx.cycles = Some(report);
        Ok(())
    }
}
