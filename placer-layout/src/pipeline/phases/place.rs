//! Place phase - builds the layout plan.

use eyre::{Result, eyre};

use crate::{
    LayoutPlan,
    pipeline::{CompilationContext, Diagnostic, Phase},
};

/// Assigns every declaration and artifact a target.
///
/// Must run after `collect-names` and `normalize`.
pub struct PlacePhase;

impl Phase for PlacePhase {
    fn name(&self) -> &'static str {
        "place"
    }

    fn description(&self) -> &'static str {
        "Assign files and packages to declarations and artifacts"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        let registry = ctx
            .registry
            .as_ref()
            .ok_or_else(|| eyre!("registry not set - place must run after collect-names"))?;
        let tree = ctx
            .subpackages
            .as_ref()
            .ok_or_else(|| eyre!("subpackages not set - place must run after normalize"))?;

        let plan = LayoutPlan::build(&ctx.config, ctx.current_ir(), registry, tree)?;

        let fallbacks: Vec<Diagnostic> = plan
            .fallbacks()
            .map(|artifact| {
                Diagnostic::warning(
                    self.name(),
                    format!(
                        "{} placed in {} to avoid a collision with a generated declaration",
                        artifact.kind, artifact.target.filename
                    ),
                )
            })
            .collect();
        ctx.diagnostics.extend(fallbacks);

        ctx.plan = Some(plan);
        Ok(())
    }
}
