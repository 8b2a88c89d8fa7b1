//! Collect-names phase - builds the collision registry.

use eyre::Result;

use crate::{
    CollisionRegistry,
    pipeline::{CompilationContext, Phase},
};

/// Records every name and package the SDK will declare.
///
/// Runs on the cycle-free IR but before normalization, so service packages
/// come from their declared file components.
pub struct CollectNamesPhase;

impl Phase for CollectNamesPhase {
    fn name(&self) -> &'static str {
        "collect-names"
    }

    fn description(&self) -> &'static str {
        "Collect generated names and packages for collision checks"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        ctx.registry = Some(CollisionRegistry::from_ir(ctx.current_ir()));
        Ok(())
    }
}
