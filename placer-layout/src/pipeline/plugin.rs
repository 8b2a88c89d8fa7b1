//! Pipeline plugin trait.

use eyre::Result;

use super::CompilationContext;

/// A plugin that hooks into the layout pipeline.
///
/// Plugins are called before and after each phase and may inspect or
/// modify the context.
///
/// # Example
///
/// ```ignore
/// struct RelocationCounter(AtomicUsize);
///
/// impl Plugin for RelocationCounter {
///     fn name(&self) -> &'static str { "relocation-counter" }
///
///     fn on_after_phase(&self, phase: &str, ctx: &mut CompilationContext) -> Result<()> {
///         if let Some(report) = ctx.cycles.as_ref().filter(|_| phase == "resolve-cycles") {
///             self.0.store(report.relocations.len(), Ordering::SeqCst);
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Plugin: Send + Sync {
    fn name(&self) -> &'static str;

    /// Called before a phase runs. Return an error to abort the pipeline.
    #[allow(unused_variables)]
    fn on_before_phase(&self, phase: &str, ctx: &mut CompilationContext) -> Result<()> {
        Ok(())
    }

    /// Called after a phase completes. Return an error to abort the pipeline.
    #[allow(unused_variables)]
    fn on_after_phase(&self, phase: &str, ctx: &mut CompilationContext) -> Result<()> {
        Ok(())
    }
}
