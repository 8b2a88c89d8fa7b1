//! Pipeline phase trait.

use eyre::Result;
use serde::Serialize;

use super::CompilationContext;

#[derive(Debug, Clone, Serialize)]
pub struct PhaseInfo {
    pub name: &'static str,
    pub description: &'static str,
}

/// A phase in the layout pipeline.
///
/// Built-in phases, in order:
/// - `validate` - reference graph and the import path precondition
/// - `resolve-cycles` - relocate types out of package cycles
/// - `collect-names` - build the collision registry
/// - `normalize` - demote nested root subpackages
/// - `place` - build the layout plan
pub trait Phase: Send + Sync {
    /// The name used in diagnostics and plugin hooks.
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// Run this phase on the context.
    ///
    /// # Errors
    ///
    /// Returns an error if planning cannot continue. Layout errors are
    /// returned unwrapped so callers can downcast them.
    fn run(&self, ctx: &mut CompilationContext) -> Result<()>;

    fn info(&self) -> PhaseInfo {
        PhaseInfo {
            name: self.name(),
            description: self.description(),
        }
    }
}
