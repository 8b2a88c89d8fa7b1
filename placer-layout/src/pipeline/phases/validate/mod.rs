//! Validate phase - builds the reference graph and runs lints.

mod lint;
pub mod lints;

use eyre::{Result, bail};
pub use lint::{Lint, LintInfo};
pub use lints::{KeywordPackageLint, ReservedPackageLint};

use crate::{
    ReferenceGraph,
    pipeline::{CompilationContext, Phase},
};

/// Phase that resolves every type's package and checks the IR.
///
/// A cross-package reference without an import path is fatal. Lints only
/// fail the phase if they report an error.
pub struct ValidatePhase {
    lints: Vec<Box<dyn Lint>>,
}

impl ValidatePhase {
    /// Create a validate phase with the default lints.
    pub fn new() -> Self {
        Self {
            lints: vec![Box::new(KeywordPackageLint), Box::new(ReservedPackageLint)],
        }
    }

    /// Create a validate phase with no lints.
    pub fn empty() -> Self {
        Self { lints: Vec::new() }
    }

    pub fn with_lint(mut self, lint: impl Lint + 'static) -> Self {
        self.lints.push(Box::new(lint));
        self
    }

    pub fn lint_info(&self) -> Vec<LintInfo> {
        self.lints.iter().map(|l| l.info()).collect()
    }
}

impl Default for ValidatePhase {
    fn default() -> Self {
        Self::new()
    }
}

impl Phase for ValidatePhase {
    fn name(&self) -> &'static str {
        "validate"
    }

    fn description(&self) -> &'static str {
        "Resolve type packages and check the import path precondition"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        let graph = ReferenceGraph::build(&ctx.ir, &ctx.config.import_path)?;
        if let Err(err) = graph.check_import_path() {
            ctx.add_error(self.name(), err.to_string());
            return Err(err.into());
        }

        for lint in &self.lints {
            lint.check(&ctx.ir, &ctx.config, &mut ctx.diagnostics);
        }
        ctx.graph = Some(graph);

        if ctx.has_errors() {
            bail!("validation failed with {} error(s)", ctx.error_count());
        }
        Ok(())
    }
}
