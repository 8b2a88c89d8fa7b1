//! State threaded through the pipeline phases.

use eyre::{Result, eyre};
use placer_ir::Ir;
use placer_manifest::GeneratorConfig;

use super::diagnostic::{Diagnostic, Severity};
use crate::{CollisionRegistry, CycleReport, LayoutPlan, NormalizedTree, ReferenceGraph};

/// Context passed through all pipeline phases.
///
/// Each phase fills in one field. The input IR is never modified; the
/// cycle-free snapshot is kept in `corrected` once resolution has run.
#[derive(Debug)]
pub struct CompilationContext {
    pub config: GeneratorConfig,
    /// The IR as read.
    pub ir: Ir,
    /// The reference graph of the input (populated by `validate`).
    pub graph: Option<ReferenceGraph>,
    /// The IR after cycle resolution (populated by `resolve-cycles`).
    pub corrected: Option<Ir>,
    pub cycles: Option<CycleReport>,
    /// Populated by `collect-names`.
    pub registry: Option<CollisionRegistry>,
    /// Populated by `normalize`.
    pub subpackages: Option<NormalizedTree>,
    /// Populated by `place`.
    pub plan: Option<LayoutPlan>,
    pub diagnostics: Vec<Diagnostic>,
}

impl CompilationContext {
    pub fn new(config: GeneratorConfig, ir: Ir) -> Self {
        Self {
            config,
            ir,
            graph: None,
            corrected: None,
            cycles: None,
            registry: None,
            subpackages: None,
            plan: None,
            diagnostics: Vec::new(),
        }
    }

    /// The most corrected IR available so far.
    pub fn current_ir(&self) -> &Ir {
        self.corrected.as_ref().unwrap_or(&self.ir)
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_error())
    }

    pub fn has_warnings(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_warning())
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity.is_error())
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity.is_warning())
            .count()
    }

    pub fn add_error(&mut self, phase: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::error(phase, message));
    }

    pub fn add_warning(&mut self, phase: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::warning(phase, message));
    }

    pub fn add_info(&mut self, phase: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::info(phase, message));
    }

    pub fn add_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.severity, Severity::Error))
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.severity, Severity::Warning))
    }

    /// Take the plan out of the context.
    ///
    /// Fails if the `place` phase hasn't run.
    pub fn take_plan(&mut self) -> Result<LayoutPlan> {
        self.plan
            .take()
            .ok_or_else(|| eyre!("layout plan not set - did the place phase run?"))
    }
}
