//! Pipeline orchestrator.

use eyre::Result;
use placer_ir::Ir;
use placer_manifest::GeneratorConfig;
use tracing::debug;

use super::{
    CompilationContext, Phase, Plugin,
    phase::PhaseInfo,
    phases::{CollectNamesPhase, NormalizePhase, PlacePhase, ResolveCyclesPhase, ValidatePhase},
};

/// The layout pipeline.
///
/// Runs the built-in phases followed by any user phases, calling plugin
/// hooks before and after each.
///
/// # Example
///
/// ```ignore
/// let pipeline = Pipeline::new().plugin(SnapshotPlugin::new());
/// let mut ctx = pipeline.run(config, ir)?;
/// let plan = ctx.take_plan()?;
/// ```
pub struct Pipeline {
    phases: Vec<Box<dyn Phase>>,
    plugins: Vec<Box<dyn Plugin>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self {
            phases: Vec::new(),
            plugins: Vec::new(),
        }
    }

    /// Add a phase to run after the built-in phases.
    pub fn phase(mut self, phase: impl Phase + 'static) -> Self {
        self.phases.push(Box::new(phase));
        self
    }

    /// Add a plugin to receive phase lifecycle hooks.
    pub fn plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    fn builtin_phases() -> Vec<Box<dyn Phase>> {
        vec![
            Box::new(ValidatePhase::new()),
            Box::new(ResolveCyclesPhase),
            Box::new(CollectNamesPhase),
            Box::new(NormalizePhase),
            Box::new(PlacePhase),
        ]
    }

    /// Every phase this pipeline runs, in order.
    pub fn phase_info(&self) -> Vec<PhaseInfo> {
        Self::builtin_phases()
            .iter()
            .chain(self.phases.iter())
            .map(|phase| phase.info())
            .collect()
    }

    /// Plan the layout of `ir`.
    ///
    /// # Errors
    ///
    /// Returns the first fatal error. No partial plan is produced.
    pub fn run(&self, config: GeneratorConfig, ir: Ir) -> Result<CompilationContext> {
        let mut ctx = CompilationContext::new(config, ir);

        for phase in Self::builtin_phases().iter().chain(self.phases.iter()) {
            self.run_phase(phase.as_ref(), &mut ctx)?;
        }

        Ok(ctx)
    }

    fn run_phase(&self, phase: &dyn Phase, ctx: &mut CompilationContext) -> Result<()> {
        let phase_name = phase.name();

        for plugin in &self.plugins {
            plugin.on_before_phase(phase_name, ctx)?;
        }

        debug!(phase = phase_name, "phase started");
        phase.run(ctx)?;
        debug!(phase = phase_name, diagnostics = ctx.diagnostics.len(), "phase finished");

        for plugin in &self.plugins {
            plugin.on_after_phase(phase_name, ctx)?;
        }

        Ok(())
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    };

    use placer_ir::testing::{IrBuilder, path};

    use super::*;
    use crate::LayoutError;

    struct CountingPlugin {
        before_count: Arc<AtomicUsize>,
        after_count: Arc<AtomicUsize>,
    }

    impl CountingPlugin {
        fn new() -> (Self, Arc<AtomicUsize>, Arc<AtomicUsize>) {
            let before = Arc::new(AtomicUsize::new(0));
            let after = Arc::new(AtomicUsize::new(0));
            (
                Self {
                    before_count: before.clone(),
                    after_count: after.clone(),
                },
                before,
                after,
            )
        }
    }

    impl Plugin for CountingPlugin {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn on_before_phase(&self, _phase: &str, _ctx: &mut CompilationContext) -> Result<()> {
            self.before_count.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn on_after_phase(&self, _phase: &str, _ctx: &mut CompilationContext) -> Result<()> {
            self.after_count.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct RecordingPlugin(Arc<Mutex<Vec<String>>>);

    impl Plugin for RecordingPlugin {
        fn name(&self) -> &'static str {
            "recording"
        }

        fn on_after_phase(&self, phase: &str, _ctx: &mut CompilationContext) -> Result<()> {
            self.0.lock().unwrap().push(phase.to_string());
            Ok(())
        }
    }

    fn config() -> GeneratorConfig {
        GeneratorConfig::default()
            .with_import_path("github.com/acme/sdk")
            .unwrap()
    }

    fn make_test_ir() -> Ir {
        IrBuilder::new("acme")
            .object("User", path(&["users"], None), &["Org"])
            .object("Org", path(&["orgs"], None), &[])
            .build()
    }

    #[test]
    fn test_pipeline_runs_phases() {
        let mut ctx = Pipeline::new()
            .run(config(), make_test_ir())
            .expect("pipeline should succeed");

        assert!(ctx.graph.is_some());
        assert!(ctx.corrected.is_some());
        assert!(ctx.registry.is_some());
        assert!(ctx.subpackages.is_some());
        let plan = ctx.take_plan().unwrap();
        assert_eq!(plan.files.len(), 2);
    }

    #[test]
    fn test_pipeline_plugin_hooks() {
        let (plugin, before_count, after_count) = CountingPlugin::new();

        let pipeline = Pipeline::new().plugin(plugin);
        let _ = pipeline
            .run(config(), make_test_ir())
            .expect("pipeline should succeed");

        // 5 built-in phases
        assert_eq!(before_count.load(Ordering::SeqCst), 5);
        assert_eq!(after_count.load(Ordering::SeqCst), 5);
    }

    #[test]
    fn test_phase_order() {
        let phases = Arc::new(Mutex::new(Vec::new()));
        let pipeline = Pipeline::new().plugin(RecordingPlugin(phases.clone()));
        pipeline.run(config(), make_test_ir()).unwrap();

        assert_eq!(
            *phases.lock().unwrap(),
            vec!["validate", "resolve-cycles", "collect-names", "normalize", "place"]
        );
        let names: Vec<&str> = pipeline.phase_info().iter().map(|p| p.name).collect();
        assert_eq!(names, *phases.lock().unwrap());
    }

    #[test]
    fn test_missing_import_path_is_fatal() {
        let err = Pipeline::new()
            .run(GeneratorConfig::default(), make_test_ir())
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<LayoutError>(),
            Some(LayoutError::MissingImportPath { .. })
        ));
    }
}
