//! Pipeline snapshot plugin for `--visualize` debugging.
//!
//! Captures the context after each phase so intermediate results can be
//! inspected as JSON.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::{PoisonError, RwLock},
};

use eyre::Result;
use placer_ir::Ir;
use serde::Serialize;

use super::{CompilationContext, Diagnostic, Plugin};
use crate::{CollisionRegistry, CycleReport, LayoutPlan, NormalizedTree};

/// The pipeline state after one phase.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseSnapshot {
    pub phase: String,
    /// The cycle-free IR (after `resolve-cycles`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corrected: Option<Ir>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cycles: Option<CycleReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registry: Option<CollisionRegistry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subpackages: Option<NormalizedTree>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<LayoutPlan>,
    pub diagnostics: Vec<Diagnostic>,
}

impl PhaseSnapshot {
    fn write_to(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir)?;
        let json = serde_json::to_string_pretty(self)?;
        fs::write(dir.join(format!("{}.json", self.phase)), json)?;
        Ok(())
    }
}

/// A plugin that captures the context after each phase.
///
/// # Example
///
/// ```ignore
/// let pipeline = Pipeline::new().plugin(SnapshotPlugin::with_output_dir(".placer/debug"));
/// let ctx = pipeline.run(config, ir)?;
/// ```
pub struct SnapshotPlugin {
    snapshots: RwLock<Vec<PhaseSnapshot>>,
    /// Snapshots are written here as they are taken.
    output_dir: Option<PathBuf>,
}

impl SnapshotPlugin {
    pub fn new() -> Self {
        Self {
            snapshots: RwLock::new(Vec::new()),
            output_dir: None,
        }
    }

    pub fn with_output_dir(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            snapshots: RwLock::new(Vec::new()),
            output_dir: Some(output_dir.into()),
        }
    }

    pub fn snapshots(&self) -> Vec<PhaseSnapshot> {
        self.snapshots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Write every snapshot taken so far to `dir`, one file per phase.
    pub fn write_to_dir(&self, dir: impl AsRef<Path>) -> Result<()> {
        let snapshots = self.snapshots.read().unwrap_or_else(PoisonError::into_inner);
        for snapshot in snapshots.iter() {
            snapshot.write_to(dir.as_ref())?;
        }
        Ok(())
    }

    fn capture(&self, phase: &str, ctx: &CompilationContext) -> PhaseSnapshot {
        PhaseSnapshot {
            phase: phase.to_string(),
            corrected: ctx.corrected.clone(),
            cycles: ctx.cycles.clone(),
            registry: ctx.registry.clone(),
            subpackages: ctx.subpackages.clone(),
            plan: ctx.plan.clone(),
            diagnostics: ctx.diagnostics.clone(),
        }
    }
}

impl Default for SnapshotPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for SnapshotPlugin {
    fn name(&self) -> &'static str {
        "snapshot"
    }

    fn on_after_phase(&self, phase: &str, ctx: &mut CompilationContext) -> Result<()> {
        let snapshot = self.capture(phase, ctx);
        if let Some(dir) = &self.output_dir {
            snapshot.write_to(dir)?;
        }
        self.snapshots
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(snapshot);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use placer_ir::testing::{IrBuilder, path};
    use placer_manifest::GeneratorConfig;

    use super::*;
    use crate::pipeline::Pipeline;

    fn run(plugin: SnapshotPlugin) {
        let ir = IrBuilder::new("acme")
            .object("User", path(&["users"], None), &[])
            .build();
        Pipeline::new()
            .plugin(plugin)
            .run(GeneratorConfig::default(), ir)
            .unwrap();
    }

    #[test]
    fn test_snapshot_plugin_creation() {
        let plugin = SnapshotPlugin::new();
        assert!(plugin.snapshots().is_empty());
    }

    #[test]
    fn test_snapshots_written_per_phase() {
        let dir = tempfile::tempdir().unwrap();
        run(SnapshotPlugin::with_output_dir(dir.path()));

        for phase in ["validate", "resolve-cycles", "collect-names", "normalize", "place"] {
            assert!(dir.path().join(format!("{}.json", phase)).exists());
        }

        let place = fs::read_to_string(dir.path().join("place.json")).unwrap();
        let json: serde_json::Value = serde_json::from_str(&place).unwrap();
        assert_eq!(json["phase"], "place");
        assert_eq!(json["plan"]["files"][0]["target"]["filename"], "users/types.go");
    }
}
