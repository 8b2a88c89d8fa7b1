//! Plan operation - layout planning from a project.

use std::{fs, path::Path};

use eyre::{Context, Result};
use placer_layout::pipeline::{Pipeline, SnapshotPlugin};

use super::Project;
use crate::reports::PlanReport;

/// Where per-phase snapshots go, relative to the project root.
pub const DEBUG_DIR: &str = ".placer/debug";

/// Options for the plan operation.
pub struct PlanOptions<'a> {
    /// Write the plan as JSON to this file.
    pub output: Option<&'a Path>,
    /// Whether to output debug snapshots.
    pub visualize: bool,
}

/// Execute the plan operation.
///
/// Runs the pipeline on the project and optionally writes the plan JSON.
pub fn plan(project: &Project, opts: PlanOptions) -> Result<PlanReport> {
    let debug_dir = project.root.join(DEBUG_DIR);

    let mut pipeline = Pipeline::new();
    if opts.visualize {
        pipeline = pipeline.plugin(SnapshotPlugin::with_output_dir(&debug_dir));
    }
    let mut ctx = pipeline
        .run(project.config.clone(), project.ir.clone())
        .wrap_err("Planning failed")?;

    let warnings = ctx.warnings().map(|d| d.to_string()).collect();
    let plan = ctx.take_plan()?;

    if let Some(output) = opts.output {
        let json = plan.to_json().wrap_err("Failed to serialize plan")?;
        fs::write(output, json)
            .wrap_err_with(|| format!("Failed to write {}", output.display()))?;
    }

    Ok(PlanReport {
        plan,
        warnings,
        written: opts.output.map(Path::to_path_buf),
        debug_dir: opts.visualize.then_some(debug_dir),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::testing;

    #[test]
    fn test_plan_writes_json() {
        let dir = tempfile::tempdir().unwrap();
        let project = testing::project(dir.path());
        let output = dir.path().join("plan.json");

        let report = plan(
            &project,
            PlanOptions {
                output: Some(&output),
                visualize: false,
            },
        )
        .unwrap();

        assert_eq!(report.written.as_deref(), Some(output.as_path()));
        assert!(report.debug_dir.is_none());
        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(json["api_name"], "acme");
        assert!(!dir.path().join(DEBUG_DIR).exists());
    }

    #[test]
    fn test_plan_visualize_writes_snapshots() {
        let dir = tempfile::tempdir().unwrap();
        let project = testing::project(dir.path());

        let report = plan(
            &project,
            PlanOptions {
                output: None,
                visualize: true,
            },
        )
        .unwrap();

        let debug_dir = report.debug_dir.unwrap();
        assert!(debug_dir.join("validate.json").exists());
        assert!(debug_dir.join("place.json").exists());
    }

    #[test]
    fn test_plan_fails_without_import_path() {
        let dir = tempfile::tempdir().unwrap();
        let mut project = testing::project(dir.path());
        project.config.import_path.clear();

        let err = plan(
            &project,
            PlanOptions {
                output: None,
                visualize: false,
            },
        )
        .unwrap_err();
        assert!(
            err.downcast_ref::<placer_layout::LayoutError>()
                .is_some_and(|e| matches!(e, placer_layout::LayoutError::MissingImportPath { .. }))
        );
    }
}
