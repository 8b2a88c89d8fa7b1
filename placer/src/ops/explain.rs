//! Explain operation - pipeline explanation.

use eyre::{Context, Result};
use placer_layout::pipeline::{Pipeline, phases::ValidatePhase};

use super::Project;
use crate::reports::{
    CorrectionInfo, ExplainReport, FallbackInfo, LintInfo, ManifestInfo, PhaseInfo, PlanSummary,
};

/// Execute the explain operation.
///
/// Runs the pipeline and returns what it does and which corrections it
/// applied to this project.
pub fn explain(project: &Project) -> Result<ExplainReport> {
    let pipeline = Pipeline::new();
    let validate_phase = ValidatePhase::new();

    let phases: Vec<PhaseInfo> = pipeline
        .phase_info()
        .into_iter()
        .map(|p| PhaseInfo {
            name: p.name.to_string(),
            description: p.description.to_string(),
        })
        .collect();

    let lints: Vec<LintInfo> = validate_phase
        .lint_info()
        .into_iter()
        .map(|l| LintInfo {
            name: l.name.to_string(),
            description: l.description.to_string(),
        })
        .collect();

    let mut ctx = pipeline
        .run(project.config.clone(), project.ir.clone())
        .wrap_err("Pipeline failed")?;

    let relocations = ctx
        .cycles
        .iter()
        .flat_map(|report| &report.relocations)
        .map(|r| CorrectionInfo {
            subject: r.type_id.to_string(),
            from: r.from.to_string(),
            to: r.to.to_string(),
        })
        .collect();

    let demotions = ctx
        .subpackages
        .iter()
        .flat_map(|tree| tree.demoted())
        .map(|(id, subpackage)| CorrectionInfo {
            subject: id.to_string(),
            from: subpackage.original_path.to_string(),
            to: subpackage.path().to_string(),
        })
        .collect();

    let plan = ctx.take_plan()?;
    let fallbacks = plan
        .fallbacks()
        .map(|artifact| FallbackInfo {
            kind: artifact.kind.to_string(),
            target: artifact.target.to_string(),
            use_core: artifact.use_core,
        })
        .collect();

    let config = &project.config;
    Ok(ExplainReport {
        config_path: project.config_path.clone(),
        manifest: ManifestInfo {
            api_name: plan.api_name.clone(),
            import_path: if config.is_single_module() {
                "(single module)".to_string()
            } else {
                config.import_path.clone()
            },
            mode: config.mode.to_string(),
            organization: config.organization.clone(),
        },
        phases,
        lints,
        summary: PlanSummary {
            strategy: plan.strategy.as_str().to_string(),
            files: plan.files.len(),
            declarations: plan.declaration_count(),
            clients: plan.clients.len(),
            artifacts: plan.artifacts.len(),
        },
        relocations,
        demotions,
        fallbacks,
    })
}

#[cfg(test)]
mod tests {
    use placer_ir::testing::{IrBuilder, path};

    use super::*;
    use crate::ops::testing;

    #[test]
    fn test_explain_lists_phases_and_lints() {
        let dir = tempfile::tempdir().unwrap();
        let report = explain(&testing::project(dir.path())).unwrap();

        let names: Vec<_> = report.phases.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            ["validate", "resolve-cycles", "collect-names", "normalize", "place"]
        );
        assert_eq!(report.lints.len(), 2);
        assert_eq!(report.summary.strategy, "per-type");
        assert_eq!(report.manifest.import_path, "github.com/acme/sdk");
        assert!(report.relocations.is_empty());
    }

    #[test]
    fn test_explain_lists_corrections() {
        let dir = tempfile::tempdir().unwrap();
        let mut project = testing::project(dir.path());
        project.ir = IrBuilder::new("acme")
            .object("A", path(&["x"], None), &["B"])
            .object("B", path(&["y"], None), &[])
            .object("C", path(&["y"], None), &["A"])
            .object("Environments", path(&[], None), &[])
            .environments(&["Production"])
            .subpackage(
                "subpackage_config",
                path(&[], Some("config")),
                None,
                &["subpackage_flags"],
            )
            .subpackage("subpackage_flags", path(&["config"], Some("flags")), None, &[])
            .build();

        let report = explain(&project).unwrap();

        assert_eq!(report.relocations.len(), 1);
        assert_eq!(report.relocations[0].subject, "B");
        assert_eq!(report.demotions.len(), 1);
        assert_eq!(report.demotions[0].subject, "subpackage_config");
        assert_eq!(report.fallbacks.len(), 1);
        assert_eq!(report.fallbacks[0].kind, "environments");
        assert!(report.fallbacks[0].use_core);
    }
}
