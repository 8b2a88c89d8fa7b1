//! Check operation - layout validation.

use placer_layout::pipeline::{Pipeline, Severity};

use super::Project;
use crate::reports::CheckReport;

/// Execute the check operation.
///
/// Runs the pipeline and collects its diagnostics. A fatal pipeline error
/// is reported as an error rather than returned.
pub fn check(project: &Project) -> CheckReport {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut infos = Vec::new();

    match Pipeline::new().run(project.config.clone(), project.ir.clone()) {
        Ok(ctx) => {
            for diag in &ctx.diagnostics {
                let msg = if let Some(loc) = &diag.location {
                    format!("{}\n  --> {}", diag.message, loc)
                } else {
                    diag.message.clone()
                };

                match diag.severity {
                    Severity::Error => errors.push(msg),
                    Severity::Warning => warnings.push(msg),
                    Severity::Info => infos.push(msg),
                }
            }
        }
        Err(err) => errors.push(format!("{:#}", err)),
    }

    CheckReport {
        config_path: project.config_path.clone(),
        errors,
        warnings,
        infos,
    }
}

#[cfg(test)]
mod tests {
    use placer_ir::testing::{IrBuilder, path};

    use super::*;
    use crate::ops::testing;

    #[test]
    fn test_check_valid_project() {
        let dir = tempfile::tempdir().unwrap();
        let report = check(&testing::project(dir.path()));
        assert!(report.is_valid());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_check_reports_missing_import_path() {
        let dir = tempfile::tempdir().unwrap();
        let mut project = testing::project(dir.path());
        project.config.import_path.clear();

        let report = check(&project);
        assert!(!report.is_valid());
        assert!(report.errors[0].contains("package import path required"));
    }

    #[test]
    fn test_check_reports_relocations() {
        let dir = tempfile::tempdir().unwrap();
        let mut project = testing::project(dir.path());
        project.ir = IrBuilder::new("acme")
            .object("A", path(&["x"], None), &["B"])
            .object("B", path(&["y"], None), &[])
            .object("C", path(&["y"], None), &["A"])
            .build();

        let report = check(&project);
        assert!(report.is_valid());
        assert_eq!(report.infos.len(), 1);
        assert!(report.infos[0].contains("B"));
    }
}
