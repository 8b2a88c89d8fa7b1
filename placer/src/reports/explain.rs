//! Explain command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from pipeline explanation.
#[derive(Debug)]
pub struct ExplainReport {
    /// Path to the manifest file.
    pub config_path: PathBuf,
    pub manifest: ManifestInfo,
    pub phases: Vec<PhaseInfo>,
    /// Validation lints.
    pub lints: Vec<LintInfo>,
    pub summary: PlanSummary,
    /// Types moved out of import cycles.
    pub relocations: Vec<CorrectionInfo>,
    /// Subpackages demoted into their own package.
    pub demotions: Vec<CorrectionInfo>,
    /// Singleton helpers moved off their default location.
    pub fallbacks: Vec<FallbackInfo>,
}

/// The resolved generator settings.
#[derive(Debug)]
pub struct ManifestInfo {
    pub api_name: String,
    pub import_path: String,
    pub mode: String,
    pub organization: Option<String>,
}

#[derive(Debug)]
pub struct PhaseInfo {
    pub name: String,
    pub description: String,
}

#[derive(Debug)]
pub struct LintInfo {
    pub name: String,
    pub description: String,
}

/// Counts from the finished plan.
#[derive(Debug)]
pub struct PlanSummary {
    pub strategy: String,
    pub files: usize,
    pub declarations: usize,
    pub clients: usize,
    pub artifacts: usize,
}

/// A declaration whose path the pipeline rewrote.
#[derive(Debug)]
pub struct CorrectionInfo {
    pub subject: String,
    pub from: String,
    pub to: String,
}

#[derive(Debug)]
pub struct FallbackInfo {
    pub kind: String,
    pub target: String,
    pub use_core: bool,
}

impl Report for ExplainReport {
    fn render(&self, out: &mut dyn Output) {
        out.title("Placer Pipeline Explanation");
        out.newline();

        out.key_value("Input", &self.config_path.display().to_string());
        out.key_value_indented("API", &self.manifest.api_name);
        out.key_value_indented("Import path", &self.manifest.import_path);
        out.key_value_indented("Mode", &self.manifest.mode);
        if let Some(organization) = &self.manifest.organization {
            out.key_value_indented("Organization", organization);
        }
        out.newline();

        out.section("Pipeline Phases");
        for (i, phase) in self.phases.iter().enumerate() {
            out.numbered_item(i + 1, &format!("{} - {}", phase.name, phase.description));
        }
        out.newline();

        out.section("Validation Lints");
        for lint in &self.lints {
            out.list_item(&format!("{}: {}", lint.name, lint.description));
        }
        out.newline();

        out.section("Plan");
        out.key_value_indented("Strategy", &self.summary.strategy);
        out.key_value_indented(
            "Files",
            &format!(
                "{} ({} declarations)",
                self.summary.files, self.summary.declarations
            ),
        );
        out.key_value_indented("Clients", &self.summary.clients.to_string());
        out.key_value_indented("Artifacts", &self.summary.artifacts.to_string());

        render_corrections(out, "Cycle Relocations", &self.relocations);
        render_corrections(out, "Demoted Subpackages", &self.demotions);

        if !self.fallbacks.is_empty() {
            out.newline();
            out.section("Collision Fallbacks");
            for fallback in &self.fallbacks {
                let suffix = if fallback.use_core { " [core]" } else { "" };
                out.list_item(&format!("{} -> {}{}", fallback.kind, fallback.target, suffix));
            }
        }
    }
}

fn render_corrections(out: &mut dyn Output, heading: &str, corrections: &[CorrectionInfo]) {
    if corrections.is_empty() {
        return;
    }
    out.newline();
    out.section(heading);
    for correction in corrections {
        out.list_item(&format!(
            "{}: {} -> {}",
            correction.subject, correction.from, correction.to
        ));
    }
}
