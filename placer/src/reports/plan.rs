//! Plan command report data structures.

use std::path::PathBuf;

use placer_layout::LayoutPlan;

use super::output::{Output, Report};

/// Report data from layout planning.
#[derive(Debug)]
pub struct PlanReport {
    pub plan: LayoutPlan,
    /// Warning messages from the pipeline.
    pub warnings: Vec<String>,
    /// Where the plan JSON was written, if requested.
    pub written: Option<PathBuf>,
    /// Path to debug snapshots, if visualization was enabled.
    pub debug_dir: Option<PathBuf>,
}

impl Report for PlanReport {
    fn render(&self, out: &mut dyn Output) {
        if let Some(debug_dir) = &self.debug_dir {
            out.key_value(
                "Pipeline snapshots written to",
                &debug_dir.display().to_string(),
            );
            out.newline();
        }

        for warning in &self.warnings {
            out.warning(warning);
        }

        out.preformatted(self.plan.to_string().trim_end());

        if let Some(written) = &self.written {
            out.newline();
            out.key_value("Plan written to", &written.display().to_string());
        }
    }
}
