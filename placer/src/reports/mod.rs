//! Report data structures for commands.
//!
//! This module provides data structures that separate data collection from rendering.
//! Commands build reports, then render them to an Output target.

mod check;
mod explain;
mod output;
mod plan;

pub use check::CheckReport;
pub use explain::{
    CorrectionInfo, ExplainReport, FallbackInfo, LintInfo, ManifestInfo, PhaseInfo, PlanSummary,
};
pub use output::{Output, Report, TerminalOutput};
pub use plan::PlanReport;
