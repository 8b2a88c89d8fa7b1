//! The layout pipeline.
//!
//! [`Pipeline`] runs the planning phases in a fixed order over a shared
//! [`CompilationContext`]:
//!
//! - explicit phase boundaries (validate → resolve-cycles → collect-names →
//!   normalize → place)
//! - plugin hooks before and after each phase
//! - non-fatal observations collected as [`Diagnostic`]s
//!
//! # Example
//!
//! ```ignore
//! use placer_layout::pipeline::Pipeline;
//!
//! let mut ctx = Pipeline::new().run(config, ir)?;
//! for diag in ctx.warnings() {
//!     eprintln!("{}", diag);
//! }
//! let plan = ctx.take_plan()?;
//! ```

mod context;
mod diagnostic;
mod phase;
pub mod phases;
mod plugin;
mod runner;
mod snapshot;

pub use context::CompilationContext;
pub use diagnostic::{Diagnostic, Severity};
pub use phase::{Phase, PhaseInfo};
pub use plugin::Plugin;
pub use runner::Pipeline;
pub use snapshot::{PhaseSnapshot, SnapshotPlugin};
