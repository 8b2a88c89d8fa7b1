//! Built-in pipeline phases.
//!
//! - [`ValidatePhase`] - resolves type packages and runs lints
//! - [`ResolveCyclesPhase`] - breaks package import cycles
//! - [`CollectNamesPhase`] - builds the collision registry
//! - [`NormalizePhase`] - demotes nested root subpackages
//! - [`PlacePhase`] - builds the layout plan

mod collect_names;
mod normalize;
mod place;
mod resolve_cycles;
mod validate;

pub use collect_names::CollectNamesPhase;
pub use normalize::NormalizePhase;
pub use place::PlacePhase;
pub use resolve_cycles::ResolveCyclesPhase;
pub use validate::{KeywordPackageLint, Lint, LintInfo, ReservedPackageLint, ValidatePhase};
