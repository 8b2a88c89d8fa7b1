//! Package layout planning for generated Go SDKs.
//!
//! Given an IR snapshot and a [`GeneratorConfig`](placer_manifest::GeneratorConfig),
//! this crate decides which file and package every declaration and helper
//! artifact lands in. Nothing is rendered here; the output is a
//! [`LayoutPlan`].
//!
//! # Module Organization
//!
//! - [`graph`] - type references and the package import graph
//! - [`cycles`] - import cycle resolution
//! - [`registry`] - generated names and packages, for collision checks
//! - [`normalize`] - subpackage normalization
//! - [`placement`] - file and package placement of declarations
//! - [`artifacts`] - placement of singleton helpers and fixed files
//! - [`pipeline`] - the phases above wired together, with plugin hooks

pub mod artifacts;
pub mod cycles;
mod error;
pub mod graph;
pub mod normalize;
pub mod pipeline;
pub mod placement;
mod plan;
pub mod registry;

pub use artifacts::{
    ArtifactKind, ArtifactPlacement, CLIENT_PACKAGE, CORE_PACKAGE, ModulePlacement,
    place_artifacts, place_client_option_definition, place_client_options, place_environments,
    place_module, place_optional_helpers, place_pointer_helpers,
};
pub use cycles::{CycleReport, Relocation, SHARED_PACKAGE, resolve_cycles, shared_path};
pub use error::LayoutError;
pub use graph::{PackageGraph, ReferenceGraph, package_identity};
pub use normalize::{NormalizedSubpackage, NormalizedTree};
pub use placement::{
    ClientPlacement, DocPlacement, ErrorFilePlacement, FilePlacement, PlacedDeclaration,
    PlacementStrategy, place_clients, place_docs, place_errors, place_types,
};
pub use plan::LayoutPlan;
pub use registry::CollisionRegistry;
