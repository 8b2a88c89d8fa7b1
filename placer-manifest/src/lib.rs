//! Configuration parsing and IR loading for the placer SDK layout planner.
//!
//! `placer.toml` selects the IR snapshot and the generation options; both
//! files are reported through [`miette`] diagnostics pointing into the
//! offending source.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod config;
mod error;
mod ir;
mod manifest;

pub use config::{GeneratorConfig, ModuleConfig};
pub use error::{Error, Result, SourceContext};
pub use ir::{parse_ir, read_ir};
pub use manifest::{
    GeneratorSection, Manifest, Mode, ModuleSection, ParseContext, PlacerToml, parse_manifest,
};
