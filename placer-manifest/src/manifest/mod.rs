//! Manifest types and parsing for placer.toml files.

mod file;
mod mode;
mod parse;
mod validate;

use std::path::PathBuf;

pub use file::PlacerToml;
pub use mode::Mode;
pub use parse::parse_manifest;
use serde::Deserialize;
pub use validate::ParseContext;
pub(crate) use validate::validate_import_path;

/// Root manifest for placer.toml
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Generator settings
    #[serde(default)]
    pub generator: GeneratorSection,

    /// Go module settings; presence plans a go.mod
    #[serde(default)]
    pub module: Option<ModuleSection>,
}

/// The `[generator]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorSection {
    /// IR snapshot, relative to the manifest
    #[serde(default = "default_ir")]
    pub ir: PathBuf,

    /// Base import path; empty or absent means single-module generation
    #[serde(default)]
    pub import_path: Option<String>,

    #[serde(default)]
    pub mode: Mode,

    /// Whether optional/null helpers are generated
    #[serde(default)]
    pub enable_explicit_null: bool,

    /// Shown in reports only
    #[serde(default)]
    pub organization: Option<String>,
}

impl Default for GeneratorSection {
    fn default() -> Self {
        Self {
            ir: default_ir(),
            import_path: None,
            mode: Mode::default(),
            enable_explicit_null: false,
            organization: None,
        }
    }
}

fn default_ir() -> PathBuf {
    PathBuf::from("ir.json")
}

/// The `[module]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModuleSection {
    pub path: String,

    #[serde(default)]
    pub version: Option<String>,
}
