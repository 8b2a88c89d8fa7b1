//! Core operations.
//!
//! This module contains the business logic for placer commands,
//! separated from CLI argument parsing and output rendering.

pub mod check;
pub mod explain;
pub mod plan;

use std::path::{Path, PathBuf};

pub use check::check;
pub use explain::explain;
use placer_ir::Ir;
use placer_manifest::{GeneratorConfig, PlacerToml, read_ir};
pub use plan::{PlanOptions, plan};

/// A loaded project: the resolved configuration and its IR snapshot.
#[derive(Debug)]
pub struct Project {
    pub config_path: PathBuf,
    pub root: PathBuf,
    pub config: GeneratorConfig,
    pub ir: Ir,
}

impl Project {
    /// Open `config_path`, applying command-line overrides.
    ///
    /// An `ir` override is taken as given; the manifest's own `ir` entry
    /// resolves against the manifest directory.
    pub fn load(
        config_path: &Path,
        ir: Option<&Path>,
        import_path: Option<&str>,
    ) -> placer_manifest::Result<Self> {
        let toml = PlacerToml::open(config_path)?;
        let mut config = toml.config();
        if let Some(import_path) = import_path {
            config = config.with_import_path(import_path)?;
        }
        let ir = match ir {
            Some(path) => read_ir(path)?,
            None => toml.load_ir()?,
        };

        Ok(Self {
            config_path: config_path.to_path_buf(),
            root: toml.root().to_path_buf(),
            config,
            ir,
        })
    }
}


#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_load_resolves_ir_next_to_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let project = testing::project(dir.path());

        assert_eq!(project.root, dir.path());
        assert_eq!(project.config.import_path, "github.com/acme/sdk");
        assert_eq!(project.ir.types.len(), 2);
    }

    #[test]
    fn test_load_applies_overrides() {
        let dir = tempfile::tempdir().unwrap();
        testing::project(dir.path());
        let other = dir.path().join("other.json");
        fs::copy(dir.path().join("ir.json"), &other).unwrap();

        let project = Project::load(
            &dir.path().join("placer.toml"),
            Some(&other),
            Some("example.com/sdk"),
        )
        .unwrap();
        assert_eq!(project.config.import_path, "example.com/sdk");

        let err = Project::load(
            &dir.path().join("placer.toml"),
            None,
            Some("example.com/ sdk"),
        )
        .unwrap_err();
        assert!(matches!(*err, placer_manifest::Error::Validation { .. }));
    }
}
