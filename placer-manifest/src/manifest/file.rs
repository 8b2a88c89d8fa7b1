use std::path::{Path, PathBuf};

use placer_ir::Ir;

use super::Manifest;
use crate::{GeneratorConfig, Result, read_ir};

/// A placer.toml file with both its location and parsed manifest.
///
/// Relative paths inside the manifest resolve against the file's directory.
#[derive(Debug)]
pub struct PlacerToml {
    path: PathBuf,
    manifest: Manifest,
}

impl PlacerToml {
    /// Open and parse a placer.toml file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let manifest = Manifest::from_file(&path)?;
        Ok(Self { path, manifest })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// The directory containing the manifest.
    pub fn root(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }

    /// The IR snapshot path, resolved against the manifest directory.
    pub fn ir_path(&self) -> PathBuf {
        self.root().join(&self.manifest.generator.ir)
    }

    /// Read and validate the configured IR snapshot.
    pub fn load_ir(&self) -> Result<Ir> {
        read_ir(self.ir_path())
    }

    /// The resolved generator configuration.
    pub fn config(&self) -> GeneratorConfig {
        GeneratorConfig::from_manifest(&self.manifest)
    }
}
