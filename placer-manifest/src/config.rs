//! The resolved runtime configuration.

use serde::Serialize;

use crate::{
    Manifest, Mode, Result, error::SourceContext, manifest::validate_import_path,
};

/// Validated generator settings consumed by the layout pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GeneratorConfig {
    /// Base import path; empty selects single-module generation.
    pub import_path: String,
    pub mode: Mode,
    pub enable_explicit_null: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module: Option<ModuleConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleConfig {
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl GeneratorConfig {
    pub fn from_manifest(manifest: &Manifest) -> Self {
        let generator = &manifest.generator;
        Self {
            import_path: generator.import_path.clone().unwrap_or_default(),
            mode: generator.mode,
            enable_explicit_null: generator.enable_explicit_null,
            organization: generator.organization.clone(),
            module: manifest.module.as_ref().map(|m| ModuleConfig {
                path: m.path.clone(),
                version: m.version.clone(),
            }),
        }
    }

    /// Replace the import path, applying the same checks as the manifest.
    pub fn with_import_path(mut self, import_path: impl Into<String>) -> Result<Self> {
        let import_path = import_path.into();
        if let Some(reason) = validate_import_path(&import_path) {
            let ctx = SourceContext::new(import_path.clone(), "--import-path");
            return Err(ctx.validation_error(format!("invalid import path: {}", reason)));
        }
        self.import_path = import_path;
        Ok(self)
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_explicit_null(mut self, enabled: bool) -> Self {
        self.enable_explicit_null = enabled;
        self
    }

    pub fn with_module(mut self, path: impl Into<String>) -> Self {
        self.module = Some(ModuleConfig {
            path: path.into(),
            version: None,
        });
        self
    }

    /// Returns true if generation targets a single module with no import root.
    pub fn is_single_module(&self) -> bool {
        self.import_path.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_manifest() {
        let manifest: Manifest = "[generator]\nimport_path = \"github.com/acme/sdk\"\n\n[module]\npath = \"github.com/acme/sdk\"\n"
            .parse()
            .unwrap();
        let config = GeneratorConfig::from_manifest(&manifest);
        assert_eq!(config.import_path, "github.com/acme/sdk");
        assert!(!config.is_single_module());
        assert_eq!(config.module.unwrap().path, "github.com/acme/sdk");
    }

    #[test]
    fn test_absent_import_path_is_single_module() {
        let config = GeneratorConfig::from_manifest(&Manifest::default());
        assert!(config.is_single_module());
        assert_eq!(config.mode, Mode::Client);
    }

    #[test]
    fn test_with_import_path_validates() {
        let config = GeneratorConfig::default()
            .with_import_path("github.com/acme/sdk")
            .unwrap();
        assert_eq!(config.import_path, "github.com/acme/sdk");

        let err = GeneratorConfig::default()
            .with_import_path("github.com/ acme")
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid import path: import path cannot contain whitespace"
        );
    }
}
