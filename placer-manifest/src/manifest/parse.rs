//! Manifest parsing from files and strings.

use std::{path::Path, str::FromStr};

use super::{Manifest, validate::validate_manifest};
use crate::{Error, Result, error::SourceContext};

impl FromStr for Manifest {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_manifest(s, "placer.toml")
    }
}

impl Manifest {
    /// Parse a placer.toml file from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        parse_manifest(&content, &path.display().to_string())
    }

    /// Parse a placer.toml from a string with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        parse_manifest(content, filename)
    }
}

/// Parse a manifest from content with the given filename for error reporting.
pub fn parse_manifest(content: &str, filename: &str) -> Result<Manifest> {
    let source_ctx = SourceContext::new(content, filename);
    let manifest: Manifest = toml::from_str(content).map_err(|e| source_ctx.parse_error(e))?;
    validate_manifest(&manifest, content, filename)?;
    Ok(manifest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Mode;

    #[test]
    fn test_parse_full_manifest() {
        let src = r#"
[generator]
ir = "api/ir.json"
import_path = "github.com/acme/sdk"
mode = "fiber"
enable_explicit_null = true
organization = "acme"

[module]
path = "github.com/acme/sdk"
version = "1.18"
"#;
        let manifest: Manifest = src.parse().unwrap();
        assert_eq!(manifest.generator.ir, Path::new("api/ir.json"));
        assert_eq!(
            manifest.generator.import_path.as_deref(),
            Some("github.com/acme/sdk")
        );
        assert_eq!(manifest.generator.mode, Mode::Fiber);
        assert!(manifest.generator.enable_explicit_null);
        assert_eq!(manifest.module.unwrap().version.as_deref(), Some("1.18"));
    }

    #[test]
    fn test_parse_empty_manifest_uses_defaults() {
        let manifest: Manifest = "".parse().unwrap();
        assert_eq!(manifest.generator.ir, Path::new("ir.json"));
        assert_eq!(manifest.generator.mode, Mode::Client);
        assert!(manifest.generator.import_path.is_none());
        assert!(manifest.module.is_none());
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = "[generator]\nlanguage = \"go\"\n"
            .parse::<Manifest>()
            .unwrap_err();
        assert!(matches!(*err, Error::Parse { .. }));
    }

    #[test]
    fn test_unknown_mode_rejected() {
        let err = "[generator]\nmode = \"server\"\n"
            .parse::<Manifest>()
            .unwrap_err();
        assert!(matches!(*err, Error::Parse { .. }));
    }

    #[test]
    fn test_invalid_import_path() {
        let err = "[generator]\nimport_path = \"github.com/acme/\"\n"
            .parse::<Manifest>()
            .unwrap_err();
        let Error::Validation { span, message, .. } = *err else {
            panic!("expected validation error");
        };
        assert_eq!(
            message,
            "invalid 'generator.import_path': import path cannot start or end with '/'"
        );
        assert!(span.is_some());
    }

    #[test]
    fn test_empty_module_path() {
        let err = "[module]\npath = \"  \"\n".parse::<Manifest>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid 'module.path': module path cannot be empty"
        );
    }
}
