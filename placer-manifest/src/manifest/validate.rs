//! Validation of manifest values against their source text.

use miette::SourceSpan;

use super::Manifest;
use crate::{Error, Result};

/// Parsing and validation context that carries source information.
///
/// Validation errors point at the offending key, so the context keeps the
/// raw TOML around to locate spans.
#[derive(Debug, Clone)]
pub struct ParseContext<'a> {
    src: &'a str,
    filename: &'a str,
    /// Table path for nested validation (e.g., ["module"])
    path: Vec<&'a str>,
}

impl<'a> ParseContext<'a> {
    pub fn new(src: &'a str, filename: &'a str) -> Self {
        Self {
            src,
            filename,
            path: Vec::new(),
        }
    }

    /// Push a table segment and return a new context.
    pub fn push(&self, segment: &'a str) -> Self {
        let mut path = self.path.clone();
        path.push(segment);
        Self {
            src: self.src,
            filename: self.filename,
            path,
        }
    }

    /// The dotted key for `key` within the current table.
    pub fn qualified(&self, key: &str) -> String {
        if self.path.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", self.path.join("."), key)
        }
    }

    /// Find the span of a `key = value` assignment's value.
    pub fn find_span(&self, key: &str) -> Option<SourceSpan> {
        find_value_span(self.src, key)
    }

    /// Create a validation error pointing at `key`'s value.
    pub fn invalid_value(&self, key: &str, reason: &str) -> Box<Error> {
        Box::new(Error::Validation {
            src: miette::NamedSource::new(self.filename, self.src.to_string()),
            span: self.find_span(key),
            message: format!("invalid '{}': {}", self.qualified(key), reason),
        })
    }
}

/// Validate the manifest after parsing.
pub(crate) fn validate_manifest(manifest: &Manifest, src: &str, filename: &str) -> Result<()> {
    let ctx = ParseContext::new(src, filename);

    if let Some(import_path) = &manifest.generator.import_path
        && let Some(reason) = validate_import_path(import_path)
    {
        return Err(ctx.push("generator").invalid_value("import_path", reason));
    }

    if let Some(module) = &manifest.module
        && module.path.trim().is_empty()
    {
        return Err(ctx
            .push("module")
            .invalid_value("path", "module path cannot be empty"));
    }

    Ok(())
}

/// Returns None if valid, Some(reason) if invalid.
///
/// An empty import path is valid and selects single-module generation.
pub(crate) fn validate_import_path(import_path: &str) -> Option<&'static str> {
    if import_path.starts_with('/') || import_path.ends_with('/') {
        return Some("import path cannot start or end with '/'");
    }
    if import_path.chars().any(char::is_whitespace) {
        return Some("import path cannot contain whitespace");
    }
    None
}

/// Find the span of the value assigned to `key` in the TOML source.
///
/// Only matches `key` at the start of a line so that `path` does not match
/// inside `import_path`.
pub(crate) fn find_value_span(src: &str, key: &str) -> Option<SourceSpan> {
    let mut line_start = 0;
    for line in src.split_inclusive('\n') {
        let trimmed = line.trim_start();
        let indent = line.len() - trimmed.len();
        if let Some(rest) = trimmed.strip_prefix(key) {
            let after_key = rest.trim_start();
            if let Some(value) = after_key.strip_prefix('=') {
                let value_trimmed = value.trim();
                let value_offset = line_start
                    + indent
                    + key.len()
                    + (rest.len() - after_key.len())
                    + 1
                    + (value.len() - value.trim_start().len());
                return Some(SourceSpan::from((value_offset, value_trimmed.len())));
            }
        }
        line_start += line.len();
    }
    None
}
