//! Reading IR snapshots from disk.

use std::path::Path;

use placer_ir::Ir;

use crate::{Error, Result, error::SourceContext};

/// Read, parse and validate an IR snapshot.
pub fn read_ir(path: impl AsRef<Path>) -> Result<Ir> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| {
        Box::new(Error::Io {
            path: path.to_path_buf(),
            source: e,
        })
    })?;
    parse_ir(&content, path)
}

/// Parse and validate an IR snapshot; `path` is used for error reporting.
pub fn parse_ir(content: &str, path: &Path) -> Result<Ir> {
    let source_ctx = SourceContext::new(content, path.display().to_string());
    let ir: Ir = serde_json::from_str(content).map_err(|e| source_ctx.ir_parse_error(e))?;
    ir.validate().map_err(|source| {
        Box::new(Error::InvalidIr {
            path: path.to_path_buf(),
            source,
        })
    })?;
    Ok(ir)
}
