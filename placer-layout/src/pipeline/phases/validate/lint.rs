//! Lint trait for IR validation.

use placer_core::DeclarationPath;
use placer_ir::Ir;
use placer_manifest::GeneratorConfig;
use serde::Serialize;

use crate::pipeline::Diagnostic;

#[derive(Debug, Clone, Serialize)]
pub struct LintInfo {
    pub name: &'static str,
    pub description: &'static str,
}

/// A check over the IR that reports non-fatal diagnostics.
pub trait Lint: Send + Sync {
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    fn check(&self, ir: &Ir, config: &GeneratorConfig, diagnostics: &mut Vec<Diagnostic>);

    fn info(&self) -> LintInfo {
        LintInfo {
            name: self.name(),
            description: self.description(),
        }
    }
}

/// Every declared path in the IR with the identifier that declares it.
pub(crate) fn declared_paths(ir: &Ir) -> impl Iterator<Item = (String, &DeclarationPath)> {
    let types = ir
        .types
        .iter()
        .map(|(id, decl)| (id.to_string(), decl.declaration_path()));
    let errors = ir
        .errors
        .iter()
        .map(|(id, decl)| (id.to_string(), decl.declaration_path()));
    let services = ir
        .services
        .iter()
        .map(|(id, service)| (id.to_string(), service.declaration_path()));
    let subpackages = ir
        .subpackages
        .iter()
        .map(|(id, subpackage)| (id.to_string(), &subpackage.declaration_path));
    types.chain(errors).chain(services).chain(subpackages)
}
