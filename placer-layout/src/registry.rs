//! Names and packages the generated SDK will declare.

use std::collections::BTreeSet;

use placer_ir::Ir;
use serde::Serialize;

/// A read-only snapshot of every exported name and service package.
///
/// Singleton artifacts consult the registry before choosing a location so
/// they never shadow a generated declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CollisionRegistry {
    names: BTreeSet<String>,
    packages: BTreeSet<String>,
}

impl CollisionRegistry {
    /// Build a registry from explicit names and packages.
    pub fn new<N, P>(names: N, packages: P) -> Self
    where
        N: IntoIterator,
        N::Item: Into<String>,
        P: IntoIterator,
        P::Item: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            packages: packages.into_iter().map(Into::into).collect(),
        }
    }

    /// Collect the exported names of every type, error and variable, and
    /// the package each service file produces.
    pub fn from_ir(ir: &Ir) -> Self {
        let types = ir.types.values().map(|t| t.name.name.exported());
        let errors = ir.errors.values().map(|e| e.name.name.exported());
        let variables = ir.variables.iter().map(|v| v.name.exported());
        let packages = ir
            .services
            .values()
            .filter_map(|s| s.declaration_path().file())
            .map(|file| file.package_segment());
        Self::new(types.chain(errors).chain(variables), packages)
    }

    pub fn has_name(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn has_package(&self, package: &str) -> bool {
        self.packages.contains(package)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn packages(&self) -> impl Iterator<Item = &str> {
        self.packages.iter().map(String::as_str)
    }
}
