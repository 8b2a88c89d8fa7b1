//! Lint for declarations in packages the planner creates itself.

use std::collections::BTreeSet;

use placer_ir::Ir;
use placer_manifest::GeneratorConfig;

use super::super::{Lint, lint::declared_paths};
use crate::{CORE_PACKAGE, SHARED_PACKAGE, pipeline::Diagnostic};

/// Warns when a top-level package is one the planner also writes into.
///
/// Declarations under `shared/` may end up beside types relocated out of an
/// import cycle; declarations under `core/` share a package with the
/// generated helpers in client mode.
pub struct ReservedPackageLint;

impl Lint for ReservedPackageLint {
    fn name(&self) -> &'static str {
        "reserved-package"
    }

    fn description(&self) -> &'static str {
        "Check declarations avoid the shared and core packages"
    }

    fn check(&self, ir: &Ir, config: &GeneratorConfig, diagnostics: &mut Vec<Diagnostic>) {
        let mut reserved = vec![SHARED_PACKAGE];
        if config.mode.places_client() {
            reserved.push(CORE_PACKAGE);
        }

        let mut reported = BTreeSet::new();
        for (id, path) in declared_paths(ir) {
            let Some(first) = path.package_dirs().into_iter().next() else {
                continue;
            };
            if reserved.contains(&first.as_str()) && reported.insert(first.clone()) {
                diagnostics.push(
                    Diagnostic::warning(
                        "validate",
                        format!("package '{}' is also written by the planner", first),
                    )
                    .at(&id),
                );
            }
        }
    }
}
