//! Lint for package names that are Go keywords.

use std::collections::BTreeSet;

use placer_core::is_keyword;
use placer_ir::Ir;
use placer_manifest::GeneratorConfig;

use super::super::{Lint, lint::declared_paths};
use crate::pipeline::Diagnostic;

/// Warns when a package path segment is a Go keyword.
///
/// The segment is escaped, so `type/` becomes the directory `type_/`, which
/// is rarely what the API author expects. Each segment is reported once.
pub struct KeywordPackageLint;

impl Lint for KeywordPackageLint {
    fn name(&self) -> &'static str {
        "keyword-package"
    }

    fn description(&self) -> &'static str {
        "Check package names are not Go keywords"
    }

    fn check(&self, ir: &Ir, _config: &GeneratorConfig, diagnostics: &mut Vec<Diagnostic>) {
        let mut reported = BTreeSet::new();
        for (id, path) in declared_paths(ir) {
            for segment in path.package_path() {
                let plain = segment.camel_case.unsafe_name.to_lowercase();
                if is_keyword(&plain) && reported.insert(plain.clone()) {
                    diagnostics.push(
                        Diagnostic::warning(
                            "validate",
                            format!(
                                "package '{}' is a Go keyword and will be placed in '{}/'",
                                plain,
                                segment.package_segment()
                            ),
                        )
                        .at(&id),
                    );
                }
            }
        }
    }
}
