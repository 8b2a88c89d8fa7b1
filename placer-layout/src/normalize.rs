//! Subpackage normalization.
//!
//! A subpackage declared by a file that is also a directory of nested
//! subpackages would put its client in the same package as its children's
//! directory. Such a nested root is demoted one level: `config` (file) beside
//! `config/` (dir) becomes package `config/config`. A service owned by the
//! subpackage moves with it.

use indexmap::IndexMap;
use placer_core::DeclarationPath;
use placer_ir::{Ir, ServiceId, Subpackage, SubpackageId};
use serde::Serialize;
use tracing::info;

use crate::LayoutError;

/// A subpackage after normalization, with the path it was declared at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedSubpackage {
    pub subpackage: Subpackage,
    /// Where in-lined requests for this subpackage are still scoped.
    pub original_path: DeclarationPath,
    pub demoted: bool,
}

impl NormalizedSubpackage {
    pub fn path(&self) -> &DeclarationPath {
        &self.subpackage.declaration_path
    }
}

/// The normalized subpackage tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedTree {
    pub subpackages: IndexMap<SubpackageId, NormalizedSubpackage>,
    /// Rewritten paths of services owned by demoted subpackages.
    pub service_paths: IndexMap<ServiceId, DeclarationPath>,
}

impl NormalizedTree {
    /// Normalize every subpackage of `ir`.
    ///
    /// Fails if a demoted subpackage owns a service missing from the IR.
    pub fn build(ir: &Ir) -> Result<Self, LayoutError> {
        let mut tree = NormalizedTree::default();
        for (id, subpackage) in &ir.subpackages {
            let original_path = subpackage.declaration_path.clone();
            let mut normalized = subpackage.clone();
            let demoted = subpackage.is_nested_root();

            if demoted {
                normalized.declaration_path = original_path.with_file_as_package();
                info!(subpackage = %id, from = %original_path, to = %normalized.declaration_path, "demoted nested root subpackage");

                if let Some(service_id) = &subpackage.service {
                    let service = ir.services.get(service_id).ok_or_else(|| {
                        LayoutError::unknown_service(format!("subpackage '{}'", id), service_id)
                    })?;
                    tree.service_paths.insert(
                        service_id.clone(),
                        service.declaration_path().with_file_as_package(),
                    );
                }
            }

            tree.subpackages.insert(
                id.clone(),
                NormalizedSubpackage {
                    subpackage: normalized,
                    original_path,
                    demoted,
                },
            );
        }
        Ok(tree)
    }

    pub fn get(&self, id: &SubpackageId) -> Option<&NormalizedSubpackage> {
        self.subpackages.get(id)
    }

    /// The service's path after normalization.
    pub fn service_path<'a>(&'a self, ir: &'a Ir, id: &ServiceId) -> Option<&'a DeclarationPath> {
        self.service_paths
            .get(id)
            .or_else(|| ir.services.get(id).map(|s| s.declaration_path()))
    }

    pub fn demoted(&self) -> impl Iterator<Item = (&SubpackageId, &NormalizedSubpackage)> {
        self.subpackages.iter().filter(|(_, s)| s.demoted)
    }

    /// A copy of `ir` with normalized subpackage and service paths.
    pub fn apply(&self, ir: &Ir) -> Ir {
        let mut normalized = ir.clone();
        for (id, subpackage) in &self.subpackages {
            if let Some(target) = normalized.subpackages.get_mut(id) {
                target.declaration_path = subpackage.path().clone();
            }
        }
        for (id, path) in &self.service_paths {
            if let Some(service) = normalized.services.get_mut(id) {
                service.name.declaration_path = path.clone();
            }
        }
        normalized
    }
}

#[cfg(test)]
mod tests {
    use placer_ir::testing::{IrBuilder, path};

    use super::*;

    fn nested_root_ir() -> Ir {
        IrBuilder::new("acme")
            .service("service_config", path(&[], Some("config")), vec![])
            .subpackage(
                "subpackage_config",
                path(&[], Some("config")),
                Some("service_config"),
                &["subpackage_config/flags"],
            )
            .subpackage(
                "subpackage_config/flags",
                path(&["config"], Some("flags")),
                None,
                &[],
            )
            .root_package(None, &["subpackage_config"])
            .build()
    }

    #[test]
    fn test_nested_root_is_demoted() {
        let ir = nested_root_ir();
        let tree = NormalizedTree::build(&ir).unwrap();

        let config = tree.get(&SubpackageId::from("subpackage_config")).unwrap();
        assert!(config.demoted);
        assert_eq!(config.path(), &path(&["config"], None));
        assert_eq!(config.original_path, path(&[], Some("config")));
        assert_eq!(
            tree.service_path(&ir, &ServiceId::from("service_config")),
            Some(&path(&["config"], None))
        );
    }

    #[test]
    fn test_leaf_file_subpackage_is_untouched() {
        let ir = nested_root_ir();
        let tree = NormalizedTree::build(&ir).unwrap();

        let flags = tree
            .get(&SubpackageId::from("subpackage_config/flags"))
            .unwrap();
        assert!(!flags.demoted);
        assert_eq!(flags.path(), &flags.original_path);
        assert_eq!(tree.demoted().count(), 1);
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let ir = nested_root_ir();
        let once = NormalizedTree::build(&ir).unwrap();
        let applied = once.apply(&ir);

        let twice = NormalizedTree::build(&applied).unwrap();
        assert_eq!(twice.demoted().count(), 0);
        assert!(twice.service_paths.is_empty());
        assert_eq!(twice.apply(&applied), applied);
        for (id, subpackage) in &once.subpackages {
            assert_eq!(twice.get(id).unwrap().path(), subpackage.path());
        }
    }

    #[test]
    fn test_input_is_not_mutated() {
        let ir = nested_root_ir();
        let before = ir.clone();
        let _ = NormalizedTree::build(&ir).unwrap();
        assert_eq!(ir, before);
    }

    #[test]
    fn test_missing_service() {
        let ir = IrBuilder::new("acme")
            .subpackage(
                "subpackage_config",
                path(&[], Some("config")),
                Some("service_missing"),
                &["subpackage_flags"],
            )
            .subpackage("subpackage_flags", path(&["config"], Some("flags")), None, &[])
            .build();
        let err = NormalizedTree::build(&ir).unwrap_err();
        assert!(matches!(err, LayoutError::UnknownService { .. }));
    }
}
