//! Fatal layout errors.

use placer_ir::{ServiceId, SubpackageId, TypeId};
use thiserror::Error;

/// A condition that aborts layout planning for the whole run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// A cross-package reference in single-module generation.
    #[error(
        "package import path required: type '{type_id}' references '{referenced}' in another package"
    )]
    MissingImportPath { type_id: TypeId, referenced: TypeId },

    #[error("{referrer} references type '{type_id}' which doesn't exist")]
    UnknownType { referrer: String, type_id: TypeId },

    #[error("{referrer} references service '{service_id}' which doesn't exist")]
    UnknownService {
        referrer: String,
        service_id: ServiceId,
    },

    #[error("{referrer} references subpackage '{subpackage_id}' which doesn't exist")]
    UnknownSubpackage {
        referrer: String,
        subpackage_id: SubpackageId,
    },

    /// A package cycle that relocation could not break.
    #[error("unresolvable import cycle between packages: {}", packages.join(" -> "))]
    UnresolvedCycle { packages: Vec<String> },
}

impl LayoutError {
    pub(crate) fn unknown_type(referrer: impl Into<String>, type_id: &TypeId) -> Self {
        LayoutError::UnknownType {
            referrer: referrer.into(),
            type_id: type_id.clone(),
        }
    }

    pub(crate) fn unknown_service(referrer: impl Into<String>, service_id: &ServiceId) -> Self {
        LayoutError::UnknownService {
            referrer: referrer.into(),
            service_id: service_id.clone(),
        }
    }

    pub(crate) fn unknown_subpackage(
        referrer: impl Into<String>,
        subpackage_id: &SubpackageId,
    ) -> Self {
        LayoutError::UnknownSubpackage {
            referrer: referrer.into(),
            subpackage_id: subpackage_id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_import_path_names_both_types() {
        let err = LayoutError::MissingImportPath {
            type_id: TypeId::from("type_users:User"),
            referenced: TypeId::from("type_orgs:Org"),
        };
        let message = err.to_string();
        assert!(message.starts_with("package import path required"));
        assert!(message.contains("type_users:User"));
        assert!(message.contains("type_orgs:Org"));
    }

    #[test]
    fn test_unresolved_cycle_message() {
        let err = LayoutError::UnresolvedCycle {
            packages: vec!["acme/x".into(), "acme/y".into()],
        };
        assert_eq!(
            err.to_string(),
            "unresolvable import cycle between packages: acme/x -> acme/y"
        );
    }
}
