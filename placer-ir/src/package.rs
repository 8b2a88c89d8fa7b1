//! The package tree.

use placer_core::{DeclarationPath, Name};
use serde::{Deserialize, Serialize};

use crate::{ServiceId, SubpackageId};

/// The API's root package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    pub declaration_path: DeclarationPath,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<ServiceId>,
    #[serde(default)]
    pub subpackages: Vec<SubpackageId>,
    #[serde(default)]
    pub has_endpoints_in_tree: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docs: Option<String>,
}

/// A node in the subpackage tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subpackage {
    pub name: Name,
    pub declaration_path: DeclarationPath,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<ServiceId>,
    /// Child subpackages, in declaration order.
    #[serde(default)]
    pub subpackages: Vec<SubpackageId>,
    #[serde(default)]
    pub has_endpoints_in_tree: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docs: Option<String>,
}

impl Subpackage {
    /// Returns true if this subpackage is both a file and a parent directory.
    ///
    /// This happens when a `config` definition sits next to a `config/`
    /// directory: the package would otherwise clash with its own client.
    pub fn is_nested_root(&self) -> bool {
        !self.subpackages.is_empty() && self.declaration_path.file().is_some()
    }

    pub fn has_docs(&self) -> bool {
        has_docs(self.docs.as_deref())
    }
}

/// Returns true if the given documentation is present and non-empty.
fn has_docs(docs: Option<&str>) -> bool {
    docs.is_some_and(|d| !d.is_empty())
}

impl Package {
    pub fn has_docs(&self) -> bool {
        has_docs(self.docs.as_deref())
    }
}
