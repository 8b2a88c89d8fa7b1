//! Hierarchical declaration paths.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Name;

/// Where a declaration lives in the API definition: a package path plus an
/// optional file.
///
/// Two declarations with the same package path share a directory. A path
/// without a file is the package's implicit root. `all_parts` is always the
/// package path followed by the file, when present.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawDeclarationPath")]
pub struct DeclarationPath {
    all_parts: Vec<Name>,
    package_path: Vec<Name>,
    file: Option<Name>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDeclarationPath {
    all_parts: Vec<Name>,
    #[serde(default)]
    package_path: Vec<Name>,
    #[serde(default)]
    file: Option<Name>,
}

impl TryFrom<RawDeclarationPath> for DeclarationPath {
    type Error = String;

    fn try_from(raw: RawDeclarationPath) -> Result<Self, Self::Error> {
        let expected = raw.package_path.iter().chain(raw.file.iter());
        let consistent = raw.all_parts.len() == raw.package_path.len() + raw.file.iter().count()
            && raw
                .all_parts
                .iter()
                .zip(expected)
                .all(|(a, b)| a.original_name == b.original_name);
        if !consistent {
            return Err(format!(
                "allParts [{}] is not packagePath followed by file",
                join_original(&raw.all_parts)
            ));
        }
        Ok(Self {
            all_parts: raw.all_parts,
            package_path: raw.package_path,
            file: raw.file,
        })
    }
}

impl DeclarationPath {
    /// Create a path from its package path and optional file.
    pub fn new(package_path: Vec<Name>, file: Option<Name>) -> Self {
        let all_parts = package_path.iter().chain(file.iter()).cloned().collect();
        Self {
            all_parts,
            package_path,
            file,
        }
    }

    /// The path of the API's root package.
    pub fn root() -> Self {
        Self::new(Vec::new(), None)
    }

    pub fn all_parts(&self) -> &[Name] {
        &self.all_parts
    }

    pub fn package_path(&self) -> &[Name] {
        &self.package_path
    }

    pub fn file(&self) -> Option<&Name> {
        self.file.as_ref()
    }

    /// The innermost package path element, if any.
    pub fn last_package(&self) -> Option<&Name> {
        self.package_path.last()
    }

    /// Returns true if this path has no package path elements.
    pub fn is_root_package(&self) -> bool {
        self.package_path.is_empty()
    }

    /// The package path as lower-cased directory segments.
    pub fn package_dirs(&self) -> Vec<String> {
        self.package_path.iter().map(Name::package_segment).collect()
    }

    /// Demote the file component into the package path.
    ///
    /// `config` (file) becomes package `config/config` with no file. A path
    /// without a file is returned unchanged.
    pub fn with_file_as_package(&self) -> Self {
        match &self.file {
            None => self.clone(),
            Some(file) => {
                let mut package_path = self.package_path.clone();
                package_path.push(file.clone());
                Self::new(package_path, None)
            }
        }
    }
}

impl fmt::Display for DeclarationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.all_parts.is_empty() {
            return write!(f, "<root>");
        }
        write!(f, "{}", join_original(&self.all_parts))
    }
}

fn join_original(parts: &[Name]) -> String {
    parts
        .iter()
        .map(Name::original)
        .collect::<Vec<_>>()
        .join("/")
}
