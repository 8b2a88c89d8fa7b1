//! Placement targets: the `(filename, package)` pairs generation writes into.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A resolved output file and the package it declares.
///
/// Filenames always use `/` separators so that plans are identical across
/// platforms. Targets order by filename, then package.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlacementTarget {
    pub filename: String,
    pub package_name: String,
}

impl PlacementTarget {
    pub fn new(filename: impl Into<String>, package_name: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            package_name: package_name.into(),
        }
    }

    /// Place `basename` under `dirs`.
    ///
    /// With no directories the file lands at the top level in `root_package`;
    /// otherwise the innermost directory names the package.
    pub fn in_dirs(dirs: &[String], basename: &str, root_package: &str) -> Self {
        match dirs.last() {
            None => Self::new(basename, root_package),
            Some(last) => Self::new(format!("{}/{}", dirs.join("/"), basename), last.clone()),
        }
    }

    /// The directory portion of the filename, empty at the top level.
    pub fn directory(&self) -> &str {
        self.filename
            .rsplit_once('/')
            .map(|(dir, _)| dir)
            .unwrap_or("")
    }
}

impl fmt::Display for PlacementTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (package {})", self.filename, self.package_name)
    }
}
