//! Casing-aware identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    keywords::escape_keyword,
    utils::{to_camel_case, to_pascal_case, to_screaming_snake_case, to_snake_case},
};

/// A single casing projection of an identifier.
///
/// `unsafe_name` is the plain projection; `safe_name` is escaped when the
/// plain projection collides with a reserved word.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CasedString {
    pub safe_name: String,
    pub unsafe_name: String,
}

impl CasedString {
    fn escaped(unsafe_name: String) -> Self {
        Self {
            safe_name: escape_keyword(&unsafe_name),
            unsafe_name,
        }
    }
}

/// An identifier carried in every casing the generator needs.
///
/// Names are produced once by the IR and never change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Name {
    pub original_name: String,
    pub camel_case: CasedString,
    pub pascal_case: CasedString,
    pub snake_case: CasedString,
    pub screaming_snake_case: CasedString,
}

impl Name {
    /// Derive every casing projection from an original name.
    pub fn new(original: impl Into<String>) -> Self {
        let original_name = original.into();
        Self {
            camel_case: CasedString::escaped(to_camel_case(&original_name)),
            pascal_case: CasedString::escaped(to_pascal_case(&original_name)),
            snake_case: CasedString::escaped(to_snake_case(&original_name)),
            screaming_snake_case: CasedString::escaped(to_screaming_snake_case(&original_name)),
            original_name,
        }
    }

    /// The name as written in the API definition.
    pub fn original(&self) -> &str {
        &self.original_name
    }

    /// The directory/package segment this name produces (lower-cased safe camel case).
    pub fn package_segment(&self) -> String {
        self.camel_case.safe_name.to_lowercase()
    }

    /// The basename this name produces for a file (unescaped snake case).
    pub fn file_basename(&self) -> &str {
        &self.snake_case.unsafe_name
    }

    /// The exported symbol this name produces (unescaped pascal case).
    pub fn exported(&self) -> &str {
        &self.pascal_case.unsafe_name
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.original_name)
    }
}
