//! Identifier newtypes.
//!
//! Every declaration table is keyed by one of these. They serialize as plain
//! strings.

use std::{borrow::Borrow, fmt};

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(
    /// Identifies a type declaration.
    TypeId
);
define_id!(
    /// Identifies an error declaration.
    ErrorId
);
define_id!(
    /// Identifies an HTTP service.
    ServiceId
);
define_id!(
    /// Identifies a subpackage.
    SubpackageId
);
define_id!(
    /// Identifies an environment.
    EnvironmentId
);
