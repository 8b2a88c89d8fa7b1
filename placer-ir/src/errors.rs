//! Error declarations.

use placer_core::{DeclarationPath, Name};
use serde::{Deserialize, Serialize};

use crate::{ErrorId, TypeId};

/// The identity and location of a declared error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeclaredErrorName {
    pub error_id: ErrorId,
    pub declaration_path: DeclarationPath,
    pub name: Name,
}

/// An API error with its status code and optional body type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDeclaration {
    pub name: DeclaredErrorName,
    pub status_code: u16,
    /// Discriminant value used when errors are discriminated by property.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discriminant_value: Option<Name>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_type: Option<TypeId>,
}

impl ErrorDeclaration {
    pub fn error_id(&self) -> &ErrorId {
        &self.name.error_id
    }

    pub fn declaration_path(&self) -> &DeclarationPath {
        &self.name.declaration_path
    }
}
