//! Type declarations.

use indexmap::IndexSet;
use placer_core::{DeclarationPath, Name};
use serde::{Deserialize, Serialize};

use crate::TypeId;

/// The identity and location of a declared type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeclaredTypeName {
    pub type_id: TypeId,
    pub declaration_path: DeclarationPath,
    pub name: Name,
}

/// A named type in the API definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDeclaration {
    pub name: DeclaredTypeName,
    pub shape: TypeShape,
    /// Types this declaration refers to (its outgoing edges).
    #[serde(default)]
    pub referenced_types: IndexSet<TypeId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docs: Option<String>,
}

impl TypeDeclaration {
    pub fn type_id(&self) -> &TypeId {
        &self.name.type_id
    }

    pub fn declaration_path(&self) -> &DeclarationPath {
        &self.name.declaration_path
    }
}

/// The shape of a type declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TypeShape {
    Object(ObjectShape),
    Union(UnionShape),
    Alias(AliasShape),
    Enum(EnumShape),
}

impl TypeShape {
    /// Get the lowercase kind name.
    pub fn kind(&self) -> &'static str {
        match self {
            TypeShape::Object(_) => "object",
            TypeShape::Union(_) => "union",
            TypeShape::Alias(_) => "alias",
            TypeShape::Enum(_) => "enum",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectShape {
    #[serde(default)]
    pub extends: Vec<TypeId>,
    #[serde(default)]
    pub properties: Vec<ObjectProperty>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectProperty {
    pub name: Name,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docs: Option<String>,
}

/// A discriminated union.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnionShape {
    pub discriminant: Name,
    #[serde(default)]
    pub variants: Vec<UnionVariant>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnionVariant {
    pub discriminant_value: Name,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_id: Option<TypeId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AliasShape {
    /// The aliased named type, absent when aliasing a primitive or container.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias_of: Option<TypeId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumShape {
    #[serde(default)]
    pub values: Vec<Name>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_kind() {
        assert_eq!(TypeShape::Object(ObjectShape::default()).kind(), "object");
        assert_eq!(TypeShape::Alias(AliasShape::default()).kind(), "alias");
        assert_eq!(TypeShape::Enum(EnumShape::default()).kind(), "enum");
    }

    #[test]
    fn test_shape_deserialize_tagged() {
        let shape: TypeShape =
            serde_json::from_str(r#"{"type": "alias", "aliasOf": "type_:Id"}"#).unwrap();
        assert_eq!(
            shape,
            TypeShape::Alias(AliasShape {
                alias_of: Some(TypeId::from("type_:Id"))
            })
        );

        let shape: TypeShape = serde_json::from_str(r#"{"type": "object"}"#).unwrap();
        assert_eq!(shape.kind(), "object");
    }
}
