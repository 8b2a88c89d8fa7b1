//! The IR snapshot root.

use indexmap::IndexMap;
use placer_core::Name;
use serde::{Deserialize, Serialize};

use crate::{
    EnvironmentId, ErrorDeclaration, ErrorId, HttpService, Package, ServiceId, Subpackage,
    SubpackageId, TypeDeclaration, TypeId,
};

/// Identifier the producer gives to the unnamed root service.
pub const ROOT_SERVICE_ID: &str = "service_";

/// A complete, read-once API description.
///
/// Tables are order-preserving so that iteration follows the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ir {
    pub api_name: Name,
    #[serde(default)]
    pub types: IndexMap<TypeId, TypeDeclaration>,
    #[serde(default)]
    pub errors: IndexMap<ErrorId, ErrorDeclaration>,
    #[serde(default)]
    pub services: IndexMap<ServiceId, HttpService>,
    #[serde(default)]
    pub subpackages: IndexMap<SubpackageId, Subpackage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_package: Option<Package>,
    #[serde(default)]
    pub variables: Vec<VariableDeclaration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_type_reference_info: Option<ServiceTypeReferenceInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environments: Option<EnvironmentsConfig>,
    #[serde(default)]
    pub sdk_config: SdkConfig,
}

impl Ir {
    /// The package name used for declarations at the top level.
    pub fn root_package_name(&self) -> String {
        self.api_name.package_segment()
    }

    /// Returns true if any endpoint streams its response.
    pub fn has_streaming_endpoints(&self) -> bool {
        self.sdk_config.has_streaming_endpoints
            || self
                .services
                .values()
                .flat_map(|s| &s.endpoints)
                .any(|e| e.is_streaming())
    }
}

/// Producer-supplied classification of which services use which types.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceTypeReferenceInfo {
    #[serde(default)]
    pub types_referenced_only_by_service: IndexMap<ServiceId, Vec<TypeId>>,
    #[serde(default)]
    pub shared_types: Vec<TypeId>,
}

/// A top-level variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableDeclaration {
    pub id: String,
    pub name: Name,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_environment: Option<EnvironmentId>,
    #[serde(default)]
    pub environments: Vec<Environment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Environment {
    pub id: EnvironmentId,
    pub name: Name,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SdkConfig {
    #[serde(default)]
    pub has_streaming_endpoints: bool,
}
