//! HTTP services and endpoints.

use placer_core::{DeclarationPath, Name};
use serde::{Deserialize, Serialize};

use crate::{ObjectProperty, TypeId};

/// The location of a service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeclaredServiceName {
    pub declaration_path: DeclarationPath,
}

/// A group of endpoints declared in one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpService {
    pub name: DeclaredServiceName,
    #[serde(default)]
    pub endpoints: Vec<HttpEndpoint>,
}

impl HttpService {
    pub fn declaration_path(&self) -> &DeclarationPath {
        &self.name.declaration_path
    }
}

/// A single endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpEndpoint {
    pub name: Name,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sdk_request: Option<SdkRequest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_body: Option<HttpRequestBody>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub streaming_response: Option<StreamingResponse>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docs: Option<String>,
}

impl HttpEndpoint {
    /// Returns true if this endpoint needs an in-lined request type.
    ///
    /// Only wrapper requests synthesize a new type. A file upload wrapper
    /// still has nothing to generate unless it carries ordinary body fields.
    pub fn has_inlined_request(&self) -> bool {
        let is_wrapper = matches!(
            self.sdk_request.as_ref().map(|r| &r.shape),
            Some(SdkRequestShape::Wrapper { .. })
        );
        if !is_wrapper {
            return false;
        }
        match &self.request_body {
            Some(HttpRequestBody::FileUpload { properties, .. }) => properties
                .iter()
                .any(|p| matches!(p, FileUploadProperty::BodyProperty { .. })),
            Some(HttpRequestBody::InlinedRequestBody { .. })
            | Some(HttpRequestBody::Reference { .. })
            | None => true,
        }
    }

    pub fn is_streaming(&self) -> bool {
        self.streaming_response.is_some()
    }
}

/// How the SDK method accepts its request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SdkRequest {
    pub shape: SdkRequestShape,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_parameter_name: Option<Name>,
}

/// Either the body passed through as-is, or a synthesized wrapper object
/// combining path, query, header and body parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SdkRequestShape {
    #[serde(rename_all = "camelCase")]
    JustRequestBody {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        request_body_type: Option<TypeId>,
    },
    #[serde(rename_all = "camelCase")]
    Wrapper { wrapper_name: Name, body_key: Name },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum HttpRequestBody {
    #[serde(rename_all = "camelCase")]
    InlinedRequestBody {
        name: Name,
        #[serde(default)]
        properties: Vec<ObjectProperty>,
    },
    #[serde(rename_all = "camelCase")]
    Reference { request_body_type: TypeId },
    #[serde(rename_all = "camelCase")]
    FileUpload {
        name: Name,
        #[serde(default)]
        properties: Vec<FileUploadProperty>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum FileUploadProperty {
    File { key: Name },
    BodyProperty { name: Name },
}

/// A streaming response contract.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamingResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<TypeId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terminator: Option<String>,
}
