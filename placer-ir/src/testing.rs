//! Test utilities for building IR snapshots.
//!
//! This module is only available when the `testing` feature is enabled
//! or during tests.

use placer_core::{DeclarationPath, Name};

use crate::{
    DeclaredErrorName, DeclaredServiceName, DeclaredTypeName, Environment, EnvironmentId,
    EnvironmentsConfig, ErrorDeclaration, ErrorId, FileUploadProperty, HttpEndpoint,
    HttpRequestBody, HttpService, Ir, ObjectShape, Package, SdkConfig, SdkRequest,
    SdkRequestShape, ServiceId, ServiceTypeReferenceInfo, StreamingResponse, Subpackage,
    SubpackageId, TypeDeclaration, TypeId, TypeShape, VariableDeclaration,
};

/// Build a declaration path from package segments and an optional file.
pub fn path(package: &[&str], file: Option<&str>) -> DeclarationPath {
    DeclarationPath::new(
        package.iter().map(|p| Name::new(*p)).collect(),
        file.map(Name::new),
    )
}

/// An endpoint whose request is synthesized into a wrapper object.
pub fn wrapper_endpoint(name: &str) -> HttpEndpoint {
    HttpEndpoint {
        name: Name::new(name),
        sdk_request: Some(SdkRequest {
            shape: SdkRequestShape::Wrapper {
                wrapper_name: Name::new(format!("{}Request", name)),
                body_key: Name::new("body"),
            },
            request_parameter_name: Some(Name::new("request")),
        }),
        request_body: None,
        streaming_response: None,
        docs: None,
    }
}

/// An endpoint that passes a named body type straight through.
pub fn body_endpoint(name: &str, body_type: &str) -> HttpEndpoint {
    HttpEndpoint {
        name: Name::new(name),
        sdk_request: Some(SdkRequest {
            shape: SdkRequestShape::JustRequestBody {
                request_body_type: Some(TypeId::from(body_type)),
            },
            request_parameter_name: Some(Name::new("request")),
        }),
        request_body: Some(HttpRequestBody::Reference {
            request_body_type: TypeId::from(body_type),
        }),
        streaming_response: None,
        docs: None,
    }
}

/// A file upload endpoint, optionally carrying an ordinary body field.
pub fn file_upload_endpoint(name: &str, with_body_property: bool) -> HttpEndpoint {
    let mut properties = vec![FileUploadProperty::File {
        key: Name::new("file"),
    }];
    if with_body_property {
        properties.push(FileUploadProperty::BodyProperty {
            name: Name::new("description"),
        });
    }
    HttpEndpoint {
        request_body: Some(HttpRequestBody::FileUpload {
            name: Name::new(format!("{}Request", name)),
            properties,
        }),
        ..wrapper_endpoint(name)
    }
}

/// An endpoint with no request that streams its response.
pub fn streaming_endpoint(name: &str) -> HttpEndpoint {
    HttpEndpoint {
        name: Name::new(name),
        sdk_request: None,
        request_body: None,
        streaming_response: Some(StreamingResponse::default()),
        docs: None,
    }
}

/// Fluent builder for [`Ir`] snapshots.
///
/// Type, error, service and subpackage names are derived from their
/// identifiers, so tests can use short ids like `"User"`.
pub struct IrBuilder {
    ir: Ir,
}

impl IrBuilder {
    pub fn new(api_name: &str) -> Self {
        Self {
            ir: Ir {
                api_name: Name::new(api_name),
                types: Default::default(),
                errors: Default::default(),
                services: Default::default(),
                subpackages: Default::default(),
                root_package: None,
                variables: Vec::new(),
                service_type_reference_info: None,
                environments: None,
                sdk_config: SdkConfig::default(),
            },
        }
    }

    /// Add an object type referencing the given type ids.
    pub fn object(self, id: &str, path: DeclarationPath, references: &[&str]) -> Self {
        self.with_type(TypeDeclaration {
            name: DeclaredTypeName {
                type_id: TypeId::from(id),
                declaration_path: path,
                name: Name::new(id),
            },
            shape: TypeShape::Object(ObjectShape::default()),
            referenced_types: references.iter().map(|r| TypeId::from(*r)).collect(),
            docs: None,
        })
    }

    pub fn with_type(mut self, decl: TypeDeclaration) -> Self {
        self.ir.types.insert(decl.type_id().clone(), decl);
        self
    }

    pub fn error(mut self, id: &str, path: DeclarationPath, body_type: Option<&str>) -> Self {
        self.ir.errors.insert(
            ErrorId::from(id),
            ErrorDeclaration {
                name: DeclaredErrorName {
                    error_id: ErrorId::from(id),
                    declaration_path: path,
                    name: Name::new(id),
                },
                status_code: 400,
                discriminant_value: None,
                body_type: body_type.map(TypeId::from),
            },
        );
        self
    }

    pub fn service(mut self, id: &str, path: DeclarationPath, endpoints: Vec<HttpEndpoint>) -> Self {
        self.ir.services.insert(
            ServiceId::from(id),
            HttpService {
                name: DeclaredServiceName {
                    declaration_path: path,
                },
                endpoints,
            },
        );
        self
    }

    /// Add a subpackage. It has endpoints in its tree if it owns a service.
    pub fn subpackage(
        mut self,
        id: &str,
        path: DeclarationPath,
        service: Option<&str>,
        children: &[&str],
    ) -> Self {
        let name = path
            .all_parts()
            .last()
            .cloned()
            .unwrap_or_else(|| Name::new(id));
        self.ir.subpackages.insert(
            SubpackageId::from(id),
            Subpackage {
                name,
                declaration_path: path,
                service: service.map(ServiceId::from),
                subpackages: children.iter().map(|c| SubpackageId::from(*c)).collect(),
                has_endpoints_in_tree: service.is_some(),
                docs: None,
            },
        );
        self
    }

    /// Mark a subpackage as having endpoints somewhere in its tree.
    pub fn with_endpoints_in_tree(mut self, id: &str) -> Self {
        if let Some(subpackage) = self.ir.subpackages.get_mut(id) {
            subpackage.has_endpoints_in_tree = true;
        }
        self
    }

    pub fn subpackage_docs(mut self, id: &str, docs: &str) -> Self {
        if let Some(subpackage) = self.ir.subpackages.get_mut(id) {
            subpackage.docs = Some(docs.to_string());
        }
        self
    }

    pub fn root_package(mut self, service: Option<&str>, children: &[&str]) -> Self {
        self.ir.root_package = Some(Package {
            declaration_path: DeclarationPath::root(),
            service: service.map(ServiceId::from),
            subpackages: children.iter().map(|c| SubpackageId::from(*c)).collect(),
            has_endpoints_in_tree: service.is_some() || !children.is_empty(),
            docs: None,
        });
        self
    }

    pub fn root_docs(mut self, docs: &str) -> Self {
        if let Some(root) = self.ir.root_package.as_mut() {
            root.docs = Some(docs.to_string());
        }
        self
    }

    pub fn variable(mut self, name: &str) -> Self {
        self.ir.variables.push(VariableDeclaration {
            id: name.to_string(),
            name: Name::new(name),
        });
        self
    }

    pub fn environments(mut self, ids: &[&str]) -> Self {
        self.ir.environments = Some(EnvironmentsConfig {
            default_environment: ids.first().map(|id| EnvironmentId::from(*id)),
            environments: ids
                .iter()
                .map(|id| Environment {
                    id: EnvironmentId::from(*id),
                    name: Name::new(*id),
                    url: None,
                })
                .collect(),
        });
        self
    }

    pub fn service_type_reference_info(
        mut self,
        shared: &[&str],
        by_service: &[(&str, &[&str])],
    ) -> Self {
        self.ir.service_type_reference_info = Some(ServiceTypeReferenceInfo {
            types_referenced_only_by_service: by_service
                .iter()
                .map(|(service, types)| {
                    (
                        ServiceId::from(*service),
                        types.iter().map(|t| TypeId::from(*t)).collect(),
                    )
                })
                .collect(),
            shared_types: shared.iter().map(|t| TypeId::from(*t)).collect(),
        });
        self
    }

    pub fn build(self) -> Ir {
        self.ir
    }
}
