//! Structural validation of an IR snapshot.

use thiserror::Error;

use crate::{HttpRequestBody, Ir, SdkRequestShape, ServiceId, SubpackageId, TypeId};

/// A structural inconsistency in the IR.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IrError {
    #[error("{referrer} references type '{type_id}' which doesn't exist")]
    DanglingType { referrer: String, type_id: TypeId },

    #[error("{referrer} references service '{service_id}' which doesn't exist")]
    DanglingService {
        referrer: String,
        service_id: ServiceId,
    },

    #[error("{referrer} references subpackage '{subpackage_id}' which doesn't exist")]
    DanglingSubpackage {
        referrer: String,
        subpackage_id: SubpackageId,
    },

    #[error("{table} entry '{key}' declares itself as '{declared}'")]
    MismatchedKey {
        table: &'static str,
        key: String,
        declared: String,
    },
}

impl Ir {
    /// Check referential integrity across the declaration tables.
    ///
    /// Reports the first violation in document order.
    pub fn validate(&self) -> Result<(), IrError> {
        self.validate_types()?;
        self.validate_errors()?;
        self.validate_services()?;
        self.validate_packages()
    }

    fn require_type(
        &self,
        referrer: impl FnOnce() -> String,
        type_id: &TypeId,
    ) -> Result<(), IrError> {
        if self.types.contains_key(type_id) {
            Ok(())
        } else {
            Err(IrError::DanglingType {
                referrer: referrer(),
                type_id: type_id.clone(),
            })
        }
    }

    fn require_service(
        &self,
        referrer: impl FnOnce() -> String,
        service_id: &ServiceId,
    ) -> Result<(), IrError> {
        if self.services.contains_key(service_id) {
            Ok(())
        } else {
            Err(IrError::DanglingService {
                referrer: referrer(),
                service_id: service_id.clone(),
            })
        }
    }

    fn require_subpackages(
        &self,
        referrer: &str,
        children: &[SubpackageId],
    ) -> Result<(), IrError> {
        match children.iter().find(|c| !self.subpackages.contains_key(*c)) {
            None => Ok(()),
            Some(missing) => Err(IrError::DanglingSubpackage {
                referrer: referrer.to_string(),
                subpackage_id: missing.clone(),
            }),
        }
    }

    fn validate_types(&self) -> Result<(), IrError> {
        for (key, decl) in &self.types {
            if key != decl.type_id() {
                return Err(IrError::MismatchedKey {
                    table: "types",
                    key: key.to_string(),
                    declared: decl.type_id().to_string(),
                });
            }
            for referenced in &decl.referenced_types {
                self.require_type(|| format!("type '{}'", key), referenced)?;
            }
        }
        Ok(())
    }

    fn validate_errors(&self) -> Result<(), IrError> {
        for (key, decl) in &self.errors {
            if key != decl.error_id() {
                return Err(IrError::MismatchedKey {
                    table: "errors",
                    key: key.to_string(),
                    declared: decl.error_id().to_string(),
                });
            }
            if let Some(body_type) = &decl.body_type {
                self.require_type(|| format!("error '{}'", key), body_type)?;
            }
        }
        Ok(())
    }

    fn validate_services(&self) -> Result<(), IrError> {
        for (service_id, service) in &self.services {
            for endpoint in &service.endpoints {
                let referrer = || format!("endpoint '{}.{}'", service_id, endpoint.name);
                if let Some(HttpRequestBody::Reference { request_body_type }) =
                    &endpoint.request_body
                {
                    self.require_type(referrer, request_body_type)?;
                }
                if let Some(SdkRequestShape::JustRequestBody {
                    request_body_type: Some(type_id),
                }) = endpoint.sdk_request.as_ref().map(|r| &r.shape)
                {
                    self.require_type(referrer, type_id)?;
                }
                if let Some(data_type) = endpoint
                    .streaming_response
                    .as_ref()
                    .and_then(|s| s.data_type.as_ref())
                {
                    self.require_type(referrer, data_type)?;
                }
            }
        }
        Ok(())
    }

    fn validate_packages(&self) -> Result<(), IrError> {
        if let Some(root) = &self.root_package {
            if let Some(service) = &root.service {
                self.require_service(|| "root package".to_string(), service)?;
            }
            self.require_subpackages("root package", &root.subpackages)?;
        }
        for (id, subpackage) in &self.subpackages {
            if let Some(service) = &subpackage.service {
                self.require_service(|| format!("subpackage '{}'", id), service)?;
            }
            self.require_subpackages(&format!("subpackage '{}'", id), &subpackage.subpackages)?;
        }
        Ok(())
    }
}
