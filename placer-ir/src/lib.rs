//! Intermediate representation types for the placer SDK layout planner.
//!
//! This crate defines the language-neutral API description that placer
//! consumes: type, error and service declarations, their endpoints, and the
//! subpackage tree that organizes them.
//!
//! # Architecture
//!
//! ```text
//! ir.json (JSON) → placer-manifest (reading) → placer-ir (types) → placer-layout
//! ```
//!
//! Declarations reference each other by identifier only. Nothing is ever
//! duplicated, so relocating a declaration means rewriting its path in one
//! place.

mod errors;
mod http;
mod ids;
mod ir;
mod package;
mod types;
mod validate;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use errors::{DeclaredErrorName, ErrorDeclaration};
pub use http::{
    DeclaredServiceName, FileUploadProperty, HttpEndpoint, HttpRequestBody, HttpService,
    SdkRequest, SdkRequestShape, StreamingResponse,
};
pub use ids::{EnvironmentId, ErrorId, ServiceId, SubpackageId, TypeId};
pub use ir::{
    Environment, EnvironmentsConfig, Ir, ROOT_SERVICE_ID, SdkConfig, ServiceTypeReferenceInfo,
    VariableDeclaration,
};
pub use package::{Package, Subpackage};
pub use types::{
    AliasShape, DeclaredTypeName, EnumShape, ObjectProperty, ObjectShape, TypeDeclaration,
    TypeShape, UnionShape, UnionVariant,
};
pub use validate::IrError;
