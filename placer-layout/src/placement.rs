//! File and package placement.
//!
//! Every type declaration and every in-lined request shape is assigned to
//! exactly one [`PlacementTarget`]. Entries within a target are sorted by
//! their identifier, which is what makes plans reproducible byte for byte.

use std::collections::{BTreeMap, HashSet};

use placer_core::{DeclarationPath, PlacementTarget};
use placer_ir::{ErrorId, HttpService, Ir, ROOT_SERVICE_ID, ServiceId, SubpackageId, TypeId};
use serde::Serialize;

use crate::{LayoutError, NormalizedTree};

/// Basename for declarations without a file component.
pub const DEFAULT_TYPES_BASENAME: &str = "types";
/// Directory and package of clients without a file component.
pub const DEFAULT_CLIENT_DIR: &str = "client";
pub const ERRORS_FILENAME: &str = "errors.go";
pub const DOCS_FILENAME: &str = "doc.go";
pub const CLIENT_FILENAME: &str = "client.go";

/// How types are grouped into files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlacementStrategy {
    /// Each type lands in the file its own declaration path names.
    #[default]
    PerType,
    /// Types are grouped per package, or into the one service using them.
    ServiceScoped,
}

impl PlacementStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlacementStrategy::PerType => "per-type",
            PlacementStrategy::ServiceScoped => "service-scoped",
        }
    }

    /// The strategy the IR's usage information selects.
    pub fn for_ir(ir: &Ir) -> Self {
        if ir.service_type_reference_info.is_some() {
            PlacementStrategy::ServiceScoped
        } else {
            PlacementStrategy::PerType
        }
    }
}

/// Something rendered into a placed file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlacedDeclaration {
    Type {
        type_id: TypeId,
    },
    /// The wrapper object synthesized for an endpoint's request.
    InlinedRequest {
        service_id: ServiceId,
        endpoint: String,
    },
}

impl PlacedDeclaration {
    /// The key entries are ordered by within a file.
    pub fn sort_key(&self) -> &str {
        match self {
            PlacedDeclaration::Type { type_id } => type_id.as_str(),
            PlacedDeclaration::InlinedRequest { endpoint, .. } => endpoint,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilePlacement {
    pub target: PlacementTarget,
    pub declarations: Vec<PlacedDeclaration>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorFilePlacement {
    pub target: PlacementTarget,
    pub errors: Vec<ErrorId>,
}

/// A package documentation file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocPlacement {
    pub target: PlacementTarget,
    /// `None` for the root package.
    pub subpackage_id: Option<SubpackageId>,
}

/// A client in the client hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientPlacement {
    pub target: PlacementTarget,
    /// `None` for the root client.
    pub subpackage_id: Option<SubpackageId>,
    pub service_id: Option<ServiceId>,
    /// Path the client's in-lined requests are scoped to.
    pub original_path: DeclarationPath,
    /// Child subpackages reachable from this client.
    pub children: Vec<SubpackageId>,
}

/// The file a declaration at `path` names.
///
/// Package path segments become directories and the file component the
/// basename, or `types` when absent.
pub fn target_for_path(root_package: &str, path: &DeclarationPath) -> PlacementTarget {
    let basename = path
        .file()
        .map(|f| f.file_basename())
        .unwrap_or(DEFAULT_TYPES_BASENAME);
    PlacementTarget::in_dirs(&path.package_dirs(), &format!("{}.go", basename), root_package)
}

/// A fixed file in the directory of `path`'s package.
pub fn target_in_package(
    root_package: &str,
    path: &DeclarationPath,
    filename: &str,
) -> PlacementTarget {
    PlacementTarget::in_dirs(&path.package_dirs(), filename, root_package)
}

/// The single file a service's types are grouped into.
///
/// Named after the service's file, or its innermost package when the
/// service has no file.
pub fn target_for_service(root_package: &str, path: &DeclarationPath) -> PlacementTarget {
    let basename = path
        .file()
        .or(path.last_package())
        .map(|n| n.file_basename())
        .unwrap_or(DEFAULT_TYPES_BASENAME);
    PlacementTarget::in_dirs(&path.package_dirs(), &format!("{}.go", basename), root_package)
}

/// The client file for a (normalized) path.
///
/// Clients live in their own package: the file component, or `client`.
pub fn target_for_client(path: &DeclarationPath) -> PlacementTarget {
    let mut dirs = path.package_dirs();
    dirs.push(
        path.file()
            .map(|f| f.package_segment())
            .unwrap_or_else(|| DEFAULT_CLIENT_DIR.to_string()),
    );
    PlacementTarget::in_dirs(&dirs, CLIENT_FILENAME, DEFAULT_CLIENT_DIR)
}

/// Collects declarations per target, keeping the first target per type.
struct FileCollector<'a> {
    ir: &'a Ir,
    root_package: String,
    files: BTreeMap<PlacementTarget, Vec<PlacedDeclaration>>,
    placed: HashSet<TypeId>,
}

impl<'a> FileCollector<'a> {
    fn new(ir: &'a Ir) -> Self {
        Self {
            ir,
            root_package: ir.root_package_name(),
            files: BTreeMap::new(),
            placed: HashSet::new(),
        }
    }

    fn push(&mut self, target: PlacementTarget, declaration: PlacedDeclaration) {
        self.files.entry(target).or_default().push(declaration);
    }

    fn place_type(&mut self, type_id: &TypeId, target: PlacementTarget) {
        if self.placed.insert(type_id.clone()) {
            self.push(
                target,
                PlacedDeclaration::Type {
                    type_id: type_id.clone(),
                },
            );
        }
    }

    fn package_target(&self, type_id: &TypeId, referrer: &str) -> Result<PlacementTarget, LayoutError> {
        let decl = self
            .ir
            .types
            .get(type_id)
            .ok_or_else(|| LayoutError::unknown_type(referrer, type_id))?;
        Ok(target_in_package(
            &self.root_package,
            decl.declaration_path(),
            &format!("{}.go", DEFAULT_TYPES_BASENAME),
        ))
    }

    fn place_requests(&mut self) {
        for (service_id, service) in &self.ir.services {
            let target = target_for_path(&self.root_package, service.declaration_path());
            for endpoint in service.endpoints.iter().filter(|e| e.has_inlined_request()) {
                self.push(
                    target.clone(),
                    PlacedDeclaration::InlinedRequest {
                        service_id: service_id.clone(),
                        endpoint: endpoint.name.original().to_string(),
                    },
                );
            }
        }
    }

    fn place_per_type(&mut self) {
        let ir = self.ir;
        for (type_id, decl) in &ir.types {
            let target = target_for_path(&self.root_package, decl.declaration_path());
            self.place_type(type_id, target);
        }
    }

    fn place_service_scoped(&mut self) -> Result<(), LayoutError> {
        let ir = self.ir;
        let Some(info) = &ir.service_type_reference_info else {
            return Ok(());
        };
        const REFERRER: &str = "service type reference info";

        // Types used only by the unnamed root service are grouped like shared types.
        let root_only = info
            .types_referenced_only_by_service
            .get(ROOT_SERVICE_ID)
            .into_iter()
            .flatten();
        for type_id in info.shared_types.iter().chain(root_only) {
            let target = self.package_target(type_id, REFERRER)?;
            self.place_type(type_id, target);
        }

        for (service_id, type_ids) in &info.types_referenced_only_by_service {
            if service_id.as_str() == ROOT_SERVICE_ID {
                continue;
            }
            let service: &HttpService = ir
                .services
                .get(service_id)
                .ok_or_else(|| LayoutError::unknown_service(REFERRER, service_id))?;
            let service_target = target_for_service(&self.root_package, service.declaration_path());
            for type_id in type_ids {
                let type_target = self.package_target(type_id, REFERRER)?;
                // A type keeps its own package even when one service uses it.
                // Packages match by directory; `billing/users` and `admin/users`
                // share a name but not a package.
                let target = if type_target.directory() == service_target.directory() {
                    service_target.clone()
                } else {
                    type_target
                };
                self.place_type(type_id, target);
            }
        }

        for type_id in ir.types.keys() {
            let target = self.package_target(type_id, REFERRER)?;
            self.place_type(type_id, target);
        }
        Ok(())
    }

    fn finish(self) -> Vec<FilePlacement> {
        self.files
            .into_iter()
            .map(|(target, mut declarations)| {
                declarations.sort_by(|a, b| a.sort_key().cmp(b.sort_key()));
                FilePlacement {
                    target,
                    declarations,
                }
            })
            .collect()
    }
}

/// Place every type and, when `include_requests` is set, every in-lined
/// request shape. Files are ordered by target.
pub fn place_types(
    ir: &Ir,
    include_requests: bool,
) -> Result<(PlacementStrategy, Vec<FilePlacement>), LayoutError> {
    let strategy = PlacementStrategy::for_ir(ir);
    let mut collector = FileCollector::new(ir);
    if include_requests {
        collector.place_requests();
    }
    match strategy {
        PlacementStrategy::PerType => collector.place_per_type(),
        PlacementStrategy::ServiceScoped => collector.place_service_scoped()?,
    }
    Ok((strategy, collector.finish()))
}

/// Group errors into one `errors.go` per package directory.
pub fn place_errors(ir: &Ir) -> Vec<ErrorFilePlacement> {
    let root_package = ir.root_package_name();
    let mut files: BTreeMap<PlacementTarget, Vec<ErrorId>> = BTreeMap::new();
    for (error_id, decl) in &ir.errors {
        let target = target_in_package(&root_package, decl.declaration_path(), ERRORS_FILENAME);
        files.entry(target).or_default().push(error_id.clone());
    }
    files
        .into_iter()
        .map(|(target, mut errors)| {
            errors.sort();
            ErrorFilePlacement { target, errors }
        })
        .collect()
}

/// A `doc.go` for the root package and every subpackage with docs.
///
/// Uses declared paths, before normalization.
pub fn place_docs(ir: &Ir) -> Vec<DocPlacement> {
    let root_package = ir.root_package_name();
    let root = ir
        .root_package
        .iter()
        .filter(|root| root.has_docs())
        .map(|root| DocPlacement {
            target: target_in_package(&root_package, &root.declaration_path, DOCS_FILENAME),
            subpackage_id: None,
        });
    let subpackages = ir
        .subpackages
        .iter()
        .filter(|(_, subpackage)| subpackage.has_docs())
        .map(|(id, subpackage)| DocPlacement {
            target: target_in_package(&root_package, &subpackage.declaration_path, DOCS_FILENAME),
            subpackage_id: Some(id.clone()),
        });
    root.chain(subpackages).collect()
}

/// Children of a package that have endpoints somewhere beneath them.
fn children_with_endpoints(
    ir: &Ir,
    referrer: &str,
    children: &[SubpackageId],
) -> Result<Vec<SubpackageId>, LayoutError> {
    let mut result = Vec::new();
    for child in children {
        let subpackage = ir
            .subpackages
            .get(child)
            .ok_or_else(|| LayoutError::unknown_subpackage(referrer, child))?;
        if subpackage.has_endpoints_in_tree {
            result.push(child.clone());
        }
    }
    Ok(result)
}

/// Place the client hierarchy from the normalized subpackage tree.
///
/// The root package always gets a client. A subpackage gets one if it owns
/// a service or has children with endpoints.
pub fn place_clients(ir: &Ir, tree: &NormalizedTree) -> Result<Vec<ClientPlacement>, LayoutError> {
    let mut clients = Vec::new();

    if let Some(root) = &ir.root_package {
        clients.push(ClientPlacement {
            target: target_for_client(&root.declaration_path),
            subpackage_id: None,
            service_id: root.service.clone(),
            original_path: root.declaration_path.clone(),
            children: children_with_endpoints(ir, "root package", &root.subpackages)?,
        });
    }

    for (id, normalized) in &tree.subpackages {
        let subpackage = &normalized.subpackage;
        let referrer = format!("subpackage '{}'", id);
        let children = children_with_endpoints(ir, &referrer, &subpackage.subpackages)?;
        if subpackage.service.is_none() && children.is_empty() {
            continue;
        }
        let path = match &subpackage.service {
            Some(service_id) => tree
                .service_path(ir, service_id)
                .ok_or_else(|| LayoutError::unknown_service(&referrer, service_id))?,
            None => normalized.path(),
        };
        clients.push(ClientPlacement {
            target: target_for_client(path),
            subpackage_id: Some(id.clone()),
            service_id: subpackage.service.clone(),
            original_path: normalized.original_path.clone(),
            children,
        });
    }

    Ok(clients)
}

#[cfg(test)]
mod tests {
    use placer_ir::testing::{
        IrBuilder, body_endpoint, file_upload_endpoint, path, streaming_endpoint,
        wrapper_endpoint,
    };

    use super::*;

    fn files_by_name(files: &[FilePlacement]) -> Vec<(&str, &str, Vec<&str>)> {
        files
            .iter()
            .map(|f| {
                (
                    f.target.filename.as_str(),
                    f.target.package_name.as_str(),
                    f.declarations.iter().map(|d| d.sort_key()).collect(),
                )
            })
            .collect()
    }

    #[test]
    fn test_target_for_path() {
        assert_eq!(
            target_for_path("acme", &path(&["billing", "Invoices"], Some("lineItems"))),
            PlacementTarget::new("billing/invoices/line_items.go", "invoices")
        );
        assert_eq!(
            target_for_path("acme", &path(&[], None)),
            PlacementTarget::new("types.go", "acme")
        );
    }

    #[test]
    fn test_target_for_client() {
        assert_eq!(
            target_for_client(&DeclarationPath::root()),
            PlacementTarget::new("client/client.go", "client")
        );
        assert_eq!(
            target_for_client(&path(&["users"], Some("userService"))),
            PlacementTarget::new("users/userservice/client.go", "userservice")
        );
        assert_eq!(
            target_for_client(&path(&["config"], None)),
            PlacementTarget::new("config/client/client.go", "client")
        );
    }

    #[test]
    fn test_target_for_service_without_file() {
        assert_eq!(
            target_for_service("acme", &path(&["users"], None)),
            PlacementTarget::new("users/users.go", "users")
        );
        assert_eq!(
            target_for_service("acme", &path(&[], None)),
            PlacementTarget::new("types.go", "acme")
        );
    }

    #[test]
    fn test_per_type_placement_sorted_by_id() {
        let ir = IrBuilder::new("acme")
            .object("Zebra", path(&["animals"], None), &[])
            .object("Ant", path(&["animals"], None), &[])
            .object("Root", path(&[], None), &[])
            .build();
        let (strategy, files) = place_types(&ir, true).unwrap();
        assert_eq!(strategy, PlacementStrategy::PerType);
        assert_eq!(
            files_by_name(&files),
            vec![
                ("animals/types.go", "animals", vec!["Ant", "Zebra"]),
                ("types.go", "acme", vec!["Root"]),
            ]
        );
    }

    #[test]
    fn test_inlined_request_skip_rule() {
        let ir = IrBuilder::new("acme")
            .object("User", path(&["users"], Some("users")), &[])
            .service(
                "service_users",
                path(&["users"], Some("users")),
                vec![
                    body_endpoint("update", "User"),
                    wrapper_endpoint("create"),
                    file_upload_endpoint("upload", false),
                    file_upload_endpoint("import", true),
                    streaming_endpoint("watch"),
                ],
            )
            .build();
        let (_, files) = place_types(&ir, true).unwrap();
        assert_eq!(
            files_by_name(&files),
            vec![(
                "users/users.go",
                "users",
                vec!["User", "create", "import"]
            )]
        );
    }

    #[test]
    fn test_requests_excluded_when_disabled() {
        let ir = IrBuilder::new("acme")
            .service("service_users", path(&["users"], None), vec![wrapper_endpoint("create")])
            .build();
        let (_, files) = place_types(&ir, false).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_service_scoped_groups_by_service() {
        let ir = IrBuilder::new("acme")
            .object("Shared", path(&["common"], Some("ids")), &[])
            .object("RootOnly", path(&[], Some("misc")), &[])
            .object("User", path(&["users"], Some("models")), &[])
            .object("Org", path(&["orgs"], None), &[])
            .object("Unlisted", path(&["users"], Some("extra")), &[])
            .service("service_users", path(&["users"], Some("userService")), vec![])
            .service_type_reference_info(
                &["Shared"],
                &[("service_", &["RootOnly"]), ("service_users", &["User", "Org"])],
            )
            .build();
        let (strategy, files) = place_types(&ir, true).unwrap();
        assert_eq!(strategy, PlacementStrategy::ServiceScoped);
        assert_eq!(
            files_by_name(&files),
            vec![
                ("common/types.go", "common", vec!["Shared"]),
                // Org belongs to a different package than the service
                ("orgs/types.go", "orgs", vec!["Org"]),
                ("types.go", "acme", vec!["RootOnly"]),
                ("users/types.go", "users", vec!["Unlisted"]),
                ("users/user_service.go", "users", vec!["User"]),
            ]
        );
    }

    #[test]
    fn test_service_scoped_same_name_different_directory() {
        let ir = IrBuilder::new("acme")
            .object("Invoice", path(&["billing", "users"], None), &[])
            .object("Admin", path(&["admin", "users"], None), &[])
            .service("service_admin_users", path(&["admin", "users"], Some("userService")), vec![])
            .service_type_reference_info(&[], &[("service_admin_users", &["Invoice", "Admin"])])
            .build();
        let (_, files) = place_types(&ir, true).unwrap();
        assert_eq!(
            files_by_name(&files),
            vec![
                ("admin/users/user_service.go", "users", vec!["Admin"]),
                ("billing/users/types.go", "users", vec!["Invoice"]),
            ]
        );
    }

    #[test]
    fn test_service_scoped_unknown_type() {
        let ir = IrBuilder::new("acme")
            .service_type_reference_info(&["Missing"], &[])
            .build();
        let err = place_types(&ir, true).unwrap_err();
        assert_eq!(
            err,
            LayoutError::UnknownType {
                referrer: "service type reference info".into(),
                type_id: TypeId::from("Missing"),
            }
        );
    }

    #[test]
    fn test_service_scoped_unknown_service() {
        let ir = IrBuilder::new("acme")
            .service_type_reference_info(&[], &[("service_gone", &[])])
            .build();
        let err = place_types(&ir, true).unwrap_err();
        assert!(matches!(err, LayoutError::UnknownService { .. }));
    }

    #[test]
    fn test_errors_grouped_per_package() {
        let ir = IrBuilder::new("acme")
            .error("UserNotFound", path(&["users"], Some("errors")), None)
            .error("Conflict", path(&["users"], None), None)
            .error("Unauthorized", path(&[], None), None)
            .build();
        let errors = place_errors(&ir);
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].target, PlacementTarget::new("errors.go", "acme"));
        assert_eq!(
            errors[1].target,
            PlacementTarget::new("users/errors.go", "users")
        );
        assert_eq!(
            errors[1].errors,
            vec![ErrorId::from("Conflict"), ErrorId::from("UserNotFound")]
        );
    }

    #[test]
    fn test_docs_use_declared_paths() {
        let ir = IrBuilder::new("acme")
            .subpackage("subpackage_users", path(&["users"], None), None, &[])
            .subpackage("subpackage_orgs", path(&["orgs"], None), None, &[])
            .subpackage_docs("subpackage_users", "Manage users.")
            .subpackage_docs("subpackage_orgs", "")
            .root_package(None, &["subpackage_users", "subpackage_orgs"])
            .root_docs("The Acme API.")
            .build();
        let docs = place_docs(&ir);
        assert_eq!(
            docs,
            vec![
                DocPlacement {
                    target: PlacementTarget::new("doc.go", "acme"),
                    subpackage_id: None,
                },
                DocPlacement {
                    target: PlacementTarget::new("users/doc.go", "users"),
                    subpackage_id: Some(SubpackageId::from("subpackage_users")),
                },
            ]
        );
    }

    #[test]
    fn test_client_hierarchy() {
        let ir = IrBuilder::new("acme")
            .service("service_config", path(&[], Some("config")), vec![])
            .service("service_flags", path(&["config"], Some("flags")), vec![])
            .subpackage(
                "subpackage_config",
                path(&[], Some("config")),
                Some("service_config"),
                &["subpackage_flags"],
            )
            .subpackage(
                "subpackage_flags",
                path(&["config"], Some("flags")),
                Some("service_flags"),
                &[],
            )
            .subpackage("subpackage_empty", path(&["empty"], None), None, &[])
            .root_package(None, &["subpackage_config", "subpackage_empty"])
            .build();
        let tree = NormalizedTree::build(&ir).unwrap();
        let clients = place_clients(&ir, &tree).unwrap();

        let targets: Vec<&str> = clients.iter().map(|c| c.target.filename.as_str()).collect();
        assert_eq!(
            targets,
            vec![
                "client/client.go",
                "config/client/client.go",
                "config/flags/client.go",
            ]
        );
        assert_eq!(clients[0].children, vec![SubpackageId::from("subpackage_config")]);
        assert_eq!(clients[1].original_path, path(&[], Some("config")));
        assert_eq!(clients[1].children, vec![SubpackageId::from("subpackage_flags")]);
    }
}
