//! The type reference graph and the package graph it induces.

use std::collections::{BTreeMap, BTreeSet};

use indexmap::IndexMap;
use petgraph::{
    algo::tarjan_scc,
    graph::{DiGraph, NodeIndex},
};
use placer_core::DeclarationPath;
use placer_ir::{Ir, TypeId};

use crate::LayoutError;

/// The import path of the package a declaration path resolves to.
///
/// With an empty import path the identity is the bare directory, and the
/// root package is the empty string.
pub fn package_identity(import_path: &str, path: &DeclarationPath) -> String {
    let dirs = path.package_dirs();
    if dirs.is_empty() {
        import_path.to_string()
    } else if import_path.is_empty() {
        dirs.join("/")
    } else {
        format!("{}/{}", import_path, dirs.join("/"))
    }
}

/// Every type's resolved package and its outgoing references.
#[derive(Debug, Clone)]
pub struct ReferenceGraph {
    import_path: String,
    packages: IndexMap<TypeId, String>,
    /// `(from, to)` in document order, self references excluded.
    references: Vec<(TypeId, TypeId)>,
}

impl ReferenceGraph {
    /// Resolve every type's package and collect its references.
    ///
    /// Fails if a type references an identifier missing from the type table.
    pub fn build(ir: &Ir, import_path: &str) -> Result<Self, LayoutError> {
        let packages: IndexMap<TypeId, String> = ir
            .types
            .iter()
            .map(|(id, decl)| {
                (
                    id.clone(),
                    package_identity(import_path, decl.declaration_path()),
                )
            })
            .collect();

        let mut references = Vec::new();
        for (type_id, decl) in &ir.types {
            for referenced in &decl.referenced_types {
                if !packages.contains_key(referenced) {
                    return Err(LayoutError::unknown_type(
                        format!("type '{}'", type_id),
                        referenced,
                    ));
                }
                if referenced != type_id {
                    references.push((type_id.clone(), referenced.clone()));
                }
            }
        }

        Ok(Self {
            import_path: import_path.to_string(),
            packages,
            references,
        })
    }

    /// Single-module generation cannot import across packages.
    ///
    /// Reports the first offending reference in document order.
    pub fn check_import_path(&self) -> Result<(), LayoutError> {
        if !self.import_path.is_empty() {
            return Ok(());
        }
        match self.cross_package_references().next() {
            None => Ok(()),
            Some((type_id, referenced)) => Err(LayoutError::MissingImportPath {
                type_id: type_id.clone(),
                referenced: referenced.clone(),
            }),
        }
    }

    pub fn import_path(&self) -> &str {
        &self.import_path
    }

    pub fn package_of(&self, type_id: &TypeId) -> Option<&str> {
        self.packages.get(type_id).map(String::as_str)
    }

    pub fn packages(&self) -> impl Iterator<Item = (&TypeId, &str)> {
        self.packages.iter().map(|(id, pkg)| (id, pkg.as_str()))
    }

    pub fn references(&self) -> impl Iterator<Item = (&TypeId, &TypeId)> {
        self.references.iter().map(|(from, to)| (from, to))
    }

    /// References whose endpoints resolve to different packages.
    pub fn cross_package_references(&self) -> impl Iterator<Item = (&TypeId, &TypeId)> {
        self.references()
            .filter(|&(from, to)| self.package_of(from) != self.package_of(to))
    }

    /// Collapse type references into package-to-package imports.
    pub fn package_graph(&self) -> PackageGraph {
        let mut graph = PackageGraph::default();
        let names: BTreeSet<&str> = self.packages.values().map(String::as_str).collect();
        for name in names {
            graph.add_package(name);
        }
        for (from, to) in self.cross_package_references() {
            if let (Some(from), Some(to)) = (self.package_of(from), self.package_of(to)) {
                graph.add_import(from, to);
            }
        }
        graph
    }
}

/// Directed imports between packages.
#[derive(Debug, Clone, Default)]
pub struct PackageGraph {
    graph: DiGraph<String, ()>,
    nodes: BTreeMap<String, NodeIndex>,
}

impl PackageGraph {
    fn add_package(&mut self, name: &str) -> NodeIndex {
        if let Some(index) = self.nodes.get(name) {
            return *index;
        }
        let index = self.graph.add_node(name.to_string());
        self.nodes.insert(name.to_string(), index);
        index
    }

    fn add_import(&mut self, from: &str, to: &str) {
        let from = self.add_package(from);
        let to = self.add_package(to);
        self.graph.update_edge(from, to, ());
    }

    pub fn package_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn import_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn imports(&self, from: &str, to: &str) -> bool {
        match (self.nodes.get(from), self.nodes.get(to)) {
            (Some(from), Some(to)) => self.graph.contains_edge(*from, *to),
            _ => false,
        }
    }

    /// Strongly connected groups of packages that import each other.
    ///
    /// Each cycle is sorted, and cycles are ordered by their first package.
    pub fn cycles(&self) -> Vec<Vec<String>> {
        let mut cycles: Vec<Vec<String>> = tarjan_scc(&self.graph)
            .into_iter()
            .filter(|component| component.len() > 1)
            .map(|component| {
                let mut names: Vec<String> = component
                    .into_iter()
                    .map(|index| self.graph[index].clone())
                    .collect();
                names.sort();
                names
            })
            .collect();
        cycles.sort();
        cycles
    }
}

#[cfg(test)]
mod tests {
    use placer_ir::testing::{IrBuilder, path};

    use super::*;

    #[test]
    fn test_package_identity() {
        let nested = path(&["billing", "Invoices"], Some("items"));
        assert_eq!(
            package_identity("github.com/acme/sdk", &nested),
            "github.com/acme/sdk/billing/invoices"
        );
        assert_eq!(package_identity("", &nested), "billing/invoices");
        assert_eq!(
            package_identity("github.com/acme/sdk", &DeclarationPath::root()),
            "github.com/acme/sdk"
        );
        assert_eq!(package_identity("", &DeclarationPath::root()), "");
    }

    #[test]
    fn test_file_component_does_not_change_package() {
        let a = package_identity("m", &path(&["users"], Some("user")));
        let b = package_identity("m", &path(&["users"], None));
        assert_eq!(a, b);
    }

    #[test]
    fn test_single_module_rejects_cross_package_reference() {
        let ir = IrBuilder::new("acme")
            .object("User", path(&["users"], None), &["Org"])
            .object("Org", path(&["orgs"], None), &[])
            .build();
        let graph = ReferenceGraph::build(&ir, "").unwrap();
        assert_eq!(
            graph.check_import_path(),
            Err(LayoutError::MissingImportPath {
                type_id: TypeId::from("User"),
                referenced: TypeId::from("Org"),
            })
        );
    }

    #[test]
    fn test_single_module_allows_same_package_reference() {
        let ir = IrBuilder::new("acme")
            .object("User", path(&["users"], Some("user")), &["Role"])
            .object("Role", path(&["users"], Some("role")), &[])
            .build();
        let graph = ReferenceGraph::build(&ir, "").unwrap();
        assert_eq!(graph.check_import_path(), Ok(()));
    }

    #[test]
    fn test_import_path_allows_cross_package_reference() {
        let ir = IrBuilder::new("acme")
            .object("User", path(&["users"], None), &["Org"])
            .object("Org", path(&["orgs"], None), &[])
            .build();
        let graph = ReferenceGraph::build(&ir, "github.com/acme/sdk").unwrap();
        assert_eq!(graph.check_import_path(), Ok(()));
        assert_eq!(
            graph.package_of(&TypeId::from("User")),
            Some("github.com/acme/sdk/users")
        );
    }

    #[test]
    fn test_dangling_reference() {
        let ir = IrBuilder::new("acme")
            .object("User", path(&["users"], None), &["Missing"])
            .build();
        let err = ReferenceGraph::build(&ir, "m").unwrap_err();
        assert!(matches!(err, LayoutError::UnknownType { .. }));
    }

    #[test]
    fn test_package_graph_cycles() {
        let ir = IrBuilder::new("acme")
            .object("A", path(&["x"], None), &["B"])
            .object("B", path(&["y"], None), &["A"])
            .object("C", path(&["z"], None), &["A"])
            .build();
        let graph = ReferenceGraph::build(&ir, "m").unwrap().package_graph();
        assert_eq!(graph.package_count(), 3);
        assert_eq!(graph.import_count(), 3);
        assert!(graph.imports("m/z", "m/x"));
        assert!(!graph.imports("m/x", "m/z"));
        assert_eq!(graph.cycles(), vec![vec!["m/x".to_string(), "m/y".to_string()]]);
    }

    #[test]
    fn test_self_reference_is_not_an_edge() {
        let ir = IrBuilder::new("acme")
            .object("Node", path(&["tree"], None), &["Node"])
            .build();
        let graph = ReferenceGraph::build(&ir, "").unwrap();
        assert_eq!(graph.references().count(), 0);
        assert!(graph.package_graph().cycles().is_empty());
    }
}
