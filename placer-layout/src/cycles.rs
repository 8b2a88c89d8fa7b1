//! Import cycle detection and resolution.
//!
//! Resolution moves types out of a package cycle into a shared package.
//! Only leaf types move: within the types implicated in a cycle, a leaf
//! is one that references no other implicated type, or a group of mutually
//! referencing types that references nothing else. Moving leaves never
//! introduces a new import among the moved types themselves.
//!
//! Relocation repeats until the package graph is acyclic. A type moves at
//! most once, so resolution always terminates: a round that moves nothing
//! means the cycle has no movable leaf and planning fails.

use std::collections::{BTreeMap, BTreeSet};

use petgraph::{algo::tarjan_scc, graph::DiGraph};
use placer_core::{DeclarationPath, Name};
use placer_ir::{Ir, TypeId};
use serde::Serialize;
use tracing::{debug, info};

use crate::{LayoutError, ReferenceGraph};

/// Package and file identifier for relocated types.
pub const SHARED_PACKAGE: &str = "shared";

/// A type moved to break a cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Relocation {
    pub type_id: TypeId,
    pub from: DeclarationPath,
    pub to: DeclarationPath,
    /// The packages whose cycle caused the move.
    pub cycle: Vec<String>,
}

/// The outcome of cycle resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CycleReport {
    /// Relocations in the order they were applied.
    pub relocations: Vec<Relocation>,
    /// Detection rounds run, including the final acyclic one.
    pub rounds: usize,
}

impl CycleReport {
    pub fn is_empty(&self) -> bool {
        self.relocations.is_empty()
    }
}

/// The shared-package path a type at `original` is relocated to.
///
/// The shared package nests one level under the original's innermost
/// package so related types stay grouped; a root-level type goes to the
/// shared package itself. Shared paths map to themselves.
pub fn shared_path(original: &DeclarationPath) -> DeclarationPath {
    if is_shared_path(original) {
        return original.clone();
    }
    let mut package_path = vec![Name::new(SHARED_PACKAGE)];
    package_path.extend(original.last_package().cloned());
    DeclarationPath::new(package_path, Some(Name::new(SHARED_PACKAGE)))
}

fn is_shared_path(path: &DeclarationPath) -> bool {
    let is_shared = |name: &Name| name.original() == SHARED_PACKAGE;
    path.package_path().first().is_some_and(is_shared)
        && path.package_path().len() <= 2
        && path.file().is_some_and(is_shared)
}

/// Relocate leaf types until the package graph has no cycles.
///
/// A mutually referencing leaf group moves as a whole, so for a pair
/// `A (x) <-> B (y)` both types end up in `shared/x/shared.go`.
///
/// Returns a corrected copy of the IR; the input is never modified.
pub fn resolve_cycles(ir: &Ir, import_path: &str) -> Result<(Ir, CycleReport), LayoutError> {
    let mut corrected = ir.clone();
    let mut report = CycleReport::default();

    loop {
        report.rounds += 1;
        let graph = ReferenceGraph::build(&corrected, import_path)?;
        let cycles = graph.package_graph().cycles();
        let Some(first) = cycles.first() else {
            debug!(rounds = report.rounds, "package graph is acyclic");
            return Ok((corrected, report));
        };

        let mut moved = false;
        for cycle in &cycles {
            for group in leaf_groups(&graph, cycle) {
                moved |= relocate_group(&mut corrected, &group, cycle, &mut report);
            }
        }

        if !moved {
            return Err(LayoutError::UnresolvedCycle {
                packages: first.clone(),
            });
        }
    }
}

/// Types implicated in `cycle`: both ends of every import between two of
/// its packages.
fn implicated_types(graph: &ReferenceGraph, cycle: &[String]) -> BTreeSet<TypeId> {
    let in_cycle = |type_id: &TypeId| {
        graph
            .package_of(type_id)
            .is_some_and(|pkg| cycle.iter().any(|c| c == pkg))
    };
    graph
        .cross_package_references()
        .filter(|&(from, to)| in_cycle(from) && in_cycle(to))
        .flat_map(|(from, to)| [from.clone(), to.clone()])
        .collect()
}

/// Groups of implicated types with no references to other implicated types
/// outside the group. Each group is sorted; groups are ordered by their
/// first member.
fn leaf_groups(graph: &ReferenceGraph, cycle: &[String]) -> Vec<Vec<TypeId>> {
    let implicated = implicated_types(graph, cycle);

    let mut types = DiGraph::<TypeId, ()>::new();
    let nodes: BTreeMap<&TypeId, _> = implicated
        .iter()
        .map(|id| (id, types.add_node(id.clone())))
        .collect();
    for (from, to) in graph.references() {
        if let (Some(from), Some(to)) = (nodes.get(from), nodes.get(to)) {
            types.update_edge(*from, *to, ());
        }
    }

    let components = tarjan_scc(&types);
    let mut component_of = vec![0; types.node_count()];
    for (i, component) in components.iter().enumerate() {
        for node in component {
            component_of[node.index()] = i;
        }
    }

    let mut groups: Vec<Vec<TypeId>> = components
        .iter()
        .enumerate()
        .filter(|(i, component)| {
            component.iter().all(|node| {
                types
                    .neighbors(*node)
                    .all(|next| component_of[next.index()] == *i)
            })
        })
        .map(|(_, component)| {
            let mut group: Vec<TypeId> = component.iter().map(|n| types[*n].clone()).collect();
            group.sort();
            group
        })
        .collect();
    groups.sort();
    groups
}

/// The path a leaf group moves to, or `None` if it cannot move.
///
/// A group holding already relocated types joins their shared package;
/// relocated types never move again. Relocated members in different shared
/// packages pin the group in place.
fn group_target(ir: &Ir, group: &[TypeId], report: &CycleReport) -> Option<DeclarationPath> {
    let mut relocated = group
        .iter()
        .filter(|id| report.relocations.iter().any(|r| &r.type_id == *id))
        .filter_map(|id| ir.types.get(id))
        .map(|decl| decl.declaration_path());
    match relocated.next() {
        Some(first) => relocated.all(|p| p == first).then(|| first.clone()),
        None => group
            .first()
            .and_then(|id| ir.types.get(id))
            .map(|anchor| shared_path(anchor.declaration_path())),
    }
}

/// Move a leaf group to a shared path, by default that of its first member.
///
/// A mutually referencing group moves together so it never straddles two
/// packages. Returns true if any path changed.
fn relocate_group(
    ir: &mut Ir,
    group: &[TypeId],
    cycle: &[String],
    report: &mut CycleReport,
) -> bool {
    let Some(target) = group_target(ir, group, report) else {
        debug!(group = ?group, "leaf group is split across shared packages");
        return false;
    };

    let mut moved = false;
    for type_id in group {
        let Some(decl) = ir.types.get_mut(type_id) else {
            continue;
        };
        if decl.name.declaration_path == target {
            continue;
        }
        let from = std::mem::replace(&mut decl.name.declaration_path, target.clone());
        info!(type_id = %type_id, from = %from, to = %target, "relocated type to break import cycle");
        report.relocations.push(Relocation {
            type_id: type_id.clone(),
            from,
            to: target.clone(),
            cycle: cycle.to_vec(),
        });
        moved = true;
    }
    moved
}
