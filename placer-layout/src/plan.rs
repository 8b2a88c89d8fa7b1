//! The complete layout plan handed to the rendering layer.

use std::fmt;

use placer_core::PlacementTarget;
use placer_ir::Ir;
use placer_manifest::{GeneratorConfig, Mode};
use serde::Serialize;
use tracing::debug;

use crate::{
    ArtifactKind, ArtifactPlacement, ClientPlacement, CollisionRegistry, DocPlacement,
    ErrorFilePlacement, FilePlacement, LayoutError, ModulePlacement, NormalizedTree,
    PlacedDeclaration, PlacementStrategy, place_artifacts, place_clients, place_docs,
    place_errors, place_module, place_types,
};

/// Every target one run produces.
///
/// Each list is ordered, so equal inputs serialize and render identically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayoutPlan {
    pub api_name: String,
    pub root_package: String,
    pub mode: Mode,
    pub strategy: PlacementStrategy,
    pub files: Vec<FilePlacement>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ErrorFilePlacement>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub docs: Vec<DocPlacement>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub clients: Vec<ClientPlacement>,
    pub artifacts: Vec<ArtifactPlacement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module: Option<ModulePlacement>,
}

impl LayoutPlan {
    /// Place everything in `ir`.
    ///
    /// `ir` must already be cycle-free; `tree` is its normalized
    /// subpackage tree.
    pub fn build(
        config: &GeneratorConfig,
        ir: &Ir,
        registry: &CollisionRegistry,
        tree: &NormalizedTree,
    ) -> Result<Self, LayoutError> {
        let (strategy, files) = place_types(ir, config.mode.places_requests())?;
        let (errors, clients) = if config.mode.places_client() {
            (place_errors(ir), place_clients(ir, tree)?)
        } else {
            (Vec::new(), Vec::new())
        };

        let plan = Self {
            api_name: ir.api_name.original().to_string(),
            root_package: ir.root_package_name(),
            mode: config.mode,
            strategy,
            files,
            errors,
            docs: place_docs(ir),
            clients,
            artifacts: place_artifacts(config, ir, registry),
            module: place_module(config, ir),
        };

        for target in plan.targets() {
            debug!(filename = %target.filename, package = %target.package_name, "placed file");
        }
        Ok(plan)
    }

    /// Every target in the plan, section by section.
    pub fn targets(&self) -> impl Iterator<Item = &PlacementTarget> {
        let files = self.files.iter().map(|f| &f.target);
        let errors = self.errors.iter().map(|e| &e.target);
        let docs = self.docs.iter().map(|d| &d.target);
        let clients = self.clients.iter().map(|c| &c.target);
        let artifacts = self.artifacts.iter().map(|a| &a.target);
        files
            .chain(errors)
            .chain(docs)
            .chain(clients)
            .chain(artifacts)
    }

    pub fn file(&self, filename: &str) -> Option<&FilePlacement> {
        self.files.iter().find(|f| f.target.filename == filename)
    }

    pub fn artifact(&self, kind: ArtifactKind) -> Option<&ArtifactPlacement> {
        self.artifacts.iter().find(|a| a.kind == kind)
    }

    /// Singletons moved off their default location by a collision.
    pub fn fallbacks(&self) -> impl Iterator<Item = &ArtifactPlacement> {
        self.artifacts.iter().filter(|a| a.is_fallback())
    }

    pub fn declaration_count(&self) -> usize {
        self.files.iter().map(|f| f.declarations.len()).sum()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for PlacedDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacedDeclaration::Type { type_id } => write!(f, "type {}", type_id),
            PlacedDeclaration::InlinedRequest {
                service_id,
                endpoint,
            } => write!(f, "request {} of {}", endpoint, service_id),
        }
    }
}

impl fmt::Display for LayoutPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} (mode {}, strategy {})",
            self.api_name,
            self.mode,
            self.strategy.as_str()
        )?;

        if !self.files.is_empty() {
            writeln!(f, "files:")?;
            for file in &self.files {
                writeln!(f, "  {}", file.target)?;
                for declaration in &file.declarations {
                    writeln!(f, "    {}", declaration)?;
                }
            }
        }

        if !self.errors.is_empty() {
            writeln!(f, "errors:")?;
            for file in &self.errors {
                writeln!(f, "  {}", file.target)?;
                for error in &file.errors {
                    writeln!(f, "    error {}", error)?;
                }
            }
        }

        if !self.docs.is_empty() {
            writeln!(f, "docs:")?;
            for doc in &self.docs {
                writeln!(f, "  {}", doc.target)?;
            }
        }

        if !self.clients.is_empty() {
            writeln!(f, "clients:")?;
            for client in &self.clients {
                writeln!(f, "  {}", client.target)?;
                for child in &client.children {
                    writeln!(f, "    child {}", child)?;
                }
            }
        }

        if !self.artifacts.is_empty() {
            writeln!(f, "artifacts:")?;
            for artifact in &self.artifacts {
                write!(f, "  {} -> {}", artifact.kind, artifact.target)?;
                if artifact.use_core {
                    write!(f, " [core]")?;
                }
                writeln!(f)?;
            }
        }

        if let Some(module) = &self.module {
            write!(f, "module: {} ({})", module.filename, module.path)?;
            if module.requires_generics {
                write!(f, " [generics]")?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use placer_ir::testing::{IrBuilder, path, wrapper_endpoint};

    use super::*;

    fn build(config: &GeneratorConfig, ir: &Ir) -> LayoutPlan {
        let registry = CollisionRegistry::from_ir(ir);
        let tree = NormalizedTree::build(ir).unwrap();
        LayoutPlan::build(config, ir, &registry, &tree).unwrap()
    }

    fn users_ir() -> Ir {
        IrBuilder::new("acme")
            .object("User", path(&["users"], None), &[])
            .error("NotFound", path(&[], None), None)
            .service("service_users", path(&["users"], None), vec![wrapper_endpoint("create")])
            .subpackage("subpackage_users", path(&["users"], None), Some("service_users"), &[])
            .root_package(None, &["subpackage_users"])
            .build()
    }

    #[test]
    fn test_model_mode_places_types_only() {
        let config = GeneratorConfig::default().with_mode(Mode::Model);
        let plan = build(&config, &users_ir());

        assert_eq!(plan.declaration_count(), 1);
        assert!(plan.errors.is_empty());
        assert!(plan.clients.is_empty());
        assert_eq!(plan.artifacts.len(), 1);
    }

    #[test]
    fn test_fiber_mode_places_requests() {
        let config = GeneratorConfig::default().with_mode(Mode::Fiber);
        let plan = build(&config, &users_ir());

        let file = plan.file("users/types.go").unwrap();
        assert_eq!(file.declarations.len(), 2);
        assert!(plan.clients.is_empty());
    }

    #[test]
    fn test_client_mode_places_everything() {
        let plan = build(&GeneratorConfig::default(), &users_ir());

        assert_eq!(plan.errors.len(), 1);
        assert_eq!(plan.clients.len(), 2);
        assert!(plan.artifact(ArtifactKind::ClientOptions).is_some());
        assert!(plan.artifact(ArtifactKind::Environments).is_none());
        assert!(
            plan.targets()
                .any(|t| t.filename == "users/client/client.go")
        );
    }

    #[test]
    fn test_json_output() {
        let plan = build(&GeneratorConfig::default(), &users_ir());
        let json: serde_json::Value = serde_json::from_str(&plan.to_json().unwrap()).unwrap();

        assert_eq!(json["mode"], "client");
        assert_eq!(json["strategy"], "per-type");
        assert_eq!(json["files"][0]["target"]["filename"], "users/types.go");
        assert_eq!(json["files"][0]["declarations"][0]["kind"], "type");
        assert!(json.get("module").is_none());
    }
}
