//! Singleton artifact placement.
//!
//! Helpers generated once per SDK must never shadow a generated declaration.
//! Each helper consults the [`CollisionRegistry`] and picks one of three
//! locations:
//!
//! 1. the core package, when its exported name is already taken;
//! 2. the root package under an `_`-prefixed filename, when its default
//!    filename collides with a generated package;
//! 3. the root package under its default filename.
//!
//! `use_core` tells the renderer whether references to the helper must be
//! qualified with the core package.

use placer_core::PlacementTarget;
use placer_ir::Ir;
use placer_manifest::GeneratorConfig;
use serde::Serialize;

use crate::CollisionRegistry;

/// Package holding internal helpers.
pub const CORE_PACKAGE: &str = "core";
/// Package holding the root client.
pub const CLIENT_PACKAGE: &str = "client";

/// Pointer constructors the SDK exports, one per primitive kind.
pub const POINTER_HELPERS: &[&str] = &[
    "Bool",
    "Byte",
    "Complex64",
    "Complex128",
    "Float32",
    "Float64",
    "Int",
    "Int8",
    "Int16",
    "Int32",
    "Int64",
    "Rune",
    "String",
    "Uint",
    "Uint8",
    "Uint16",
    "Uint32",
    "Uint64",
    "Uintptr",
    "Time",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArtifactKind {
    ClientOptionDefinition,
    ClientOptions,
    ClientTest,
    Core,
    CoreTest,
    Environments,
    Optional,
    OptionalHelpers,
    OptionalTest,
    PointerHelpers,
    Stream,
    Stringer,
}

impl ArtifactKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactKind::ClientOptionDefinition => "client-option-definition",
            ArtifactKind::ClientOptions => "client-options",
            ArtifactKind::ClientTest => "client-test",
            ArtifactKind::Core => "core",
            ArtifactKind::CoreTest => "core-test",
            ArtifactKind::Environments => "environments",
            ArtifactKind::Optional => "optional",
            ArtifactKind::OptionalHelpers => "optional-helpers",
            ArtifactKind::OptionalTest => "optional-test",
            ArtifactKind::PointerHelpers => "pointer-helpers",
            ArtifactKind::Stream => "stream",
            ArtifactKind::Stringer => "stringer",
        }
    }

    /// Returns true for artifacts whose location depends on the registry.
    pub fn is_singleton(&self) -> bool {
        matches!(
            self,
            ArtifactKind::ClientOptions
                | ArtifactKind::Environments
                | ArtifactKind::OptionalHelpers
                | ArtifactKind::PointerHelpers
        )
    }
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactPlacement {
    pub kind: ArtifactKind,
    pub target: PlacementTarget,
    /// The artifact lives in the core package.
    pub use_core: bool,
}

impl ArtifactPlacement {
    /// Returns true if a collision moved this artifact off its default.
    pub fn is_fallback(&self) -> bool {
        self.kind.is_singleton()
            && (self.use_core || self.target.filename.starts_with('_'))
    }

    fn core(kind: ArtifactKind, filename: &str) -> Self {
        Self {
            kind,
            target: PlacementTarget::new(format!("{}/{}", CORE_PACKAGE, filename), CORE_PACKAGE),
            use_core: true,
        }
    }

    fn root(kind: ArtifactKind, filename: impl Into<String>, root_package: &str) -> Self {
        Self {
            kind,
            target: PlacementTarget::new(filename, root_package),
            use_core: false,
        }
    }

    fn client(kind: ArtifactKind, filename: &str) -> Self {
        Self {
            kind,
            target: PlacementTarget::new(
                format!("{}/{}", CLIENT_PACKAGE, filename),
                CLIENT_PACKAGE,
            ),
            use_core: false,
        }
    }
}

/// Defaults for a singleton placed in the root package.
struct Singleton {
    kind: ArtifactKind,
    /// Exported names the artifact declares.
    names: &'static [&'static str],
    /// Package its default filename would be mistaken for.
    package: &'static str,
    filename: &'static str,
    core_filename: &'static str,
}

const ENVIRONMENTS: Singleton = Singleton {
    kind: ArtifactKind::Environments,
    names: &["Environments"],
    package: "environments",
    filename: "environments.go",
    core_filename: "environments.go",
};

// core/optional.go is a fixed file, so the helpers take another name there.
const OPTIONAL_HELPERS: Singleton = Singleton {
    kind: ArtifactKind::OptionalHelpers,
    names: &["Optional", "Null"],
    package: "optional",
    filename: "optional.go",
    core_filename: "_optional.go",
};

fn place_singleton(
    singleton: &Singleton,
    root_package: &str,
    registry: &CollisionRegistry,
) -> ArtifactPlacement {
    if singleton.names.iter().any(|name| registry.has_name(name)) {
        ArtifactPlacement::core(singleton.kind, singleton.core_filename)
    } else if registry.has_package(singleton.package) {
        ArtifactPlacement::root(
            singleton.kind,
            format!("_{}", singleton.filename),
            root_package,
        )
    } else {
        ArtifactPlacement::root(singleton.kind, singleton.filename, root_package)
    }
}

/// The environments container.
pub fn place_environments(root_package: &str, registry: &CollisionRegistry) -> ArtifactPlacement {
    place_singleton(&ENVIRONMENTS, root_package, registry)
}

/// The optional and null value constructors.
pub fn place_optional_helpers(
    root_package: &str,
    registry: &CollisionRegistry,
) -> ArtifactPlacement {
    place_singleton(&OPTIONAL_HELPERS, root_package, registry)
}

/// The pointer constructors.
///
/// These move to core if any single constructor name is taken.
pub fn place_pointer_helpers(
    root_package: &str,
    registry: &CollisionRegistry,
) -> ArtifactPlacement {
    if POINTER_HELPERS.iter().any(|name| registry.has_name(name)) {
        ArtifactPlacement::core(ArtifactKind::PointerHelpers, "pointer.go")
    } else if registry.has_name("Pointer") {
        ArtifactPlacement::root(ArtifactKind::PointerHelpers, "_pointer.go", root_package)
    } else {
        ArtifactPlacement::root(ArtifactKind::PointerHelpers, "pointer.go", root_package)
    }
}

/// The client options.
///
/// A service that already produces a `client` package pushes them to core.
pub fn place_client_options(registry: &CollisionRegistry) -> ArtifactPlacement {
    if registry.has_package(CLIENT_PACKAGE) {
        ArtifactPlacement::core(ArtifactKind::ClientOptions, "client_options.go")
    } else {
        ArtifactPlacement::client(ArtifactKind::ClientOptions, "options.go")
    }
}

/// The request option type the client options build on.
pub fn place_client_option_definition() -> ArtifactPlacement {
    ArtifactPlacement::core(ArtifactKind::ClientOptionDefinition, "client_option.go")
}

/// Every singleton and fixed file for one run, ordered by target.
pub fn place_artifacts(
    config: &GeneratorConfig,
    ir: &Ir,
    registry: &CollisionRegistry,
) -> Vec<ArtifactPlacement> {
    let root_package = ir.root_package_name();
    let mut artifacts = vec![ArtifactPlacement::core(ArtifactKind::Stringer, "stringer.go")];

    if config.mode.places_client() {
        artifacts.push(place_client_option_definition());
        if ir.environments.is_some() {
            artifacts.push(place_environments(&root_package, registry));
        }
        artifacts.push(place_client_options(registry));
        if config.enable_explicit_null {
            artifacts.push(place_optional_helpers(&root_package, registry));
            artifacts.push(ArtifactPlacement::core(ArtifactKind::Optional, "optional.go"));
            artifacts.push(ArtifactPlacement::core(
                ArtifactKind::OptionalTest,
                "optional_test.go",
            ));
        }
        artifacts.push(ArtifactPlacement::client(
            ArtifactKind::ClientTest,
            "client_test.go",
        ));
        artifacts.push(ArtifactPlacement::core(ArtifactKind::Core, "core.go"));
        artifacts.push(ArtifactPlacement::core(ArtifactKind::CoreTest, "core_test.go"));
        artifacts.push(place_pointer_helpers(&root_package, registry));
        if ir.has_streaming_endpoints() {
            artifacts.push(ArtifactPlacement::core(ArtifactKind::Stream, "stream.go"));
        }
    }

    artifacts.sort_by(|a, b| a.target.cmp(&b.target));
    artifacts
}

/// The module manifest, planned when a module is configured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModulePlacement {
    pub filename: String,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub requires_generics: bool,
}

pub fn place_module(config: &GeneratorConfig, ir: &Ir) -> Option<ModulePlacement> {
    config.module.as_ref().map(|module| ModulePlacement {
        filename: "go.mod".to_string(),
        path: module.path.clone(),
        version: module.version.clone(),
        requires_generics: config.enable_explicit_null || ir.has_streaming_endpoints(),
    })
}

#[cfg(test)]
mod tests {
    use placer_ir::testing::{IrBuilder, path, streaming_endpoint};
    use placer_manifest::Mode;

    use super::*;

    fn kinds(artifacts: &[ArtifactPlacement]) -> Vec<&'static str> {
        artifacts.iter().map(|a| a.kind.as_str()).collect()
    }

    #[test]
    fn test_environments_default_location() {
        let registry = CollisionRegistry::default();
        let placement = place_environments("acme", &registry);
        assert_eq!(placement.target, PlacementTarget::new("environments.go", "acme"));
        assert!(!placement.use_core);
    }

    #[test]
    fn test_environments_name_collision_uses_core() {
        let registry = CollisionRegistry::new(["Environments"], Vec::<String>::new());
        let placement = place_environments("acme", &registry);
        assert_eq!(
            placement.target,
            PlacementTarget::new("core/environments.go", "core")
        );
        assert!(placement.use_core);
    }

    #[test]
    fn test_environments_package_collision_prefixes_filename() {
        let registry = CollisionRegistry::new(Vec::<String>::new(), ["environments"]);
        let placement = place_environments("acme", &registry);
        assert_eq!(placement.target, PlacementTarget::new("_environments.go", "acme"));
        assert!(!placement.use_core);
    }

    #[test]
    fn test_name_collision_wins_over_package_collision() {
        let registry = CollisionRegistry::new(["Null"], ["optional"]);
        let placement = place_optional_helpers("acme", &registry);
        assert_eq!(placement.target, PlacementTarget::new("core/_optional.go", "core"));
        assert!(placement.use_core);
    }

    #[test]
    fn test_pointer_helpers() {
        let clean = place_pointer_helpers("acme", &CollisionRegistry::default());
        assert_eq!(clean.target, PlacementTarget::new("pointer.go", "acme"));

        let primitive = CollisionRegistry::new(["Uintptr"], Vec::<String>::new());
        let moved = place_pointer_helpers("acme", &primitive);
        assert_eq!(moved.target, PlacementTarget::new("core/pointer.go", "core"));
        assert!(moved.use_core);

        let pointer = CollisionRegistry::new(["Pointer"], Vec::<String>::new());
        let prefixed = place_pointer_helpers("acme", &pointer);
        assert_eq!(prefixed.target, PlacementTarget::new("_pointer.go", "acme"));
        assert!(!prefixed.use_core);
    }

    #[test]
    fn test_client_options_fallback() {
        let clean = place_client_options(&CollisionRegistry::default());
        assert_eq!(clean.target, PlacementTarget::new("client/options.go", "client"));
        assert!(!clean.use_core);

        let taken = CollisionRegistry::new(Vec::<String>::new(), ["client"]);
        let moved = place_client_options(&taken);
        assert_eq!(
            moved.target,
            PlacementTarget::new("core/client_options.go", "core")
        );
        assert!(moved.use_core);
    }

    #[test]
    fn test_model_mode_places_only_stringer() {
        let ir = IrBuilder::new("acme").environments(&["Production"]).build();
        let config = GeneratorConfig::default().with_mode(Mode::Model);
        let artifacts = place_artifacts(&config, &ir, &CollisionRegistry::default());
        assert_eq!(kinds(&artifacts), vec!["stringer"]);
    }

    #[test]
    fn test_client_mode_artifacts_are_gated() {
        let ir = IrBuilder::new("acme")
            .service("service_events", path(&["events"], None), vec![streaming_endpoint("watch")])
            .build();
        let config = GeneratorConfig::default();
        let artifacts = place_artifacts(&config, &ir, &CollisionRegistry::default());
        assert_eq!(
            kinds(&artifacts),
            vec![
                "client-test",
                "client-options",
                "client-option-definition",
                "core",
                "core-test",
                "stream",
                "stringer",
                "pointer-helpers",
            ]
        );

        let with_null = config.with_explicit_null(true);
        let artifacts = place_artifacts(&with_null, &ir, &CollisionRegistry::default());
        assert!(kinds(&artifacts).contains(&"optional-helpers"));
        assert!(kinds(&artifacts).contains(&"optional-test"));
        assert!(!kinds(&artifacts).contains(&"environments"));
    }

    #[test]
    fn test_module_requires_generics() {
        let ir = IrBuilder::new("acme").build();
        let config = GeneratorConfig::default().with_module("github.com/acme/sdk");
        assert_eq!(
            place_module(&config, &ir),
            Some(ModulePlacement {
                filename: "go.mod".into(),
                path: "github.com/acme/sdk".into(),
                version: None,
                requires_generics: false,
            })
        );

        let config = config.with_explicit_null(true);
        assert!(place_module(&config, &ir).is_some_and(|m| m.requires_generics));
        assert_eq!(place_module(&GeneratorConfig::default(), &ir), None);
    }
}
