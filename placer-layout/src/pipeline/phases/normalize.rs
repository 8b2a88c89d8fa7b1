//! Normalize phase - demotes nested root subpackages.

use eyre::Result;

use crate::{
    NormalizedTree,
    pipeline::{CompilationContext, Diagnostic, Phase},
};

pub struct NormalizePhase;

impl Phase for NormalizePhase {
    fn name(&self) -> &'static str {
        "normalize"
    }

    fn description(&self) -> &'static str {
        "Demote subpackages that are both a file and a directory"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        let tree = NormalizedTree::build(ctx.current_ir())?;

        let demoted: Vec<Diagnostic> = tree
            .demoted()
            .map(|(id, subpackage)| {
                Diagnostic::info(
                    self.name(),
                    format!(
                        "demoted into its own package '{}/'",
                        subpackage.path().package_dirs().join("/")
                    ),
                )
                .at(id)
            })
            .collect();
        ctx.diagnostics.extend(demoted);

        ctx.subpackages = Some(tree);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use placer_ir::testing::{IrBuilder, path};
    use placer_manifest::GeneratorConfig;

    use super::*;

    #[test]
    fn test_demotion_is_reported() {
        let ir = IrBuilder::new("acme")
            .subpackage(
                "subpackage_config",
                path(&[], Some("config")),
                None,
                &["subpackage_flags"],
            )
            .subpackage("subpackage_flags", path(&["config"], Some("flags")), None, &[])
            .build();
        let mut ctx = CompilationContext::new(GeneratorConfig::default(), ir);
        NormalizePhase.run(&mut ctx).unwrap();

        assert_eq!(ctx.diagnostics.len(), 1);
        assert_eq!(
            ctx.diagnostics[0].to_string(),
            "info[normalize]: demoted into its own package 'config/' (at subpackage_config)"
        );
        assert!(ctx.subpackages.is_some());
    }
}
