pub mod builders;
pub mod collision;
pub mod generators;
pub mod report;
pub mod templates;
pub mod writer;

pub use blueprint_core::naming;
pub use collision::*;
pub use generators::{FactoryGenerator, GenerationRun, Generator, ResourceGenerator};
pub use report::*;
pub use templates::{render_stub, ArtifactKind, StubSet};
pub use writer::*;

use blueprint_core::{CoreResult, GeneratorConfig, SchemaTree};

/// Restricts which artifact kinds a run produces; empty `only` means all
#[derive(Debug, Clone, Default)]
pub struct GenerationOptions {
    pub only: Vec<ArtifactKind>,
    pub skip: Vec<ArtifactKind>,
}

impl GenerationOptions {
    pub fn includes(&self, kind: ArtifactKind) -> bool {
        (self.only.is_empty() || self.only.contains(&kind)) && !self.skip.contains(&kind)
    }
}

/// Drives one generation run over a schema tree.
///
/// Every call to [`CodeGenerator::generate`] starts a fresh collision policy
/// in the configured initial state; "all" / "not all" answers given during a
/// run apply to every remaining artifact of that run, across kinds.
pub struct CodeGenerator {
    config: GeneratorConfig,
    options: GenerationOptions,
    initial_state: CollisionState,
}

impl CodeGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
            options: GenerationOptions::default(),
            initial_state: CollisionState::Normal,
        }
    }

    pub fn with_options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }

    /// `AlwaysOverwrite` for forced runs, `AlwaysSkip` to keep existing files
    pub fn with_initial_state(mut self, state: CollisionState) -> Self {
        self.initial_state = state;
        self
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn generate(
        &self,
        tree: &SchemaTree,
        stubs: &StubSet,
        fs: &dyn Filesystem,
        decisions: &mut dyn DecisionProvider,
    ) -> CoreResult<GenerationReport> {
        let generators: [Box<dyn Generator + '_>; 2] = [
            Box::new(ResourceGenerator::new(&self.config)),
            Box::new(FactoryGenerator::new(&self.config)),
        ];

        let mut run = GenerationRun::new(fs, decisions, CollisionPolicy::with_state(self.initial_state));

        for generator in generators.iter().filter(|g| self.options.includes(g.kind())) {
            tracing::debug!(kind = %generator.kind(), "Running generator");
            generator.output(tree, stubs.get(generator.kind()), &mut run)?;
        }

        let report = run.finish();
        tracing::info!(
            written = report.written().count(),
            skipped = report.skipped().count(),
            failed = report.failures().len(),
            "Generation finished"
        );

        Ok(report)
    }
}
