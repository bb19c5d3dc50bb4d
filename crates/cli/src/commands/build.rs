use super::print_report;
use crate::interactive::TerminalDecisions;
use blueprint_codegen::{
    ArtifactKind, CodeGenerator, CollisionState, DecisionProvider, GenerationOptions,
    GenerationReport, LocalFilesystem, StubSet,
};
use blueprint_core::{ConfigTrait, CoreError, GeneratorConfig, SchemaTree};
use clap::Args;
use std::path::PathBuf;

/// Build command arguments
#[derive(Args, Debug, Clone)]
pub struct BuildArgs {
    /// Schema tree to generate from (YAML)
    pub tree: PathBuf,

    /// Project root that output paths are relative to
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Configuration file (defaults to blueprint.yaml under the root)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory with resource.stub / factory.stub overrides
    #[arg(long)]
    pub stubs: Option<PathBuf>,

    /// Root namespace of the generated classes
    #[arg(long)]
    pub namespace: Option<String>,

    /// Wrap attribute access in whenNotNull()
    #[arg(long)]
    pub when_not_null: bool,

    /// Overwrite existing files without asking
    #[arg(long, conflicts_with = "skip_existing")]
    pub force: bool,

    /// Keep existing files without asking
    #[arg(long)]
    pub skip_existing: bool,

    /// Only generate these kinds (resource, factory)
    #[arg(long, value_delimiter = ',')]
    pub only: Vec<ArtifactKind>,

    /// Do not generate these kinds
    #[arg(long, value_delimiter = ',')]
    pub skip: Vec<ArtifactKind>,
}

impl BuildArgs {
    fn initial_state(&self) -> CollisionState {
        if self.force {
            CollisionState::AlwaysOverwrite
        } else if self.skip_existing {
            CollisionState::AlwaysSkip
        } else {
            CollisionState::Normal
        }
    }

    /// Layer the command line flags over the loaded configuration
    fn resolve_config(&self, root: &std::path::Path) -> Result<GeneratorConfig, CoreError> {
        let mut config = GeneratorConfig::load(root, self.config.as_deref())?;

        if let Some(namespace) = &self.namespace {
            config = config.with_namespace(namespace.clone());
        }
        if self.when_not_null {
            config = config.with_when_not_null(true);
        }
        if let Some(stubs) = &self.stubs {
            config = config.with_stubs_path(stubs.clone());
        }

        config.validate()?;
        Ok(config)
    }
}

pub fn run(args: BuildArgs) -> Result<(), CoreError> {
    let mut decisions = TerminalDecisions::new();
    let report = generate(&args, &mut decisions)?;

    print_report(&report);

    if report.has_failures() {
        return Err(CoreError::codegen(format!(
            "{} statement(s) could not be generated",
            report.failures().len()
        )));
    }

    Ok(())
}

pub fn generate(
    args: &BuildArgs,
    decisions: &mut dyn DecisionProvider,
) -> Result<GenerationReport, CoreError> {
    let root = match &args.root {
        Some(root) => root.clone(),
        None => std::env::current_dir()?,
    };

    let config = args.resolve_config(&root)?;
    tracing::debug!(root = %root.display(), namespace = %config.namespace, "Configuration resolved");

    let tree = SchemaTree::from_yaml(&std::fs::read_to_string(&args.tree)?)?;
    let fs = LocalFilesystem::new(&root);

    let stubs = match &config.stubs_path {
        Some(dir) => StubSet::load(&fs, dir)?,
        None => StubSet::defaults(),
    };

    let options = GenerationOptions {
        only: args.only.clone(),
        skip: args.skip.clone(),
    };

    CodeGenerator::new(config)
        .with_options(options)
        .with_initial_state(args.initial_state())
        .generate(&tree, &stubs, &fs, decisions)
}
