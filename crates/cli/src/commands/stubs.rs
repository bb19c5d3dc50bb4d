use super::print_report;
use blueprint_codegen::{
    ArtifactKind, CollisionPolicy, CollisionState, GenerationReport, GenerationRun, LocalFilesystem,
    ScriptedDecisions,
};
use blueprint_core::CoreError;
use clap::Args;
use std::path::PathBuf;

/// Stub publishing arguments
#[derive(Args, Debug, Clone)]
pub struct StubsArgs {
    /// Directory to publish the stubs into
    #[arg(long, default_value = "stubs")]
    pub dir: PathBuf,

    /// Replace stubs that were already published
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: StubsArgs) -> Result<(), CoreError> {
    let fs = LocalFilesystem::new(std::env::current_dir()?);
    let report = publish(&fs, &args)?;
    print_report(&report);
    Ok(())
}

/// Write the built-in stub of every artifact kind to `args.dir`
pub fn publish(fs: &LocalFilesystem, args: &StubsArgs) -> Result<GenerationReport, CoreError> {
    let state = if args.force {
        CollisionState::AlwaysOverwrite
    } else {
        CollisionState::AlwaysSkip
    };

    let mut decisions = ScriptedDecisions::default();
    let mut run = GenerationRun::new(fs, &mut decisions, CollisionPolicy::with_state(state));

    for kind in ArtifactKind::ALL {
        let path = args.dir.join(kind.stub_file());
        run.emit(&format!("{} stub", kind), path, || Ok(kind.default_stub().to_string()))?;
    }

    Ok(run.finish())
}
