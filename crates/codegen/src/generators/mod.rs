pub mod factory;
pub mod resource;

pub use factory::FactoryGenerator;
pub use resource::ResourceGenerator;

use crate::collision::{CollisionPolicy, DecisionProvider, Resolution};
use crate::report::{FileAction, GenerationReport};
use crate::templates::ArtifactKind;
use crate::writer::Filesystem;
use blueprint_core::{CoreResult, SchemaTree};
use std::path::PathBuf;

/// Produces every artifact of one kind from a schema tree
pub trait Generator {
    fn kind(&self) -> ArtifactKind;

    fn output(&self, tree: &SchemaTree, stub: &str, run: &mut GenerationRun<'_>) -> CoreResult<()>;
}

/// State shared by all generators of one run: the collision policy, the
/// decision source and the accumulated report.
pub struct GenerationRun<'a> {
    fs: &'a dyn Filesystem,
    decisions: &'a mut dyn DecisionProvider,
    policy: CollisionPolicy,
    report: GenerationReport,
}

impl<'a> GenerationRun<'a> {
    pub fn new(
        fs: &'a dyn Filesystem,
        decisions: &'a mut dyn DecisionProvider,
        policy: CollisionPolicy,
    ) -> Self {
        Self {
            fs,
            decisions,
            policy,
            report: GenerationReport::new(),
        }
    }

    /// Gate `path` through the collision policy and write the rendered text.
    ///
    /// `render` runs only when the file is going to be written. A resolution
    /// error from it is recorded against `subject` and the run goes on; any
    /// other error, and every write failure, aborts the run.
    pub fn emit<F>(&mut self, subject: &str, path: PathBuf, render: F) -> CoreResult<()>
    where
        F: FnOnce() -> CoreResult<String>,
    {
        let exists = self.fs.exists(&path);

        if self.policy.resolve(&path, exists, &mut *self.decisions) == Resolution::Skip {
            tracing::info!(path = %path.display(), "Skipped existing file");
            self.report.record(path, FileAction::Skipped);
            return Ok(());
        }

        let content = match render() {
            Ok(content) => content,
            Err(error) if error.is_resolution() => {
                tracing::warn!(subject, error = %error, "Statement could not be generated");
                self.report.record_failure(subject, path, error);
                return Ok(());
            }
            Err(error) => return Err(error),
        };

        self.fs.write(&path, &content)?;
        tracing::info!(path = %path.display(), overwritten = exists, "Wrote file");
        self.report.record(path, FileAction::Written);

        Ok(())
    }

    pub fn policy(&self) -> &CollisionPolicy {
        &self.policy
    }

    pub fn report(&self) -> &GenerationReport {
        &self.report
    }

    pub fn finish(self) -> GenerationReport {
        self.report
    }
}
