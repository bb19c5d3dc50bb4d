use blueprint_core::CoreError;
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileAction {
    Written,
    Skipped,
}

impl fmt::Display for FileAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileAction::Written => f.pad("written"),
            FileAction::Skipped => f.pad("skipped"),
        }
    }
}

/// A statement or model whose artifact could not be produced
#[derive(Debug)]
pub struct GenerationFailure {
    /// What was being generated, e.g. `resource PostResource`
    pub subject: String,
    pub path: PathBuf,
    pub error: CoreError,
}

/// Outcome of one generation run, in processing order
#[derive(Debug, Default)]
pub struct GenerationReport {
    entries: Vec<(PathBuf, FileAction)>,
    failures: Vec<GenerationFailure>,
}

impl GenerationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, path: impl Into<PathBuf>, action: FileAction) {
        self.entries.push((path.into(), action));
    }

    pub fn record_failure(&mut self, subject: impl Into<String>, path: impl Into<PathBuf>, error: CoreError) {
        self.failures.push(GenerationFailure {
            subject: subject.into(),
            path: path.into(),
            error,
        });
    }

    pub fn entries(&self) -> &[(PathBuf, FileAction)] {
        &self.entries
    }

    pub fn failures(&self) -> &[GenerationFailure] {
        &self.failures
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    pub fn written(&self) -> impl Iterator<Item = &Path> {
        self.with_action(FileAction::Written)
    }

    pub fn skipped(&self) -> impl Iterator<Item = &Path> {
        self.with_action(FileAction::Skipped)
    }

    /// Action recorded for `path`, if it was processed
    pub fn action_for(&self, path: &Path) -> Option<FileAction> {
        self.entries
            .iter()
            .find(|(entry, _)| entry == path)
            .map(|(_, action)| *action)
    }

    fn with_action(&self, action: FileAction) -> impl Iterator<Item = &Path> {
        self.entries
            .iter()
            .filter(move |(_, recorded)| *recorded == action)
            .map(|(path, _)| path.as_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_keeps_order_and_failures() {
        let mut report = GenerationReport::new();
        report.record("a.php", FileAction::Written);
        report.record("b.php", FileAction::Skipped);
        report.record("c.php", FileAction::Written);

        let written: Vec<_> = report.written().collect();
        assert_eq!(written, [Path::new("a.php"), Path::new("c.php")]);
        assert_eq!(report.action_for(Path::new("b.php")), Some(FileAction::Skipped));
        assert!(!report.has_failures());

        report.record_failure("resource VideoResource", "d.php", CoreError::resolution("Video", "resource VideoResource"));
        assert!(report.has_failures());
        assert_eq!(report.failures()[0].subject, "resource VideoResource");
    }

    #[test]
    fn test_action_display_honours_width() {
        assert_eq!(format!("{:>8}", FileAction::Written), " written");
        assert_eq!(format!("{:<8}|", FileAction::Skipped), "skipped |");
    }
}
