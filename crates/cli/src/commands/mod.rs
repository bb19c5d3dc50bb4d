pub mod build;
pub mod config;
pub mod stubs;

use blueprint_codegen::{FileAction, GenerationReport};
use console::style;

/// Print one line per processed file, then the failed statements
pub fn print_report(report: &GenerationReport) {
    for (path, action) in report.entries() {
        let label = match action {
            FileAction::Written => style(format!("{:>8}", action)).green(),
            FileAction::Skipped => style(format!("{:>8}", action)).dim(),
        };
        println!("{} {}", label, path.display());
    }

    for failure in report.failures() {
        println!(
            "{} {} ({})",
            style(format!("{:>8}", "failed")).red().bold(),
            failure.path.display(),
            failure.error
        );
    }

    if report.entries().is_empty() && !report.has_failures() {
        println!("{}", style("Nothing to generate.").dim());
    }
}
