use blueprint_codegen::{Decision, DecisionProvider};
use console::style;
use inquire::Text;
use std::path::Path;

pub fn overwrite_prompt(path: &Path) -> String {
    format!(
        "The file at '{}' already exists. Overwrite? (y = yes, n = no, a = all, na = not all)",
        path.display()
    )
}

/// Asks on the terminal whether an existing file may be overwritten
#[derive(Debug, Default)]
pub struct TerminalDecisions;

impl TerminalDecisions {
    pub fn new() -> Self {
        Self
    }

    fn announce(decision: &Decision, path: &Path) {
        let path = path.display();
        match decision {
            Decision::Yes => println!("{} '{}'...", style("Overwriting").yellow(), path),
            Decision::No => println!("{} '{}'...", style("Skipping").dim(), path),
            Decision::All => println!("{}", style("Overwriting all files from now on...").yellow()),
            Decision::NotAll => println!("{}", style("Skipping all files from now on...").dim()),
            Decision::Unrecognized(_) => {
                println!("{} Skipping '{}'...", style("Invalid input.").red(), path)
            }
        }
    }
}

impl DecisionProvider for TerminalDecisions {
    fn decide(&mut self, path: &Path) -> Decision {
        let decision = match Text::new(&overwrite_prompt(path)).prompt() {
            Ok(input) => Decision::parse(&input),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Could not read an answer");
                Decision::Unrecognized(String::new())
            }
        };

        Self::announce(&decision, path);
        decision
    }
}
