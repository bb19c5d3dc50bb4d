//! Decides what happens when a generation target already exists.
//!
//! The policy itself never touches a terminal: when it needs an answer it
//! asks an injected [`DecisionProvider`], so tests and non-interactive runs
//! can script the answers.

use std::collections::VecDeque;
use std::fmt;
use std::path::Path;

/// Session-wide answer state of one generation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollisionState {
    /// Ask for every existing file
    #[default]
    Normal,
    AlwaysOverwrite,
    AlwaysSkip,
}

/// One answer from the operator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Yes,
    No,
    All,
    NotAll,
    /// Anything else; handled like `No`
    Unrecognized(String),
}

impl Decision {
    /// Map typed input (`y`, `n`, `a`, `na` and their long forms) to a decision
    pub fn parse(input: &str) -> Self {
        match input.trim().to_lowercase().as_str() {
            "y" | "yes" => Decision::Yes,
            "n" | "no" => Decision::No,
            "a" | "all" => Decision::All,
            "na" | "not-all" | "not all" | "not_all" => Decision::NotAll,
            _ => Decision::Unrecognized(input.trim().to_string()),
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Yes => f.write_str("yes"),
            Decision::No => f.write_str("no"),
            Decision::All => f.write_str("all"),
            Decision::NotAll => f.write_str("not-all"),
            Decision::Unrecognized(raw) => write!(f, "unrecognized '{}'", raw),
        }
    }
}

/// Source of operator decisions for existing files
pub trait DecisionProvider {
    fn decide(&mut self, path: &Path) -> Decision;
}

impl<F> DecisionProvider for F
where
    F: FnMut(&Path) -> Decision,
{
    fn decide(&mut self, path: &Path) -> Decision {
        self(path)
    }
}

/// Replays a fixed sequence of answers; once exhausted every further
/// question is answered with an unrecognised token.
#[derive(Debug, Default)]
pub struct ScriptedDecisions {
    answers: VecDeque<Decision>,
    asked: Vec<std::path::PathBuf>,
}

impl ScriptedDecisions {
    pub fn new(answers: impl IntoIterator<Item = Decision>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            asked: Vec::new(),
        }
    }

    /// Build from raw tokens such as `["y", "a", "whatever"]`
    pub fn from_tokens<'a>(tokens: impl IntoIterator<Item = &'a str>) -> Self {
        Self::new(tokens.into_iter().map(Decision::parse))
    }

    /// Paths the policy asked about, in order
    pub fn asked(&self) -> &[std::path::PathBuf] {
        &self.asked
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl DecisionProvider for ScriptedDecisions {
    fn decide(&mut self, path: &Path) -> Decision {
        self.asked.push(path.to_path_buf());
        self.answers
            .pop_front()
            .unwrap_or_else(|| Decision::Unrecognized(String::new()))
    }
}

/// What to do with one candidate path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Write,
    Skip,
}

#[derive(Debug, Clone, Default)]
pub struct CollisionPolicy {
    state: CollisionState,
}

impl CollisionPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a run in a given state, e.g. `AlwaysOverwrite` for `--force`
    pub fn with_state(state: CollisionState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> CollisionState {
        self.state
    }

    /// Decide for `path`, asking `decisions` only when the file exists and
    /// no "always" answer has been given yet in this run.
    pub fn resolve(
        &mut self,
        path: &Path,
        exists: bool,
        decisions: &mut dyn DecisionProvider,
    ) -> Resolution {
        if !exists {
            return Resolution::Write;
        }

        match self.state {
            CollisionState::AlwaysOverwrite => Resolution::Write,
            CollisionState::AlwaysSkip => Resolution::Skip,
            CollisionState::Normal => {
                let decision = decisions.decide(path);
                tracing::debug!(path = %path.display(), %decision, "Collision decision");

                match decision {
                    Decision::Yes => Resolution::Write,
                    Decision::No => Resolution::Skip,
                    Decision::All => {
                        self.state = CollisionState::AlwaysOverwrite;
                        Resolution::Write
                    }
                    Decision::NotAll => {
                        self.state = CollisionState::AlwaysSkip;
                        Resolution::Skip
                    }
                    Decision::Unrecognized(raw) => {
                        tracing::warn!(
                            path = %path.display(),
                            input = %raw,
                            "Unrecognized answer, skipping"
                        );
                        Resolution::Skip
                    }
                }
            }
        }
    }
}
