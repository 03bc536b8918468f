use super::common::Action;
use super::stage::StagedArtifact;
use crate::error::{BuildFailure, StagingError};
use crate::targets::TargetDescriptor;
use std::io::{self, Write};

const RULE: &str = "============================================================";

#[derive(Debug)]
pub enum TargetResult {
    /// `cargo check` passed; nothing is staged.
    Checked,
    Staged(StagedArtifact),
    BuildFailed(BuildFailure),
    /// Cargo reported success but the executable could not be staged.
    StageFailed(StagingError),
}

/// What happened to one target during a run.
#[derive(Debug)]
pub struct BuildOutcome {
    pub target: &'static TargetDescriptor,
    pub result: TargetResult,
}

impl BuildOutcome {
    pub fn new(target: &'static TargetDescriptor, result: TargetResult) -> Self {
        Self { target, result }
    }

    pub fn succeeded(&self) -> bool {
        matches!(self.result, TargetResult::Checked | TargetResult::Staged(_))
    }

    /// Whether cargo itself exited successfully, regardless of staging.
    pub fn build_succeeded(&self) -> bool {
        !matches!(self.result, TargetResult::BuildFailed(_))
    }

    pub fn artifact(&self) -> Option<&StagedArtifact> {
        match &self.result {
            TargetResult::Staged(a) => Some(a),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct RunSummary {
    action: Action,
    outcomes: Vec<BuildOutcome>,
}

impl RunSummary {
    pub fn new(action: Action, outcomes: Vec<BuildOutcome>) -> Self {
        Self { action, outcomes }
    }

    pub fn outcomes(&self) -> &[BuildOutcome] {
        &self.outcomes
    }

    pub fn outcome(&self, name: &str) -> Option<&BuildOutcome> {
        self.outcomes.iter().find(|o| o.target.name == name)
    }

    pub fn all_succeeded(&self) -> bool {
        self.outcomes.iter().all(BuildOutcome::succeeded)
    }

    pub fn failed(&self) -> impl Iterator<Item = &BuildOutcome> {
        self.outcomes.iter().filter(|o| !o.succeeded())
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn render(&self, w: &mut dyn Write) -> io::Result<()> {
        let title = match self.action {
            Action::Check => "Check Summary",
            Action::Build | Action::BuildAll => "Build Summary",
        };
        writeln!(w, "\n{RULE}")?;
        writeln!(w, "{title}")?;
        writeln!(w, "{RULE}")?;

        for o in &self.outcomes {
            let name = o.target.name;
            match &o.result {
                TargetResult::Checked => writeln!(w, "  {name}: check passed")?,
                TargetResult::Staged(a) => writeln!(
                    w,
                    "  {name}: {} ({:.2} MB)",
                    a.path.display(),
                    a.size_mib()
                )?,
                TargetResult::BuildFailed(e) => writeln!(w, "  {name}: FAILED to build ({e})")?,
                TargetResult::StageFailed(e) => writeln!(w, "  {name}: FAILED to stage ({e})")?,
            }
        }
        Ok(())
    }
}
