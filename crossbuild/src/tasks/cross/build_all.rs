use super::common::{self, Action, Session};
use super::summary::RunSummary;
use crate::targets::TargetDescriptor;
use crate::util::process::CommandRunner;

/// Build every target in order. A failed target is recorded and the next one
/// is still attempted.
pub fn run<R: CommandRunner>(
    session: &mut Session<R>,
    targets: &[&'static TargetDescriptor],
) -> RunSummary {
    eprintln!("[info] Targets:");
    for t in targets {
        eprintln!("  {}: {}", t.name, t.triple);
    }

    let outcomes = targets
        .iter()
        .map(|&t| common::build_and_stage(session, t))
        .collect();

    RunSummary::new(Action::BuildAll, outcomes)
}
