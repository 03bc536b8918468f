use super::common::{self, Action, Phase, Session};
use super::summary::{BuildOutcome, RunSummary, TargetResult};
use crate::targets::TargetDescriptor;
use crate::util::process::CommandRunner;

pub fn run<R: CommandRunner>(session: &mut Session<R>, t: &'static TargetDescriptor) -> RunSummary {
    session.enter(Phase::Checking);
    eprintln!("\n[step] Check {} ({})", t.name, t.triple);

    let result = match common::run_cargo(session, t, &["check"]) {
        Ok(()) => {
            eprintln!("[ok] {} check passed!", t.name);
            TargetResult::Checked
        }
        Err(e) => {
            eprintln!("[FAIL] {e}");
            TargetResult::BuildFailed(e)
        }
    };

    RunSummary::new(Action::Check, vec![BuildOutcome::new(t, result)])
}
