use super::common::{self, Action, Session};
use super::summary::RunSummary;
use crate::targets::TargetDescriptor;
use crate::util::process::CommandRunner;

pub fn run<R: CommandRunner>(session: &mut Session<R>, t: &'static TargetDescriptor) -> RunSummary {
    let outcome = common::build_and_stage(session, t);
    RunSummary::new(Action::Build, vec![outcome])
}
