use super::stage;
use super::summary::{BuildOutcome, RunSummary, TargetResult};
use crate::config::Config;
use crate::error::{BuildFailure, FatalError};
use crate::targets::{self, Target, TargetDescriptor};
use crate::tasks::tooling::{doctor, toolchains};
use crate::util::process::{CommandRunner, Invocation};
use crate::util::tools_env::{self, BuildEnvironment};
use clap::ValueEnum;
use std::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Action {
    /// Type-check one target without producing a binary.
    Check,
    /// Release build of one target, then stage it.
    Build,
    /// Release build of every target, staging each one that succeeds.
    #[default]
    #[value(name = "build-all")]
    BuildAll,
}

impl Action {
    /// Targets this action touches, in registry order.
    pub fn targets(self, selected: Target) -> Vec<&'static TargetDescriptor> {
        match self {
            Self::Check | Self::Build => vec![selected.descriptor()],
            Self::BuildAll => targets::all().collect(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    PrereqCheck,
    EnsureToolchains,
    Checking,
    Building,
    Staging,
    Summarized,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Idle => "idle",
            Self::PrereqCheck => "prereq-check",
            Self::EnsureToolchains => "ensure-toolchains",
            Self::Checking => "checking",
            Self::Building => "building",
            Self::Staging => "staging",
            Self::Summarized => "summarized",
        })
    }
}

/// State for one orchestrated run.
///
/// Holds the resolved config, the host environment snapshot every child
/// environment is derived from, and the runner that executes children.
pub struct Session<R> {
    pub(crate) config: Config,
    pub(crate) host: BuildEnvironment,
    pub(crate) runner: R,
    phase: Phase,
}

impl<R: CommandRunner> Session<R> {
    pub fn new(config: Config, host: BuildEnvironment, runner: R) -> Self {
        Self {
            config,
            host,
            runner,
            phase: Phase::Idle,
        }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub(crate) fn enter(&mut self, phase: Phase) {
        tracing::debug!(from = %self.phase, to = %phase, "phase");
        self.phase = phase;
    }

    /// Run `action`; `selected` applies to `check` and `build`.
    ///
    /// Missing tools and toolchain install failures abort with a
    /// [`FatalError`]. Per-target failures land in the returned summary.
    pub fn run(&mut self, action: Action, selected: Target) -> Result<RunSummary, FatalError> {
        let wanted = action.targets(selected);

        self.enter(Phase::PrereqCheck);
        doctor::check_prerequisites(&self.config, self.host.search_path())?;

        self.enter(Phase::EnsureToolchains);
        toolchains::ensure_installed(&self.config, &self.host, &mut self.runner, &wanted)?;

        let summary = match action {
            Action::Check => super::check::run(self, selected.descriptor()),
            Action::Build => super::build::run(self, selected.descriptor()),
            Action::BuildAll => super::build_all::run(self, &wanted),
        };

        self.enter(Phase::Summarized);
        Ok(summary)
    }
}

/// Derive the target's environment and run
/// `cargo <subcommand> --target <triple> -j <jobs> --target-dir <root>`.
///
/// The output root is always passed explicitly so cargo writes where the
/// stager reads, whatever `CARGO_TARGET_DIR` the host carries.
pub(crate) fn run_cargo<R: CommandRunner>(
    session: &mut Session<R>,
    t: &'static TargetDescriptor,
    subcommand: &[&str],
) -> Result<(), BuildFailure> {
    let cfg = &session.config;
    let alt_bin = cfg.alt_toolchain_bin();
    let env = tools_env::derive_environment(t, &session.host, &alt_bin, cfg.jobs).map_err(
        |source| BuildFailure::SearchPath {
            target: t.name,
            path: alt_bin.clone(),
            source,
        },
    )?;

    let cargo = Invocation::new(&cfg.cargo, env, &cfg.project_dir)
        .args(subcommand.iter().copied())
        .args(["--target", t.triple, "-j"])
        .arg(cfg.jobs.to_string())
        .arg("--target-dir")
        .arg(cfg.cargo_target_dir());

    if session.runner.run(&cargo) {
        Ok(())
    } else {
        Err(BuildFailure::Exited {
            target: t.name,
            triple: t.triple,
        })
    }
}

/// Release-build one target and, if cargo succeeded, stage its executable.
pub(crate) fn build_and_stage<R: CommandRunner>(
    session: &mut Session<R>,
    t: &'static TargetDescriptor,
) -> BuildOutcome {
    session.enter(Phase::Building);
    eprintln!(
        "\n[step] Build {} ({}) using {} parallel jobs",
        t.name, t.triple, session.config.jobs
    );

    if let Err(e) = run_cargo(session, t, &["build", "--release"]) {
        eprintln!("[FAIL] {e}");
        return BuildOutcome::new(t, TargetResult::BuildFailed(e));
    }

    session.enter(Phase::Staging);
    match stage::stage(&session.config, t) {
        Ok(artifact) => {
            eprintln!("[ok] {}: {}", t.name, artifact.path.display());
            BuildOutcome::new(t, TargetResult::Staged(artifact))
        }
        Err(e) => {
            eprintln!("[FAIL] {e}");
            BuildOutcome::new(t, TargetResult::StageFailed(e))
        }
    }
}
