use crate::config::Config;
use crate::error::ToolchainInstallError;
use crate::targets::TargetDescriptor;
use crate::util::process::{CommandRunner, Invocation};
use crate::util::tools_env::BuildEnvironment;

/// `rustup target add` for every target, stopping at the first failure.
pub fn ensure_installed<R: CommandRunner>(
    config: &Config,
    host: &BuildEnvironment,
    runner: &mut R,
    targets: &[&'static TargetDescriptor],
) -> Result<(), ToolchainInstallError> {
    eprintln!("\n[info] Ensuring Rust targets are installed...");

    for t in targets {
        let add = Invocation::new(&config.rustup, host.clone(), &config.project_dir)
            .args(["target", "add", t.triple]);
        if !runner.run(&add) {
            return Err(ToolchainInstallError { triple: t.triple });
        }
        tracing::debug!(triple = t.triple, "rust target present");
    }
    Ok(())
}
