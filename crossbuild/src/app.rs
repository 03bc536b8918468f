use crate::cli::Cli;
use crate::config::Config;
use crate::tasks::cross::Session;
use crate::util::host;
use crate::util::logging;
use crate::util::process::{CommandRunner, SystemRunner};
use crate::util::tools_env::BuildEnvironment;
use anyhow::{bail, Context, Result};
use std::io::{self, Write};

const RULE: &str = "============================================================";

pub fn run(cli: &Cli) -> Result<()> {
    logging::init(cli.verbose);
    execute(cli, BuildEnvironment::capture(), SystemRunner, &mut io::stdout().lock())
}

/// Resolve config, run the requested action, and print the summary to `out`.
///
/// Returns an error when the run aborts or any target fails.
pub fn execute<R: CommandRunner>(
    cli: &Cli,
    host: BuildEnvironment,
    runner: R,
    out: &mut dyn Write,
) -> Result<()> {
    let config = Config::resolve(cli.overrides())?;
    write_banner(out, &config)?;
    tracing::info!(
        action = ?cli.action,
        arch = ?cli.target,
        project = %config.project_dir.display(),
        "starting"
    );

    let mut session = Session::new(config, host, runner);
    let summary = session
        .run(cli.action, cli.target)
        .context("Cross build aborted")?;

    summary.render(out)?;

    let failed: Vec<&str> = summary.failed().map(|o| o.target.name).collect();
    if !failed.is_empty() {
        bail!(
            "{} of {} target(s) failed: {}",
            failed.len(),
            summary.len(),
            failed.join(", ")
        );
    }

    writeln!(out, "\nDone!")?;
    Ok(())
}

fn write_banner(out: &mut dyn Write, config: &Config) -> io::Result<()> {
    writeln!(out, "\n{RULE}")?;
    writeln!(out, "{} Cross-Compilation Build", config.app_name)?;
    writeln!(out, "{RULE}")?;
    writeln!(out, "  CPU cores: {}", host::cpu_count())?;
    if let Some(gib) = host::total_memory_gib() {
        writeln!(out, "  Total RAM: {gib:.1} GB")?;
    }
    writeln!(out, "  Parallel jobs: {}", config.jobs)?;
    writeln!(out, "  Output directory: {}", config.output_dir.display())?;
    Ok(())
}
