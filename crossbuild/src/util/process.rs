use crate::util::tools_env::BuildEnvironment;
use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;
use std::process::Command;

/// One external command: program, arguments, environment, working directory.
#[derive(Clone, Debug)]
pub struct Invocation {
    pub program: OsString,
    pub args: Vec<OsString>,
    pub env: BuildEnvironment,
    pub cwd: PathBuf,
}

impl Invocation {
    pub fn new(program: impl Into<OsString>, env: BuildEnvironment, cwd: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env,
            cwd: cwd.into(),
        }
    }

    #[must_use]
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Value following `flag` in the argument list, if any.
    pub fn flag_value(&self, flag: &str) -> Option<&OsString> {
        self.args
            .iter()
            .position(|a| a == flag)
            .and_then(|i| self.args.get(i + 1))
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.to_string_lossy())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// Runs external commands to completion.
///
/// Implementations report only success or failure; retry policy, if any,
/// belongs to the caller.
pub trait CommandRunner {
    fn run(&mut self, invocation: &Invocation) -> bool;
}

/// Spawns real processes with inherited stdio so build output streams live.
#[derive(Debug, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&mut self, invocation: &Invocation) -> bool {
        eprintln!("\n>>> Running: {invocation}");
        tracing::debug!(
            cwd = %invocation.cwd.display(),
            vars = invocation.env.len(),
            "spawning"
        );

        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args).current_dir(&invocation.cwd);
        invocation.env.apply_to_command(&mut cmd);

        match cmd.status() {
            Ok(status) if status.success() => true,
            Ok(status) => {
                eprintln!(
                    "[FAIL] {} exited with {status}",
                    invocation.program.to_string_lossy()
                );
                false
            }
            Err(e) => {
                eprintln!(
                    "[FAIL] could not spawn {} in {}: {e}",
                    invocation.program.to_string_lossy(),
                    invocation.cwd.display()
                );
                false
            }
        }
    }
}
