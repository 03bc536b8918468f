use crate::targets::TargetDescriptor;
use std::collections::BTreeMap;
use std::env::{self, JoinPathsError};
use std::ffi::{OsStr, OsString};
use std::path::Path;
use std::process::Command;

pub const PATH_VAR: &str = "PATH";
pub const JOBS_VAR: &str = "CARGO_BUILD_JOBS";
pub const STATIC_CRT_FLAGS: &str = "-C target-feature=+crt-static";

/// Full environment for one child process.
///
/// Built from a snapshot of the host environment; applying it to a
/// [`Command`] replaces the child's environment and never touches our own.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BuildEnvironment {
    vars: BTreeMap<OsString, OsString>,
}

impl BuildEnvironment {
    /// Snapshot of the current process environment.
    pub fn capture() -> Self {
        Self::from_host(env::vars_os())
    }

    pub fn from_host<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<OsString>,
        V: Into<OsString>,
    {
        Self {
            vars: vars
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn get(&self, key: impl AsRef<OsStr>) -> Option<&OsStr> {
        self.vars.get(key.as_ref()).map(OsString::as_os_str)
    }

    pub fn set(&mut self, key: impl Into<OsString>, value: impl Into<OsString>) {
        self.vars.insert(key.into(), value.into());
    }

    pub fn search_path(&self) -> Option<&OsStr> {
        self.get(PATH_VAR)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&OsStr, &OsStr)> {
        self.vars.iter().map(|(k, v)| (k.as_os_str(), v.as_os_str()))
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn apply_to_command(&self, cmd: &mut Command) {
        cmd.env_clear().envs(&self.vars);
    }
}

/// Triple with separators folded into `_`, e.g. `x86_64_pc_windows_gnu`.
pub fn env_key(triple: &str) -> String {
    triple
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

pub fn cc_var(triple: &str) -> String {
    format!("CC_{}", env_key(triple))
}

pub fn ar_var(triple: &str) -> String {
    format!("AR_{}", env_key(triple))
}

pub fn linker_var(triple: &str) -> String {
    format!("CARGO_TARGET_{}_LINKER", env_key(triple).to_uppercase())
}

pub fn rustflags_var(triple: &str) -> String {
    format!("CARGO_TARGET_{}_RUSTFLAGS", env_key(triple).to_uppercase())
}

/// Layers the per-target toolchain bindings on top of `host`.
///
/// Only fails when `alt_toolchain_bin` cannot be joined into PATH (it contains
/// the platform's path separator).
pub fn derive_environment(
    target: &TargetDescriptor,
    host: &BuildEnvironment,
    alt_toolchain_bin: &Path,
    jobs: usize,
) -> Result<BuildEnvironment, JoinPathsError> {
    let mut out = host.clone();

    if target.requires_alt_toolchain_root {
        let mut paths = vec![alt_toolchain_bin.to_path_buf()];
        if let Some(existing) = host.search_path() {
            paths.extend(env::split_paths(existing));
        }
        out.set(PATH_VAR, env::join_paths(paths)?);
    }

    out.set(cc_var(target.triple), target.compiler);
    out.set(ar_var(target.triple), target.archiver);
    out.set(linker_var(target.triple), target.linker);

    if target.requires_static_runtime {
        out.set(rustflags_var(target.triple), STATIC_CRT_FLAGS);
    }

    out.set(JOBS_VAR, jobs.to_string());
    Ok(out)
}
