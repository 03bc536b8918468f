#![allow(dead_code)]

use crossbuild::config::Config;
use crossbuild::util::process::{CommandRunner, Invocation};
use crossbuild::util::tools_env::BuildEnvironment;
use std::ffi::OsString;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const X64_TRIPLE: &str = "x86_64-pc-windows-gnu";
pub const ARM64_TRIPLE: &str = "aarch64-pc-windows-gnullvm";

/// Scratch project with stub tools: `cargo` and the x64 mingw gcc on a private
/// PATH, and an llvm-mingw tree holding the ARM64 clang.
pub struct Workspace {
    pub tmp: TempDir,
    pub stub_bin: PathBuf,
    pub config: Config,
}

impl Workspace {
    pub fn new() -> Self {
        let tmp = TempDir::new().unwrap();
        let stub_bin = tmp.path().join("stub-bin");
        fs::create_dir_all(&stub_bin).unwrap();
        write_script(&stub_bin.join("cargo"), "exit 0\n");
        write_script(&stub_bin.join("x86_64-w64-mingw32-gcc"), "exit 0\n");

        let project = tmp.path().join("htop-win");
        fs::create_dir_all(&project).unwrap();

        let mut config = Config::for_project(&project);
        config.output_dir = tmp.path().join("staged");
        config.llvm_mingw = tmp.path().join("llvm-mingw");
        config.jobs = 4;

        let llvm_bin = config.alt_toolchain_bin();
        fs::create_dir_all(&llvm_bin).unwrap();
        write_script(&llvm_bin.join("aarch64-w64-mingw32-clang"), "exit 0\n");

        Self {
            tmp,
            stub_bin,
            config,
        }
    }

    pub fn remove_stub(&self, tool: &str) {
        fs::remove_file(self.stub_bin.join(tool)).unwrap();
    }

    pub fn remove_llvm_mingw(&self) {
        fs::remove_dir_all(&self.config.llvm_mingw).unwrap();
    }

    /// Host environment whose PATH is only the stub directory.
    pub fn host(&self) -> BuildEnvironment {
        BuildEnvironment::from_host([
            (OsString::from("PATH"), self.stub_bin.clone().into_os_string()),
            (OsString::from("HOME"), self.tmp.path().as_os_str().to_owned()),
            (OsString::from("CROSSBUILD_TEST_MARKER"), OsString::from("1")),
        ])
    }

    pub fn staged(&self, name: &str) -> PathBuf {
        self.config.output_dir.join(format!("htop-win-{name}.exe"))
    }

    /// CLI arguments pinning every path to this workspace.
    pub fn cli_args<'a>(&'a self, action_args: &[&'a str]) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec!["crossbuild".into()];
        args.extend(action_args.iter().map(OsString::from));
        args.extend([
            "--project-dir".into(),
            self.config.project_dir.clone().into_os_string(),
            "--target-dir".into(),
            self.config.target_dir.clone().into_os_string(),
            "--output-dir".into(),
            self.config.output_dir.clone().into_os_string(),
            "--llvm-mingw".into(),
            self.config.llvm_mingw.clone().into_os_string(),
            "--app-name".into(),
            "htop-win".into(),
            "-j".into(),
            "4".into(),
        ]);
        args
    }
}

pub fn write_script(path: &Path, body: &str) {
    fs::write(path, format!("#!/bin/sh\n{body}")).unwrap();
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
}

/// Scripted stand-in for rustup and cargo.
///
/// A successful `cargo build` writes an executable into the per-triple
/// release directory under the output root cargo would pick: `--target-dir`,
/// then `CARGO_TARGET_DIR`, then `<cwd>/target`.
pub struct FakeCargo {
    binary_name: String,
    failing: Vec<&'static str>,
    no_output: Vec<&'static str>,
    rustup_fails: bool,
    pub calls: Vec<Invocation>,
}

impl FakeCargo {
    pub fn new(config: &Config) -> Self {
        Self {
            binary_name: config.binary_name(),
            failing: Vec::new(),
            no_output: Vec::new(),
            rustup_fails: false,
            calls: Vec::new(),
        }
    }

    /// cargo exits non-zero for `triple`.
    pub fn failing(mut self, triple: &'static str) -> Self {
        self.failing.push(triple);
        self
    }

    /// cargo exits zero for `triple` but leaves no executable behind.
    pub fn without_output(mut self, triple: &'static str) -> Self {
        self.no_output.push(triple);
        self
    }

    pub fn rustup_fails(mut self) -> Self {
        self.rustup_fails = true;
        self
    }

    pub fn program_calls(&self, program: &str) -> Vec<&Invocation> {
        self.calls.iter().filter(|c| c.program == program).collect()
    }

    pub fn cargo_triples(&self) -> Vec<String> {
        self.program_calls("cargo")
            .into_iter()
            .filter_map(|c| c.flag_value("--target"))
            .map(|t| t.to_string_lossy().into_owned())
            .collect()
    }
}

impl CommandRunner for FakeCargo {
    fn run(&mut self, invocation: &Invocation) -> bool {
        self.calls.push(invocation.clone());

        if invocation.program == "rustup" {
            return !self.rustup_fails;
        }

        let triple = invocation
            .flag_value("--target")
            .map(|t| t.to_string_lossy().into_owned())
            .unwrap_or_default();
        if self.failing.contains(&triple.as_str()) {
            return false;
        }

        let is_build = invocation.args.first().is_some_and(|a| a == "build");
        if is_build && !self.no_output.contains(&triple.as_str()) {
            let release = output_root(invocation).join(&triple).join("release");
            fs::create_dir_all(&release).unwrap();
            fs::write(release.join(&self.binary_name), format!("MZ fake {triple}")).unwrap();
        }
        true
    }
}

/// Output root a real cargo would use for `invocation`, relative paths taken
/// against its working directory.
pub fn output_root(invocation: &Invocation) -> PathBuf {
    let root = invocation
        .flag_value("--target-dir")
        .map(PathBuf::from)
        .or_else(|| invocation.env.get("CARGO_TARGET_DIR").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("target"));
    invocation.cwd.join(root)
}
