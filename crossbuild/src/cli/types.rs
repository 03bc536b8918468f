use crate::config::Overrides;
use crate::tasks::cross::Action;
use crate::targets::Target;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "crossbuild", version)]
#[command(about = "Cross-compile htop-win for Windows x64 and ARM64 from Linux/WSL")]
pub struct Cli {
    /// Action to perform.
    #[arg(value_enum, default_value_t = Action::BuildAll)]
    pub action: Action,

    /// Target architecture for `check` and `build`.
    #[arg(long, value_enum, default_value_t = Target::X64)]
    pub target: Target,

    /// Number of parallel jobs (default: all CPUs).
    #[arg(short = 'j', long, value_parser = clap::value_parser!(u32).range(1..))]
    pub jobs: Option<u32>,

    /// Project to build (contains Cargo.toml and optionally crossbuild.toml).
    #[arg(long, env = "CROSSBUILD_PROJECT_DIR", value_name = "PATH")]
    pub project_dir: Option<PathBuf>,

    /// Cargo output root (default: <project>/target).
    #[arg(long, env = "CARGO_TARGET_DIR", value_name = "PATH")]
    pub target_dir: Option<PathBuf>,

    /// Where finished executables are copied (default: /mnt/c/code).
    #[arg(long, env = "CROSSBUILD_OUTPUT_DIR", value_name = "PATH")]
    pub output_dir: Option<PathBuf>,

    /// llvm-mingw install root used for ARM64 (default: /root/toolchains/llvm-mingw).
    #[arg(long = "llvm-mingw", env = "CROSSBUILD_LLVM_MINGW", value_name = "PATH")]
    pub llvm_mingw: Option<PathBuf>,

    /// Executable name without `.exe` (default: htop-win).
    #[arg(long, env = "CROSSBUILD_APP_NAME", value_name = "NAME")]
    pub app_name: Option<String>,

    /// More log output (-v info, -vv debug, -vvv trace). CROSSBUILD_LOG overrides.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            project_dir: self.project_dir.clone(),
            target_dir: self.target_dir.clone(),
            output_dir: self.output_dir.clone(),
            llvm_mingw: self.llvm_mingw.clone(),
            app_name: self.app_name.clone(),
            jobs: self.jobs.map(|j| j as usize),
        }
    }
}
