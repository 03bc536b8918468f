//! Build configuration.
//!
//! Values come from, in order of precedence: command-line flags (or their
//! environment variables), `crossbuild.toml` in the project directory, and the
//! built-in defaults below.

use crate::targets::TargetDescriptor;
use crate::util::host;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;
use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "crossbuild.toml";
pub const DEFAULT_APP_NAME: &str = "htop-win";
/// Windows drive as mounted under WSL.
pub const DEFAULT_OUTPUT_DIR: &str = "/mnt/c/code";
pub const DEFAULT_LLVM_MINGW: &str = "/root/toolchains/llvm-mingw";

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub project: ProjectSection,

    #[serde(default)]
    pub paths: PathsSection,

    #[serde(default)]
    pub build: BuildSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectSection {
    pub app_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PathsSection {
    pub target_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub llvm_mingw: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildSection {
    pub jobs: Option<NonZeroUsize>,
}

impl FileConfig {
    /// Load `crossbuild.toml` from `project_dir` (or use defaults if it doesn't exist).
    pub fn load(project_dir: &Path) -> Result<Self> {
        let path = project_dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content =
            fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }
}

/// Values given explicitly on the command line or through the environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub project_dir: Option<PathBuf>,
    pub target_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub llvm_mingw: Option<PathBuf>,
    pub app_name: Option<String>,
    pub jobs: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub project_dir: PathBuf,
    /// Cargo's output root; per-triple trees live beneath it.
    pub target_dir: PathBuf,
    /// Staging directory for finished executables.
    pub output_dir: PathBuf,
    /// llvm-mingw install root (the ARM64 toolchain).
    pub llvm_mingw: PathBuf,
    pub app_name: String,
    pub jobs: usize,
    pub cargo: String,
    pub rustup: String,
}

impl Config {
    /// Built-in defaults for a project rooted at `project_dir`.
    pub fn for_project(project_dir: impl Into<PathBuf>) -> Self {
        let project_dir = project_dir.into();
        Self {
            target_dir: project_dir.join("target"),
            project_dir,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            llvm_mingw: PathBuf::from(DEFAULT_LLVM_MINGW),
            app_name: DEFAULT_APP_NAME.to_string(),
            jobs: host::cpu_count(),
            cargo: "cargo".to_string(),
            rustup: "rustup".to_string(),
        }
    }

    pub fn resolve(overrides: Overrides) -> Result<Self> {
        let project_dir = match overrides.project_dir {
            Some(dir) => std::path::absolute(&dir)
                .with_context(|| format!("Failed to resolve {}", dir.display()))?,
            None => env::current_dir().context("Failed to determine current directory")?,
        };
        let file = FileConfig::load(&project_dir)?;
        let mut cfg = Self::for_project(project_dir);

        let from_file = |p: PathBuf| cfg.project_dir.join(p);
        let target_dir = overrides.target_dir.or(file.paths.target_dir.map(from_file));
        let output_dir = overrides.output_dir.or(file.paths.output_dir.map(from_file));
        let llvm_mingw = overrides.llvm_mingw.or(file.paths.llvm_mingw.map(from_file));

        if let Some(dir) = target_dir {
            cfg.target_dir = dir;
        }
        if let Some(dir) = output_dir {
            cfg.output_dir = dir;
        }
        if let Some(dir) = llvm_mingw {
            cfg.llvm_mingw = dir;
        }
        if let Some(name) = overrides.app_name.or(file.project.app_name) {
            cfg.app_name = name;
        }
        if let Some(jobs) = overrides.jobs.or(file.build.jobs.map(NonZeroUsize::get)) {
            cfg.jobs = jobs.max(1);
        }

        Ok(cfg)
    }

    /// Cargo's output root as an absolute path. Relative values are taken
    /// against the project directory, where cargo runs.
    pub fn cargo_target_dir(&self) -> PathBuf {
        self.project_dir.join(&self.target_dir)
    }

    /// Directory prepended to PATH for targets built with llvm-mingw.
    pub fn alt_toolchain_bin(&self) -> PathBuf {
        self.llvm_mingw.join("bin")
    }

    pub fn binary_name(&self) -> String {
        format!("{}.exe", self.app_name)
    }

    /// Where cargo leaves the release executable for `target`.
    pub fn build_output_path(&self, target: &TargetDescriptor) -> PathBuf {
        self.cargo_target_dir()
            .join(target.triple)
            .join("release")
            .join(self.binary_name())
    }

    /// Target-qualified name in the staging directory, e.g. `htop-win-arm64.exe`.
    pub fn staged_path(&self, target: &TargetDescriptor) -> PathBuf {
        self.output_dir
            .join(format!("{}-{}.exe", self.app_name, target.name))
    }
}
