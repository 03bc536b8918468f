//! Prerequisite checks run before any build is attempted.

use crate::config::Config;
use crate::error::MissingToolError;
use crate::targets::Target;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

const CARGO_INSTALL_HINT: &str = "curl --proto '=https' --tlsv1.2 -sSf https://sh.rustup.rs | sh";

/// Verify cargo, the x64 mingw compiler, and the llvm-mingw ARM64 compiler,
/// stopping at the first one missing.
///
/// `search_path` is the PATH value tools are resolved against; `None` means
/// nothing is resolvable.
pub fn check_prerequisites(
    config: &Config,
    search_path: Option<&OsStr>,
) -> Result<(), MissingToolError> {
    eprintln!("[info] Checking prerequisites...");

    let cargo = require_on_path(
        &config.cargo,
        Some(CARGO_INSTALL_HINT),
        search_path,
        &config.project_dir,
    )?;
    eprintln!("[OK] {}", cargo.display());

    let x64 = Target::X64.descriptor();
    let cc = require_on_path(
        x64.compiler,
        Some(x64.install_hint),
        search_path,
        &config.project_dir,
    )?;
    eprintln!("[OK] {}", cc.display());

    let arm64 = Target::Arm64.descriptor();
    let clang = config.alt_toolchain_bin().join(arm64.compiler);
    if !clang.is_file() {
        return Err(MissingToolError::NotAtPath {
            tool: arm64.compiler.to_string(),
            path: clang,
            hint: Some(arm64.install_hint.to_string()),
        });
    }
    eprintln!("[OK] {}", clang.display());

    eprintln!("[info] All prerequisites met.");
    Ok(())
}

fn require_on_path(
    tool: &str,
    hint: Option<&str>,
    search_path: Option<&OsStr>,
    cwd: &Path,
) -> Result<PathBuf, MissingToolError> {
    search_path
        .and_then(|paths| which::which_in(tool, Some(paths), cwd).ok())
        .ok_or_else(|| {
            tracing::debug!(tool, ?search_path, "tool not resolvable");
            MissingToolError::NotOnPath {
                tool: tool.to_string(),
                hint: hint.map(str::to_string),
            }
        })
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::TempDir;

    struct Fixture {
        _tmp: TempDir,
        bin: PathBuf,
        config: Config,
    }

    fn fixture(path_tools: &[&str], with_clang: bool) -> Fixture {
        let tmp = TempDir::new().unwrap();
        let bin = tmp.path().join("bin");
        fs::create_dir_all(&bin).unwrap();
        for tool in path_tools {
            write_executable(&bin.join(tool));
        }

        let mut config = Config::for_project(tmp.path());
        config.llvm_mingw = tmp.path().join("llvm-mingw");
        if with_clang {
            let llvm_bin = config.alt_toolchain_bin();
            fs::create_dir_all(&llvm_bin).unwrap();
            write_executable(&llvm_bin.join("aarch64-w64-mingw32-clang"));
        }

        Fixture {
            _tmp: tmp,
            bin,
            config,
        }
    }

    fn write_executable(path: &Path) {
        fs::write(path, "#!/bin/sh\nexit 0\n").unwrap();
        fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
    }

    #[test]
    fn test_all_present() {
        let f = fixture(&["cargo", "x86_64-w64-mingw32-gcc"], true);
        check_prerequisites(&f.config, Some(f.bin.as_os_str())).unwrap();
    }

    #[test]
    fn test_missing_cargo_fails_first() {
        // Everything else present: the cargo check alone decides.
        let f = fixture(&["x86_64-w64-mingw32-gcc"], true);
        let err = check_prerequisites(&f.config, Some(f.bin.as_os_str())).unwrap_err();
        assert_eq!(err.tool(), "cargo");
        assert!(matches!(err, MissingToolError::NotOnPath { .. }));
        assert!(err.to_string().contains("https://sh.rustup.rs"));

        // ...and nothing else present gives the same answer.
        let f = fixture(&[], false);
        let err = check_prerequisites(&f.config, Some(f.bin.as_os_str())).unwrap_err();
        assert_eq!(err.tool(), "cargo");
    }

    #[test]
    fn test_missing_x64_compiler_has_hint() {
        let f = fixture(&["cargo"], true);
        let err = check_prerequisites(&f.config, Some(f.bin.as_os_str())).unwrap_err();
        assert_eq!(err.tool(), "x86_64-w64-mingw32-gcc");
        assert!(err.to_string().contains("apt install gcc-mingw-w64-x86-64"));
    }

    #[test]
    fn test_missing_llvm_mingw_reports_path() {
        let f = fixture(&["cargo", "x86_64-w64-mingw32-gcc"], false);
        let err = check_prerequisites(&f.config, Some(f.bin.as_os_str())).unwrap_err();
        match err {
            MissingToolError::NotAtPath { tool, path, .. } => {
                assert_eq!(tool, "aarch64-w64-mingw32-clang");
                assert_eq!(path, f.config.alt_toolchain_bin().join(tool));
            }
            other @ MissingToolError::NotOnPath { .. } => {
                unreachable!("expected NotAtPath, got {other}")
            }
        }
    }

    #[test]
    fn test_no_search_path() {
        let f = fixture(&["cargo", "x86_64-w64-mingw32-gcc"], true);
        let err = check_prerequisites(&f.config, None).unwrap_err();
        assert_eq!(err.tool(), "cargo");
    }

    #[test]
    fn test_non_executable_cargo_is_not_resolved() {
        let f = fixture(&["x86_64-w64-mingw32-gcc"], true);
        fs::write(f.bin.join("cargo"), "not a program").unwrap();
        let err = check_prerequisites(&f.config, Some(f.bin.as_os_str())).unwrap_err();
        assert_eq!(err.tool(), "cargo");
    }
}
